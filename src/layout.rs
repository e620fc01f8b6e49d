//! Mapping between DOM layout rectangles and world-space plane positions.
//!
//! The renderer uses a center-origin coordinate space where one world unit
//! equals one CSS pixel at the image plane (the camera fov is derived to make
//! that hold). DOM rectangles are top-left origin with Y growing downward, so
//! the two conversions below are the load-bearing arithmetic of the effect.

/// Bounding box of an element in page layout coordinates, captured once at
/// scene-build time. `top` is relative to the document at capture, not the
/// viewport; scrolling is applied at reposition time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// World-space center of a plane overlaying `bounds` at the given scroll
/// offset. At `scroll == 0` the plane exactly covers the element's on-screen
/// box; scrolling by Δ moves every plane up by exactly Δ.
pub fn plane_position(bounds: &Bounds, scroll: f32, viewport: &Viewport) -> (f32, f32) {
    let x = bounds.left - viewport.width / 2.0 + bounds.width / 2.0;
    let y = scroll - bounds.top + viewport.height / 2.0 - bounds.height / 2.0;
    (x, y)
}

/// Inverse of [`plane_position`]: recover the DOM box a plane center occupies
/// on screen. Used to check the overlay invariant.
pub fn screen_box(x: f32, y: f32, width: f32, height: f32, scroll: f32, viewport: &Viewport) -> Bounds {
    Bounds {
        left: x + viewport.width / 2.0 - width / 2.0,
        top: scroll - y + viewport.height / 2.0 - height / 2.0,
        width,
        height,
    }
}
