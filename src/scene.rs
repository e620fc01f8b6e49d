//! Scene measurement: page images to bounding-box records.
//!
//! Kept free of any GL state so scene construction can be exercised without a
//! rendering context; the effect turns each record into a textured plane.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlImageElement};

use crate::layout::Bounds;

/// A page image and its bounding box, cached at measurement time.
pub struct ImageRecord {
    pub element: HtmlImageElement,
    pub bounds: Bounds,
}

/// Measure every `<img>` on the page, in document order. `scroll` is the
/// scroll offset at measurement time, folded in so cached tops are
/// document-relative no matter where the page sits when the scene is built.
/// Zero-sized images still produce a record.
pub fn measure_images(document: &Document, scroll: f32) -> Result<Vec<ImageRecord>, JsValue> {
    let images = document.query_selector_all("img")?;
    let mut records = Vec::with_capacity(images.length() as usize);
    for i in 0..images.length() {
        let Some(node) = images.get(i) else { continue };
        let element: HtmlImageElement = node.dyn_into()?;
        let rect = element.get_bounding_client_rect();
        records.push(ImageRecord {
            bounds: Bounds {
                top: rect.top() as f32 + scroll,
                left: rect.left() as f32,
                width: rect.width() as f32,
                height: rect.height() as f32,
            },
            element,
        });
    }
    Ok(records)
}
