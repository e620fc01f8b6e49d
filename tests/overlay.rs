#![cfg(target_arch = "wasm32")]

//! Browser-runnable checks of the pointer → ray → hover pipeline and the
//! scroll/overlay invariants, end to end through the public modules.

use wasm_bindgen_test::*;

use glam::Vec2;
use scrollfx_wasm::camera::Camera;
use scrollfx_wasm::layout::{plane_position, Bounds, Viewport};
use scrollfx_wasm::material::{HoverMode, MaterialTemplate};
use scrollfx_wasm::picking::{nearest_hit, pointer_to_ndc, Quad};
use scrollfx_wasm::scroll::ScrollTracker;

wasm_bindgen_test_configure!(run_in_browser);

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn quad_for(bounds: &Bounds, scroll: f32) -> Quad {
    let (x, y) = plane_position(bounds, scroll, &VP);
    Quad {
        center: Vec2::new(x, y),
        width: bounds.width,
        height: bounds.height,
    }
}

#[wasm_bindgen_test]
fn pointer_over_image_center_hits_center_uv() {
    // An image whose on-screen box is (top 100, left 200, 400x200); the
    // pointer sits on its center pixel.
    let bounds = Bounds {
        top: 100.0,
        left: 200.0,
        width: 400.0,
        height: 200.0,
    };
    let camera = Camera::new(VP.width, VP.height);
    let (ndc_x, ndc_y) = pointer_to_ndc(400.0, 200.0, VP.width, VP.height);
    let ray = camera.ray_from_ndc(ndc_x, ndc_y);

    let (idx, hit) = nearest_hit(&ray, [quad_for(&bounds, 0.0)]).expect("pointer should hit");
    assert_eq!(idx, 0);
    assert!((hit.uv.x - 0.5).abs() < 1e-3, "uv.x = {}", hit.uv.x);
    assert!((hit.uv.y - 0.5).abs() < 1e-3, "uv.y = {}", hit.uv.y);
}

#[wasm_bindgen_test]
fn pointer_miss_keeps_sticky_hover() {
    let template = MaterialTemplate::new("v", "f");
    let mut material = template.instantiate();
    material.set_hover(Vec2::new(0.1, 0.9));

    let bounds = Bounds {
        top: 100.0,
        left: 200.0,
        width: 50.0,
        height: 50.0,
    };
    let camera = Camera::new(VP.width, VP.height);
    let (ndc_x, ndc_y) = pointer_to_ndc(1200.0, 700.0, VP.width, VP.height);
    let ray = camera.ray_from_ndc(ndc_x, ndc_y);

    assert!(nearest_hit(&ray, [quad_for(&bounds, 0.0)]).is_none());
    material.on_miss(HoverMode::Sticky);
    assert_eq!(material.hover(), Vec2::new(0.1, 0.9));
}

#[wasm_bindgen_test]
fn smoothed_scroll_settles_to_exact_offset() {
    let bounds = Bounds {
        top: 2000.0,
        left: 0.0,
        width: 640.0,
        height: 480.0,
    };
    let (_, y_rest) = plane_position(&bounds, 0.0, &VP);

    let mut tracker = ScrollTracker::new();
    tracker.set_target(500.0);
    for _ in 0..300 {
        tracker.update();
    }
    let (_, y_scrolled) = plane_position(&bounds, tracker.value(), &VP);
    assert_eq!(y_scrolled - y_rest, 500.0);
}
