#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use scrollfx_wasm::geometry::PlaneMesh;
use scrollfx_wasm::layout::{plane_position, screen_box, Bounds, Viewport};
use scrollfx_wasm::scene::measure_images;

wasm_bindgen_test_configure!(run_in_browser);

/// Build a minimal page fixture: a container and a couple of absolutely
/// sized images, like the demo page the effect runs against.
fn fixture(document: &web_sys::Document) -> web_sys::Element {
    let body = document.body().expect("no body");
    let container = document.create_element("div").unwrap();
    container.set_id("fx-fixture");
    container
        .set_attribute("style", "position:relative;width:640px;height:960px;")
        .unwrap();
    for top in [40, 400] {
        let img = document.create_element("img").unwrap();
        img.set_attribute(
            "style",
            &format!("position:absolute;top:{top}px;left:20px;width:300px;height:200px;"),
        )
        .unwrap();
        container.append_child(&img).unwrap();
    }
    body.append_child(&container).unwrap();
    container
}

#[wasm_bindgen_test]
fn every_image_gets_measurable_bounds() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = fixture(&document);

    let images = document.query_selector_all("#fx-fixture img").unwrap();
    assert_eq!(images.length(), 2);

    for i in 0..images.length() {
        let img: web_sys::HtmlImageElement = images.get(i).unwrap().dyn_into().unwrap();
        let rect = img.get_bounding_client_rect();
        assert_eq!(rect.width(), 300.0);
        assert_eq!(rect.height(), 200.0);
    }

    container.remove();
}

#[wasm_bindgen_test]
fn one_plane_per_image_with_source_dimensions() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = fixture(&document);

    let records = measure_images(&document, 0.0).unwrap();
    let image_count = document.query_selector_all("img").unwrap().length() as usize;
    assert_eq!(records.len(), image_count);
    assert_eq!(records.len(), 2);

    for record in &records {
        assert_eq!(record.bounds.width, 300.0);
        assert_eq!(record.bounds.height, 200.0);

        // The plane built from a record spans exactly the source box.
        let mesh = PlaneMesh::new(record.bounds.width, record.bounds.height);
        let xs: Vec<f32> = mesh.positions.iter().step_by(3).copied().collect();
        let ys: Vec<f32> = mesh.positions.iter().skip(1).step_by(3).copied().collect();
        let span_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
            - xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let span_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
            - ys.iter().cloned().fold(f32::INFINITY, f32::min);
        assert_eq!(span_x, record.bounds.width);
        assert_eq!(span_y, record.bounds.height);
    }

    container.remove();
}

#[wasm_bindgen_test]
fn dom_rect_round_trips_through_world_space() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container = fixture(&document);

    let viewport = Viewport {
        width: 640.0,
        height: 960.0,
    };
    let images = document.query_selector_all("#fx-fixture img").unwrap();
    for i in 0..images.length() {
        let img: web_sys::HtmlImageElement = images.get(i).unwrap().dyn_into().unwrap();
        let rect = img.get_bounding_client_rect();
        let bounds = Bounds {
            top: rect.top() as f32,
            left: rect.left() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        };
        let (x, y) = plane_position(&bounds, 0.0, &viewport);
        let back = screen_box(x, y, bounds.width, bounds.height, 0.0, &viewport);
        assert!((back.top - bounds.top).abs() < 1e-3);
        assert!((back.left - bounds.left).abs() < 1e-3);
    }

    container.remove();
}
