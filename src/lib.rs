#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Scroll-synced WebGL image effect.
//!
//! Page images are mirrored by textured planes in a WebGL2 scene, displaced
//! by a wave shader and kept in register with the document as it scrolls.
//! The math lives in target-independent modules so it can be tested on the
//! host; everything touching the browser is gated behind wasm32.

pub mod camera;
pub mod geometry;
pub mod layout;
pub mod material;
pub mod picking;
pub mod scroll;
pub mod shaders;

#[cfg(target_arch = "wasm32")]
pub mod scene;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;

    mod assets;
    mod effect;
    mod gl;

    use crate::material::HoverMode;
    use effect::EffectOptions;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("scrollfx starting");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let container = document
            .get_element_by_id("container")
            .ok_or("container not found")?
            .dyn_into::<web_sys::HtmlElement>()?;

        let options = EffectOptions {
            container,
            fonts: vec!["Open Sans".into(), "Playfair Display".into()],
            hover_mode: HoverMode::Sticky,
            ocean_src: "img/ocean.jpg".into(),
        };

        spawn_local(async move {
            match effect::start(options).await {
                // The demo page runs the effect until unload; keep the loop
                // alive without holding the cancel handle anywhere.
                Ok(handle) => handle.forget(),
                Err(e) => log::error!("effect init failed: {:?}", e),
            }
        });
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
