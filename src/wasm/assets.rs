//! Asset preloading: web fonts and page images.
//!
//! Everything is joined into one `Promise.all`; there is deliberately no
//! timeout or retry — an asset that never loads stalls the effect, which is
//! preferable to building planes from half-decoded images.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlImageElement, Window};

/// Wait until the named fonts and every image on the page — `<img>` elements
/// and CSS background images alike — have finished loading.
pub async fn preload(window: &Window, document: &Document, fonts: &[String]) -> Result<(), JsValue> {
    let pending = Array::new();

    let font_set = document.fonts();
    for font in fonts {
        pending.push(&font_set.load(&format!("1em {}", font))?);
    }

    let images = document.query_selector_all("img")?;
    for i in 0..images.length() {
        if let Some(node) = images.get(i) {
            if let Ok(img) = node.dyn_into::<HtmlImageElement>() {
                pending.push(&img.decode());
            }
        }
    }

    for url in background_urls(window, document)? {
        let img = HtmlImageElement::new()?;
        img.set_src(&url);
        pending.push(&img.decode());
    }

    log::info!("preloading {} assets", pending.length());
    JsFuture::from(js_sys::Promise::all(&pending)).await?;
    Ok(())
}

/// Load and decode a single image by URL.
pub async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    img.set_src(src);
    JsFuture::from(img.decode()).await?;
    Ok(img)
}

/// Scan computed styles for `background-image: url(...)` references.
fn background_urls(window: &Window, document: &Document) -> Result<Vec<String>, JsValue> {
    let mut urls = Vec::new();
    let nodes = document.query_selector_all("*")?;
    for i in 0..nodes.length() {
        let Some(node) = nodes.get(i) else { continue };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let Some(style) = window.get_computed_style(&element)? else {
            continue;
        };
        let value = style.get_property_value("background-image")?;
        if let Some(url) = css_url(&value) {
            urls.push(url);
        }
    }
    Ok(urls)
}

/// First `url(...)` argument of a computed background-image value, quotes
/// stripped. Gradients and `none` yield `None`.
fn css_url(value: &str) -> Option<String> {
    let start = value.find("url(")? + 4;
    let rest = &value[start..];
    let end = rest.find(')')?;
    let url = rest[..end].trim().trim_matches('"').trim_matches('\'');
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}
