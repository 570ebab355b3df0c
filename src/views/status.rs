// ============================================================================
// STATUS VIEWS - Carga y página no encontrada
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;

pub fn render_loading() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .child(ElementBuilder::new("p")?.text("Loading user session...").build())?
        .build())
}

pub fn render_not_found(hash: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("p")?
        .class("not-found")
        .text(&format!("Page not found for: {}", hash))
        .build())
}
