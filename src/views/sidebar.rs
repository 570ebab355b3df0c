// ============================================================================
// SIDEBAR VIEW - Navegación agrupada por recurso
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child};
use crate::routing::catalog;
use crate::routing::router::{ADD_DEVICE_FRAGMENT, DEVICE_ADD_FRAGMENT};
use crate::state::AppState;
use crate::utils::constants::HOME_FRAGMENT;

fn nav_link(label: &str, fragment: &str, current: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("a")?
        .attr("href", fragment)?
        .class("nav-link")
        .class_if("active", fragment == current)?
        .text(label)
        .build())
}

fn nav_group(title: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("nav-group-title")
        .text(title)
        .build())
}

pub fn render_sidebar(state: &AppState) -> Result<Element, JsValue> {
    let current = state.current_route().fragment();
    let nav = ElementBuilder::new("nav")?.class("sidebar-nav").build();

    append_child(&nav, &nav_group("Introduction")?)?;
    append_child(&nav, &nav_link("Overview", HOME_FRAGMENT, &current)?)?;
    append_child(&nav, &nav_link("Device access", DEVICE_ADD_FRAGMENT, &current)?)?;
    append_child(&nav, &nav_link("Add device", ADD_DEVICE_FRAGMENT, &current)?)?;

    for (section, endpoints) in catalog::sections() {
        append_child(&nav, &nav_group(section)?)?;
        for endpoint in endpoints {
            let link = nav_link(endpoint.title, &endpoint.fragment(), &current)?;
            let badge = ElementBuilder::new("span")?
                .class(&format!("method method-{}", endpoint.method.as_str().to_lowercase()))
                .text(endpoint.method.as_str())
                .build();
            append_child(&link, &badge)?;
            append_child(&nav, &link)?;
        }
    }

    Ok(nav)
}
