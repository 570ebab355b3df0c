// ============================================================================
// HEADER VIEW - Marca, versión, usuario y logout
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{ElementBuilder, append_child, on_click};
use crate::views::ViewContext;

const MENU_ICON: &str = r#"<svg width="24" height="24" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M4 6h16M4 12h16M4 18h16"></path></svg>"#;

pub fn render_header(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = &ctx.state;
    let email = state.session.email();
    let has_token = state.session.token().is_some();

    let header = ElementBuilder::new("header")?.class("app-header").build();

    let brand = ElementBuilder::new("div")?
        .class("brand")
        .html(r#"CUB / <span class="brand-accent">API</span>"#)
        .build();
    append_child(&header, &brand)?;

    let version = ElementBuilder::new("div")?
        .class("version")
        .text(&CONFIG.api_version)
        .build();
    append_child(&header, &version)?;

    if let Some(email) = &email {
        let user = ElementBuilder::new("div")?
            .class("user-email")
            .text(&format!("Logged in as: {}", email))
            .build();
        append_child(&header, &user)?;
    }

    if email.is_some() || has_token {
        let logout_btn = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn btn-danger")
            .text("Logout")
            .build();
        let session = ctx.session.clone();
        on_click(&logout_btn, move |_| {
            let session = session.clone();
            spawn_local(async move { session.logout().await });
        })?;
        append_child(&header, &logout_btn)?;
    }

    if *state.is_mobile.borrow() {
        let menu_btn = ElementBuilder::new("button")?
            .attr("type", "button")?
            .attr("aria-label", "Toggle menu")?
            .class("btn-menu")
            .html(MENU_ICON)
            .build();
        let state_clone = state.clone();
        on_click(&menu_btn, move |_| state_clone.toggle_sidebar())?;
        append_child(&header, &menu_btn)?;
    }

    Ok(header)
}
