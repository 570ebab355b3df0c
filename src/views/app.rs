// ============================================================================
// APP VIEW - Layout: header + sidebar + contenido
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{ElementBuilder, append_child, on_click};
use crate::viewmodels::{resolve_page, PageView};
use crate::views::{device, endpoint_doc, header, home, sidebar, status, ViewContext};

/// Renderizar la aplicación completa
pub fn render_app(ctx: &ViewContext) -> Result<Element, JsValue> {
    let state = &ctx.state;
    let is_mobile = *state.is_mobile.borrow();
    let sidebar_open = *state.sidebar_open.borrow();

    let shell = ElementBuilder::new("div")?.class("app-shell").build();
    append_child(&shell, &header::render_header(ctx)?)?;

    let layout = ElementBuilder::new("div")?.class("app-layout").build();

    let aside = ElementBuilder::new("aside")?
        .class("sidebar")
        .class_if("drawer", is_mobile)?
        .class_if("open", is_mobile && sidebar_open)?
        .child(sidebar::render_sidebar(state)?)?
        .build();
    append_child(&layout, &aside)?;

    if is_mobile && sidebar_open {
        let overlay = ElementBuilder::new("div")?.class("sidebar-overlay").build();
        let state_clone = state.clone();
        on_click(&overlay, move |_| state_clone.toggle_sidebar())?;
        append_child(&layout, &overlay)?;
    }

    let main = ElementBuilder::new("main")?.class("content").build();
    let page = resolve_page(&state.current_route(), &state.session.snapshot());
    let body = match page {
        PageView::Loading => status::render_loading()?,
        PageView::Home => home::render_home()?,
        PageView::Endpoint { descriptor, access } => endpoint_doc::render_endpoint(ctx, descriptor, &access)?,
        PageView::DeviceAdd => device::render_device_add(ctx)?,
        PageView::AddDevice => device::render_add_device()?,
        PageView::NotFound(hash) => status::render_not_found(&hash)?,
    };
    append_child(&main, &body)?;
    append_child(&layout, &main)?;

    append_child(&shell, &layout)?;
    Ok(shell)
}
