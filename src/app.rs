// ============================================================================
// APP - Aplicación principal
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, inner_width, location_hash, on_window, set_inner_html, set_location_hash};
use crate::services::api_client::ApiClient;
use crate::services::credential_service::BrowserCredentialStore;
use crate::services::identity_service::MagicBridge;
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::{render_app, ViewContext};

/// Aplicación principal
pub struct App {
    ctx: ViewContext,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new(bridge: MagicBridge) -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(&location_hash(), inner_width(), CONFIG.mobile_breakpoint_px);

        let nav_state = state.clone();
        let session = SessionViewModel::new(
            Rc::new(bridge),
            Rc::new(ApiClient::new()),
            Rc::new(BrowserCredentialStore::new()),
            state.session.clone(),
            CONFIG.auth_error_policy,
            Rc::new(move |fragment: &str| {
                set_location_hash(fragment);
                nav_state.navigate(fragment);
            }),
        );

        // Re-render agrupado: varios cambios seguidos → un solo render
        let pending = Rc::new(Cell::new(false));
        let schedule = move || {
            if pending.replace(true) {
                return;
            }
            let pending = pending.clone();
            Timeout::new(0, move || {
                pending.set(false);
                crate::rerender_app();
            })
            .forget();
        };
        let schedule = Rc::new(schedule);
        {
            let schedule = schedule.clone();
            state.subscribe_to_changes(move || schedule());
        }
        state.session.subscribe(move || schedule());

        Ok(Self {
            ctx: ViewContext { state, session },
            root,
        })
    }

    /// Listeners globales: registrar UNA sola vez
    pub fn install_listeners(&self) -> Result<(), JsValue> {
        let state = self.ctx.state.clone();
        on_window("hashchange", move |_| state.navigate(&location_hash()))?;

        let state = self.ctx.state.clone();
        on_window("resize", move |_| state.apply_width(inner_width(), CONFIG.mobile_breakpoint_px))?;
        Ok(())
    }

    /// Arranca la sesión en segundo plano
    pub fn start(&self) {
        let session = self.ctx.session.clone();
        wasm_bindgen_futures::spawn_local(async move { session.init().await });
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.ctx)?;
        append_child(&self.root, &view)
    }
}
