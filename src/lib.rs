// ============================================================================
// CUB API DOCS - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Sesión + formularios
// - Services: Magic, API de CUB, almacenamiento
// - State: State Management con Rc<RefCell>
// - Models: Sesión, endpoints y respuestas de la API
// ============================================================================

mod config;
mod models;
mod routing;
mod services;
mod viewmodels;
mod state;
mod dom;
mod views;
mod utils;
mod app;

#[cfg(test)]
mod testing;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::services::identity_service::MagicBridge;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 CUB API Docs {} - Rust Puro + MVVM", CONFIG.api_version);

    // Sin Magic la app sigue: la sesión cae al token guardado
    let bridge = MagicBridge::init(&CONFIG.magic_publishable_key).unwrap_or_else(|e| {
        log::error!("❌ {}", e);
        MagicBridge::default()
    });

    let mut app = App::new(bridge)?;
    app.install_listeners()?;
    app.render()?;
    app.start();

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Función pública para re-renderizar la app (re-render completo)
pub fn rerender_app() {
    APP.with(|app_cell| {
        if let Some(ref mut app) = *app_cell.borrow_mut() {
            if let Err(e) = app.render() {
                log::error!("❌ Error re-renderizando: {:?}", e);
            }
        } else {
            log::warn!("⚠️ [RERENDER] App no está inicializada");
        }
    });
}
