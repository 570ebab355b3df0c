// ============================================================================
// VIEWS - Funciones que renderizan DOM (sin lógica)
// ============================================================================

use crate::services::api_client::ApiClient;
use crate::services::identity_service::MagicBridge;
use crate::state::AppState;
use crate::viewmodels::SessionViewModel;

pub mod app;
pub mod header;
pub mod sidebar;
pub mod home;
pub mod endpoint_doc;
pub mod device;
pub mod status;

pub use app::render_app;

pub type WebSessionViewModel = SessionViewModel<MagicBridge, ApiClient>;

/// Lo que necesita cada vista: estado + acciones de sesión
#[derive(Clone)]
pub struct ViewContext {
    pub state: AppState,
    pub session: WebSessionViewModel,
}
