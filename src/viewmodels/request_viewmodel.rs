// ============================================================================
// REQUEST VIEWMODEL - Formulario "try it" de cada endpoint
// ============================================================================

use crate::config::CONFIG;
use crate::models::endpoint::EndpointDescriptor;
use crate::services::api_client::ApiClient;
use crate::services::request_builder::{build_request, PreparedRequest};
use crate::state::AppState;

pub struct RequestViewModel {
    state: AppState,
    client: ApiClient,
}

impl RequestViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            client: ApiClient::new(),
        }
    }

    /// Construye la petición con los valores del formulario y las credenciales de la sesión.
    /// Los errores de validación quedan en `try_it.error`.
    pub fn prepare(&self, descriptor: &'static EndpointDescriptor) -> Option<PreparedRequest> {
        self.state.ensure_try_it(descriptor);
        let values = self.state.try_it.borrow().values.clone();
        let credentials = self.state.session.credentials();

        let result = build_request(descriptor, &values, &credentials, &CONFIG.api_base_url);
        let mut try_it = self.state.try_it.borrow_mut();
        match result {
            Ok(request) => {
                try_it.sending = true;
                try_it.error = None;
                try_it.response = None;
                Some(request)
            }
            Err(msg) => {
                log::warn!("⚠️ Formulario inválido: {}", msg);
                try_it.error = Some(msg);
                None
            }
        }
    }

    /// Envía y guarda el resultado si el formulario sigue siendo el mismo endpoint
    pub async fn send(&self, descriptor: &'static EndpointDescriptor, request: PreparedRequest) {
        let result = self.client.send(&request).await;
        {
            let mut try_it = self.state.try_it.borrow_mut();
            if try_it.endpoint_key != Some(descriptor.key) {
                return;
            }
            try_it.sending = false;
            match result {
                Ok(response) => try_it.response = Some(response),
                Err(e) => {
                    log::error!("❌ {}", e);
                    try_it.error = Some(e.to_string());
                }
            }
        }
        self.state.notify_subscribers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionEvent;
    use crate::config::AuthErrorPolicy;
    use crate::routing::catalog::find;

    #[test]
    fn prepare_uses_session_credentials() {
        let state = AppState::new("#users-get", 1280.0, 1024);
        state.session.apply(SessionEvent::InitFinished, AuthErrorPolicy::Keep);
        state.session.apply(SessionEvent::TokenSet("abc123".into()), AuthErrorPolicy::Keep);
        let vm = RequestViewModel::new(state.clone());

        let request = vm.prepare(find("users-get").unwrap()).unwrap();

        assert!(request.url.ends_with("/users/get"));
        assert!(request.headers.contains(&("token".to_string(), "abc123".to_string())));
        assert!(state.try_it.borrow().sending);
    }

    #[test]
    fn prepare_reports_missing_path_params() {
        let state = AppState::new("#reactions-add", 1280.0, 1024);
        let vm = RequestViewModel::new(state.clone());

        assert!(vm.prepare(find("reactions-add").unwrap()).is_none());

        let try_it = state.try_it.borrow();
        assert!(!try_it.sending);
        assert!(try_it.error.as_deref().unwrap_or_default().contains("content_id"));
    }
}
