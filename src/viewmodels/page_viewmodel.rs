// ============================================================================
// PAGE VIEWMODEL - Qué página mostrar para (ruta, sesión)
// ============================================================================

use crate::models::endpoint::EndpointDescriptor;
use crate::models::session::{Session, SessionPhase};
use crate::routing::Route;
use crate::services::request_builder::RequestCredentials;

/// Acceso al formulario de pruebas de un endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointAccess {
    Ready(RequestCredentials),
    /// Requiere token y no hay ninguno: se muestra el aviso con enlace a `#device-add`
    AuthRequired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    Home,
    Endpoint {
        descriptor: &'static EndpointDescriptor,
        access: EndpointAccess,
    },
    DeviceAdd,
    AddDevice,
    NotFound(String),
}

pub fn resolve_page(route: &Route, session: &Session) -> PageView {
    if session.phase() == SessionPhase::Initializing {
        return PageView::Loading;
    }
    match route {
        Route::Home => PageView::Home,
        Route::Endpoint(descriptor) => {
            let access = if descriptor.requires_auth && !session.has_token() {
                EndpointAccess::AuthRequired
            } else {
                EndpointAccess::Ready(RequestCredentials {
                    token: session.app_token.clone(),
                    profile: session.profile_id.clone(),
                })
            };
            PageView::Endpoint { descriptor, access }
        }
        Route::DeviceAdd => PageView::DeviceAdd,
        Route::AddDevice => PageView::AddDevice,
        Route::NotFound(hash) => PageView::NotFound(hash.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::resolve;

    fn ready_session(token: Option<&str>, profile: Option<&str>) -> Session {
        Session {
            app_token: token.map(str::to_string),
            profile_id: profile.map(str::to_string),
            ..Session::default()
        }
    }

    #[test]
    fn loading_blocks_every_route() {
        assert_eq!(resolve_page(&resolve("#bookmarks-all"), &Session::initializing()), PageView::Loading);
    }

    #[test]
    fn protected_endpoint_without_token_asks_for_auth() {
        let page = resolve_page(&resolve("#bookmarks-all"), &ready_session(None, None));
        assert!(matches!(
            page,
            PageView::Endpoint { access: EndpointAccess::AuthRequired, .. }
        ));
    }

    #[test]
    fn protected_endpoint_with_token_renders_panel() {
        let page = resolve_page(&resolve("#bookmarks-all"), &ready_session(Some("abc123"), Some("536380")));
        match page {
            PageView::Endpoint { descriptor, access: EndpointAccess::Ready(credentials) } => {
                assert_eq!(descriptor.method.as_str(), "GET");
                assert_eq!(descriptor.path, "/bookmarks/all");
                assert_eq!(credentials.profile.as_deref(), Some("536380"));
            }
            other => panic!("unexpected page {:?}", other),
        }
    }

    #[test]
    fn public_endpoint_needs_no_token() {
        let page = resolve_page(&resolve("#reactions-get"), &ready_session(None, None));
        assert!(matches!(
            page,
            PageView::Endpoint { access: EndpointAccess::Ready(_), .. }
        ));
    }

    #[test]
    fn unknown_fragment_renders_placeholder() {
        assert_eq!(
            resolve_page(&resolve("#missing"), &ready_session(None, None)),
            PageView::NotFound("#missing".into())
        );
    }
}
