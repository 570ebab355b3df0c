// ============================================================================
// ROUTER - Fragmento de la URL → página
// ============================================================================
// Función pura; la escucha de `hashchange` vive en App
// ============================================================================

use crate::models::endpoint::EndpointDescriptor;
use crate::routing::catalog;

pub const DEVICE_ADD_FRAGMENT: &str = "#device-add";
pub const ADD_DEVICE_FRAGMENT: &str = "#add-device";

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Endpoint(&'static EndpointDescriptor),
    /// Token de acceso del dispositivo (login + generación de token)
    DeviceAdd,
    /// Instrucciones para vincular un dispositivo
    AddDevice,
    NotFound(String),
}

impl Route {
    /// Fragmento canónico de la ruta
    pub fn fragment(&self) -> String {
        match self {
            Route::Home => "#home".to_string(),
            Route::Endpoint(descriptor) => descriptor.fragment(),
            Route::DeviceAdd => DEVICE_ADD_FRAGMENT.to_string(),
            Route::AddDevice => ADD_DEVICE_FRAGMENT.to_string(),
            Route::NotFound(hash) => hash.clone(),
        }
    }
}

/// Resuelve `location.hash`; vacío o `#` es la portada
pub fn resolve(hash: &str) -> Route {
    let hash = hash.trim();
    let key = hash.strip_prefix('#').unwrap_or(hash);
    match key {
        "" | "home" => Route::Home,
        "device-add" => Route::DeviceAdd,
        "add-device" => Route::AddDevice,
        _ => match catalog::find(key) {
            Some(descriptor) => Route::Endpoint(descriptor),
            None => Route::NotFound(hash.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_is_home() {
        assert_eq!(resolve(""), Route::Home);
        assert_eq!(resolve("#"), Route::Home);
        assert_eq!(resolve("#home"), Route::Home);
    }

    #[test]
    fn endpoint_fragments_resolve_to_descriptors() {
        match resolve("#users-get") {
            Route::Endpoint(descriptor) => {
                assert_eq!(descriptor.path, "/users/get");
                assert_eq!(descriptor.method.as_str(), "GET");
            }
            other => panic!("unexpected route {:?}", other),
        }
    }

    #[test]
    fn device_pages_are_distinct() {
        assert_eq!(resolve("#device-add"), Route::DeviceAdd);
        assert_eq!(resolve("#add-device"), Route::AddDevice);
        assert_eq!(resolve("#device-add").fragment(), DEVICE_ADD_FRAGMENT);
    }

    #[test]
    fn unknown_fragment_is_not_found() {
        assert_eq!(resolve("#nope"), Route::NotFound("#nope".to_string()));
        assert_eq!(resolve("#nope").fragment(), "#nope");
    }
}
