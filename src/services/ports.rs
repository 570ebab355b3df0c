// ============================================================================
// PORTS - Traits comunes para los colaboradores externos
// ============================================================================
// Proveedor de identidad, API de CUB y almacenamiento de credenciales.
// Las implementaciones web viven en identity_service / api_client /
// credential_service; los tests usan implementaciones en memoria.
// ============================================================================

#![allow(async_fn_in_trait)]

use std::fmt;
use crate::models::auth::{IdentityInfo, TokenGrant};

/// Error del backend de CUB
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Red caída, CORS, timeout del navegador
    Transport(String),
    /// 401/403: token inválido o expirado
    Auth(u16),
    /// Cualquier otro status no-2xx
    Status(u16),
    /// JSON inesperado o mal formado
    Shape(String),
}

impl ApiError {
    /// Clasifica un status HTTP no exitoso
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiError::Auth(status),
            _ => ApiError::Status(status),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Network error: {}", msg),
            ApiError::Auth(status) => write!(f, "Token rejected (HTTP {})", status),
            ApiError::Status(status) => write!(f, "HTTP error {}", status),
            ApiError::Shape(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error del proveedor de identidad (Magic)
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    Provider(String),
    NotInitialized,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Provider(msg) => write!(f, "Identity provider error: {}", msg),
            BridgeError::NotInitialized => write!(f, "Identity provider not initialized"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Adaptador al widget de login sin contraseña
pub trait IdentityBridge {
    async fn is_logged_in(&self) -> Result<bool, BridgeError>;

    async fn get_id_token(&self) -> Result<String, BridgeError>;

    async fn get_info(&self) -> Result<IdentityInfo, BridgeError>;

    async fn logout(&self) -> Result<(), BridgeError>;

    /// Abre el flujo de login por email; devuelve el email verificado
    async fn login_with_email(&self, email: &str) -> Result<String, BridgeError>;
}

/// Endpoints de sesión del backend de CUB
pub trait CubApi {
    /// Intercambia el token de identidad por token de aplicación + perfil
    async fn generate_token(&self, identity_token: &str) -> Result<TokenGrant, ApiError>;

    /// Perfil activo del usuario dueño del token
    async fn fetch_profile(&self, app_token: &str) -> Result<String, ApiError>;
}

/// Persistencia duradera del token/perfil + cookie espejo
pub trait CredentialStore {
    fn load_token(&self) -> Option<String>;

    fn save_token(&self, token: &str) -> Result<(), String>;

    fn remove_token(&self) -> Result<(), String>;

    fn save_profile(&self, profile_id: &str) -> Result<(), String>;

    fn remove_profile(&self) -> Result<(), String>;

    fn write_cookie(&self, token: &str) -> Result<(), String>;

    fn expire_cookie(&self) -> Result<(), String>;
}
