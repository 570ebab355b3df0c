use serde::{Deserialize, Serialize};

/// Qué hacer con el token de aplicación cuando `/users/get` responde 401/403
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthErrorPolicy {
    /// Comportamiento histórico: solo se limpia el perfil
    #[default]
    Keep,
    /// Token rechazado → se limpia también el token
    Clear,
}

impl AuthErrorPolicy {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" | "clear_token" | "true" => AuthErrorPolicy::Clear,
            _ => AuthErrorPolicy::Keep,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub enable_logging: bool,
    pub token_endpoint: String,
    pub profile_endpoint: String,
    pub api_base_url: String,
    pub public_api_url: String,
    pub magic_publishable_key: String,
    pub api_version: String,
    pub mobile_breakpoint_px: u32,
    pub auth_error_policy: AuthErrorPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            enable_logging: true,
            token_endpoint: "http://localhost:3000/api/token/generate".to_string(),
            profile_endpoint: "/api/users/get".to_string(),
            api_base_url: "/api".to_string(),
            public_api_url: "https://cub.rip/api".to_string(),
            magic_publishable_key: "pk_live_DF7C05FE3A4FD8A6".to_string(),
            api_version: "v1.29".to_string(),
            mobile_breakpoint_px: 1024,
            auth_error_policy: AuthErrorPolicy::Keep,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: option_env!("ENVIRONMENT")
                .map(str::to_string)
                .unwrap_or(defaults.environment),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            token_endpoint: option_env!("TOKEN_ENDPOINT")
                .map(str::to_string)
                .unwrap_or(defaults.token_endpoint),
            profile_endpoint: option_env!("PROFILE_ENDPOINT")
                .map(str::to_string)
                .unwrap_or(defaults.profile_endpoint),
            api_base_url: option_env!("API_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.api_base_url),
            public_api_url: option_env!("PUBLIC_API_URL")
                .map(str::to_string)
                .unwrap_or(defaults.public_api_url),
            magic_publishable_key: option_env!("MAGIC_PUBLISHABLE_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.magic_publishable_key),
            api_version: option_env!("API_VERSION")
                .map(str::to_string)
                .unwrap_or(defaults.api_version),
            mobile_breakpoint_px: option_env!("MOBILE_BREAKPOINT_PX")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.mobile_breakpoint_px),
            auth_error_policy: option_env!("AUTH_ERROR_POLICY")
                .map(AuthErrorPolicy::parse)
                .unwrap_or(defaults.auth_error_policy),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log según `enable_logging`
    pub fn log_level(&self) -> log::Level {
        match (self.enable_logging, self.is_production()) {
            (false, _) => log::Level::Error,
            (true, true) => log::Level::Info,
            (true, false) => log::Level::Debug,
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_policy_parses_known_values() {
        assert_eq!(AuthErrorPolicy::parse("clear"), AuthErrorPolicy::Clear);
        assert_eq!(AuthErrorPolicy::parse(" CLEAR_TOKEN "), AuthErrorPolicy::Clear);
        assert_eq!(AuthErrorPolicy::parse("keep"), AuthErrorPolicy::Keep);
        assert_eq!(AuthErrorPolicy::parse("whatever"), AuthErrorPolicy::Keep);
    }

    #[test]
    fn default_config_keeps_token_on_auth_error() {
        let config = AppConfig::default();
        assert_eq!(config.auth_error_policy, AuthErrorPolicy::Keep);
        assert_eq!(config.mobile_breakpoint_px, 1024);
        assert!(!config.is_production());
    }
}
