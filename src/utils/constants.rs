/// Token de aplicación (texto plano)
pub const STORAGE_KEY_TOKEN: &str = "cub_api_token";

/// Perfil activo (id como string)
pub const STORAGE_KEY_PROFILE: &str = "cub_api_profile";

pub const TOKEN_COOKIE_NAME: &str = "token";

/// Fragmento por defecto
pub const HOME_FRAGMENT: &str = "#home";
