// ============================================================================
// SERVICES - Magic, API de CUB y credenciales del navegador
// ============================================================================

pub mod ports;
pub mod api_client;
pub mod request_builder;
pub mod credential_service;
pub mod identity_service;
