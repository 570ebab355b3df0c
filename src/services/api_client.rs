// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de sesión: hace requests y valida la forma de la respuesta
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use crate::config::CONFIG;
use crate::models::auth::{TokenGenerateResponse, TokenGrant, UserGetResponse};
use crate::models::endpoint::HttpMethod;
use crate::services::ports::{ApiError, CubApi};
use crate::services::request_builder::PreparedRequest;

/// Respuesta cruda del formulario de pruebas
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body formateado si es JSON, tal cual si no
    pub fn pretty_body(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .and_then(|v| serde_json::to_string_pretty(&v))
            .unwrap_or_else(|_| self.body.clone())
    }
}

/// Valida la respuesta de `/api/token/generate`
pub fn parse_token_response(status: u16, body: &str) -> Result<TokenGrant, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status));
    }
    let parsed = serde_json::from_str::<TokenGenerateResponse>(body)
        .map_err(|e| ApiError::Shape(e.to_string()))?;
    parsed
        .into_grant()
        .ok_or_else(|| ApiError::Shape("missing success/token/profile.id".to_string()))
}

/// Valida la respuesta de `/api/users/get`
pub fn parse_profile_response(status: u16, body: &str) -> Result<String, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status));
    }
    let parsed = serde_json::from_str::<UserGetResponse>(body)
        .map_err(|e| ApiError::Shape(e.to_string()))?;
    parsed
        .profile_id()
        .ok_or_else(|| ApiError::Shape("missing secuses/user.profile".to_string()))
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    token_endpoint: String,
    profile_endpoint: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            token_endpoint: CONFIG.token_endpoint.clone(),
            profile_endpoint: CONFIG.profile_endpoint.clone(),
        }
    }

    async fn read(response: Response) -> (u16, String) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        (status, body)
    }

    /// Envía una petición construida por el formulario de pruebas
    pub async fn send(&self, request: &PreparedRequest) -> Result<RawResponse, ApiError> {
        log::info!("📤 {} {}", request.method, request.url);

        let mut builder: RequestBuilder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match &request.body {
            Some(body) => builder
                .body(body.clone())
                .map_err(|e| ApiError::Transport(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status_text = response.status_text();
        let (status, body) = Self::read(response).await;
        log::info!("📥 {} {} → HTTP {}", request.method, request.url, status);

        Ok(RawResponse { status, status_text, body })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CubApi for ApiClient {
    async fn generate_token(&self, identity_token: &str) -> Result<TokenGrant, ApiError> {
        log::info!("🔐 Intercambiando token de identidad en {}", self.token_endpoint);

        let response = Request::post(&self.token_endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", identity_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let (status, body) = Self::read(response).await;
        parse_token_response(status, &body)
    }

    async fn fetch_profile(&self, app_token: &str) -> Result<String, ApiError> {
        let response = Request::get(&self.profile_endpoint)
            .header("Content-Type", "application/json")
            .header("Token", app_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let (status, body) = Self::read(response).await;
        parse_profile_response(status, &body)
    }
}
