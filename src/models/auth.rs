use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Respuesta de `POST /api/token/generate`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct TokenGenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileRef>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ProfileRef {
    #[serde(default)]
    pub id: Value,
}

/// Respuesta de `GET /api/users/get`
/// `secuses` es el nombre literal del campo en la API de CUB
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UserGetResponse {
    #[serde(default)]
    pub secuses: Value,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct UserInfo {
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub email: Option<String>,
}

/// Token de aplicación + perfil activo
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TokenGrant {
    pub token: String,
    pub profile_id: String,
}

/// Metadata del proveedor de identidad (`magic.user.getInfo()`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct IdentityInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "publicAddress")]
    pub public_address: Option<String>,
}

/// Escalar JSON → String (números y strings; booleanos como texto)
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truthiness al estilo JSON de la API (true, número distinto de 0, string no vacío)
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

impl TokenGenerateResponse {
    /// Solo es éxito con `success == true`, token y `profile.id`
    pub fn into_grant(self) -> Option<TokenGrant> {
        if !self.success {
            return None;
        }
        let token = self.token.filter(|t| !t.is_empty())?;
        let profile_id = self.profile.as_ref().and_then(|p| scalar_to_string(&p.id))?;
        Some(TokenGrant { token, profile_id })
    }
}

impl UserGetResponse {
    pub fn profile_id(&self) -> Option<String> {
        if !is_truthy(&self.secuses) {
            return None;
        }
        self.user.as_ref().and_then(|u| scalar_to_string(&u.profile))
    }
}
