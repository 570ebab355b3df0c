// ============================================================================
// IDENTITY SERVICE - Puente hacia Magic (login sin contraseña)
// ============================================================================

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use crate::models::auth::IdentityInfo;
use crate::services::ports::{BridgeError, IdentityBridge};
use crate::utils::magic_ffi;

fn provider_error(e: JsValue) -> BridgeError {
    let msg = e
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&e, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", e));
    BridgeError::Provider(msg)
}

async fn await_promise(
    promise: Result<js_sys::Promise, JsValue>,
) -> Result<JsValue, BridgeError> {
    let promise = promise.map_err(provider_error)?;
    JsFuture::from(promise).await.map_err(provider_error)
}

/// Implementación de IdentityBridge sobre el SDK de Magic
#[derive(Clone, Default)]
pub struct MagicBridge;

impl MagicBridge {
    /// Crea la instancia JS de Magic con la clave pública
    pub fn init(publishable_key: &str) -> Result<Self, BridgeError> {
        if publishable_key.is_empty() {
            return Err(BridgeError::NotInitialized);
        }
        magic_ffi::magic_init(publishable_key).map_err(provider_error)?;
        log::info!("🔑 Magic inicializado");
        Ok(Self)
    }
}

impl IdentityBridge for MagicBridge {
    async fn is_logged_in(&self) -> Result<bool, BridgeError> {
        let value = await_promise(magic_ffi::magic_is_logged_in()).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn get_id_token(&self) -> Result<String, BridgeError> {
        let value = await_promise(magic_ffi::magic_get_id_token()).await?;
        value
            .as_string()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BridgeError::Provider("empty id token".to_string()))
    }

    async fn get_info(&self) -> Result<IdentityInfo, BridgeError> {
        let value = await_promise(magic_ffi::magic_get_info()).await?;
        let json = js_sys::JSON::stringify(&value)
            .map_err(provider_error)?
            .as_string()
            .unwrap_or_default();
        serde_json::from_str::<IdentityInfo>(&json)
            .map_err(|e| BridgeError::Provider(format!("metadata: {}", e)))
    }

    async fn logout(&self) -> Result<(), BridgeError> {
        await_promise(magic_ffi::magic_logout()).await?;
        Ok(())
    }

    async fn login_with_email(&self, email: &str) -> Result<String, BridgeError> {
        // Magic devuelve el DID token; el email verificado sale de getInfo
        await_promise(magic_ffi::magic_login_with_email(email)).await?;
        let info = self.get_info().await?;
        Ok(info.email.unwrap_or_else(|| email.to_string()))
    }
}
