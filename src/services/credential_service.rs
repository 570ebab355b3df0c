use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;
use crate::services::ports::CredentialStore;
use crate::utils::constants::{STORAGE_KEY_PROFILE, STORAGE_KEY_TOKEN};
use crate::utils::cookie::{expired_token_cookie, token_cookie};
use crate::utils::storage::{load_from_storage, remove_from_storage, save_to_storage};

/// localStorage + `document.cookie`
#[derive(Clone, Default)]
pub struct BrowserCredentialStore;

impl BrowserCredentialStore {
    pub fn new() -> Self {
        Self
    }

    fn set_cookie(&self, cookie: &str) -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| "Document is not an HtmlDocument".to_string())?;
        document
            .set_cookie(cookie)
            .map_err(|e| format!("Error escribiendo cookie: {:?}", e))
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn load_token(&self) -> Option<String> {
        load_from_storage(STORAGE_KEY_TOKEN)
    }

    fn save_token(&self, token: &str) -> Result<(), String> {
        save_to_storage(STORAGE_KEY_TOKEN, token)
    }

    fn remove_token(&self) -> Result<(), String> {
        remove_from_storage(STORAGE_KEY_TOKEN)
    }

    fn save_profile(&self, profile_id: &str) -> Result<(), String> {
        save_to_storage(STORAGE_KEY_PROFILE, profile_id)
    }

    fn remove_profile(&self) -> Result<(), String> {
        remove_from_storage(STORAGE_KEY_PROFILE)
    }

    fn write_cookie(&self, token: &str) -> Result<(), String> {
        self.set_cookie(&token_cookie(token))
    }

    fn expire_cookie(&self) -> Result<(), String> {
        self.set_cookie(&expired_token_cookie())
    }
}
