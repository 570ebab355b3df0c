// ============================================================================
// TESTING - Implementaciones en memoria de los ports (solo tests)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use futures::channel::oneshot;
use crate::models::auth::{IdentityInfo, TokenGrant};
use crate::services::ports::{ApiError, BridgeError, CredentialStore, CubApi, IdentityBridge};
use crate::utils::cookie::{expired_token_cookie, token_cookie};

/// localStorage + cookie en memoria
#[derive(Default)]
pub struct MemoryCredentialStore {
    pub token: RefCell<Option<String>>,
    pub profile: RefCell<Option<String>>,
    pub cookie: RefCell<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: &str) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn remove_token(&self) -> Result<(), String> {
        *self.token.borrow_mut() = None;
        Ok(())
    }

    fn save_profile(&self, profile_id: &str) -> Result<(), String> {
        *self.profile.borrow_mut() = Some(profile_id.to_string());
        Ok(())
    }

    fn remove_profile(&self) -> Result<(), String> {
        *self.profile.borrow_mut() = None;
        Ok(())
    }

    fn write_cookie(&self, token: &str) -> Result<(), String> {
        *self.cookie.borrow_mut() = Some(token_cookie(token));
        Ok(())
    }

    fn expire_cookie(&self) -> Result<(), String> {
        *self.cookie.borrow_mut() = Some(expired_token_cookie());
        Ok(())
    }
}

/// Proveedor de identidad simulado
pub struct FakeBridge {
    pub logged_in: Cell<bool>,
    pub unavailable: Cell<bool>,
    /// Solo `get_info` falla
    pub info_fails: Cell<bool>,
    /// Solo `logout` falla
    pub logout_fails: Cell<bool>,
    pub email: RefCell<Option<String>>,
    pub id_token: RefCell<Result<String, BridgeError>>,
    pub logout_calls: Cell<u32>,
}

impl FakeBridge {
    pub fn anonymous() -> Self {
        Self {
            logged_in: Cell::new(false),
            unavailable: Cell::new(false),
            info_fails: Cell::new(false),
            logout_fails: Cell::new(false),
            email: RefCell::new(None),
            id_token: RefCell::new(Ok("did-token".to_string())),
            logout_calls: Cell::new(0),
        }
    }

    pub fn logged_in(email: &str) -> Self {
        let bridge = Self::anonymous();
        bridge.logged_in.set(true);
        *bridge.email.borrow_mut() = Some(email.to_string());
        bridge
    }

    fn check(&self) -> Result<(), BridgeError> {
        if self.unavailable.get() {
            return Err(BridgeError::Provider("timeout".to_string()));
        }
        Ok(())
    }
}

impl IdentityBridge for FakeBridge {
    async fn is_logged_in(&self) -> Result<bool, BridgeError> {
        self.check()?;
        Ok(self.logged_in.get())
    }

    async fn get_id_token(&self) -> Result<String, BridgeError> {
        self.check()?;
        self.id_token.borrow().clone()
    }

    async fn get_info(&self) -> Result<IdentityInfo, BridgeError> {
        self.check()?;
        if self.info_fails.get() {
            return Err(BridgeError::Provider("metadata unavailable".to_string()));
        }
        Ok(IdentityInfo {
            email: self.email.borrow().clone(),
            public_address: None,
        })
    }

    async fn logout(&self) -> Result<(), BridgeError> {
        self.logout_calls.set(self.logout_calls.get() + 1);
        if self.logout_fails.get() {
            return Err(BridgeError::Provider("logout rejected".to_string()));
        }
        self.logged_in.set(false);
        Ok(())
    }

    async fn login_with_email(&self, email: &str) -> Result<String, BridgeError> {
        self.check()?;
        self.logged_in.set(true);
        *self.email.borrow_mut() = Some(email.to_string());
        Ok(email.to_string())
    }
}

/// Backend de CUB simulado; las respuestas de perfil se pueden retener
pub struct FakeApi {
    pub grant: RefCell<Result<TokenGrant, ApiError>>,
    pub grant_gate: RefCell<Option<oneshot::Receiver<()>>>,
    pub profiles: RefCell<HashMap<String, Result<String, ApiError>>>,
    pub gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    pub generate_calls: Cell<u32>,
    pub profile_calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            grant: RefCell::new(Err(ApiError::Status(500))),
            grant_gate: RefCell::new(None),
            profiles: RefCell::new(HashMap::new()),
            gates: RefCell::new(HashMap::new()),
            generate_calls: Cell::new(0),
            profile_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn grant(self, token: &str, profile_id: &str) -> Self {
        *self.grant.borrow_mut() = Ok(TokenGrant {
            token: token.to_string(),
            profile_id: profile_id.to_string(),
        });
        self
    }

    pub fn profile(self, token: &str, response: Result<&str, ApiError>) -> Self {
        self.profiles
            .borrow_mut()
            .insert(token.to_string(), response.map(str::to_string));
        self
    }

    /// `generate_token` espera a que se dispare el sender
    pub fn hold_grant(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.grant_gate.borrow_mut() = Some(rx);
        tx
    }

    /// La respuesta para `token` espera a que se dispare el sender
    pub fn hold(&self, token: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(token.to_string(), rx);
        tx
    }
}

impl CubApi for FakeApi {
    async fn generate_token(&self, _identity_token: &str) -> Result<TokenGrant, ApiError> {
        self.generate_calls.set(self.generate_calls.get() + 1);
        let gate = self.grant_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.grant.borrow().clone()
    }

    async fn fetch_profile(&self, app_token: &str) -> Result<String, ApiError> {
        self.profile_calls.borrow_mut().push(app_token.to_string());
        let gate = self.gates.borrow_mut().remove(app_token);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.profiles
            .borrow()
            .get(app_token)
            .cloned()
            .unwrap_or(Err(ApiError::Status(404)))
    }
}
