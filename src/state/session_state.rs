// ============================================================================
// SESSION STATE - Sesión compartida entre ViewModel y vistas
// ============================================================================

use crate::config::AuthErrorPolicy;
use crate::models::session::{Session, SessionEffect, SessionEvent, SessionPhase};
use crate::services::request_builder::RequestCredentials;
use crate::state::reactivity::ReactiveState;

/// Estado de sesión reactivo
#[derive(Clone)]
pub struct SessionState {
    inner: ReactiveState<Session>,
}

impl SessionState {
    /// Sesión inicial: bloqueada hasta terminar `init`
    pub fn new() -> Self {
        Self {
            inner: ReactiveState::new(Session::initializing()),
        }
    }

    /// Aplica un evento y notifica a los subscribers
    pub fn apply(&self, event: SessionEvent, policy: AuthErrorPolicy) -> Vec<SessionEffect> {
        self.inner.update(|session| session.apply(event, policy))
    }

    pub fn snapshot(&self) -> Session {
        self.inner.get()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.with(Session::phase)
    }

    /// Época actual de credenciales (ver `SessionEvent::TokenExchanged`)
    pub fn epoch(&self) -> u64 {
        self.inner.with(|s| s.session_epoch)
    }

    pub fn token(&self) -> Option<String> {
        self.inner.with(|s| s.app_token.clone())
    }

    pub fn profile_id(&self) -> Option<String> {
        self.inner.with(|s| s.profile_id.clone())
    }

    pub fn email(&self) -> Option<String> {
        self.inner.with(|s| s.identity_email.clone())
    }

    /// Headers `token` / `profile` para el formulario de pruebas
    pub fn credentials(&self) -> RequestCredentials {
        self.inner.with(|s| RequestCredentials {
            token: s.app_token.clone(),
            profile: s.profile_id.clone(),
        })
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.inner.subscribe(callback);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
