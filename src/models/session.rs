// ============================================================================
// SESSION MODEL - Estado de sesión + función de transición
// ============================================================================
// Reductor puro: (Session, SessionEvent) -> Vec<SessionEffect>
// Los efectos (storage, cookie, fetch, navegación) los ejecuta el ViewModel
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::config::AuthErrorPolicy;

/// Fase observable de la sesión (derivada de los datos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Anonymous,
    IdentityAuthenticated,
    AppAuthenticated,
}

/// Estado de sesión
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub identity_email: Option<String>,
    pub app_token: Option<String>,
    pub profile_id: Option<String>,
    pub loading: bool,
    /// Número de la última petición de perfil emitida
    #[serde(default)]
    pub profile_seq: u64,
    /// Época de credenciales: logout y token manual la avanzan
    #[serde(default)]
    pub session_epoch: u64,
}

/// Eventos que hacen avanzar la sesión
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    InitStarted,
    IdentityRestored { email: Option<String> },
    StoredTokenFound(String),
    InitFinished,
    LoginSucceeded { email: String },
    /// `epoch` es la época leída al iniciar el intercambio
    TokenExchanged { epoch: u64, token: String, profile_id: String },
    TokenExchangeFailed,
    TokenSet(String),
    ProfileRefreshRequested,
    ProfileFetched { seq: u64, profile_id: String },
    ProfileFetchFailed { seq: u64, auth_rejected: bool },
    LoggedOut,
}

/// Efectos secundarios pedidos por una transición
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    PersistToken(String),
    RemoveToken,
    WriteCookie(String),
    ExpireCookie,
    PersistProfile(String),
    RemoveProfile,
    FetchProfile { seq: u64, token: String },
    NavigateHome,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Session {
    /// Sesión recién creada: bloqueada hasta terminar la inicialización
    pub fn initializing() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Initializing
        } else if self.has_token() {
            SessionPhase::AppAuthenticated
        } else if self.identity_email.is_some() {
            SessionPhase::IdentityAuthenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn has_token(&self) -> bool {
        self.app_token.is_some()
    }

    /// Aplica un evento y devuelve los efectos a ejecutar
    pub fn apply(&mut self, event: SessionEvent, policy: AuthErrorPolicy) -> Vec<SessionEffect> {
        match event {
            SessionEvent::InitStarted => {
                self.loading = true;
                Vec::new()
            }
            SessionEvent::InitFinished => {
                self.loading = false;
                Vec::new()
            }
            SessionEvent::IdentityRestored { email } => {
                if let Some(email) = non_empty(email) {
                    self.identity_email = Some(email);
                }
                Vec::new()
            }
            SessionEvent::LoginSucceeded { email } => {
                self.identity_email = non_empty(Some(email));
                Vec::new()
            }
            SessionEvent::StoredTokenFound(token) => self.set_token(non_empty(Some(token))),
            SessionEvent::TokenSet(token) => {
                self.session_epoch += 1;
                self.set_token(non_empty(Some(token)))
            }
            SessionEvent::TokenExchanged { epoch, token, profile_id } => {
                // Intercambio iniciado antes de un logout o de un token manual
                if epoch != self.session_epoch {
                    return Vec::new();
                }
                let (token, profile_id) = match (non_empty(Some(token)), non_empty(Some(profile_id))) {
                    (Some(t), Some(p)) => (t, p),
                    // Nunca adoptar un token sin perfil
                    _ => return Vec::new(),
                };
                let mut effects = self.set_token(Some(token));
                self.profile_id = Some(profile_id.clone());
                effects.retain(|e| *e != SessionEffect::RemoveProfile);
                effects.push(SessionEffect::PersistProfile(profile_id));
                effects
            }
            SessionEvent::TokenExchangeFailed => Vec::new(),
            SessionEvent::ProfileRefreshRequested => match self.app_token.clone() {
                Some(token) => {
                    self.profile_seq += 1;
                    vec![SessionEffect::FetchProfile { seq: self.profile_seq, token }]
                }
                None => Vec::new(),
            },
            SessionEvent::ProfileFetched { seq, profile_id } => {
                if seq != self.profile_seq || !self.has_token() {
                    return Vec::new();
                }
                match non_empty(Some(profile_id)) {
                    Some(profile_id) => {
                        self.profile_id = Some(profile_id.clone());
                        vec![SessionEffect::PersistProfile(profile_id)]
                    }
                    None => {
                        self.profile_id = None;
                        vec![SessionEffect::RemoveProfile]
                    }
                }
            }
            SessionEvent::ProfileFetchFailed { seq, auth_rejected } => {
                if seq != self.profile_seq {
                    return Vec::new();
                }
                self.profile_id = None;
                let mut effects = vec![SessionEffect::RemoveProfile];
                if auth_rejected && policy == AuthErrorPolicy::Clear && self.has_token() {
                    self.app_token = None;
                    self.profile_seq += 1;
                    effects.push(SessionEffect::RemoveToken);
                    effects.push(SessionEffect::ExpireCookie);
                }
                effects
            }
            SessionEvent::LoggedOut => {
                self.identity_email = None;
                self.app_token = None;
                self.profile_id = None;
                self.loading = false;
                // Invalida fetches de perfil e intercambios en vuelo
                self.profile_seq += 1;
                self.session_epoch += 1;
                vec![
                    SessionEffect::ExpireCookie,
                    SessionEffect::RemoveToken,
                    SessionEffect::RemoveProfile,
                    SessionEffect::NavigateHome,
                ]
            }
        }
    }

    /// Cambia el token; el perfil cuelga del token
    fn set_token(&mut self, token: Option<String>) -> Vec<SessionEffect> {
        match token {
            Some(token) => {
                let changed = self.app_token.as_deref() != Some(token.as_str());
                let mut effects = vec![
                    SessionEffect::PersistToken(token.clone()),
                    SessionEffect::WriteCookie(token.clone()),
                ];
                if changed {
                    self.app_token = Some(token.clone());
                    self.profile_seq += 1;
                    effects.push(SessionEffect::FetchProfile {
                        seq: self.profile_seq,
                        token,
                    });
                }
                effects
            }
            None => {
                self.app_token = None;
                self.profile_id = None;
                self.profile_seq += 1;
                vec![
                    SessionEffect::RemoveToken,
                    SessionEffect::ExpireCookie,
                    SessionEffect::RemoveProfile,
                ]
            }
        }
    }
}
