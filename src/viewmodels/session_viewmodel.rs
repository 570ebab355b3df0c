// ============================================================================
// SESSION VIEWMODEL - LÓGICA DE SESIÓN
// ============================================================================
// Orquesta proveedor de identidad, backend de CUB y almacenamiento.
// Las transiciones son de Session::apply; aquí solo se ejecutan los efectos.
// ============================================================================

use std::rc::Rc;
use crate::config::AuthErrorPolicy;
use crate::models::auth::IdentityInfo;
use crate::models::session::{SessionEffect, SessionEvent};
use crate::services::ports::{BridgeError, CredentialStore, CubApi, IdentityBridge};
use crate::state::SessionState;
use crate::utils::constants::HOME_FRAGMENT;

/// Petición de perfil pendiente: (secuencia, token)
type ProfileRequest = (u64, String);

/// ViewModel de sesión - SOLO lógica de negocio
pub struct SessionViewModel<B: IdentityBridge, A: CubApi> {
    bridge: Rc<B>,
    api: Rc<A>,
    store: Rc<dyn CredentialStore>,
    state: SessionState,
    policy: AuthErrorPolicy,
    on_navigate: Rc<dyn Fn(&str)>,
}

impl<B: IdentityBridge, A: CubApi> Clone for SessionViewModel<B, A> {
    fn clone(&self) -> Self {
        Self {
            bridge: self.bridge.clone(),
            api: self.api.clone(),
            store: self.store.clone(),
            state: self.state.clone(),
            policy: self.policy,
            on_navigate: self.on_navigate.clone(),
        }
    }
}

fn report(result: Result<(), String>, what: &str) {
    if let Err(e) = result {
        log::error!("❌ Error actualizando {}: {}", what, e);
    }
}

impl<B: IdentityBridge, A: CubApi> SessionViewModel<B, A> {
    pub fn new(
        bridge: Rc<B>,
        api: Rc<A>,
        store: Rc<dyn CredentialStore>,
        state: SessionState,
        policy: AuthErrorPolicy,
        on_navigate: Rc<dyn Fn(&str)>,
    ) -> Self {
        Self { bridge, api, store, state, policy, on_navigate }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Aplica el evento y ejecuta los efectos síncronos
    fn dispatch(&self, event: SessionEvent) -> Vec<ProfileRequest> {
        let effects = self.state.apply(event, self.policy);
        let mut fetches = Vec::new();
        for effect in effects {
            match effect {
                SessionEffect::PersistToken(token) => report(self.store.save_token(&token), "token"),
                SessionEffect::RemoveToken => report(self.store.remove_token(), "token"),
                SessionEffect::WriteCookie(token) => report(self.store.write_cookie(&token), "cookie"),
                SessionEffect::ExpireCookie => report(self.store.expire_cookie(), "cookie"),
                SessionEffect::PersistProfile(id) => report(self.store.save_profile(&id), "perfil"),
                SessionEffect::RemoveProfile => report(self.store.remove_profile(), "perfil"),
                SessionEffect::FetchProfile { seq, token } => fetches.push((seq, token)),
                SessionEffect::NavigateHome => (self.on_navigate)(HOME_FRAGMENT),
            }
        }
        fetches
    }

    async fn run_fetches(&self, fetches: Vec<ProfileRequest>) {
        for (seq, token) in fetches {
            self.run_profile_fetch(seq, &token).await;
        }
    }

    /// GET del perfil; los errores se registran y limpian el perfil local
    async fn run_profile_fetch(&self, seq: u64, token: &str) {
        if token.trim().is_empty() {
            return;
        }
        match self.api.fetch_profile(token).await {
            Ok(profile_id) => {
                log::info!("👤 Perfil activo: {}", profile_id);
                self.dispatch(SessionEvent::ProfileFetched { seq, profile_id });
            }
            Err(e) => {
                log::warn!("⚠️ Error obteniendo perfil: {}", e);
                self.dispatch(SessionEvent::ProfileFetchFailed {
                    seq,
                    auth_rejected: e.is_auth(),
                });
            }
        }
    }

    /// Identidad activa en el proveedor; cualquier error cuenta como anónimo
    async fn restore_identity(&self) -> Option<IdentityInfo> {
        match self.bridge.is_logged_in().await {
            Ok(true) => match self.bridge.get_info().await {
                Ok(info) => Some(info),
                Err(e) => {
                    log::warn!("⚠️ No se pudo leer la identidad: {}", e);
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                log::warn!("⚠️ Proveedor de identidad no disponible: {}", e);
                None
            }
        }
    }

    async fn exchange(&self) -> (bool, Vec<ProfileRequest>) {
        let epoch = self.state.epoch();
        let identity_token = match self.bridge.get_id_token().await {
            Ok(token) => token,
            Err(e) => {
                log::error!("❌ Sin token de identidad: {}", e);
                self.dispatch(SessionEvent::TokenExchangeFailed);
                return (false, Vec::new());
            }
        };
        match self.api.generate_token(&identity_token).await {
            Ok(_) if self.state.epoch() != epoch => {
                log::warn!("⚠️ Token generado tras un logout o un cambio de token: descartado");
                (false, Vec::new())
            }
            Ok(grant) => {
                log::info!("✅ Token de aplicación generado (perfil {})", grant.profile_id);
                let fetches = self.dispatch(SessionEvent::TokenExchanged {
                    epoch,
                    token: grant.token,
                    profile_id: grant.profile_id,
                });
                (true, fetches)
            }
            Err(e) => {
                log::error!("❌ Error generando token: {}", e);
                self.dispatch(SessionEvent::TokenExchangeFailed);
                (false, Vec::new())
            }
        }
    }

    /// Arranque: identidad activa → intercambio; si no, token guardado
    pub async fn init(&self) {
        log::info!("🔐 Inicializando sesión...");
        self.dispatch(SessionEvent::InitStarted);

        let pending = match self.restore_identity().await {
            Some(info) => {
                self.dispatch(SessionEvent::IdentityRestored { email: info.email });
                self.exchange().await.1
            }
            None => match self.store.load_token() {
                Some(token) => {
                    log::info!("💾 Token encontrado en storage");
                    self.dispatch(SessionEvent::StoredTokenFound(token))
                }
                None => Vec::new(),
            },
        };

        self.dispatch(SessionEvent::InitFinished);
        log::info!("✅ Sesión inicializada: {:?}", self.state.phase());
        self.run_fetches(pending).await;
    }

    /// Intercambia el token de identidad por token de aplicación
    pub async fn exchange_token(&self) -> bool {
        let (ok, fetches) = self.exchange().await;
        self.run_fetches(fetches).await;
        ok
    }

    /// Login completado en el proveedor
    pub async fn login_succeeded(&self, email: String) -> bool {
        log::info!("👋 Login como {}", email);
        self.dispatch(SessionEvent::LoginSucceeded { email });
        self.exchange_token().await
    }

    /// Formulario de email: login en el proveedor + intercambio
    pub async fn login_with_email(&self, email: &str) -> Result<bool, BridgeError> {
        let verified = self.bridge.login_with_email(email.trim()).await?;
        Ok(self.login_succeeded(verified).await)
    }

    /// Token introducido a mano; vacío lo borra
    pub async fn set_token(&self, token: String) {
        let fetches = self.dispatch(SessionEvent::TokenSet(token));
        self.run_fetches(fetches).await;
    }

    pub async fn refresh_profile(&self) {
        let fetches = self.dispatch(SessionEvent::ProfileRefreshRequested);
        self.run_fetches(fetches).await;
    }

    /// Logout: el fallo del proveedor no impide limpiar la sesión local
    pub async fn logout(&self) {
        log::info!("👋 Logout - limpiando toda la sesión");
        match self.bridge.is_logged_in().await {
            Ok(true) => {
                if let Err(e) = self.bridge.logout().await {
                    log::error!("❌ Logout del proveedor falló: {}", e);
                }
            }
            Ok(false) => {}
            Err(e) => log::error!("❌ Logout del proveedor falló: {}", e),
        }
        self.dispatch(SessionEvent::LoggedOut);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use crate::models::session::SessionPhase;
    use crate::services::ports::ApiError;
    use crate::testing::{FakeApi, FakeBridge, MemoryCredentialStore};
    use crate::utils::cookie::{expired_token_cookie, token_cookie};

    struct Harness {
        vm: SessionViewModel<FakeBridge, FakeApi>,
        bridge: Rc<FakeBridge>,
        api: Rc<FakeApi>,
        store: Rc<MemoryCredentialStore>,
        navigations: Rc<RefCell<Vec<String>>>,
    }

    fn harness(bridge: FakeBridge, api: FakeApi, store: MemoryCredentialStore, policy: AuthErrorPolicy) -> Harness {
        let bridge = Rc::new(bridge);
        let api = Rc::new(api);
        let store = Rc::new(store);
        let navigations = Rc::new(RefCell::new(Vec::new()));
        let recorder = navigations.clone();
        let vm = SessionViewModel::new(
            bridge.clone(),
            api.clone(),
            store.clone(),
            SessionState::new(),
            policy,
            Rc::new(move |fragment: &str| recorder.borrow_mut().push(fragment.to_string())),
        );
        Harness { vm, bridge, api, store, navigations }
    }

    #[test]
    fn startup_with_stored_token_fetches_profile_once() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("abc123", Ok("536380")),
            MemoryCredentialStore::with_token("abc123"),
            AuthErrorPolicy::Keep,
        );
        assert_eq!(h.vm.state().phase(), SessionPhase::Initializing);

        block_on(h.vm.init());

        assert_eq!(h.vm.state().phase(), SessionPhase::AppAuthenticated);
        assert_eq!(h.vm.state().token().as_deref(), Some("abc123"));
        assert_eq!(*h.api.profile_calls.borrow(), vec!["abc123".to_string()]);
        assert_eq!(h.vm.state().profile_id().as_deref(), Some("536380"));
        assert_eq!(h.store.profile.borrow().as_deref(), Some("536380"));
        assert_eq!(h.api.generate_calls.get(), 0);
    }

    #[test]
    fn startup_with_identity_session_exchanges_token() {
        let h = harness(
            FakeBridge::logged_in("me@cub.rip"),
            FakeApi::new().grant("tok", "536380").profile("tok", Ok("536380")),
            MemoryCredentialStore::with_token("old"),
            AuthErrorPolicy::Keep,
        );

        block_on(h.vm.init());

        assert_eq!(h.vm.state().email().as_deref(), Some("me@cub.rip"));
        assert_eq!(h.vm.state().token().as_deref(), Some("tok"));
        assert_eq!(h.store.token.borrow().as_deref(), Some("tok"));
        assert_eq!(h.api.generate_calls.get(), 1);
    }

    #[test]
    fn bridge_failure_during_startup_falls_back_to_stored_token() {
        let bridge = FakeBridge::logged_in("me@cub.rip");
        bridge.unavailable.set(true);
        let h = harness(
            bridge,
            FakeApi::new().profile("abc123", Ok("1")),
            MemoryCredentialStore::with_token("abc123"),
            AuthErrorPolicy::Keep,
        );

        block_on(h.vm.init());

        assert_eq!(h.vm.state().email(), None);
        assert_eq!(h.vm.state().phase(), SessionPhase::AppAuthenticated);
        assert_eq!(h.api.generate_calls.get(), 0);
    }

    #[test]
    fn startup_without_credentials_is_anonymous() {
        let h = harness(FakeBridge::anonymous(), FakeApi::new(), MemoryCredentialStore::default(), AuthErrorPolicy::Keep);
        block_on(h.vm.init());
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);
        assert!(h.api.profile_calls.borrow().is_empty());
    }

    #[test]
    fn login_then_exchange_reaches_app_authenticated() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().grant("tok", "536380").profile("tok", Ok("536380")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());

        let ok = block_on(h.vm.login_with_email(" me@cub.rip ")).unwrap();

        assert!(ok);
        assert_eq!(h.vm.state().phase(), SessionPhase::AppAuthenticated);
        assert_eq!(h.vm.state().email().as_deref(), Some("me@cub.rip"));
        assert_eq!(h.vm.state().profile_id().as_deref(), Some("536380"));
        assert_eq!(h.store.token.borrow().as_deref(), Some("tok"));
        assert_eq!(h.store.cookie.borrow().clone(), Some(token_cookie("tok")));
    }

    #[test]
    fn failed_exchange_is_not_adopted() {
        let api = FakeApi::new();
        *api.grant.borrow_mut() = Err(ApiError::Shape("missing success/token/profile.id".into()));
        let h = harness(FakeBridge::anonymous(), api, MemoryCredentialStore::default(), AuthErrorPolicy::Keep);
        block_on(h.vm.init());

        let ok = block_on(h.vm.login_succeeded("me@cub.rip".into()));

        assert!(!ok);
        assert_eq!(h.vm.state().phase(), SessionPhase::IdentityAuthenticated);
        assert_eq!(*h.store.token.borrow(), None);
        assert!(h.api.profile_calls.borrow().is_empty());
    }

    #[test]
    fn empty_token_makes_no_profile_call() {
        let h = harness(FakeBridge::anonymous(), FakeApi::new(), MemoryCredentialStore::default(), AuthErrorPolicy::Keep);
        block_on(h.vm.init());

        block_on(h.vm.set_token(String::new()));
        block_on(h.vm.refresh_profile());

        assert!(h.api.profile_calls.borrow().is_empty());
        assert_eq!(h.vm.state().profile_id(), None);
    }

    #[test]
    fn forbidden_profile_keeps_token_by_default() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("tok", Err(ApiError::Auth(403))),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());
        *h.store.profile.borrow_mut() = Some("old".into());

        block_on(h.vm.set_token("tok".into()));

        assert_eq!(h.vm.state().profile_id(), None);
        assert_eq!(*h.store.profile.borrow(), None);
        assert_eq!(h.vm.state().token().as_deref(), Some("tok"));
        assert_eq!(h.store.token.borrow().as_deref(), Some("tok"));
    }

    #[test]
    fn forbidden_profile_clears_token_under_clear_policy() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("tok", Err(ApiError::Auth(401))),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Clear,
        );
        block_on(h.vm.init());

        block_on(h.vm.set_token("tok".into()));

        assert_eq!(h.vm.state().token(), None);
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(h.store.cookie.borrow().clone(), Some(expired_token_cookie()));
    }

    #[test]
    fn logout_twice_is_idempotent() {
        let h = harness(
            FakeBridge::logged_in("me@cub.rip"),
            FakeApi::new().grant("tok", "1").profile("tok", Ok("1")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());

        block_on(h.vm.logout());
        let after_first = h.vm.state().snapshot();
        block_on(h.vm.logout());
        let after_second = h.vm.state().snapshot();

        assert_eq!(after_first.identity_email, after_second.identity_email);
        assert_eq!(after_first.app_token, after_second.app_token);
        assert_eq!(after_first.profile_id, after_second.profile_id);
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);
        assert_eq!(h.bridge.logout_calls.get(), 1);
        assert_eq!(*h.navigations.borrow(), vec!["#home".to_string(), "#home".to_string()]);
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(*h.store.profile.borrow(), None);
    }

    #[test]
    fn token_round_trip_through_storage_and_cookie() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("tok", Ok("7")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());

        block_on(h.vm.set_token("tok".into()));
        assert_eq!(h.store.token.borrow().as_deref(), Some("tok"));
        assert_eq!(h.store.cookie.borrow().clone(), Some(token_cookie("tok")));

        block_on(h.vm.set_token(String::new()));
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(*h.store.profile.borrow(), None);
        assert_eq!(h.store.cookie.borrow().clone(), Some(expired_token_cookie()));
    }

    #[test]
    fn late_profile_response_for_old_token_is_ignored() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("t1", Ok("111")).profile("t2", Ok("222")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());
        let release_t1 = h.api.hold("t1");

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let vm = h.vm.clone();
        spawner.spawn_local(async move { vm.set_token("t1".into()).await }).unwrap();
        pool.run_until_stalled();

        let vm = h.vm.clone();
        spawner.spawn_local(async move { vm.set_token("t2".into()).await }).unwrap();
        pool.run_until_stalled();
        assert_eq!(h.vm.state().profile_id().as_deref(), Some("222"));

        release_t1.send(()).unwrap();
        pool.run_until_stalled();

        assert_eq!(h.vm.state().profile_id().as_deref(), Some("222"));
        assert_eq!(h.store.profile.borrow().as_deref(), Some("222"));
        assert_eq!(h.vm.state().token().as_deref(), Some("t2"));
    }

    #[test]
    fn exchange_finishing_after_logout_is_dropped() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().grant("late", "9").profile("late", Ok("9")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());
        let release_grant = h.api.hold_grant();

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let vm = h.vm.clone();
        let adopted = Rc::new(RefCell::new(None));
        let result = adopted.clone();
        spawner
            .spawn_local(async move {
                let ok = vm.login_succeeded("me@cub.rip".into()).await;
                *result.borrow_mut() = Some(ok);
            })
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(h.api.generate_calls.get(), 1);

        let vm = h.vm.clone();
        spawner.spawn_local(async move { vm.logout().await }).unwrap();
        pool.run_until_stalled();
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);

        release_grant.send(()).unwrap();
        pool.run_until_stalled();

        assert_eq!(*adopted.borrow(), Some(false));
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);
        assert_eq!(h.vm.state().token(), None);
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(h.store.cookie.borrow().clone(), Some(expired_token_cookie()));
        assert!(h.api.profile_calls.borrow().is_empty());
    }

    #[test]
    fn provider_logout_failure_still_clears_local_session() {
        let h = harness(
            FakeBridge::logged_in("me@cub.rip"),
            FakeApi::new().grant("tok", "1").profile("tok", Ok("1")),
            MemoryCredentialStore::default(),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());
        assert_eq!(h.store.token.borrow().as_deref(), Some("tok"));
        h.bridge.logout_fails.set(true);

        block_on(h.vm.logout());

        assert_eq!(h.bridge.logout_calls.get(), 1);
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);
        assert_eq!(h.vm.state().email(), None);
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(*h.store.profile.borrow(), None);
        assert_eq!(h.store.cookie.borrow().clone(), Some(expired_token_cookie()));
        assert_eq!(*h.navigations.borrow(), vec!["#home".to_string()]);
    }

    #[test]
    fn unreachable_provider_at_logout_still_clears_local_session() {
        let h = harness(
            FakeBridge::anonymous(),
            FakeApi::new().profile("tok", Ok("1")),
            MemoryCredentialStore::with_token("tok"),
            AuthErrorPolicy::Keep,
        );
        block_on(h.vm.init());
        h.bridge.unavailable.set(true);

        block_on(h.vm.logout());

        assert_eq!(h.bridge.logout_calls.get(), 0);
        assert_eq!(h.vm.state().phase(), SessionPhase::Anonymous);
        assert_eq!(*h.store.token.borrow(), None);
        assert_eq!(*h.store.profile.borrow(), None);
        assert_eq!(h.store.cookie.borrow().clone(), Some(expired_token_cookie()));
        assert_eq!(*h.navigations.borrow(), vec!["#home".to_string()]);
    }

    #[test]
    fn identity_metadata_failure_falls_back_to_stored_token() {
        let bridge = FakeBridge::logged_in("me@cub.rip");
        bridge.info_fails.set(true);
        let h = harness(
            bridge,
            FakeApi::new().grant("fresh", "2").profile("abc123", Ok("536380")),
            MemoryCredentialStore::with_token("abc123"),
            AuthErrorPolicy::Keep,
        );

        block_on(h.vm.init());

        assert_eq!(h.vm.state().email(), None);
        assert_eq!(h.vm.state().phase(), SessionPhase::AppAuthenticated);
        assert_eq!(h.vm.state().token().as_deref(), Some("abc123"));
        assert_eq!(h.vm.state().profile_id().as_deref(), Some("536380"));
        assert_eq!(h.api.generate_calls.get(), 0);
    }
}
