//! Session gate: owns the bearer token and decides between the login form
//! and the authenticated views.

use std::sync::Arc;

use shared::api::LoginRequest;
use shared::state::Action;
use validator::Validate;

use crate::api::MailApi;
use crate::error::ClientResult;
use crate::state::StateHandle;
use crate::storage::TokenStore;

#[derive(Clone)]
pub struct SessionGate {
    api: Arc<dyn MailApi>,
    store: Arc<dyn TokenStore>,
    state: StateHandle,
}

impl SessionGate {
    pub fn new(api: Arc<dyn MailApi>, store: Arc<dyn TokenStore>, state: StateHandle) -> Self {
        Self { api, store, state }
    }

    /// Exchange credentials for a token.
    ///
    /// Any failure (empty input, rejected credentials, transport, storage)
    /// leaves the session unauthenticated with the generic login error.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let request = LoginRequest::new(username, password);

        let result = match request.validate() {
            Ok(()) => self.request_token(&request).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(token) => {
                tracing::info!("Logged in as {}", username);
                self.state.apply(Action::LoggedIn(token));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.state.apply(Action::LoginFailed);
                Err(e)
            }
        }
    }

    async fn request_token(&self, request: &LoginRequest) -> ClientResult<String> {
        let token = self.api.login(request).await?.access_token;
        self.store.save(&token)?;
        Ok(token)
    }

    /// Forget the token locally. No request is made.
    pub fn logout(&self) -> ClientResult<()> {
        let cleared = self.store.clear();
        self.state.apply(Action::LoggedOut);
        tracing::info!("Logged out");
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::storage::MemoryTokenStore;
    use crate::testing::FakeMailApi;
    use shared::state::{AppState, View, LOGIN_FAILED_MESSAGE};

    fn gate(api: Arc<FakeMailApi>, store: Arc<MemoryTokenStore>) -> (SessionGate, StateHandle) {
        let state = StateHandle::new(AppState::default());
        (SessionGate::new(api, store, state.clone()), state)
    }

    #[tokio::test]
    async fn test_valid_credentials_authenticate_and_persist() {
        let api = Arc::new(FakeMailApi::default());
        let store = Arc::new(MemoryTokenStore::default());
        let (gate, state) = gate(api.clone(), store.clone());

        state.apply(Action::LoginFailed);
        gate.login("admin", FakeMailApi::PASSWORD).await.unwrap();

        let snapshot = state.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(snapshot.login_error.is_none());
        assert_eq!(snapshot.view(), View::Inbox);
        assert_eq!(store.load().unwrap().as_deref(), Some(FakeMailApi::TOKEN));
    }

    #[tokio::test]
    async fn test_invalid_credentials_stay_on_login() {
        let api = Arc::new(FakeMailApi::default());
        let store = Arc::new(MemoryTokenStore::default());
        let (gate, state) = gate(api.clone(), store.clone());

        let err = gate.login("admin", "nope").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { .. }));

        let snapshot = state.snapshot();
        assert!(!snapshot.is_authenticated());
        assert_eq!(snapshot.login_error.as_deref(), Some(LOGIN_FAILED_MESSAGE));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_without_request() {
        let api = Arc::new(FakeMailApi::default());
        let (gate, state) = gate(api.clone(), Arc::new(MemoryTokenStore::default()));

        let err = gate.login("", "").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(api.calls().logins, 0);
        assert_eq!(
            state.snapshot().login_error.as_deref(),
            Some(LOGIN_FAILED_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_logout_is_local_and_clears_token() {
        let api = Arc::new(FakeMailApi::default());
        let store = Arc::new(MemoryTokenStore::default());
        let (gate, state) = gate(api.clone(), store.clone());

        gate.login("admin", FakeMailApi::PASSWORD).await.unwrap();
        let before = api.calls();

        gate.logout().unwrap();
        assert!(!state.snapshot().is_authenticated());
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(api.calls(), before);
    }
}
