//! The login session.
//!
//! A `SessionStore` keeps the signed-in user in memory and mirrors it into a
//! `Storage` under two keys: the session token and the serialized user. It is
//! created in the loading state and becomes usable once `restore` has run:
//!
//! ```text
//! new() -> Loading --restore()--> Authenticated | Anonymous
//!                                 Authenticated <--login/register/logout--> Anonymous
//! ```

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{EventEaseError, EventEaseResult};
use crate::identity::{Credentials, IdentityProvider, SessionToken};
use crate::storage::Storage;
use crate::user::User;

pub const TOKEN_KEY: &str = "eventease_token";
pub const USER_KEY: &str = "eventease_user";

/// What consumers see when they look at the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState<'a> {
    Loading,
    Authenticated(&'a User),
    Anonymous,
}

pub struct SessionStore<S: Storage> {
    storage: S,
    provider: Box<dyn IdentityProvider>,
    user: Option<User>,
    token: Option<SessionToken>,
    loading: bool,
}

impl<S: Storage> SessionStore<S> {
    /// Create a store in the loading state. Call `restore` before reading the user.
    pub fn new(storage: S, provider: Box<dyn IdentityProvider>) -> Self {
        SessionStore {
            storage,
            provider,
            user: None,
            token: None,
            loading: true,
        }
    }

    /// Create a store and immediately restore any persisted session.
    pub fn open(storage: S, provider: Box<dyn IdentityProvider>) -> Self {
        let mut store = Self::new(storage, provider);
        store.restore();
        store
    }

    /// Load the persisted session, once.
    ///
    /// Unreadable or expired entries leave the session anonymous; nothing is
    /// reported to the caller.
    pub fn restore(&mut self) {
        if !self.loading {
            return;
        }

        match self.read_persisted() {
            Some((token, user)) => {
                debug!(user = %user.email, "restored session");
                self.token = Some(token);
                self.user = Some(user);
            }
            None => debug!("no session to restore"),
        }

        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> SessionState<'_> {
        if self.loading {
            return SessionState::Loading;
        }
        match &self.user {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        }
    }

    /// The signed-in user. Always None while loading.
    pub fn user(&self) -> Option<&User> {
        match self.state() {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// The signed-in user, or `NotLoggedIn`.
    pub fn require_user(&self) -> EventEaseResult<&User> {
        self.user().ok_or(EventEaseError::NotLoggedIn)
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn login(&mut self, email: &str, password: &str) -> EventEaseResult<User> {
        self.provider
            .login(email, password)
            .and_then(|creds| self.start(creds))
            .map_err(|e| EventEaseError::LoginFailed(Box::new(e)))
    }

    pub fn register(&mut self, email: &str, password: &str, name: &str) -> EventEaseResult<User> {
        self.provider
            .register(email, password, name)
            .and_then(|creds| self.start(creds))
            .map_err(|e| EventEaseError::RegistrationFailed(Box::new(e)))
    }

    /// Forget the user, in memory and in storage. Storage failures are logged only.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.clear_persisted();
        debug!("logged out");
    }

    fn start(&mut self, creds: Credentials) -> EventEaseResult<User> {
        let Credentials { user, token } = creds;

        // A half-written session must not survive, in memory or in storage
        if let Err(e) = self.persist(&token, &user) {
            warn!(error = %e, "could not save session");
            self.user = None;
            self.token = None;
            self.clear_persisted();
            return Err(e);
        }

        debug!(user = %user.email, "session started");

        self.token = Some(token);
        self.user = Some(user.clone());
        Ok(user)
    }

    fn persist(&mut self, token: &SessionToken, user: &User) -> EventEaseResult<()> {
        self.storage.set(TOKEN_KEY, &token.to_entry()?)?;
        self.storage.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }

    fn read_persisted(&mut self) -> Option<(SessionToken, User)> {
        let raw_token = match self.storage.get(TOKEN_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read session token");
                return None;
            }
        };

        let token = SessionToken::from_entry(&raw_token)?;
        if token.is_expired(Utc::now()) {
            debug!("session token expired");
            self.clear_persisted();
            return None;
        }

        let raw_user = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read session user");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some((token, user)),
            Err(e) => {
                warn!(error = %e, "error parsing user data");
                None
            }
        }
    }

    fn clear_persisted(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key, error = %e, "could not remove session entry");
            }
        }
    }

    /// Hand the storage back, e.g. to reopen a store on it.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MockIdentityProvider;
    use crate::storage::MemoryStorage;
    use crate::user::UserRole;
    use chrono::Duration;

    fn store(storage: MemoryStorage) -> SessionStore<MemoryStorage> {
        SessionStore::open(storage, Box::new(MockIdentityProvider::default()))
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> EventEaseResult<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> EventEaseResult<()> {
            Err(EventEaseError::Storage("read-only".to_string()))
        }

        fn remove(&mut self, _key: &str) -> EventEaseResult<bool> {
            Err(EventEaseError::Storage("read-only".to_string()))
        }
    }

    /// Memory storage that can be told to reject writes of the user entry.
    #[derive(Default)]
    struct UserWriteFails {
        inner: MemoryStorage,
        failing: bool,
    }

    impl Storage for UserWriteFails {
        fn get(&self, key: &str) -> EventEaseResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> EventEaseResult<()> {
            if self.failing && key == USER_KEY {
                return Err(EventEaseError::Storage("disk full".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> EventEaseResult<bool> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_user_write_leaves_no_session() {
        let mut store = SessionStore::open(
            UserWriteFails::default(),
            Box::new(MockIdentityProvider::default()),
        );
        store.login("bob@example.com", "pw").unwrap();

        store.storage.failing = true;
        let err = store.login("carol@example.com", "pw").unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.token().is_none());

        let mut storage = store.into_storage();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);

        storage.failing = false;
        let restarted = SessionStore::open(storage, Box::new(MockIdentityProvider::default()));
        assert_eq!(restarted.state(), SessionState::Anonymous);
    }

    #[test]
    fn new_store_is_loading_until_restored() {
        let mut store = SessionStore::new(
            MemoryStorage::new(),
            Box::new(MockIdentityProvider::default()),
        );
        assert!(store.is_loading());
        assert_eq!(store.state(), SessionState::Loading);
        assert!(store.user().is_none());

        store.restore();

        assert!(!store.is_loading());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn login_sets_user_and_persists() {
        let mut store = store(MemoryStorage::new());
        let user = store.login("alice@example.com", "x").unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.role, UserRole::EventOwner);
        assert_eq!(store.user(), Some(&user));

        let storage = store.into_storage();
        assert!(storage.get(TOKEN_KEY).unwrap().is_some());
        let persisted: User =
            serde_json::from_str(&storage.get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(persisted, user);
    }

    #[test]
    fn register_uses_supplied_name() {
        let mut store = store(MemoryStorage::new());
        let user = store
            .register("carol@example.com", "pw", "Carol Danvers")
            .unwrap();

        assert_eq!(user.name, "Carol Danvers");
        assert_eq!(store.require_user().unwrap().name, "Carol Danvers");
    }

    #[test]
    fn restore_brings_back_logged_in_user() {
        let mut first = store(MemoryStorage::new());
        let user = first.login("dave@example.com", "pw").unwrap();

        let second = store(first.into_storage());
        assert_eq!(second.state(), SessionState::Authenticated(&user));
    }

    #[test]
    fn logout_then_restore_is_anonymous() {
        let mut store1 = store(MemoryStorage::new());
        store1.login("alice@example.com", "x").unwrap();
        store1.logout();
        assert_eq!(store1.state(), SessionState::Anonymous);

        let store2 = store(store1.into_storage());
        assert_eq!(store2.state(), SessionState::Anonymous);
    }

    #[test]
    fn logout_with_nothing_persisted_is_silent() {
        let mut store = store(MemoryStorage::new());
        store.logout();
        assert!(store.user().is_none());

        let mut broken = SessionStore::open(
            ReadOnlyStorage,
            Box::new(MockIdentityProvider::default()),
        );
        broken.logout();
        assert!(broken.user().is_none());
    }

    #[test]
    fn malformed_user_is_discarded() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "mock_token").unwrap();
        storage.set(USER_KEY, "{not json").unwrap();

        let store = store(storage);
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn user_without_token_is_ignored() {
        let mut storage = MemoryStorage::new();
        storage
            .set(
                USER_KEY,
                r#"{"id":"1","email":"a@b.c","name":"a","role":"staff","createdAt":"2024-12-01T10:00:00Z"}"#,
            )
            .unwrap();

        assert_eq!(store(storage).state(), SessionState::Anonymous);
    }

    #[test]
    fn legacy_placeholder_token_restores_user() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "mock_token").unwrap();
        storage
            .set(
                USER_KEY,
                r#"{"id":"1","email":"a@b.c","name":"a","role":"staff","createdAt":"2024-12-01T10:00:00Z"}"#,
            )
            .unwrap();

        let store = store(storage);
        let user = store.user().unwrap();
        assert_eq!(user.role, UserRole::Staff);
        assert_eq!(store.token().unwrap().token, "mock_token");
    }

    #[test]
    fn expired_token_is_cleared() {
        let mut first = SessionStore::open(
            MemoryStorage::new(),
            Box::new(MockIdentityProvider::new(Duration::seconds(-1))),
        );
        first.login("eve@example.com", "pw").unwrap();

        let second = store(first.into_storage());
        assert_eq!(second.state(), SessionState::Anonymous);

        let storage = second.into_storage();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn restore_runs_once() {
        let mut store = store(MemoryStorage::new());
        store.login("frank@example.com", "pw").unwrap();
        store.restore();

        assert_eq!(store.user().unwrap().name, "frank");
    }

    #[test]
    fn login_failure_is_generic() {
        let mut store = SessionStore::open(
            ReadOnlyStorage,
            Box::new(MockIdentityProvider::default()),
        );

        let err = store.login("alice@example.com", "x").unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
        assert!(store.user().is_none());

        let err = store.register("alice@example.com", "x", "Alice").unwrap_err();
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[test]
    fn require_user_when_anonymous() {
        let store = store(MemoryStorage::new());
        assert!(matches!(
            store.require_user(),
            Err(EventEaseError::NotLoggedIn)
        ));
    }
}
