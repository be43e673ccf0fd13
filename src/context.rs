use anyhow::{Context as _, Result};
use eventease_core::User;
use eventease_core::config::AppConfig;
use eventease_core::identity::MockIdentityProvider;
use eventease_core::session::SessionStore;
use eventease_core::storage::FileStorage;

/// Everything a command needs, passed explicitly instead of living in globals.
pub struct Context {
    pub config: AppConfig,
    pub session: SessionStore<FileStorage>,
}

impl Context {
    /// Load config and restore the saved session.
    pub fn load() -> Result<Self> {
        let config = AppConfig::load().context("Failed to load config")?;

        let data_dir = config.data_path()?;
        let storage = FileStorage::open(&data_dir);

        Self::new(config, storage)
    }

    /// Restore the session persisted in `storage`.
    pub fn new(config: AppConfig, storage: FileStorage) -> Result<Self> {
        let provider = MockIdentityProvider::new(config.session_ttl()?);
        let session = SessionStore::open(storage, Box::new(provider));

        Ok(Context { config, session })
    }

    /// The signed-in user, or an error telling the user how to sign in.
    pub fn require_user(&self) -> Result<&User> {
        self.session
            .require_user()
            .context("Not logged in. Run `eventease login` first.")
    }
}
