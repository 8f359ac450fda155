//! Session guard: whether a login token is present, and where it lives.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::directory::DirectoryClient;
use crate::domain::{Credentials, SessionToken};
use crate::error::SessionError;

/// Answers "is the visitor logged in?".
pub trait SessionProvider: Send + Sync {
    fn token(&self) -> Option<SessionToken>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Token persisted as a single line in a file.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, token: &SessionToken) -> Result<(), SessionError> {
        let token = token.as_str().trim();
        if token.is_empty() {
            return Err(SessionError::Empty);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, format!("{token}\n"))?;
        Ok(())
    }

    /// Removes the stored token. Clearing an absent session is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionProvider for FileSession {
    fn token(&self) -> Option<SessionToken> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                (!token.is_empty()).then(|| SessionToken::new(token))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session token");
                None
            }
        }
    }
}

/// Fixed session, for tests and explicit token overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticSession(Option<SessionToken>);

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SessionToken::new(token)))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl SessionProvider for StaticSession {
    fn token(&self) -> Option<SessionToken> {
        self.0.clone()
    }
}

/// Exchanges credentials for a token and stores it.
#[instrument(skip(directory, store))]
pub async fn login(
    directory: &DirectoryClient,
    store: &FileSession,
    credentials: Credentials,
) -> Result<SessionToken, SessionError> {
    let token = directory.login(credentials).await?;
    store.store(&token)?;
    info!(path = %store.path().display(), "Session stored");
    Ok(token)
}
