//! Authentication session shared by the HTTP client and the navigator.
//!
//! Only the bearer token is persisted; the username lives in memory for the
//! lifetime of the process.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::navigation::Navigator;

// ---------------------------------------------------------------------------
// Token persistence
// ---------------------------------------------------------------------------

/// Where the bearer token survives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Stores the token as the sole content of a file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/qms-console/authentication_token`, when the platform
    /// has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qms-console").join("authentication_token"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process store, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    username: Option<String>,
}

/// The signed-in user's credentials.
///
/// A store failure is logged and never fails the caller: the in-memory
/// token stays authoritative for this process.
pub struct Session {
    store: Arc<dyn TokenStore>,
    navigator: Arc<Navigator>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<Navigator>) -> Self {
        Self {
            store,
            navigator,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `Bearer <token>` when signed in.
    pub fn authentication_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }

    pub fn username(&self) -> Option<String> {
        self.read_state(|s| s.username.clone())
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        if let Err(e) = self.store.save(&token) {
            tracing::warn!(error = %e, "Failed to persist authentication token");
        }
        self.write_state(|s| s.token = Some(token));
    }

    pub fn set_username(&self, username: impl Into<String>) {
        let username = username.into();
        self.write_state(|s| s.username = Some(username));
    }

    pub fn clear_auth(&self) {
        self.write_state(|s| {
            s.token = None;
            s.username = None;
        });
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to remove persisted authentication token");
        }
    }

    /// Called by the HTTP client on a 401: forget the credentials and send
    /// the user to the login route.
    pub fn handle_unauthorized(&self) {
        tracing::info!("Session rejected by the server, signing out");
        self.clear_auth();
        self.navigator.redirect_to_login();
    }

    /// The in-memory token, reloaded from the store while absent.
    fn token(&self) -> Option<String> {
        if let Some(token) = self.read_state(|s| s.token.clone()) {
            return Some(token);
        }
        let loaded = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted authentication token");
                None
            }
        };
        if let Some(token) = &loaded {
            self.write_state(|s| {
                s.token.get_or_insert_with(|| token.clone());
            });
        }
        loaded
    }

    fn read_state<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_state(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
