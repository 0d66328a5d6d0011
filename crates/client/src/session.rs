//! Bearer-token holder shared by the client and the sync controller.
//!
//! The token survives restarts in a small JSON file. Persistence problems are
//! logged and otherwise ignored: the in-memory value is authoritative and
//! "no token" is a normal, unauthenticated state.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

const DEFAULT_SESSION_PATH: &str = "config/session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    token: Option<String>,
}

#[derive(Debug)]
struct Inner {
    token: Option<String>,
    path: Option<PathBuf>,
}

/// Cheap-to-clone handle on the current session. Last writer wins.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Mutex<Inner>>,
}

impl Session {
    /// Reads the persisted token at `path`, if any.
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = load_token(&path);
        tracing::debug!(
            "session loaded from {} (authenticated: {})",
            path.display(),
            token.is_some()
        );
        Self::with_inner(Inner {
            token,
            path: Some(path),
        })
    }

    /// A session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::with_inner(Inner {
            token: None,
            path: None,
        })
    }

    fn with_inner(inner: Inner) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// Stores `token` and persists it. A blank token clears the session.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            self.clear();
            return;
        }

        let mut inner = self.lock();
        inner.token = Some(token.to_string());
        if let Some(path) = &inner.path
            && let Err(err) = save_token(path, token)
        {
            tracing::warn!("failed to persist session to {}: {err}", path.display());
        }
    }

    /// Forgets the token. Safe to call any number of times.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.token = None;
        if let Some(path) = &inner.path {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!("session file {} removed", path.display()),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::warn!("failed to remove session file {}: {err}", path.display())
                }
            }
        }
    }
}

pub fn default_session_path() -> &'static str {
    DEFAULT_SESSION_PATH
}

fn load_token(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!("failed to read session file {}: {err}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<PersistedSession>(&content) {
        Ok(persisted) => persisted.token.filter(|token| !token.trim().is_empty()),
        Err(err) => {
            tracing::warn!("ignoring malformed session file {}: {err}", path.display());
            None
        }
    }
}

fn save_token(path: &Path, token: &str) -> crate::error::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(&PersistedSession {
        token: Some(token.to_string()),
    })?;
    fs::write(path, payload)?;
    Ok(())
}
