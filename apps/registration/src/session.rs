//! Director login session and where it is persisted.
//!
//! The session is loaded once at startup, saved after login and after a
//! tournament is picked, and cleared on logout or whenever the API answers 401.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::tournament::TournamentRef;
use crate::error::ClientError;

pub const SESSION_FILE_ENV: &str = "REGISTRATION_SESSION_FILE";

/// Account details returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorUser {
    pub identifier: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tournaments: Vec<TournamentRef>,
}

impl DirectorUser {
    pub fn is_superuser(&self) -> bool {
        self.role == "superuser"
    }

    /// Superusers see everything; directors only their own tournaments.
    pub fn may_manage(&self, tournament_identifier: &str) -> bool {
        self.is_superuser()
            || self
                .tournaments
                .iter()
                .any(|t| t.identifier == tournament_identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorSession {
    /// Value of the `Authorization` header issued at login.
    pub token: String,
    pub user: DirectorUser,
    /// Tournament the director is currently working on.
    #[serde(default)]
    pub tournament: Option<TournamentRef>,
}

impl DirectorSession {
    pub fn new(token: impl Into<String>, user: DirectorUser) -> Self {
        Self {
            token: token.into(),
            user,
            tournament: None,
        }
    }

    pub fn with_tournament(&self, tournament: TournamentRef) -> Self {
        Self {
            tournament: Some(tournament),
            ..self.clone()
        }
    }
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<DirectorSession>, ClientError>;
    fn save(&self, session: &DirectorSession) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// JSON session file, readable only by its owner on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `REGISTRATION_SESSION_FILE`, else `<config dir>/bowling-registration/session.json`.
    pub fn from_env() -> Result<Self, ClientError> {
        if let Some(path) = env::var_os(SESSION_FILE_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }
        default_session_path()
            .map(Self::new)
            .ok_or_else(|| ClientError::config("could not determine config directory"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("bowling-registration").join("session.json"))
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<DirectorSession>, ClientError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(session) => {
                debug!(path = %self.path.display(), "Session loaded");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &DirectorSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // An existing file keeps its old mode, so narrow it before writing.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(contents.as_bytes())?;

        info!(path = %self.path.display(), user = %session.user.email, "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Process-local store, for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<DirectorSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<DirectorSession>, ClientError> {
        Ok(self.session.lock().clone())
    }

    fn save(&self, session: &DirectorSession) -> Result<(), ClientError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.session.lock() = None;
        Ok(())
    }
}
