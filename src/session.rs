// Login session context
// The session is an explicit value handed to whatever needs it. Persistence
// goes through an injected `SessionStorage` adapter.

use crate::api::{ApiError, HolidazeApi};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidCredentials(&'static str),

    #[error("{0}")]
    Login(#[from] ApiError),
}

const STUDENT_EMAIL_DOMAIN: &str = "@stud.noroff.no";
const MIN_PASSWORD_LEN: usize = 8;

// Login form body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    // Only student accounts can sign in
    pub fn validate(&self) -> Result<(), SessionError> {
        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(SessionError::InvalidCredentials("Email is required"));
        }
        let valid_address = email
            .strip_suffix(STUDENT_EMAIL_DOMAIN)
            .is_some_and(|local| !local.is_empty() && !local.contains('@'));
        if !valid_address {
            return Err(SessionError::InvalidCredentials(
                "Email must be a @stud.noroff.no email",
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::InvalidCredentials(
                "Password must be at least 8 characters",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Avatar {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

// Profile returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub venue_manager: bool,
    pub access_token: String,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    profile: Option<UserProfile>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn logged_in(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn is_venue_manager(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.venue_manager)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.access_token.as_str())
    }
}

// Storage adapter for the persisted profile
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> Result<Option<UserProfile>, SessionError>;
    fn save(&self, profile: &UserProfile) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<UserProfile>>,
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, profile: &UserProfile) -> Result<(), SessionError> {
        *self.slot.lock() = Some(profile.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.slot.lock().take();
        Ok(())
    }
}

// Keeps the profile as a JSON document on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<UserProfile>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(profile)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

pub struct SessionStore<S: SessionStorage> {
    storage: S,
    current: RwLock<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: RwLock::new(Session::anonymous()),
        }
    }

    // Load whatever the storage holds. A corrupt record is discarded and the
    // session starts anonymous.
    pub fn restore(storage: S) -> Result<Self, SessionError> {
        let profile = match storage.load() {
            Ok(profile) => profile,
            Err(SessionError::Corrupt(e)) => {
                warn!("Discarding corrupt stored session: {}", e);
                storage.clear()?;
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(profile) = &profile {
            debug!("Restored session for {}", profile.name);
        }

        Ok(Self {
            storage,
            current: RwLock::new(Session { profile }),
        })
    }

    pub fn current(&self) -> Session {
        self.current.read().clone()
    }

    pub fn login(&self, profile: UserProfile) -> Result<Session, SessionError> {
        self.storage.save(&profile)?;
        info!(user = %profile.name, manager = profile.venue_manager, "Logged in");
        let session = Session::logged_in(profile);
        *self.current.write() = session.clone();
        Ok(session)
    }

    // Check the credentials locally, exchange them for a profile and persist it
    pub async fn sign_in<A: HolidazeApi + ?Sized>(
        &self,
        api: &A,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        credentials.validate()?;
        let profile = api.login(credentials).await.map_err(|e| {
            warn!(email = %credentials.email, "Login rejected: {}", e);
            e
        })?;
        self.login(profile)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.storage.clear()?;
        *self.current.write() = Session::anonymous();
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn traveller() -> UserProfile {
    UserProfile {
        name: "ola_traveller".to_string(),
        email: "ola@stud.noroff.no".to_string(),
        venue_manager: false,
        access_token: "token-traveller".to_string(),
        avatar: None,
    }
}

#[cfg(test)]
pub(crate) fn manager() -> UserProfile {
    UserProfile {
        name: "kari_manager".to_string(),
        email: "kari@stud.noroff.no".to_string(),
        venue_manager: true,
        access_token: "token-manager".to_string(),
        avatar: None,
    }
}
