use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::jwt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub username: Option<String>,
    pub saved_at: DateTime<Utc>,
}

/// File-backed bearer token storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.session_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| AppError::Session(format!("Failed to read session file: {}", e)))?;

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, token: &str, username: Option<&str>) -> Result<Session, AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Session(format!("Failed to create session dir: {}", e)))?;
        }

        let session = Session {
            token: token.to_string(),
            username: username.map(str::to_string),
            saved_at: Utc::now(),
        };

        let raw = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, raw)
            .map_err(|e| AppError::Session(format!("Failed to write session file: {}", e)))?;

        debug!("Session saved to {}", self.path.display());
        Ok(session)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| AppError::Session(format!("Failed to remove session file: {}", e)))?;
            debug!("Session cleared");
        }
        Ok(())
    }

    /// Token of the current session, if one exists and has not expired.
    pub fn token(&self) -> Result<Option<String>, AppError> {
        match self.load()? {
            Some(session) if jwt::is_expired(&session.token, Utc::now()) => {
                warn!("Stored session has expired");
                Ok(None)
            }
            Some(session) => Ok(Some(session.token)),
            None => Ok(None),
        }
    }

    pub fn require(&self) -> Result<String, AppError> {
        self.token()?
            .ok_or_else(|| AppError::Auth("Not logged in".to_string()))
    }
}
