//! Persisted client session
//!
//! The session lives under two independent storage keys, `user` and
//! `token`. They are written and cleared together, but not atomically: any
//! state other than "both present and readable" counts as logged out for
//! [`SessionProvider::get_session`].

pub mod storage;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::AppResult;
use crate::models::User;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageEvent};

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

/// Authenticated user and bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Single source of truth for the persisted session
#[derive(Clone)]
pub struct SessionProvider {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionProvider {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Provider over a fresh in-memory storage
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn KeyValueStorage> {
        &self.storage
    }

    /// Complete session, if both keys are present and readable
    pub fn get_session(&self) -> Option<Session> {
        let user = self.current_user()?;
        let token = self.token()?;
        Some(Session { user, token })
    }

    pub fn set_session(&self, session: &Session) -> AppResult<()> {
        let user = serde_json::to_string(&session.user).map_err(|e| {
            crate::error::AppError::Internal(format!("Failed to encode session user: {}", e))
        })?;
        self.storage.set(USER_KEY, &user)?;
        self.storage.set(TOKEN_KEY, &session.token)?;
        tracing::debug!(user_id = session.user.id, "Session stored");
        Ok(())
    }

    /// Remove both keys; each removal is attempted even if the other fails
    pub fn clear_session(&self) -> AppResult<()> {
        let user = self.storage.remove(USER_KEY);
        let token = self.storage.remove(TOKEN_KEY);
        tracing::debug!("Session cleared");
        user.and(token)
    }

    /// Bearer token alone, regardless of the `user` entry
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Stored user alone; an unparseable entry reads as absent
    pub fn current_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read session user: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::error!("Error parsing stored user info: {}", e);
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().map(|u| u.is_admin()).unwrap_or(false)
    }

    /// Changes to the session keys made through any handle on this storage
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.storage.subscribe()
    }
}

pub fn is_session_key(key: &str) -> bool {
    key == USER_KEY || key == TOKEN_KEY
}
