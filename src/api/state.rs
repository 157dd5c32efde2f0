//! Application state for the Wage Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::wages::YearState;

/// Shared application state.
///
/// The loaded configuration is read-only and shared by every request. Each
/// wage session owns its own [`YearState`]; no day state is shared between
/// sessions.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration and prebuilt year data.
    config: Arc<ConfigLoader>,
    /// Open wage sessions by id.
    sessions: Arc<Mutex<HashMap<Uuid, YearState>>>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Opens a session editing a fresh copy of a year's wage state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownYear`] for an unsupported year and
    /// [`EngineError::SessionLimitReached`] once `max_sessions` are open.
    pub fn open_session(&self, year: i32) -> EngineResult<Uuid> {
        let state = self.config.new_year_state(year)?;
        let limit = self.config.config().max_sessions;

        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if sessions.len() >= limit {
            return Err(EngineError::SessionLimitReached { limit });
        }
        let id = Uuid::new_v4();
        sessions.insert(id, state);
        Ok(id)
    }

    /// Closes a session and frees its wage state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`] for an unknown id.
    pub fn close_session(&self, id: Uuid) -> EngineResult<()> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })
    }

    /// Returns the number of open sessions.
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Runs `f` against one session's wage state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`] for an unknown id, or the
    /// error returned by `f`.
    pub fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut YearState) -> EngineResult<R>,
    ) -> EngineResult<R> {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let state = sessions
            .get_mut(&id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;
        f(state)
    }
}
