//! Session registry with per-session locking.
//!
//! The map lock is held only to look sessions up or to mutate the
//! registry itself. Each session sits behind its own mutex, so two games
//! never serialize against each other and a long engine search in one
//! session cannot block the rest.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use anyhow::{anyhow, Result};
use mcts::MctsConfig;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::session::{mcts_config, GameSession};

/// Shared handle to one session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Owns every live [`GameSession`], keyed by id.
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    search_config: MctsConfig,
    max_sessions: usize,
}

impl SessionManager {
    pub fn new(search_config: MctsConfig, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            search_config,
            max_sessions,
        }
    }

    /// Build a manager from loaded configuration.
    pub fn from_settings(config: &engine_config::CentralConfig) -> Self {
        Self::new(mcts_config(&config.search), config.session.max_sessions)
    }

    /// Create a new session at the starting position and return its id.
    /// Fails when the session cap is reached.
    pub fn create_session(&self) -> Result<Uuid> {
        self.insert(GameSession::new(self.search_config.clone()))
    }

    /// Create a session with a fixed engine seed (reproducible games).
    pub fn create_session_with_seed(&self, seed: u64) -> Result<Uuid> {
        self.insert(GameSession::with_seed(self.search_config.clone(), seed))
    }

    fn insert(&self, session: GameSession) -> Result<Uuid> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
        if sessions.len() >= self.max_sessions {
            warn!(
                count = sessions.len(),
                max = self.max_sessions,
                "session limit reached"
            );
            return Err(anyhow!("session limit reached ({})", self.max_sessions));
        }
        let id = session.id();
        sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(session = %id, count = sessions.len(), "session registered");
        Ok(id)
    }

    /// Look up a session handle. Callers lock the handle themselves; the
    /// map lock is released before this returns.
    pub fn session(&self, id: Uuid) -> Result<Option<SessionHandle>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
        Ok(sessions.get(&id).cloned())
    }

    /// Drop a session. Returns whether it existed. An in-flight search on
    /// the removed session finishes against its own handle and is then
    /// discarded along with it.
    pub fn remove_session(&self, id: Uuid) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
        let removed = sessions.remove(&id).is_some();
        if removed {
            info!(session = %id, count = sessions.len(), "session removed");
        }
        Ok(removed)
    }

    /// Remove sessions idle longer than `timeout`. Sessions whose mutex is
    /// currently held are busy, hence not idle, and are skipped.
    pub fn cleanup_expired(&self, timeout: Duration) -> Result<usize> {
        let expired: Vec<Uuid> = {
            let sessions = self
                .sessions
                .read()
                .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
            sessions
                .iter()
                .filter_map(|(id, handle)| match handle.try_lock() {
                    Ok(session) if session.is_expired(timeout) => Some(*id),
                    _ => None,
                })
                .collect()
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
        let mut removed = 0;
        for id in expired {
            if sessions.remove(&id).is_some() {
                debug!(session = %id, "expired session reaped");
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn session_count(&self) -> Result<usize> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| anyhow!("Failed to acquire session map lock: {e}"))?;
        Ok(sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SearchBudget;
    use chess_core::{Color, Move, Position, Square};

    fn mv(from: &str, to: &str) -> Move {
        Move::quiet(
            Square::from_algebraic(from).unwrap(),
            Square::from_algebraic(to).unwrap(),
        )
    }

    fn test_manager(max_sessions: usize) -> SessionManager {
        SessionManager::new(MctsConfig::for_testing(), max_sessions)
    }

    #[test]
    fn test_create_lookup_remove() {
        let manager = test_manager(10);
        let id = manager.create_session().unwrap();
        assert_eq!(manager.session_count().unwrap(), 1);

        let handle = manager.session(id).unwrap().expect("session exists");
        assert_eq!(handle.lock().unwrap().id(), id);

        assert!(manager.remove_session(id).unwrap());
        assert!(!manager.remove_session(id).unwrap());
        assert!(manager.session(id).unwrap().is_none());
        assert_eq!(manager.session_count().unwrap(), 0);
    }

    #[test]
    fn test_session_limit() {
        let manager = test_manager(2);
        let first = manager.create_session().unwrap();
        manager.create_session().unwrap();
        assert!(manager.create_session().is_err());

        // Removing one frees a slot.
        manager.remove_session(first).unwrap();
        assert!(manager.create_session().is_ok());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let manager = test_manager(10);
        let a = manager.create_session_with_seed(1).unwrap();
        let b = manager.create_session_with_seed(2).unwrap();

        let handle_a = manager.session(a).unwrap().unwrap();
        handle_a.lock().unwrap().submit_move(mv("e2", "e4")).unwrap();

        let handle_b = manager.session(b).unwrap().unwrap();
        let session_b = handle_b.lock().unwrap();
        assert_eq!(*session_b.current_position(), Position::startpos());
        assert_eq!(session_b.current_position().side_to_move, Color::White);
    }

    #[test]
    fn test_cleanup_expired() {
        let manager = test_manager(10);
        manager.create_session().unwrap();
        manager.create_session().unwrap();

        // Nothing is older than a minute.
        assert_eq!(manager.cleanup_expired(Duration::from_secs(60)).unwrap(), 0);
        assert_eq!(manager.session_count().unwrap(), 2);

        // A zero timeout reaps every idle session.
        assert_eq!(manager.cleanup_expired(Duration::ZERO).unwrap(), 2);
        assert_eq!(manager.session_count().unwrap(), 0);
    }

    #[test]
    fn test_cleanup_skips_busy_sessions() {
        let manager = test_manager(10);
        let id = manager.create_session().unwrap();
        let handle = manager.session(id).unwrap().unwrap();

        let guard = handle.lock().unwrap();
        assert_eq!(manager.cleanup_expired(Duration::ZERO).unwrap(), 0);
        drop(guard);

        assert_eq!(manager.cleanup_expired(Duration::ZERO).unwrap(), 1);
    }

    #[test]
    fn test_engine_reply_through_manager() {
        let manager = test_manager(10);
        let id = manager.create_session_with_seed(42).unwrap();
        let handle = manager.session(id).unwrap().unwrap();

        let mut session = handle.lock().unwrap();
        let budget = SearchBudget::new(Duration::from_secs(30), 30);
        let reply = session.request_ai_move(budget).unwrap();
        session.submit_move(reply).unwrap();
        assert_eq!(session.current_position().side_to_move, Color::Black);
    }
}
