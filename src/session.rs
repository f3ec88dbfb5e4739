//! User session marker.
//!
//! `SessionState` is owned by the caller and handed (usually as an `Arc`) to
//! whatever needs to know whether a session exists. A session is created at
//! most once; later calls observe the same one.

use async_lock::OnceCell;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An established user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}

/// Holder for the (at most one) session of this process or component tree.
#[derive(Debug, Default)]
pub struct SessionState {
    session: OnceCell<UserSession>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the session if there is none yet, then return it.
    pub async fn create_if_needed(&self) -> &UserSession {
        self.session
            .get_or_init(|| async {
                let session = UserSession::new();
                tracing::debug!(session_id = %session.id, "user session created");
                session
            })
            .await
    }

    /// Blocking variant of [`create_if_needed`](Self::create_if_needed).
    pub fn create_if_needed_blocking(&self) -> &UserSession {
        self.session.get_or_init_blocking(UserSession::new)
    }

    pub fn current(&self) -> Option<&UserSession> {
        self.session.get()
    }

    pub fn exists(&self) -> bool {
        self.session.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_state_has_no_session() {
        let state = SessionState::new();
        assert!(!state.exists());
        assert!(state.current().is_none());
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let state = SessionState::new();
        let first = state.create_if_needed().await.clone();
        let second = state.create_if_needed().await.clone();
        assert_eq!(first, second);
        assert!(state.exists());
        assert_eq!(state.current(), Some(&first));
    }

    #[tokio::test]
    async fn test_concurrent_creation_yields_one_session() {
        let state = Arc::new(SessionState::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let state = Arc::clone(&state);
            handles.push(tokio::spawn(async move {
                state.create_if_needed().await.id
            }));
        }
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_blocking_creation_matches_async() {
        let state = SessionState::new();
        let id = state.create_if_needed_blocking().id;
        let again = tokio_test::block_on(state.create_if_needed()).id;
        assert_eq!(id, again);
    }

    #[test]
    fn test_separate_states_are_independent() {
        let a = SessionState::new();
        let b = SessionState::new();
        a.create_if_needed_blocking();
        assert!(a.exists());
        assert!(!b.exists());
    }
}
