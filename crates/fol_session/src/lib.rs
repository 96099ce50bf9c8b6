//! Session registry: random-id sessions, capacity-bounded, and
//! swept on a 60 s background tick.

mod session;

pub use session::{CreateOptions, Session, SessionInfo, DEFAULT_TTL_MS};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fol_base::{EngineError, ErrorKind};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub const MAX_SESSIONS: usize = 1000;
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// The shared mutable component of the engine: a map of sessions,
/// each independently lockable, behind one map-level lock that's only
/// held for the lifetime of a create or delete.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, opts: CreateOptions) -> Result<Uuid, EngineError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= MAX_SESSIONS {
            return Err(EngineError::new(
                ErrorKind::SessionLimit,
                format!("at capacity ({MAX_SESSIONS} sessions)"),
            ));
        }
        let id = Uuid::new_v4();
        sessions.insert(id, Arc::new(Mutex::new(Session::new(id, opts))));
        Ok(id)
    }

    async fn lookup(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, EngineError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::new(ErrorKind::SessionNotFound, id.to_string()))
    }

    /// Refreshes `lastAccessedAt` and returns the live premise list.
    pub async fn get(&self, id: Uuid) -> Result<Vec<String>, EngineError> {
        let session = self.lookup(id).await?;
        let mut session = session.lock().await;
        session.touch();
        Ok(session.premises.clone())
    }

    /// Same as [`SessionManager::get`], but does not refresh `lastAccessedAt`.
    pub async fn get_info(&self, id: Uuid) -> Result<SessionInfo, EngineError> {
        let session = self.lookup(id).await?;
        let session = session.lock().await;
        Ok(session.info())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), EngineError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| EngineError::new(ErrorKind::SessionNotFound, id.to_string()))
    }

    pub async fn assert_premise(&self, id: Uuid, formula: String) -> Result<(), EngineError> {
        let session = self.lookup(id).await?;
        let mut session = session.lock().await;
        session.touch();
        session.assert_premise(formula);
        Ok(())
    }

    /// Removes the first exact string match, returning whether one was found.
    pub async fn retract_premise(&self, id: Uuid, formula: &str) -> Result<bool, EngineError> {
        let session = self.lookup(id).await?;
        let mut session = session.lock().await;
        session.touch();
        Ok(session.retract_premise(formula))
    }

    /// Runs `f` against the session's live premise list and its
    /// persistent `SkolemEnv`, touching the session first. Used by
    /// `query-session` to prove a goal against a session
    /// without exposing the lock discipline to the caller.
    pub async fn with_session<F, R>(&self, id: Uuid, f: F) -> Result<R, EngineError>
    where
        F: FnOnce(&[String], &mut fol_normalize::SkolemEnv) -> R,
    {
        let session = self.lookup(id).await?;
        let mut session = session.lock().await;
        session.touch();
        let Session { premises, env, .. } = &mut *session;
        Ok(f(premises, env))
    }

    pub async fn clear(&self, id: Uuid) -> Result<(), EngineError> {
        let session = self.lookup(id).await?;
        let mut session = session.lock().await;
        session.touch();
        session.clear();
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Evicts every session whose `lastAccessedAt + ttlMs` has elapsed.
    /// Finds candidates under a read lock, dropping each session's
    /// guard immediately after reading its timestamp, then takes a
    /// single write lock to remove them — never holding a reference to
    /// an individual session across the whole sweep.
    pub async fn sweep_expired(&self) -> usize {
        let now_ms = now_millis();
        let expired: Vec<Uuid> = {
            let sessions = self.sessions.read().await;
            let mut expired = Vec::new();
            for (id, session) in sessions.iter() {
                if session.lock().await.is_expired(now_ms) {
                    expired.push(*id);
                }
            }
            expired
        };

        if expired.is_empty() {
            return 0;
        }
        let mut sessions = self.sessions.write().await;
        for id in &expired {
            sessions.remove(id);
        }
        expired.len()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_millis() as u64
}

/// Spawns the 60 s background sweep as its own task. Callers
/// that want the sweeper to outlive the current scope should hold onto
/// the returned handle (or detach it); dropping it aborts the task.
pub fn spawn_sweeper(manager: Arc<SessionManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = manager.sweep_expired().await;
            if evicted > 0 {
                log::debug!("session sweep evicted {evicted} session(s)");
            }
        }
    })
}
