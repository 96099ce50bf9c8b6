//! A single session's state.

use std::time::{SystemTime, UNIX_EPOCH};

use fol_normalize::SkolemEnv;
use uuid::Uuid;

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the Unix epoch")
        .as_millis() as u64
}

/// Governs a session's lifetime; `ttl_ms` is checked against
/// `last_accessed_at`, not `created_at`.
#[derive(Debug, Clone, Copy)]
pub struct CreateOptions {
    pub ttl_ms: u64,
}

pub const DEFAULT_TTL_MS: u64 = 30 * 60 * 1000;

impl Default for CreateOptions {
    fn default() -> Self {
        CreateOptions { ttl_ms: DEFAULT_TTL_MS }
    }
}

/// A session's premise list plus the Skolem environment that keeps
/// naming consistent across successive assertions within it.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub premises: Vec<String>,
    pub env: SkolemEnv,
    pub created_at_ms: u64,
    pub last_accessed_at_ms: u64,
    pub ttl_ms: u64,
}

impl Session {
    pub fn new(id: Uuid, opts: CreateOptions) -> Self {
        let now = now_millis();
        Session {
            id,
            premises: Vec::new(),
            env: SkolemEnv::new(),
            created_at_ms: now,
            last_accessed_at_ms: now,
            ttl_ms: opts.ttl_ms,
        }
    }

    pub fn touch(&mut self) {
        self.last_accessed_at_ms = now_millis();
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.last_accessed_at_ms + self.ttl_ms < now_ms
    }

    pub fn assert_premise(&mut self, formula: String) {
        self.premises.push(formula);
    }

    /// Removes the first exact string match, returning whether one was
    /// found.
    pub fn retract_premise(&mut self, formula: &str) -> bool {
        if let Some(pos) = self.premises.iter().position(|p| p == formula) {
            self.premises.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.premises.clear();
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            premises: self.premises.clone(),
            created_at_ms: self.created_at_ms,
            last_accessed_at_ms: self.last_accessed_at_ms,
            ttl_ms: self.ttl_ms,
        }
    }
}

/// A read-only snapshot of a session, suitable for `getInfo` / serializing
/// across a tool boundary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub premises: Vec<String>,
    pub created_at_ms: u64,
    pub last_accessed_at_ms: u64,
    pub ttl_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retract_removes_only_the_first_exact_match() {
        let mut session = Session::new(Uuid::new_v4(), CreateOptions::default());
        session.assert_premise("man(socrates)".to_string());
        session.assert_premise("man(socrates)".to_string());
        assert!(session.retract_premise("man(socrates)"));
        assert_eq!(session.premises, vec!["man(socrates)".to_string()]);
        assert!(!session.retract_premise("man(plato)"));
    }

    #[test]
    fn clear_empties_premises_without_touching_identity() {
        let mut session = Session::new(Uuid::new_v4(), CreateOptions::default());
        session.assert_premise("p(a)".to_string());
        let id = session.id;
        session.clear();
        assert!(session.premises.is_empty());
        assert_eq!(session.id, id);
    }

    #[test]
    fn expiry_is_relative_to_last_access_not_creation() {
        let mut session = Session::new(Uuid::new_v4(), CreateOptions { ttl_ms: 100 });
        session.last_accessed_at_ms = session.created_at_ms;
        assert!(!session.is_expired(session.created_at_ms + 50));
        assert!(session.is_expired(session.created_at_ms + 150));
    }
}
