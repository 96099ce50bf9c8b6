//! SMT-style back-end: equality and linear integer arithmetic
//! over a fixed fragment, via Z3.
//!
//! Compiled in only behind the `smt` cargo feature, since it links a
//! system Z3 installation. With the feature off, [`prove`] reports
//! `result=error` instead of failing to build.

#[cfg(feature = "smt")]
mod encode;

use fol_ast::Formula;
use fol_clause::Clause;
use fol_normalize::SkolemEnv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProveVerdict {
    Proved,
    Failed,
    Timeout,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub clauses: usize,
}

#[derive(Debug, Clone)]
pub struct ProveOutcome {
    pub verdict: ProveVerdict,
    pub statistics: Statistics,
}

/// Options governing the theory fragment in play.
#[derive(Debug, Clone)]
pub struct SmtOptions {
    /// When set, the designated symbol names (`less`, `gt`, `plus`,
    /// `times`, …) are encoded against Z3's integer theory instead of
    /// as uninterpreted relations/functions.
    pub enable_arithmetic: bool,
    pub timeout_ms: u32,
}

impl Default for SmtOptions {
    fn default() -> Self {
        SmtOptions {
            enable_arithmetic: false,
            timeout_ms: 10_000,
        }
    }
}

/// Predicate names mapped to integer comparison when arithmetic mode
/// is on.
pub const ARITHMETIC_PREDICATES: &[&str] = &["less", "gt", "lte", "gte"];

/// Function names mapped to integer operators when arithmetic mode is
/// on.
pub const ARITHMETIC_FUNCTIONS: &[&str] = &["plus", "times", "minus"];

/// Whether [`prove`] is backed by a real Z3 instance rather than the
/// feature-off stub. Callers that route by back-end capability (e.g.
/// auto-dispatch falling back to another engine) check this instead of
/// calling `prove` and parsing the stub's error string.
#[cfg(feature = "smt")]
pub const fn is_available() -> bool {
    true
}

#[cfg(not(feature = "smt"))]
pub const fn is_available() -> bool {
    false
}

#[cfg(feature = "smt")]
pub fn prove(
    premises: &[Clause],
    goal: &Formula,
    env: &mut SkolemEnv,
    options: &SmtOptions,
) -> ProveOutcome {
    encode::prove(premises, goal, env, options)
}

#[cfg(not(feature = "smt"))]
pub fn prove(
    _premises: &[Clause],
    _goal: &Formula,
    _env: &mut SkolemEnv,
    _options: &SmtOptions,
) -> ProveOutcome {
    ProveOutcome {
        verdict: ProveVerdict::Error(
            "the SMT back-end was not compiled in; rebuild with `--features smt`".to_string(),
        ),
        statistics: Statistics::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_feature_reports_error_not_a_panic() {
        if cfg!(feature = "smt") {
            return;
        }
        let mut env = SkolemEnv::new();
        let goal = Formula::predicate("p", vec![]);
        let outcome = prove(&[], &goal, &mut env, &SmtOptions::default());
        assert!(matches!(outcome.verdict, ProveVerdict::Error(_)));
    }
}
