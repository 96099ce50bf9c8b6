//! Back-end selection.

use crate::classify::Classification;

/// A reasoning back-end, or `Auto` to let the dispatcher choose one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Prolog,
    Sat,
    Smt,
    Asp,
    Auto,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Prolog => "prolog",
            Engine::Sat => "sat",
            Engine::Smt => "smt",
            Engine::Asp => "asp",
            Engine::Auto => "auto",
        }
    }
}

/// Auto-routing rules, applied to an already-classified clause set.
/// Clausification failure is handled by the caller before this is ever
/// reached.
///
/// A Horn clause set that also carries equality normally goes to SMT,
/// which understands `=` natively. But when the caller asked for
/// equality rewriting explicitly, or the SMT back-end isn't compiled
/// in (`smt_available`), Prolog's directed equality rewrite table can
/// still close the same Horn goals, so it takes over rather than
/// handing the caller a feature-unavailable error.
pub fn route(classification: &Classification, enable_equality: bool, smt_available: bool) -> Engine {
    if classification.is_horn && !classification.has_equality {
        Engine::Prolog
    } else if classification.is_horn && classification.has_equality && (enable_equality || !smt_available) {
        Engine::Prolog
    } else if classification.has_arithmetic || classification.has_equality {
        Engine::Smt
    } else {
        Engine::Sat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horn_equality_free_routes_to_prolog() {
        let c = Classification { is_horn: true, ..Classification::default() };
        assert_eq!(route(&c, false, true), Engine::Prolog);
    }

    #[test]
    fn horn_equality_routes_to_smt_when_available_and_not_requested() {
        let c = Classification { is_horn: true, has_equality: true, ..Classification::default() };
        assert_eq!(route(&c, false, true), Engine::Smt);
    }

    #[test]
    fn horn_equality_routes_to_prolog_when_smt_is_unavailable() {
        let c = Classification { is_horn: true, has_equality: true, ..Classification::default() };
        assert_eq!(route(&c, false, false), Engine::Prolog);
    }

    #[test]
    fn horn_equality_routes_to_prolog_when_equality_mode_is_requested() {
        let c = Classification { is_horn: true, has_equality: true, ..Classification::default() };
        assert_eq!(route(&c, true, true), Engine::Prolog);
    }

    #[test]
    fn non_horn_equality_routes_to_smt_regardless_of_equality_mode() {
        let c = Classification { is_horn: false, has_equality: true, ..Classification::default() };
        assert_eq!(route(&c, true, false), Engine::Smt);
    }

    #[test]
    fn arithmetic_routes_to_smt() {
        let c = Classification { has_arithmetic: true, ..Classification::default() };
        assert_eq!(route(&c, false, true), Engine::Smt);
    }

    #[test]
    fn non_horn_relational_routes_to_sat() {
        let c = Classification::default();
        assert_eq!(route(&c, false, true), Engine::Sat);
    }
}
