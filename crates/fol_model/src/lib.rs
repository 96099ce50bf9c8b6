//! Finite model finder: bounded enumeration over increasing
//! domain sizes, with restricted-growth-string symmetry breaking,
//! isomorphism filtering, and an optional SAT-assisted search path.

mod enumerate;
mod eval;
mod ground;
mod interpretation;
mod sat_assist;
mod search;
mod symbol;

pub use enumerate::{all_tuples, constant_assignments, function_tables, relation_extensions};
pub use eval::{eval_term, evaluate};
pub use ground::ground;
pub use interpretation::Interpretation;
pub use symbol::{collect_symbols, Symbols, ARITHMETIC_FUNCTIONS, ARITHMETIC_PREDICATES};

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use fol_ast::Formula;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Success,
    NoModelFound,
    Timeout,
}

/// No explicit default appears in the governing prose for
/// `maxDomainSize` or `satThreshold`; both are set here to 4, matching
/// the worked symmetry-breaking example's own domain size and keeping
/// the combinatorial enumeration (`domain_size^(domain_size^arity)`
/// function tables, `2^(domain_size^arity)` relation extensions)
/// tractable for the small binary vocabularies the back-end targets.
#[derive(Debug, Clone)]
pub struct FindModelOptions {
    /// Search exactly this domain size instead of iterating 1..=max.
    pub domain_size: Option<usize>,
    pub max_domain_size: usize,
    pub count: usize,
    pub use_sat: bool,
    pub sat_threshold: usize,
    pub max_seconds: Option<u64>,
}

impl Default for FindModelOptions {
    fn default() -> Self {
        Self {
            domain_size: None,
            max_domain_size: 4,
            count: 1,
            use_sat: false,
            sat_threshold: 4,
            max_seconds: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FindModelOutcome {
    pub result: ResultKind,
    pub models: Vec<Interpretation>,
    pub attempts_by_domain_size: HashMap<usize, usize>,
}

fn conjoin(premises: &[Formula]) -> Formula {
    let mut premises = premises.iter().cloned();
    let first = premises.next().unwrap_or_else(|| Formula::predicate("true", vec![]));
    premises.fold(first, Formula::and)
}

/// Searches increasing domain sizes for a model of `premises`.
pub fn find_model(premises: &[Formula], options: &FindModelOptions) -> FindModelOutcome {
    let formula = conjoin(premises);
    let symbols = collect_symbols(&formula);
    let purely_relational = symbols.functions.is_empty()
        && symbols
            .predicates
            .iter()
            .all(|(name, _)| !ARITHMETIC_PREDICATES.contains(&name.as_str()));

    let start = Instant::now();
    let mut models: Vec<Interpretation> = Vec::new();
    let mut seen_signatures: HashSet<String> = HashSet::new();
    let mut attempts_by_domain_size = HashMap::new();

    let sizes: Vec<usize> = match options.domain_size {
        Some(n) => vec![n],
        None => (1..=options.max_domain_size).collect(),
    };

    for n in sizes {
        if let Some(max_seconds) = options.max_seconds {
            if start.elapsed() >= Duration::from_secs(max_seconds) {
                return FindModelOutcome {
                    result: ResultKind::Timeout,
                    models,
                    attempts_by_domain_size,
                };
            }
        }

        let grounded = ground(&formula, n);
        let remaining = options.count.saturating_sub(models.len());
        let use_sat_here = purely_relational && (options.use_sat || n >= options.sat_threshold);

        let found = if use_sat_here {
            sat_assist::search(&grounded, &symbols, n, remaining, &mut seen_signatures, &mut attempts_by_domain_size)
        } else {
            search::search(&grounded, &symbols, n, remaining, &mut seen_signatures, &mut attempts_by_domain_size)
        };
        models.extend(found);

        if models.len() >= options.count {
            break;
        }
    }

    let result = if models.is_empty() { ResultKind::NoModelFound } else { ResultKind::Success };
    FindModelOutcome { result, models, attempts_by_domain_size }
}

/// `find_model(premises ∧ ¬goal, …)`: a model of the premises together
/// with the goal's negation is a counterexample to the goal.
pub fn find_counterexample(premises: &[Formula], goal: &Formula, options: &FindModelOptions) -> FindModelOutcome {
    let mut extended = premises.to_vec();
    extended.push(Formula::not(goal.clone()));
    find_model(&extended, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn finds_a_model_of_a_satisfiable_formula() {
        let f = Formula::exists("x", Formula::predicate("p", vec![Term::var("x")]));
        let outcome = find_model(&[f], &FindModelOptions::default());
        assert_eq!(outcome.result, ResultKind::Success);
        assert_eq!(outcome.models.len(), 1);
    }

    #[test]
    fn reports_no_model_found_for_a_contradiction() {
        let a = Term::constant("a");
        let f = Formula::and(
            Formula::predicate("p", vec![a.clone()]),
            Formula::not(Formula::predicate("p", vec![a])),
        );
        let outcome = find_model(&[f], &FindModelOptions::default());
        assert_eq!(outcome.result, ResultKind::NoModelFound);
        assert!(outcome.models.is_empty());
        assert!(!outcome.attempts_by_domain_size.is_empty());
    }

    #[test]
    fn counterexample_to_an_invalid_syllogism_is_found() {
        // Not every P is Q, witnessed by a domain with one P that isn't Q.
        let x = Term::var("x");
        let premise = Formula::forall(
            "x",
            Formula::implies(
                Formula::predicate("bird", vec![x.clone()]),
                Formula::predicate("flies", vec![x.clone()]),
            ),
        );
        // Goal: every flier is a bird — not entailed, so a counterexample exists
        // (something that flies but is not a bird) once we allow a model where
        // `flies` holds of more than `bird` does.
        let goal = Formula::forall(
            "x",
            Formula::implies(
                Formula::predicate("flies", vec![x.clone()]),
                Formula::predicate("bird", vec![x]),
            ),
        );
        let outcome = find_counterexample(&[premise], &goal, &FindModelOptions::default());
        assert_eq!(outcome.result, ResultKind::Success);
    }

    #[test]
    fn multiple_models_are_pairwise_non_isomorphic() {
        let a = Term::constant("a");
        let b = Term::constant("b");
        let f = Formula::or(Formula::predicate("p", vec![a]), Formula::predicate("p", vec![b]));
        let options = FindModelOptions { count: 2, max_domain_size: 2, ..FindModelOptions::default() };
        let outcome = find_model(&[f], &options);
        assert_eq!(outcome.result, ResultKind::Success);
        assert_eq!(outcome.models.len(), 2);
        assert_ne!(
            outcome.models[0].canonical_signature(),
            outcome.models[1].canonical_signature()
        );
    }

    #[test]
    fn sat_assisted_mode_agrees_with_direct_enumeration_on_satisfiability() {
        let a = Term::constant("a");
        let b = Term::constant("b");
        let f = Formula::or(Formula::predicate("p", vec![a]), Formula::predicate("p", vec![b]));
        let naive = find_model(&[f.clone()], &FindModelOptions { use_sat: false, ..FindModelOptions::default() });
        let sat = find_model(&[f], &FindModelOptions { use_sat: true, ..FindModelOptions::default() });
        assert_eq!(naive.result, ResultKind::Success);
        assert_eq!(sat.result, ResultKind::Success);
    }
}
