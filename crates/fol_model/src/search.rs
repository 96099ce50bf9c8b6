//! Direct enumeration over candidate interpretations: the
//! fallback search every domain size can use, and the only one
//! available once uninterpreted functions or arithmetic predicates are
//! in play.

use std::collections::{HashMap, HashSet};

use crate::enumerate::{constant_assignments, function_tables, relation_extensions};
use crate::eval::evaluate;
use crate::interpretation::Interpretation;
use crate::symbol::Symbols;
use fol_ast::Formula;

fn build_candidates(symbols: &Symbols, domain_size: usize) -> Vec<Interpretation> {
    let mut candidates: Vec<Interpretation> = constant_assignments(&symbols.constants, domain_size)
        .into_iter()
        .map(|constants| {
            let mut interp = Interpretation::new(domain_size);
            interp.constants = constants;
            interp
        })
        .collect();

    for (name, arity) in symbols.enumerable_functions() {
        let tables = function_tables(arity, domain_size);
        let mut next = Vec::with_capacity(candidates.len() * tables.len());
        for interp in &candidates {
            for table in &tables {
                let mut extended = interp.clone();
                extended.functions.insert((name.clone(), arity), table.clone());
                next.push(extended);
            }
        }
        candidates = next;
    }

    for (name, arity) in symbols.enumerable_predicates() {
        let extensions = relation_extensions(arity, domain_size);
        let mut next = Vec::with_capacity(candidates.len() * extensions.len());
        for interp in &candidates {
            for extension in &extensions {
                let mut extended = interp.clone();
                extended.relations.insert((name.clone(), arity), extension.clone());
                next.push(extended);
            }
        }
        candidates = next;
    }

    candidates
}

/// Tries every candidate interpretation over `domain_size` against
/// `grounded`, collecting up to `remaining` pairwise non-isomorphic
/// models not already present in `seen_signatures`.
pub fn search(
    grounded: &Formula,
    symbols: &Symbols,
    domain_size: usize,
    remaining: usize,
    seen_signatures: &mut HashSet<String>,
    attempts_by_domain_size: &mut HashMap<usize, usize>,
) -> Vec<Interpretation> {
    let mut found = Vec::new();
    let mut attempts = 0usize;
    if remaining == 0 {
        attempts_by_domain_size.insert(domain_size, attempts);
        return found;
    }
    for interp in build_candidates(symbols, domain_size) {
        attempts += 1;
        if evaluate(grounded, &interp) {
            let signature = interp.canonical_signature();
            if seen_signatures.insert(signature) {
                found.push(interp);
                if found.len() >= remaining {
                    break;
                }
            }
        }
    }
    attempts_by_domain_size.insert(domain_size, attempts);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground::ground;
    use crate::symbol::collect_symbols;
    use fol_ast::Term;

    #[test]
    fn finds_a_model_of_a_satisfiable_unary_predicate() {
        let f = Formula::exists("x", Formula::predicate("p", vec![Term::var("x")]));
        let symbols = collect_symbols(&f);
        let grounded = ground(&f, 1);
        let mut seen = HashSet::new();
        let mut attempts = HashMap::new();
        let found = search(&grounded, &symbols, 1, 1, &mut seen, &mut attempts);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn finds_no_model_of_a_contradiction() {
        let a = Term::constant("a");
        let f = Formula::and(
            Formula::predicate("p", vec![a.clone()]),
            Formula::not(Formula::predicate("p", vec![a])),
        );
        let symbols = collect_symbols(&f);
        let grounded = ground(&f, 1);
        let mut seen = HashSet::new();
        let mut attempts = HashMap::new();
        let found = search(&grounded, &symbols, 1, 1, &mut seen, &mut attempts);
        assert!(found.is_empty());
        assert!(attempts[&1] > 0);
    }

    #[test]
    fn distinct_models_are_deduplicated_by_canonical_signature() {
        let f = Formula::predicate("p", vec![Term::constant("a")]);
        let symbols = collect_symbols(&f);
        let grounded = ground(&f, 2);
        let mut seen = HashSet::new();
        let mut attempts = HashMap::new();
        // `a` is pinned to element 0 by symmetry breaking; of the four
        // extensions of a unary relation over a 2-element domain, the
        // two containing 0 — {0} and {0,1} — both satisfy p(a) and are
        // not isomorphic to one another (they disagree on element 1).
        let found = search(&grounded, &symbols, 2, 10, &mut seen, &mut attempts);
        assert_eq!(found.len(), 2);
    }
}
