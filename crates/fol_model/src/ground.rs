//! Eliminating quantifiers by substitution over a finite domain
//!: `all x P(x)` becomes the conjunction of `P(0), …, P(n-1)`,
//! `exists x P(x)` the disjunction.
//!
//! Mirrors the bottom-up, match-and-rebuild shape the kernel's own
//! term reducer uses: recurse into subterms, rebuild the node with the
//! reduced children, and treat the leaves (here, atomic formulas) as
//! already in normal form.

use fol_ast::{Formula, Term};

fn domain_element(i: usize) -> Term {
    Term::constant(i.to_string())
}

/// Grounds every quantifier in `formula` over the `domain_size`-element
/// domain `{0, …, domain_size-1}`. The result contains no `Forall` or
/// `Exists` nodes.
pub fn ground(formula: &Formula, domain_size: usize) -> Formula {
    match formula {
        Formula::Forall(var, body) => {
            let mut conjuncts = (0..domain_size)
                .map(|i| ground(&body.substitute(var, &domain_element(i)), domain_size));
            let first = conjuncts.next().unwrap_or(Formula::predicate("true", vec![]));
            conjuncts.fold(first, Formula::and)
        }
        Formula::Exists(var, body) => {
            let mut disjuncts = (0..domain_size)
                .map(|i| ground(&body.substitute(var, &domain_element(i)), domain_size));
            let first = disjuncts.next().unwrap_or(Formula::predicate("false", vec![]));
            disjuncts.fold(first, Formula::or)
        }
        Formula::And(l, r) => Formula::and(ground(l, domain_size), ground(r, domain_size)),
        Formula::Or(l, r) => Formula::or(ground(l, domain_size), ground(r, domain_size)),
        Formula::Implies(l, r) => Formula::implies(ground(l, domain_size), ground(r, domain_size)),
        Formula::Iff(l, r) => Formula::iff(ground(l, domain_size), ground(r, domain_size)),
        Formula::Not(inner) => Formula::not(ground(inner, domain_size)),
        Formula::Equals(_, _) | Formula::Predicate(_, _) => formula.clone(),
    }
}
