//! Directed equality rewriting for the equality-enabled solving mode.
//!
//! Rather than generating symmetry/transitivity clauses that a naive
//! backward chainer could loop on forever, ground equations discovered
//! in the premises are oriented larger-to-smaller by a fixed ordering
//! and compiled into a rewrite table. Goal and candidate terms are
//! normalized against that table before unification is attempted,
//! which realizes the chain- and congruence-closure behavior the
//! reflexivity/symmetry/transitivity/congruence axioms would have
//! given a complete superposition procedure, without the termination
//! risk of encoding them as resolvable rules.

use fol_ast::Term;
use fol_clause::{Literal, EQUALS_PREDICATE};
use std::collections::HashMap;

use crate::rule::Rule;

/// A directed rewrite table built from ground equations `s = t` found
/// among the facts, each oriented so the heavier term rewrites to the
/// lighter one.
#[derive(Debug, Default)]
pub struct RewriteTable {
    rewrites: HashMap<Term, Term>,
}

impl RewriteTable {
    /// Scans `rules` for ground equality facts and builds the table.
    pub fn from_rules(rules: &[Rule]) -> Self {
        let mut rewrites = HashMap::new();
        for rule in rules {
            if rule.body.is_empty() && rule.head.predicate == EQUALS_PREDICATE && !rule.head.negated {
                let (l, r) = (&rule.head.args[0], &rule.head.args[1]);
                if l.is_ground() && r.is_ground() && l != r {
                    let (big, small) = orient(l, r);
                    rewrites.insert(big, small);
                }
            }
        }
        RewriteTable { rewrites }
    }

    /// Rewrites `term` to a fixed point under the table, recursing into
    /// function arguments.
    pub fn normalize(&self, term: &Term) -> Term {
        let descended = match term {
            Term::Function(name, args) => {
                Term::function(name.clone(), args.iter().map(|a| self.normalize(a)).collect())
            }
            other => other.clone(),
        };
        match self.rewrites.get(&descended) {
            Some(next) => self.normalize(next),
            None => descended,
        }
    }

    /// Rewrites every argument of `lit`.
    pub fn normalize_literal(&self, lit: &Literal) -> Literal {
        Literal::new(
            lit.predicate.clone(),
            lit.args.iter().map(|a| self.normalize(a)).collect(),
            lit.negated,
        )
    }
}

/// Weight used to orient an equation: function applications are
/// heavier than constants, and ties break on the display string so
/// the ordering is total and rewriting always terminates.
fn weight(t: &Term) -> (u8, String) {
    match t {
        Term::Function(..) => (1, t.to_string()),
        Term::Constant(_) => (0, t.to_string()),
        Term::Variable(_) => (0, t.to_string()),
    }
}

/// Returns `(heavier, lighter)` so callers can rewrite the former to
/// the latter.
fn orient(a: &Term, b: &Term) -> (Term, Term) {
    if weight(a) >= weight(b) {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(l: Term, r: Term) -> Rule {
        Rule {
            head: Literal::equals(l, r, false),
            body: vec![],
        }
    }

    #[test]
    fn chain_of_equations_rewrites_to_a_common_representative() {
        let rules = vec![
            fact(Term::constant("a"), Term::constant("b")),
            fact(Term::constant("b"), Term::constant("c")),
            fact(Term::constant("c"), Term::constant("d")),
        ];
        let table = RewriteTable::from_rules(&rules);
        assert_eq!(table.normalize(&Term::constant("a")), table.normalize(&Term::constant("d")));
    }

    #[test]
    fn unrelated_constants_do_not_collapse() {
        let rules = vec![fact(Term::constant("a"), Term::constant("b"))];
        let table = RewriteTable::from_rules(&rules);
        assert_ne!(table.normalize(&Term::constant("a")), table.normalize(&Term::constant("z")));
    }
}
