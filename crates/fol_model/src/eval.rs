//! Evaluating a fully grounded, quantifier-free formula against a
//! candidate interpretation.

use fol_ast::{Formula, Term};

use crate::interpretation::Interpretation;

/// Evaluates a domain element term: either one of the formula's own
/// constants (looked up in `interp`) or a domain-index pseudo-constant
/// introduced by [`crate::ground::ground`].
pub fn eval_term(term: &Term, interp: &Interpretation) -> usize {
    match term {
        Term::Variable(v) => panic!("eval_term: free variable `{v}` reached a grounded formula"),
        Term::Constant(name) => {
            if let Some(&value) = interp.constants.get(name) {
                return value;
            }
            name.parse::<usize>()
                .unwrap_or_else(|_| panic!("eval_term: constant `{name}` has no interpretation"))
        }
        Term::Function(name, args) => {
            let values: Vec<usize> = args.iter().map(|a| eval_term(a, interp)).collect();
            if let Some(v) = Interpretation::arithmetic_function_value(name, &values, interp.domain_size) {
                return v;
            }
            interp
                .functions
                .get(&(name.clone(), args.len()))
                .and_then(|table| table.get(&values))
                .copied()
                .unwrap_or_else(|| panic!("eval_term: function `{name}` has no interpretation for {values:?}"))
        }
    }
}

/// Evaluates a ground, quantifier-free formula under `interp`.
pub fn evaluate(formula: &Formula, interp: &Interpretation) -> bool {
    match formula {
        Formula::Forall(..) | Formula::Exists(..) => {
            panic!("evaluate: quantifier reached a grounded formula")
        }
        Formula::And(l, r) => evaluate(l, interp) && evaluate(r, interp),
        Formula::Or(l, r) => evaluate(l, interp) || evaluate(r, interp),
        Formula::Implies(l, r) => !evaluate(l, interp) || evaluate(r, interp),
        Formula::Iff(l, r) => evaluate(l, interp) == evaluate(r, interp),
        Formula::Not(inner) => !evaluate(inner, interp),
        Formula::Equals(l, r) => eval_term(l, interp) == eval_term(r, interp),
        Formula::Predicate(name, args) => {
            let values: Vec<usize> = args.iter().map(|a| eval_term(a, interp)).collect();
            if let Some(holds) = Interpretation::arithmetic_predicate_holds(name, &values) {
                return holds;
            }
            interp
                .relations
                .get(&(name.clone(), args.len()))
                .map(|extension| extension.contains(&values))
                .unwrap_or(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn predicate_is_true_iff_the_tuple_is_in_the_relation() {
        let mut interp = Interpretation::new(2);
        interp
            .relations
            .insert(("p".to_string(), 1), HashSet::from([vec![0]]));
        let holds = Formula::predicate("p", vec![Term::constant("0")]);
        let fails = Formula::predicate("p", vec![Term::constant("1")]);
        assert!(evaluate(&holds, &interp));
        assert!(!evaluate(&fails, &interp));
    }

    #[test]
    fn equals_compares_evaluated_terms() {
        let mut interp = Interpretation::new(2);
        interp.constants.insert("a".to_string(), 0);
        interp.constants.insert("b".to_string(), 0);
        let eq = Formula::Equals(Term::constant("a"), Term::constant("b"));
        assert!(evaluate(&eq, &interp));
    }

    #[test]
    fn arithmetic_predicate_bypasses_the_relation_table() {
        let interp = Interpretation::new(3);
        let less = Formula::predicate("less", vec![Term::constant("0"), Term::constant("2")]);
        assert!(evaluate(&less, &interp));
    }
}
