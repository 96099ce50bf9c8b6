//! Negation normal form: eliminates `->`/`<->` and pushes
//! negation to the atoms via De Morgan and the quantifier duals
//! `¬∀x.φ = ∃x.¬φ`, `¬∃x.φ = ∀x.¬φ`.

use fol_ast::Formula;

/// Converts `f` to NNF. After this call no node is `Implies`/`Iff` and
/// every `Not` wraps an atomic formula (`Predicate` or `Equals`).
pub fn to_nnf(f: &Formula) -> Formula {
    positive(f)
}

fn positive(f: &Formula) -> Formula {
    match f {
        Formula::Forall(v, body) => Formula::forall(v.clone(), positive(body)),
        Formula::Exists(v, body) => Formula::exists(v.clone(), positive(body)),
        Formula::And(l, r) => Formula::and(positive(l), positive(r)),
        Formula::Or(l, r) => Formula::or(positive(l), positive(r)),
        Formula::Implies(l, r) => Formula::or(negative(l), positive(r)),
        Formula::Iff(l, r) => Formula::and(
            Formula::or(negative(l), positive(r)),
            Formula::or(negative(r), positive(l)),
        ),
        Formula::Not(inner) => negative(inner),
        Formula::Equals(..) | Formula::Predicate(..) => f.clone(),
    }
}

/// NNF of `Not(f)`.
fn negative(f: &Formula) -> Formula {
    match f {
        Formula::Forall(v, body) => Formula::exists(v.clone(), negative(body)),
        Formula::Exists(v, body) => Formula::forall(v.clone(), negative(body)),
        Formula::And(l, r) => Formula::or(negative(l), negative(r)),
        Formula::Or(l, r) => Formula::and(negative(l), negative(r)),
        Formula::Implies(l, r) => Formula::and(positive(l), negative(r)),
        Formula::Iff(l, r) => Formula::or(
            Formula::and(positive(l), negative(r)),
            Formula::and(negative(l), positive(r)),
        ),
        Formula::Not(inner) => positive(inner),
        Formula::Equals(..) | Formula::Predicate(..) => Formula::not(f.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    fn no_implies_or_iff(f: &Formula) -> bool {
        match f {
            Formula::Implies(..) | Formula::Iff(..) => false,
            Formula::Not(inner) => inner.is_atomic(),
            Formula::And(l, r) | Formula::Or(l, r) => no_implies_or_iff(l) && no_implies_or_iff(r),
            Formula::Forall(_, b) | Formula::Exists(_, b) => no_implies_or_iff(b),
            Formula::Not(_) | Formula::Equals(..) | Formula::Predicate(..) => true,
        }
    }

    #[test]
    fn nnf_shape_has_no_implies_or_iff_and_negation_only_on_atoms() {
        let man = Formula::predicate("man", vec![Term::var("x")]);
        let mortal = Formula::predicate("mortal", vec![Term::var("x")]);
        let f = Formula::forall("x", Formula::implies(man, mortal));
        let nnf = to_nnf(&f);
        assert!(no_implies_or_iff(&nnf));
    }

    #[test]
    fn negated_universal_becomes_existential_negation() {
        let p = Formula::predicate("p", vec![Term::var("x")]);
        let f = Formula::not(Formula::forall("x", p.clone()));
        let nnf = to_nnf(&f);
        assert_eq!(nnf, Formula::exists("x", Formula::not(p)));
    }

    #[test]
    fn negated_conjunction_distributes_negation() {
        let p = Formula::predicate("p", vec![]);
        let q = Formula::predicate("q", vec![]);
        let f = Formula::not(Formula::and(p.clone(), q.clone()));
        assert_eq!(to_nnf(&f), Formula::or(Formula::not(p), Formula::not(q)));
    }
}
