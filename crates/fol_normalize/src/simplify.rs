//! Constant folding over the atoms `true`/`false`, applied
//! bottom-up to a fixed point.

use fol_ast::Formula;

const TRUE_ATOM: &str = "true";
const FALSE_ATOM: &str = "false";

fn is_true(f: &Formula) -> bool {
    matches!(f, Formula::Predicate(name, args) if name == TRUE_ATOM && args.is_empty())
}

fn is_false(f: &Formula) -> bool {
    matches!(f, Formula::Predicate(name, args) if name == FALSE_ATOM && args.is_empty())
}

fn simplify_once(f: &Formula) -> Formula {
    match f {
        Formula::And(l, r) => {
            let (l, r) = (simplify_once(l), simplify_once(r));
            if is_false(&l) || is_false(&r) {
                Formula::predicate(FALSE_ATOM, vec![])
            } else if is_true(&l) {
                r
            } else if is_true(&r) {
                l
            } else {
                Formula::and(l, r)
            }
        }
        Formula::Or(l, r) => {
            let (l, r) = (simplify_once(l), simplify_once(r));
            if is_true(&l) || is_true(&r) {
                Formula::predicate(TRUE_ATOM, vec![])
            } else if is_false(&l) {
                r
            } else if is_false(&r) {
                l
            } else {
                Formula::or(l, r)
            }
        }
        Formula::Not(inner) => {
            let inner = simplify_once(inner);
            if let Formula::Not(grandchild) = &inner {
                (**grandchild).clone()
            } else if is_true(&inner) {
                Formula::predicate(FALSE_ATOM, vec![])
            } else if is_false(&inner) {
                Formula::predicate(TRUE_ATOM, vec![])
            } else {
                Formula::not(inner)
            }
        }
        Formula::Implies(l, r) => Formula::implies(simplify_once(l), simplify_once(r)),
        Formula::Iff(l, r) => Formula::iff(simplify_once(l), simplify_once(r)),
        Formula::Forall(v, body) => Formula::forall(v.clone(), simplify_once(body)),
        Formula::Exists(v, body) => Formula::exists(v.clone(), simplify_once(body)),
        Formula::Equals(..) | Formula::Predicate(..) => f.clone(),
    }
}

/// Simplifies `f` to a fixed point: `simplify(simplify(f)) == simplify(f)`.
pub fn simplify(f: &Formula) -> Formula {
    let mut current = f.clone();
    loop {
        let next = simplify_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn and_with_false_collapses_to_false() {
        let f = Formula::and(
            Formula::predicate("p", vec![Term::constant("a")]),
            Formula::predicate(FALSE_ATOM, vec![]),
        );
        assert!(is_false(&simplify(&f)));
    }

    #[test]
    fn or_with_true_collapses_to_true() {
        let f = Formula::or(
            Formula::predicate("p", vec![Term::constant("a")]),
            Formula::predicate(TRUE_ATOM, vec![]),
        );
        assert!(is_true(&simplify(&f)));
    }

    #[test]
    fn double_negation_cancels() {
        let p = Formula::predicate("p", vec![Term::constant("a")]);
        let f = Formula::not(Formula::not(p.clone()));
        assert_eq!(simplify(&f), p);
    }

    #[test]
    fn simplify_is_idempotent() {
        let f = Formula::and(
            Formula::predicate("p", vec![]),
            Formula::or(Formula::predicate(TRUE_ATOM, vec![]), Formula::predicate("q", vec![])),
        );
        let once = simplify(&f);
        let twice = simplify(&once);
        assert_eq!(once, twice);
    }
}
