//! Prenex form: hoists every quantifier in a NNF formula to
//! the front, left to right as encountered during a pre-order walk,
//! alpha-renaming a quantifier's bound variable whenever it would
//! otherwise collide with a name free in the sibling subformula.

use fol_ast::Formula;
use std::collections::HashSet;

#[derive(Clone, Copy, PartialEq)]
enum Quant {
    Forall,
    Exists,
}

/// Converts a NNF formula to prenex form: `Q1 x1 ... Qn xn . matrix`
/// with `matrix` quantifier-free.
pub fn to_prenex(f: &Formula) -> Formula {
    let mut used = f.free_vars();
    let (prefix, matrix) = strip(f, &mut used);
    rebuild(prefix, matrix)
}

fn rebuild(prefix: Vec<(Quant, String)>, matrix: Formula) -> Formula {
    prefix.into_iter().rev().fold(matrix, |acc, (q, v)| match q {
        Quant::Forall => Formula::forall(v, acc),
        Quant::Exists => Formula::exists(v, acc),
    })
}

/// Strips leading quantifiers from `f`, renaming any bound variable
/// already in `used` to a fresh name before descending, and returns
/// the accumulated `(quantifier, variable)` prefix alongside the
/// quantifier-free-at-this-level remainder.
fn strip(f: &Formula, used: &mut HashSet<String>) -> (Vec<(Quant, String)>, Formula) {
    match f {
        Formula::Forall(v, body) => strip_quant(Quant::Forall, v, body, used),
        Formula::Exists(v, body) => strip_quant(Quant::Exists, v, body, used),
        Formula::And(l, r) => combine(l, r, used, Formula::and as fn(Formula, Formula) -> Formula),
        Formula::Or(l, r) => combine(l, r, used, Formula::or as fn(Formula, Formula) -> Formula),
        other => (Vec::new(), other.clone()),
    }
}

fn strip_quant(
    q: Quant,
    v: &str,
    body: &Formula,
    used: &mut HashSet<String>,
) -> (Vec<(Quant, String)>, Formula) {
    let (name, renamed_body) = if used.contains(v) {
        let fresh = fresh_name(v, used);
        (fresh.clone(), body.alpha_rename(v, &fresh))
    } else {
        (v.to_string(), body.clone())
    };
    used.insert(name.clone());
    let (mut rest, matrix) = strip(&renamed_body, used);
    let mut prefix = vec![(q, name)];
    prefix.append(&mut rest);
    (prefix, matrix)
}

fn combine(
    l: &Formula,
    r: &Formula,
    used: &mut HashSet<String>,
    join: fn(Formula, Formula) -> Formula,
) -> (Vec<(Quant, String)>, Formula) {
    let (mut left_prefix, left_matrix) = strip(l, used);
    let (mut right_prefix, right_matrix) = strip(r, used);
    left_prefix.append(&mut right_prefix);
    (left_prefix, join(left_matrix, right_matrix))
}

fn fresh_name(base: &str, used: &HashSet<String>) -> String {
    let mut n = 0usize;
    loop {
        let candidate = format!("{base}{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn is_quantifier_free(f: &Formula) -> bool {
    !matches!(f, Formula::Forall(..) | Formula::Exists(..))
        && match f {
            Formula::And(l, r) | Formula::Or(l, r) => is_quantifier_free(l) && is_quantifier_free(r),
            Formula::Not(inner) => is_quantifier_free(inner),
            _ => true,
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn hoists_quantifiers_in_left_to_right_order() {
        let p = Formula::predicate("p", vec![Term::var("x")]);
        let q = Formula::predicate("q", vec![Term::var("y")]);
        let f = Formula::and(Formula::forall("x", p), Formula::exists("y", q));
        let prenex = to_prenex(&f);
        match prenex {
            Formula::Forall(x, rest) => match *rest {
                Formula::Exists(y, matrix) => {
                    assert_eq!(x, "x");
                    assert_eq!(y, "y");
                    assert!(is_quantifier_free(&matrix));
                }
                _ => panic!("expected exists under forall"),
            },
            _ => panic!("expected forall at front"),
        }
    }

    #[test]
    fn renames_colliding_bound_variable_to_avoid_capture() {
        let inner = Formula::predicate("p", vec![Term::var("x")]);
        let outer = Formula::predicate("q", vec![Term::var("x")]);
        // `x` is bound inside the left conjunct and free in the right one;
        // hoisting must not let the outer `x` fall under the inner binder.
        let f = Formula::and(Formula::forall("x", inner), outer);
        let prenex = to_prenex(&f);
        match &prenex {
            Formula::Forall(v, matrix) => {
                assert_ne!(v, "x", "bound variable should be renamed away from the colliding free name");
                assert!(matrix.free_vars().contains("x"));
            }
            _ => panic!("expected a leading forall"),
        }
    }

    #[test]
    fn matrix_is_quantifier_free_after_prenex() {
        let f = Formula::implies(
            Formula::forall("x", Formula::predicate("man", vec![Term::var("x")])),
            Formula::exists("y", Formula::predicate("mortal", vec![Term::var("y")])),
        );
        let prenex = to_prenex(&f);
        fn strip_all(f: &Formula) -> &Formula {
            match f {
                Formula::Forall(_, b) | Formula::Exists(_, b) => strip_all(b),
                other => other,
            }
        }
        assert!(is_quantifier_free(strip_all(&prenex)));
    }
}
