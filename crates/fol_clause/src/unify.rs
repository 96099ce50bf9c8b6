//! Robinson unification with occurs-check.

use fol_ast::Term;
use std::collections::HashMap;
use std::fmt;

/// A finite map from variable name to term.
pub type Substitution = HashMap<String, Term>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    /// Binding `var` to `term` would create a cyclic substitution.
    OccursCheck { var: String, term: Term },
    /// Two terms cannot be made identical (different functors/arity/constants).
    Clash { left: Term, right: Term },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnifyError::OccursCheck { var, term } => {
                write!(f, "occurs check failed: {var} occurs in {term}")
            }
            UnifyError::Clash { left, right } => write!(f, "cannot unify {left} with {right}"),
        }
    }
}

impl std::error::Error for UnifyError {}

pub type UnifyResult<T> = Result<T, UnifyError>;

/// Applies `subst` to every variable occurrence in `term`, recursively.
pub fn apply_subst(term: &Term, subst: &Substitution) -> Term {
    match term {
        Term::Variable(v) => match subst.get(v) {
            Some(bound) => apply_subst(bound, subst),
            None => term.clone(),
        },
        Term::Constant(_) => term.clone(),
        Term::Function(name, args) => {
            Term::Function(name.clone(), args.iter().map(|a| apply_subst(a, subst)).collect())
        }
    }
}

fn occurs(var: &str, term: &Term, subst: &Substitution) -> bool {
    match apply_subst(term, subst) {
        Term::Variable(v) => v == var,
        Term::Constant(_) => false,
        Term::Function(_, args) => args.iter().any(|a| occurs(var, a, subst)),
    }
}

fn bind(var: &str, term: &Term, subst: &mut Substitution) -> UnifyResult<()> {
    let resolved = apply_subst(term, subst);
    if let Term::Variable(v) = &resolved {
        if v == var {
            return Ok(());
        }
    }
    if occurs(var, &resolved, subst) {
        return Err(UnifyError::OccursCheck {
            var: var.to_string(),
            term: resolved,
        });
    }
    subst.insert(var.to_string(), resolved);
    Ok(())
}

/// Unifies `a` and `b`, extending `subst` in place. Returns the same
/// substitution (by convention callers keep threading it through a
/// sequence of unification goals).
pub fn unify_terms(a: &Term, b: &Term, subst: &mut Substitution) -> UnifyResult<()> {
    let a = apply_subst(a, subst);
    let b = apply_subst(b, subst);
    match (&a, &b) {
        (Term::Variable(v), _) => bind(v, &b, subst),
        (_, Term::Variable(v)) => bind(v, &a, subst),
        (Term::Constant(ca), Term::Constant(cb)) => {
            if ca == cb {
                Ok(())
            } else {
                Err(UnifyError::Clash { left: a, right: b })
            }
        }
        (Term::Function(na, aa), Term::Function(nb, ab)) => {
            if na != nb || aa.len() != ab.len() {
                return Err(UnifyError::Clash { left: a, right: b });
            }
            for (x, y) in aa.iter().zip(ab.iter()) {
                unify_terms(x, y, subst)?;
            }
            Ok(())
        }
        _ => Err(UnifyError::Clash { left: a, right: b }),
    }
}

/// Unifies two equal-length argument lists under a shared substitution.
pub fn unify_args(a: &[Term], b: &[Term], subst: &mut Substitution) -> UnifyResult<()> {
    if a.len() != b.len() {
        return Err(UnifyError::Clash {
            left: Term::constant("<arity-mismatch>"),
            right: Term::constant("<arity-mismatch>"),
        });
    }
    for (x, y) in a.iter().zip(b.iter()) {
        unify_terms(x, y, subst)?;
    }
    Ok(())
}

/// Composes `second` after `first`, left-to-right with range-rewriting:
/// every binding in `first` has `second` applied to its range, then
/// bindings unique to `second` are added.
pub fn compose(first: &Substitution, second: &Substitution) -> Substitution {
    let mut result: Substitution = first
        .iter()
        .map(|(k, v)| (k.clone(), apply_subst(v, second)))
        .collect();
    for (k, v) in second {
        result.entry(k.clone()).or_insert_with(|| v.clone());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_variable_with_constant() {
        let mut subst = Substitution::new();
        unify_terms(&Term::var("x"), &Term::constant("socrates"), &mut subst).unwrap();
        assert_eq!(subst.get("x"), Some(&Term::constant("socrates")));
    }

    #[test]
    fn unifies_nested_function_terms() {
        let mut subst = Substitution::new();
        let a = Term::function("f", vec![Term::var("x"), Term::constant("a")]);
        let b = Term::function("f", vec![Term::constant("b"), Term::var("y")]);
        unify_terms(&a, &b, &mut subst).unwrap();
        assert_eq!(apply_subst(&Term::var("x"), &subst), Term::constant("b"));
        assert_eq!(apply_subst(&Term::var("y"), &subst), Term::constant("a"));
    }

    #[test]
    fn occurs_check_rejects_cyclic_binding() {
        let mut subst = Substitution::new();
        let x = Term::var("x");
        let fx = Term::function("f", vec![Term::var("x")]);
        let err = unify_terms(&x, &fx, &mut subst).unwrap_err();
        assert!(matches!(err, UnifyError::OccursCheck { .. }));
    }

    #[test]
    fn clashing_constants_fail() {
        let mut subst = Substitution::new();
        let err = unify_terms(&Term::constant("a"), &Term::constant("b"), &mut subst).unwrap_err();
        assert!(matches!(err, UnifyError::Clash { .. }));
    }

    #[test]
    fn compose_rewrites_range_of_first_substitution() {
        let mut first = Substitution::new();
        first.insert("x".into(), Term::var("y"));
        let mut second = Substitution::new();
        second.insert("y".into(), Term::constant("a"));
        let composed = compose(&first, &second);
        assert_eq!(composed.get("x"), Some(&Term::constant("a")));
    }
}
