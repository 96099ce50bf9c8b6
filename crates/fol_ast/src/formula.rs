//! The FOL formula AST.
//!
//! `Predicate` and `Term::Function` share the same `(name, Vec<Term>)`
//! shape — one underlying node, split here only by Rust's term/formula
//! type distinction; the parser picks one or the other purely by
//! syntactic position (bare identifier vs. argument of another
//! application).

use crate::term::Term;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Forall(String, Box<Formula>),
    Exists(String, Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Iff(Box<Formula>, Box<Formula>),
    Not(Box<Formula>),
    Equals(Term, Term),
    Predicate(String, Vec<Term>),
}

impl Formula {
    pub fn and(l: Formula, r: Formula) -> Formula {
        Formula::And(Box::new(l), Box::new(r))
    }
    pub fn or(l: Formula, r: Formula) -> Formula {
        Formula::Or(Box::new(l), Box::new(r))
    }
    pub fn implies(l: Formula, r: Formula) -> Formula {
        Formula::Implies(Box::new(l), Box::new(r))
    }
    pub fn iff(l: Formula, r: Formula) -> Formula {
        Formula::Iff(Box::new(l), Box::new(r))
    }
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }
    pub fn forall(var: impl Into<String>, body: Formula) -> Formula {
        Formula::Forall(var.into(), Box::new(body))
    }
    pub fn exists(var: impl Into<String>, body: Formula) -> Formula {
        Formula::Exists(var.into(), Box::new(body))
    }
    pub fn predicate(name: impl Into<String>, args: Vec<Term>) -> Formula {
        Formula::Predicate(name.into(), args)
    }

    /// `true` for `Predicate` and `Equals` — the atomic formulas a `Not`
    /// in NNF is allowed to wrap.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Predicate(..) | Formula::Equals(..))
    }

    /// `(predicate_name, arity)` key used to classify Horn clauses and
    /// to compare literals modulo negation.
    pub fn predicate_key(&self) -> Option<(&str, usize)> {
        match self {
            Formula::Predicate(name, args) => Some((name.as_str(), args.len())),
            _ => None,
        }
    }

    pub fn free_vars(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        self.collect_free_vars(&mut out);
        out
    }

    fn collect_free_vars(&self, out: &mut HashSet<String>) {
        match self {
            Formula::Forall(var, body) | Formula::Exists(var, body) => {
                let mut inner = HashSet::new();
                body.collect_free_vars(&mut inner);
                inner.remove(var);
                out.extend(inner);
            }
            Formula::And(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Iff(l, r) => {
                l.collect_free_vars(out);
                r.collect_free_vars(out);
            }
            Formula::Not(f) => f.collect_free_vars(out),
            Formula::Equals(l, r) => {
                l.free_vars(out);
                r.free_vars(out);
            }
            Formula::Predicate(_, args) => {
                for a in args {
                    a.free_vars(out);
                }
            }
        }
    }

    /// Substitutes `replacement` for every free occurrence of `var`,
    /// respecting variable capture (does not descend under a binder
    /// that rebinds `var`).
    pub fn substitute(&self, var: &str, replacement: &Term) -> Formula {
        match self {
            Formula::Forall(v, body) if v == var => Formula::Forall(v.clone(), body.clone()),
            Formula::Exists(v, body) if v == var => Formula::Exists(v.clone(), body.clone()),
            Formula::Forall(v, body) => {
                Formula::Forall(v.clone(), Box::new(body.substitute(var, replacement)))
            }
            Formula::Exists(v, body) => {
                Formula::Exists(v.clone(), Box::new(body.substitute(var, replacement)))
            }
            Formula::And(l, r) => Formula::and(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Or(l, r) => Formula::or(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Implies(l, r) => {
                Formula::implies(l.substitute(var, replacement), r.substitute(var, replacement))
            }
            Formula::Iff(l, r) => Formula::iff(l.substitute(var, replacement), r.substitute(var, replacement)),
            Formula::Not(f) => Formula::not(f.substitute(var, replacement)),
            Formula::Equals(l, r) => {
                Formula::Equals(l.substitute(var, replacement), r.substitute(var, replacement))
            }
            Formula::Predicate(name, args) => Formula::Predicate(
                name.clone(),
                args.iter().map(|a| a.substitute(var, replacement)).collect(),
            ),
        }
    }

    /// Renames every bound (and corresponding free, within the binder's
    /// scope) occurrence of `old` to `new` — used by prenex to avoid
    /// capture when hoisting quantifiers past a sibling that mentions
    /// the same name free.
    pub fn alpha_rename(&self, old: &str, new: &str) -> Formula {
        match self {
            Formula::Forall(v, body) if v == old => {
                Formula::Forall(new.to_string(), Box::new(body.substitute(old, &Term::var(new))))
            }
            Formula::Exists(v, body) if v == old => {
                Formula::Exists(new.to_string(), Box::new(body.substitute(old, &Term::var(new))))
            }
            Formula::Forall(v, body) => {
                Formula::Forall(v.clone(), Box::new(body.alpha_rename(old, new)))
            }
            Formula::Exists(v, body) => {
                Formula::Exists(v.clone(), Box::new(body.alpha_rename(old, new)))
            }
            Formula::And(l, r) => Formula::and(l.alpha_rename(old, new), r.alpha_rename(old, new)),
            Formula::Or(l, r) => Formula::or(l.alpha_rename(old, new), r.alpha_rename(old, new)),
            Formula::Implies(l, r) => {
                Formula::implies(l.alpha_rename(old, new), r.alpha_rename(old, new))
            }
            Formula::Iff(l, r) => Formula::iff(l.alpha_rename(old, new), r.alpha_rename(old, new)),
            Formula::Not(f) => Formula::not(f.alpha_rename(old, new)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Forall(var, body) => write!(f, "all {var} ({body})"),
            Formula::Exists(var, body) => write!(f, "exists {var} ({body})"),
            Formula::And(l, r) => write!(f, "({l} & {r})"),
            Formula::Or(l, r) => write!(f, "({l} | {r})"),
            Formula::Implies(l, r) => write!(f, "({l} -> {r})"),
            Formula::Iff(l, r) => write!(f, "({l} <-> {r})"),
            Formula::Not(inner) => write!(f, "-{inner}"),
            Formula::Equals(l, r) => write!(f, "{l}={r}"),
            Formula::Predicate(name, args) => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{a}")?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_vars_excludes_bound_variable() {
        let f = Formula::forall("x", Formula::predicate("man", vec![Term::var("x")]));
        assert!(f.free_vars().is_empty());
    }

    #[test]
    fn free_vars_includes_escaping_variable() {
        let f = Formula::exists("y", Formula::predicate("loves", vec![Term::var("x"), Term::var("y")]));
        let vars = f.free_vars();
        assert!(vars.contains("x"));
        assert!(!vars.contains("y"));
    }

    #[test]
    fn predicate_key_identifies_name_and_arity() {
        let f = Formula::predicate("man", vec![Term::constant("socrates")]);
        assert_eq!(f.predicate_key(), Some(("man", 1)));
    }

    #[test]
    fn substitute_is_capture_aware_at_matching_binder() {
        let f = Formula::forall("x", Formula::predicate("p", vec![Term::var("x")]));
        let s = f.substitute("x", &Term::constant("a"));
        // binder rebinds x, so the substitution does not reach inside
        assert_eq!(s, f);
    }
}
