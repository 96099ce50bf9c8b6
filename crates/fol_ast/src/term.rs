//! FOL terms: variables, constants, and function applications.
//!
//! The parser emits the same node for predicate arguments and function
//! applications — disambiguation is purely syntactic position,
//! so the data shape here is the term-level half of that one AST type.

use std::fmt;

/// A first-order term.
///
/// Convention (not lexical, a parser policy): single lowercase letters
/// `x,y,z,u,v,w` are variables; every other identifier used as a bare
/// term is a constant; an identifier followed by `(...)` is a function
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(String),
    Constant(String),
    Function(String, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Term::Constant(name.into())
    }

    pub fn function(name: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Function(name.into(), args)
    }

    /// `true` for `Variable`, the only term a quantifier can bind.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// `true` if this term contains no `Variable` anywhere in its tree.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Function(_, args) => args.iter().all(Term::is_ground),
        }
    }

    /// Arity is implicit in `args.len()`; constants and variables are arity 0.
    pub fn arity(&self) -> usize {
        match self {
            Term::Function(_, args) => args.len(),
            _ => 0,
        }
    }

    /// Collects every free variable name occurring in this term.
    pub fn free_vars(&self, out: &mut std::collections::HashSet<String>) {
        match self {
            Term::Variable(v) => {
                out.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for a in args {
                    a.free_vars(out);
                }
            }
        }
    }

    /// Replaces every occurrence of variable `var` with `replacement`.
    pub fn substitute(&self, var: &str, replacement: &Term) -> Term {
        match self {
            Term::Variable(v) if v == var => replacement.clone(),
            Term::Variable(_) | Term::Constant(_) => self.clone(),
            Term::Function(name, args) => Term::Function(
                name.clone(),
                args.iter().map(|a| a.substitute(var, replacement)).collect(),
            ),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{v}"),
            Term::Constant(c) => write!(f, "{c}"),
            Term::Function(name, args) => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
        }
    }
}
