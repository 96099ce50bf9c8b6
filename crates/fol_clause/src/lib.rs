//! Clause model, substitutions, and unification.

mod clause;
mod unify;

pub use clause::{is_horn_clause_set, Clause, Literal, EQUALS_PREDICATE};
pub use unify::{apply_subst, compose, unify_args, unify_terms, Substitution, UnifyError, UnifyResult};
