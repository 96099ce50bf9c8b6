//! Clauses and literals.
//!
//! Equality literals use the reserved predicate name `"="` with two
//! arguments, so a literal stays one uniform `{predicate, args, negated}`
//! shape rather than a separate AST case.

use fol_ast::Term;
use std::fmt;

pub const EQUALS_PREDICATE: &str = "=";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
    pub negated: bool,
}

impl Literal {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>, negated: bool) -> Self {
        Self {
            predicate: predicate.into(),
            args,
            negated,
        }
    }

    pub fn positive(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self::new(predicate, args, false)
    }

    pub fn negative(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Self::new(predicate, args, true)
    }

    pub fn equals(l: Term, r: Term, negated: bool) -> Self {
        Self::new(EQUALS_PREDICATE, vec![l, r], negated)
    }

    /// `(predicate, arity)` — literals are compared modulo negation by
    /// this key.
    pub fn key(&self) -> (&str, usize) {
        (self.predicate.as_str(), self.args.len())
    }

    /// The literal with polarity flipped, same predicate/args.
    pub fn negation(&self) -> Literal {
        Literal {
            predicate: self.predicate.clone(),
            args: self.args.clone(),
            negated: !self.negated,
        }
    }

    /// `true` iff `self` and `other` are exact negations of one another
    /// (same predicate, same arguments, opposite polarity).
    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.predicate == other.predicate && self.args == other.args && self.negated != other.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        write!(f, "{}", fol_ast::Formula::Predicate(self.predicate.clone(), self.args.clone()))
    }
}

/// An ordered list of literals; the empty clause (no literals) denotes
/// the derivation of falsity (⊥).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn empty() -> Self {
        Self { literals: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause is a definite (Horn) clause iff it has at most one
    /// positive literal.
    pub fn is_horn(&self) -> bool {
        self.literals.iter().filter(|l| !l.negated).count() <= 1
    }

    pub fn positive_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| !l.negated)
    }

    pub fn negative_literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter().filter(|l| l.negated)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "\u{22a5}");
        }
        for (i, l) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{l}")?;
        }
        Ok(())
    }
}

/// A clause set is Horn iff every one of its clauses is.
pub fn is_horn_clause_set(clauses: &[Clause]) -> bool {
    clauses.iter().all(Clause::is_horn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn horn_clause_has_at_most_one_positive_literal() {
        let horn = Clause::new(vec![
            Literal::negative("man", vec![Term::var("x")]),
            Literal::positive("mortal", vec![Term::var("x")]),
        ]);
        assert!(horn.is_horn());

        let non_horn = Clause::new(vec![
            Literal::positive("p", vec![Term::constant("a")]),
            Literal::positive("q", vec![Term::constant("a")]),
        ]);
        assert!(!non_horn.is_horn());
    }

    #[test]
    fn complement_detects_opposite_polarity_same_atom() {
        let a = Literal::positive("p", vec![Term::constant("a")]);
        let b = Literal::negative("p", vec![Term::constant("a")]);
        assert!(a.is_complement_of(&b));
        assert!(!a.is_complement_of(&a));
    }
}
