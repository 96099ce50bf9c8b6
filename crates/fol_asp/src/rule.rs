//! Translating ground clauses into normal (non-disjunctive) rules with
//! negation-as-failure, by shifting extra positive literals into `not`
//! conditions.

use fol_ast::Term;
use fol_base::{EngineError, EngineResult, ErrorKind};
use fol_clause::{Clause, Literal};

/// A fully ground atom: `predicate(args)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn key(&self) -> (String, usize) {
        (self.predicate.clone(), self.args.len())
    }
}

/// The synthetic nullary atom that stands for inconsistency: derived
/// true exactly when some integrity constraint's body is satisfied.
pub const BOTTOM: &str = "__bottom";

pub fn bottom_atom() -> Atom {
    Atom {
        predicate: BOTTOM.to_string(),
        args: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BodyLiteral {
    /// Must already be derived.
    Positive(Atom),
    /// Must not be derivable once its (strictly lower) stratum is
    /// fully closed.
    Naf(Atom),
}

/// `head :- body`. `head = None` is an integrity constraint: if every
/// body literal holds, [`BOTTOM`] is derived.
#[derive(Debug, Clone)]
pub struct Rule {
    pub head: Option<Atom>,
    pub body: Vec<BodyLiteral>,
}

fn atom_from_literal(lit: &Literal) -> EngineResult<Atom> {
    if !lit.args.iter().all(|a| a.is_ground()) {
        return Err(EngineError::new(
            ErrorKind::Unsupported,
            format!("literal `{lit}` is not ground; the ASP back-end requires a grounded program"),
        ));
    }
    Ok(Atom {
        predicate: lit.predicate.clone(),
        args: lit.args.clone(),
    })
}

/// Shifts a clause's literals into a normal rule: the first positive
/// literal becomes the head, any further positive literals become NAF
/// body conditions, and the negative-polarity literals become ordinary
/// (must-be-derived) body conditions.
pub fn rule_from_clause(clause: &Clause) -> EngineResult<Rule> {
    let mut positives = clause.positive_literals();
    let head_literal = positives.next();
    let extra_positives: Vec<&Literal> = positives.collect();

    let head = head_literal.map(atom_from_literal).transpose()?;

    let mut body = Vec::new();
    for lit in clause.negative_literals() {
        body.push(BodyLiteral::Positive(atom_from_literal(lit)?));
    }
    for lit in extra_positives {
        body.push(BodyLiteral::Naf(atom_from_literal(lit)?));
    }

    Ok(Rule { head, body })
}

pub fn compile_program(clauses: &[Clause]) -> EngineResult<Vec<Rule>> {
    clauses.iter().map(rule_from_clause).collect()
}
