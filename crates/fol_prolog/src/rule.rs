//! Definite clauses: `head :- body1, ..., bodyn`.

use fol_base::{EngineError, EngineResult, ErrorKind};
use fol_clause::{Clause, Literal};

/// A definite clause compiled from a Horn [`Clause`] with exactly one
/// positive literal. A fact is a rule with an empty body.
#[derive(Debug, Clone)]
pub struct Rule {
    pub head: Literal,
    pub body: Vec<Literal>,
}

impl Rule {
    /// Compiles one clause into a rule. Fails `UNSUPPORTED` if the
    /// clause does not have exactly one positive literal — the Prolog
    /// back-end only accepts the definite-clause fragment.
    pub fn from_clause(clause: &Clause) -> EngineResult<Rule> {
        let positives: Vec<&Literal> = clause.positive_literals().collect();
        if positives.len() != 1 {
            return Err(EngineError::new(
                ErrorKind::Unsupported,
                format!(
                    "clause `{clause}` has {} positive literals; the Prolog back-end requires exactly one",
                    positives.len()
                ),
            ));
        }
        let head = positives[0].clone();
        let body = clause
            .negative_literals()
            .map(|lit| Literal::new(lit.predicate.clone(), lit.args.clone(), false))
            .collect();
        Ok(Rule { head, body })
    }
}

/// Compiles a full premise clause set into a rule database.
pub fn compile_database(clauses: &[Clause]) -> EngineResult<Vec<Rule>> {
    clauses.iter().map(Rule::from_clause).collect()
}
