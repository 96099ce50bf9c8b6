//! Assigns each predicate a stratum number from the rule set's
//! positive/negative dependency edges.

use std::collections::HashMap;

use fol_base::{EngineError, EngineResult, ErrorKind};

use crate::rule::{bottom_atom, BodyLiteral, Rule};

type PredicateKey = (String, usize);

/// `stratum[head] >= stratum[body]` for positive edges, strictly
/// greater for negative (NAF) edges. Returns `Unsupported` if no
/// assignment satisfies every edge — i.e. some dependency cycle runs
/// through a negative edge.
pub fn stratify(rules: &[Rule]) -> EngineResult<HashMap<PredicateKey, usize>> {
    let mut strata: HashMap<PredicateKey, usize> = HashMap::new();
    for rule in rules {
        let head_key = rule
            .head
            .as_ref()
            .map(|a| a.key())
            .unwrap_or_else(|| bottom_atom().key());
        strata.entry(head_key).or_insert(0);
        for literal in &rule.body {
            let body_key = match literal {
                BodyLiteral::Positive(a) | BodyLiteral::Naf(a) => a.key(),
            };
            strata.entry(body_key).or_insert(0);
        }
    }

    let predicate_count = strata.len();
    // A stratified assignment can never need more than one bump per
    // predicate in the graph; if we're still growing after that many
    // rounds, some cycle runs through a negative edge.
    let max_rounds = predicate_count + 1;

    for _ in 0..max_rounds {
        let mut changed = false;
        for rule in rules {
            let head_key = rule
                .head
                .as_ref()
                .map(|a| a.key())
                .unwrap_or_else(|| bottom_atom().key());
            for literal in &rule.body {
                let (body_key, bump) = match literal {
                    BodyLiteral::Positive(a) => (a.key(), 0),
                    BodyLiteral::Naf(a) => (a.key(), 1),
                };
                let required = strata[&body_key] + bump;
                if strata[&head_key] < required {
                    strata.insert(head_key.clone(), required);
                    changed = true;
                }
            }
        }
        if !changed {
            return Ok(strata);
        }
    }

    Err(EngineError::new(
        ErrorKind::Unsupported,
        "the program is not stratified: a predicate depends negatively on itself through a cycle",
    ))
}
