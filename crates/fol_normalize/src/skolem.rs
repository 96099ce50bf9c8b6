//! Skolemization: replaces each existential variable with a
//! fresh function of the universal variables enclosing it, then drops
//! the (now all-universal) quantifier prefix — the remaining free
//! variables are universally quantified implicitly, per the clause
//! convention used throughout the rest of the pipeline.

use fol_ast::{Formula, Term};
use std::collections::HashMap;

/// Assigns Skolem function symbols, reusing the same symbol for the
/// same existential variable under the same enclosing universals so
/// that repeated normalization calls within a session stay consistent.
#[derive(Debug, Default, Clone)]
pub struct SkolemEnv {
    counter: usize,
    map: HashMap<(String, Vec<String>), String>,
}

impl SkolemEnv {
    pub fn new() -> Self {
        SkolemEnv::default()
    }

    /// Returns the Skolem term for `var` under the given ordered list
    /// of enclosing universal variables: a fresh 0-ary constant if the
    /// list is empty, otherwise a function applied to those variables.
    pub fn skolemize(&mut self, var: &str, universals: &[String]) -> Term {
        let key = (var.to_string(), universals.to_vec());
        if let Some(name) = self.map.get(&key) {
            return Self::apply(name, universals);
        }
        let name = format!("sk{}", self.counter);
        self.counter += 1;
        self.map.insert(key, name.clone());
        Self::apply(&name, universals)
    }

    fn apply(name: &str, universals: &[String]) -> Term {
        if universals.is_empty() {
            Term::constant(name)
        } else {
            Term::function(name, universals.iter().map(|v| Term::var(v)).collect())
        }
    }
}

/// Skolemizes a prenex formula `f`, consuming its quantifier prefix and
/// returning the quantifier-free matrix.
pub fn skolemize(f: &Formula, env: &mut SkolemEnv) -> Formula {
    strip(f, env, &mut Vec::new())
}

fn strip(f: &Formula, env: &mut SkolemEnv, universals: &mut Vec<String>) -> Formula {
    match f {
        Formula::Forall(v, body) => {
            universals.push(v.clone());
            let result = strip(body, env, universals);
            universals.pop();
            result
        }
        Formula::Exists(v, body) => {
            let skolem_term = env.skolemize(v, universals);
            let substituted = body.substitute(v, &skolem_term);
            strip(&substituted, env, universals)
        }
        other => other.clone(),
    }
}
