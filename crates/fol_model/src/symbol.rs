//! Collecting the constant, function, and predicate symbols a formula
//! mentions, in first-occurrence order.

use fol_ast::{Formula, Term};

/// The designated names that get a fixed arithmetic interpretation
/// over the domain instead of being enumerated: arithmetic predicates
/// and functions are materialized as ground facts, not searched over.
pub const ARITHMETIC_PREDICATES: [&str; 4] = ["less", "gt", "lte", "gte"];
pub const ARITHMETIC_FUNCTIONS: [&str; 3] = ["plus", "times", "minus"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    pub constants: Vec<String>,
    pub functions: Vec<(String, usize)>,
    pub predicates: Vec<(String, usize)>,
}

impl Symbols {
    /// Non-arithmetic functions — the ones SAT-assisted mode can't
    /// model and direct enumeration must build tables for.
    pub fn enumerable_functions(&self) -> Vec<(String, usize)> {
        self.functions
            .iter()
            .filter(|(name, _)| !ARITHMETIC_FUNCTIONS.contains(&name.as_str()))
            .cloned()
            .collect()
    }

    pub fn enumerable_predicates(&self) -> Vec<(String, usize)> {
        self.predicates
            .iter()
            .filter(|(name, _)| !ARITHMETIC_PREDICATES.contains(&name.as_str()))
            .cloned()
            .collect()
    }
}

pub fn collect_symbols(formula: &Formula) -> Symbols {
    let mut symbols = Symbols::default();
    walk_formula(formula, &mut symbols);
    symbols
}

fn walk_formula(formula: &Formula, symbols: &mut Symbols) {
    match formula {
        Formula::Forall(_, body) | Formula::Exists(_, body) | Formula::Not(body) => {
            walk_formula(body, symbols)
        }
        Formula::And(l, r) | Formula::Or(l, r) | Formula::Implies(l, r) | Formula::Iff(l, r) => {
            walk_formula(l, symbols);
            walk_formula(r, symbols);
        }
        Formula::Equals(l, r) => {
            walk_term(l, symbols);
            walk_term(r, symbols);
        }
        Formula::Predicate(name, args) => {
            let key = (name.clone(), args.len());
            if !symbols.predicates.contains(&key) {
                symbols.predicates.push(key);
            }
            for arg in args {
                walk_term(arg, symbols);
            }
        }
    }
}

fn walk_term(term: &Term, symbols: &mut Symbols) {
    match term {
        Term::Variable(_) => {}
        Term::Constant(name) => {
            if !symbols.constants.contains(name) {
                symbols.constants.push(name.clone());
            }
        }
        Term::Function(name, args) => {
            let key = (name.clone(), args.len());
            if !symbols.functions.contains(&key) {
                symbols.functions.push(key);
            }
            for arg in args {
                walk_term(arg, symbols);
            }
        }
    }
}
