//! SAT-assisted search: for purely relational formulas (no
//! uninterpreted functions, no designated arithmetic predicates), the
//! relation search is handed to `fol-sat` instead of enumerated by
//! hand. A plain propositional solver has no model of function
//! application or integer arithmetic, so formulas using either always
//! fall back to [`crate::search::search`].

use std::collections::{HashMap, HashSet};

use fol_ast::{Formula, Term};
use fol_clause::{Clause, Literal};
use fol_normalize::SkolemEnv;

use crate::enumerate::constant_assignments;
use crate::interpretation::Interpretation;
use crate::symbol::Symbols;

fn substitute_constants_term(term: &Term, assignment: &HashMap<String, usize>) -> Term {
    match term {
        Term::Constant(name) => match assignment.get(name) {
            Some(value) => Term::constant(value.to_string()),
            None => term.clone(),
        },
        Term::Variable(_) => term.clone(),
        Term::Function(name, args) => Term::Function(
            name.clone(),
            args.iter().map(|a| substitute_constants_term(a, assignment)).collect(),
        ),
    }
}

fn substitute_constants(formula: &Formula, assignment: &HashMap<String, usize>) -> Formula {
    match formula {
        Formula::Forall(var, body) => {
            Formula::Forall(var.clone(), Box::new(substitute_constants(body, assignment)))
        }
        Formula::Exists(var, body) => {
            Formula::Exists(var.clone(), Box::new(substitute_constants(body, assignment)))
        }
        Formula::And(l, r) => Formula::and(substitute_constants(l, assignment), substitute_constants(r, assignment)),
        Formula::Or(l, r) => Formula::or(substitute_constants(l, assignment), substitute_constants(r, assignment)),
        Formula::Implies(l, r) => {
            Formula::implies(substitute_constants(l, assignment), substitute_constants(r, assignment))
        }
        Formula::Iff(l, r) => Formula::iff(substitute_constants(l, assignment), substitute_constants(r, assignment)),
        Formula::Not(inner) => Formula::not(substitute_constants(inner, assignment)),
        Formula::Equals(l, r) => Formula::Equals(
            substitute_constants_term(l, assignment),
            substitute_constants_term(r, assignment),
        ),
        Formula::Predicate(name, args) => Formula::Predicate(
            name.clone(),
            args.iter().map(|a| substitute_constants_term(a, assignment)).collect(),
        ),
    }
}

fn distinct_atoms(clauses: &[Clause]) -> Vec<(String, Vec<Term>)> {
    let mut seen = HashSet::new();
    let mut atoms = Vec::new();
    for clause in clauses {
        for literal in &clause.literals {
            let key = (literal.predicate.clone(), literal.args.clone());
            if seen.insert(key.clone()) {
                atoms.push(key);
            }
        }
    }
    atoms
}

fn atom_truth(atoms: &[(String, Vec<Term>)], model: &fol_sat::Model) -> Vec<bool> {
    atoms
        .iter()
        .map(|(pred, args)| {
            let key = Formula::Predicate(pred.clone(), args.clone()).to_string();
            model.get(&key).copied().unwrap_or(false)
        })
        .collect()
}

fn blocking_clause(atoms: &[(String, Vec<Term>)], truth: &[bool]) -> Clause {
    let literals = atoms
        .iter()
        .zip(truth.iter())
        .map(|((pred, args), &value)| Literal::new(pred.clone(), args.clone(), value))
        .collect();
    Clause::new(literals)
}

/// Like [`crate::search::search`], but delegates the relation search
/// to `fol-sat` for each restricted-growth-string constant assignment,
/// collecting further models via blocking clauses.
pub fn search(
    grounded: &Formula,
    symbols: &Symbols,
    domain_size: usize,
    remaining: usize,
    seen_signatures: &mut HashSet<String>,
    attempts_by_domain_size: &mut HashMap<usize, usize>,
) -> Vec<Interpretation> {
    let mut found = Vec::new();
    let mut attempts = 0usize;

    'assignments: for assignment in constant_assignments(&symbols.constants, domain_size) {
        attempts += 1;
        let substituted = substitute_constants(grounded, &assignment);
        let mut env = SkolemEnv::new();
        let mut clauses = fol_normalize::to_clauses(&substituted, &mut env);
        let atoms = distinct_atoms(&clauses);

        loop {
            let Ok(Some(model)) = fol_sat::check_sat(&clauses) else {
                break;
            };
            let truth = atom_truth(&atoms, &model);

            let mut interp = Interpretation::new(domain_size);
            interp.constants = assignment.clone();
            for ((predicate, args), &value) in atoms.iter().zip(truth.iter()) {
                if predicate == fol_clause::EQUALS_PREDICATE || !value {
                    continue;
                }
                let values: Vec<usize> = args
                    .iter()
                    .map(|t| match t {
                        Term::Constant(n) => n.parse().unwrap_or(0),
                        _ => 0,
                    })
                    .collect();
                interp
                    .relations
                    .entry((predicate.clone(), args.len()))
                    .or_default()
                    .insert(values);
            }

            let signature = interp.canonical_signature();
            if seen_signatures.insert(signature) {
                found.push(interp);
                if found.len() >= remaining {
                    break 'assignments;
                }
            }

            clauses.push(blocking_clause(&atoms, &truth));
        }
    }

    attempts_by_domain_size.insert(domain_size, attempts);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ground::ground;
    use crate::symbol::collect_symbols;

    #[test]
    fn finds_a_model_via_sat_for_a_satisfiable_disjunction() {
        let p_a = Formula::predicate("p", vec![Term::constant("a")]);
        let p_b = Formula::predicate("p", vec![Term::constant("b")]);
        let f = Formula::or(p_a, p_b);
        let symbols = collect_symbols(&f);
        let grounded = ground(&f, 2);
        let mut seen = HashSet::new();
        let mut attempts = HashMap::new();
        let found = search(&grounded, &symbols, 2, 1, &mut seen, &mut attempts);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn finds_no_model_via_sat_for_a_contradiction() {
        let a = Term::constant("a");
        let f = Formula::and(
            Formula::predicate("p", vec![a.clone()]),
            Formula::not(Formula::predicate("p", vec![a])),
        );
        let symbols = collect_symbols(&f);
        let grounded = ground(&f, 1);
        let mut seen = HashSet::new();
        let mut attempts = HashMap::new();
        let found = search(&grounded, &symbols, 1, 1, &mut seen, &mut attempts);
        assert!(found.is_empty());
    }
}
