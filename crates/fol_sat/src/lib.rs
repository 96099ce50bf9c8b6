//! Propositional SAT back-end: ground clauses into DIMACS
//! integers and drive `splr`.

mod dimacs;

pub use dimacs::{atom_key, literal_to_int, to_dimacs, VarTable};

use fol_ast::Formula;
use fol_base::{EngineError, ErrorKind};
use fol_clause::Clause;
use fol_normalize::SkolemEnv;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProveVerdict {
    Proved,
    Failed,
    Timeout,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub variables: usize,
    pub clauses: usize,
}

/// A satisfying assignment, keyed by the same ground-atom strings
/// `VarTable` interns (e.g. `"man(socrates)"`).
pub type Model = HashMap<String, bool>;

#[derive(Debug, Clone)]
pub struct ProveOutcome {
    pub verdict: ProveVerdict,
    pub model: Option<Model>,
    pub statistics: Statistics,
}

/// Checks satisfiability of a ground clause set. An empty clause set
/// is trivially satisfiable.
pub fn check_sat(clauses: &[Clause]) -> Result<Option<Model>, EngineError> {
    if clauses.is_empty() {
        return Ok(Some(Model::new()));
    }
    let (dimacs, table) = dimacs::to_dimacs(clauses)?;
    solve_dimacs(&dimacs, &table)
}

fn solve_dimacs(dimacs: &[Vec<i32>], table: &VarTable) -> Result<Option<Model>, EngineError> {
    match splr::Certificate::try_from(dimacs.to_vec()) {
        Ok(splr::Certificate::UNSAT) => Ok(None),
        Ok(splr::Certificate::SAT(assignment)) => Ok(Some(assignment_to_model(&assignment, table))),
        Err(e) => Err(EngineError::new(ErrorKind::EngineError, format!("splr: {e:?}"))),
    }
}

fn assignment_to_model(assignment: &[i32], table: &VarTable) -> Model {
    let mut model = Model::new();
    for lit in assignment {
        if let Some(atom) = table.atom_for(lit.unsigned_abs() as i32) {
            model.insert(atom.to_string(), *lit > 0);
        }
    }
    model
}

/// Proves `goal` against already-clausified `premises` by checking
/// unsatisfiability of `premises ∧ ¬goal`. `env` reuses the
/// session's Skolem environment so negating-and-clausifying the goal
/// stays consistent with the premises.
pub fn prove(premises: &[Clause], goal: &Formula, env: &mut SkolemEnv) -> ProveOutcome {
    let negated_goal = Formula::not(goal.clone());
    let goal_clauses = fol_normalize::to_clauses(&negated_goal, env);

    let mut all_clauses = premises.to_vec();
    all_clauses.extend(goal_clauses);

    let (dimacs, table) = match dimacs::to_dimacs(&all_clauses) {
        Ok(pair) => pair,
        Err(e) => {
            return ProveOutcome {
                verdict: ProveVerdict::Error(e.to_string()),
                model: None,
                statistics: Statistics::default(),
            }
        }
    };

    let statistics = Statistics {
        variables: table.variable_count(),
        clauses: dimacs.len(),
    };

    match solve_dimacs(&dimacs, &table) {
        Ok(None) => ProveOutcome {
            verdict: ProveVerdict::Proved,
            model: None,
            statistics,
        },
        Ok(Some(model)) => ProveOutcome {
            verdict: ProveVerdict::Failed,
            model: Some(model),
            statistics,
        },
        Err(e) => ProveOutcome {
            verdict: ProveVerdict::Error(e.to_string()),
            model: None,
            statistics,
        },
    }
}

/// Collects up to `k` pairwise distinct satisfying assignments of
/// `clauses`, each time adding a blocking clause that excludes the
/// previously found assignment over the variables it covers.
pub fn find_models(clauses: &[Clause], k: usize) -> Result<Vec<Model>, EngineError> {
    if clauses.is_empty() {
        return Ok(if k > 0 { vec![Model::new()] } else { Vec::new() });
    }
    let (mut dimacs, table) = dimacs::to_dimacs(clauses)?;
    let mut models = Vec::new();

    while models.len() < k {
        match solve_dimacs(&dimacs, &table) {
            Ok(None) => break,
            Ok(Some(model)) => {
                let blocking: Vec<i32> = model
                    .iter()
                    .filter_map(|(atom, value)| {
                        let id = lookup_id(&table, atom)?;
                        Some(if *value { -id } else { id })
                    })
                    .collect();
                dimacs.push(blocking);
                models.push(model);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(models)
}

fn lookup_id(table: &VarTable, atom: &str) -> Option<i32> {
    (1..=table.variable_count() as i32).find(|id| table.atom_for(*id) == Some(atom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;
    use fol_clause::Literal;

    #[test]
    fn empty_clause_set_is_trivially_sat() {
        assert!(check_sat(&[]).unwrap().is_some());
    }

    #[test]
    fn unsatisfiable_pair_reports_none() {
        let p = Literal::positive("p", vec![Term::constant("a")]);
        let not_p = Literal::negative("p", vec![Term::constant("a")]);
        let clauses = vec![Clause::new(vec![p]), Clause::new(vec![not_p])];
        assert!(check_sat(&clauses).unwrap().is_none());
    }

    #[test]
    fn satisfiable_clause_reports_a_model() {
        let p = Literal::positive("p", vec![Term::constant("a")]);
        let q = Literal::positive("q", vec![Term::constant("a")]);
        let clauses = vec![Clause::new(vec![p, q])];
        let model = check_sat(&clauses).unwrap();
        assert!(model.is_some());
    }

    #[test]
    fn non_horn_disjunction_entailment_is_proved() {
        let mut env = SkolemEnv::new();
        let p_a = Formula::predicate("p", vec![Term::constant("a")]);
        let q_a = Formula::predicate("q", vec![Term::constant("a")]);
        let disjunction = Formula::or(p_a.clone(), q_a.clone());
        let not_p = Formula::not(p_a);

        let mut premises = fol_normalize::to_clauses(&disjunction, &mut env);
        premises.extend(fol_normalize::to_clauses(&not_p, &mut env));

        let outcome = prove(&premises, &q_a, &mut env);
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
    }
}
