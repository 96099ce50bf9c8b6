//! Prolog-style SLD back-end: Horn-fragment entailment with
//! optional directed equality rewriting.

mod equality;
mod rule;
mod solver;

pub use equality::RewriteTable;
pub use rule::{compile_database, Rule};
pub use solver::Solver;

use fol_ast::Formula;
use fol_clause::{Clause, Substitution};
use fol_normalize::SkolemEnv;

/// Default inference-count budget.
pub const DEFAULT_MAX_INFERENCES: usize = 5000;
/// "High-power" budget, selected by callers that want a wider search.
pub const HIGH_POWER_MAX_INFERENCES: usize = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct ProveOptions {
    pub max_inferences: usize,
    pub enable_equality: bool,
}

impl Default for ProveOptions {
    fn default() -> Self {
        ProveOptions {
            max_inferences: DEFAULT_MAX_INFERENCES,
            enable_equality: false,
        }
    }
}

/// The closed `result` values this back-end can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProveVerdict {
    Proved,
    Failed,
    Timeout,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub inferences: usize,
}

#[derive(Debug, Clone)]
pub struct ProveOutcome {
    pub verdict: ProveVerdict,
    pub bindings: Option<Substitution>,
    pub statistics: Statistics,
}

/// Proves `goal` against `premises` (already clausified) by SLD
/// resolution. `env` is the session's Skolem environment, reused so
/// negating-and-clausifying the goal stays consistent with how the
/// premises themselves were Skolemized.
pub fn prove(
    premises: &[Clause],
    goal: &Formula,
    env: &mut SkolemEnv,
    options: &ProveOptions,
) -> ProveOutcome {
    let rules = match compile_database(premises) {
        Ok(rules) => rules,
        Err(e) => {
            return ProveOutcome {
                verdict: ProveVerdict::Error(e.to_string()),
                bindings: None,
                statistics: Statistics::default(),
            }
        }
    };

    let rewrite_table = options.enable_equality.then(|| RewriteTable::from_rules(&rules));
    let negated_goal = Formula::not(goal.clone());
    let goal_clauses = fol_normalize::to_clauses(&negated_goal, env);

    let mut total_inferences = 0usize;
    let mut saw_budget_exceeded = false;
    let mut saw_unsupported_clause = false;

    for clause in &goal_clauses {
        let subgoal = match clause_to_subgoal(clause) {
            Some(atoms) => atoms,
            None => {
                saw_unsupported_clause = true;
                continue;
            }
        };

        let mut solver = Solver::new(&rules, rewrite_table.as_ref(), options.max_inferences);
        match solver.solve(&subgoal, Substitution::new()) {
            Ok(Some(bindings)) => {
                total_inferences += solver.inferences();
                return ProveOutcome {
                    verdict: ProveVerdict::Proved,
                    bindings: Some(bindings),
                    statistics: Statistics {
                        inferences: total_inferences,
                    },
                };
            }
            Ok(None) => {
                total_inferences += solver.inferences();
            }
            Err(_budget_exceeded) => {
                total_inferences += solver.inferences();
                saw_budget_exceeded = true;
            }
        }
    }

    let verdict = if saw_budget_exceeded {
        ProveVerdict::Timeout
    } else if saw_unsupported_clause && goal_clauses.is_empty() {
        ProveVerdict::Error("negated goal produced no provable clause".to_string())
    } else {
        ProveVerdict::Failed
    };

    ProveOutcome {
        verdict,
        bindings: None,
        statistics: Statistics {
            inferences: total_inferences,
        },
    }
}

/// Converts a clause from the negated-goal CNF into the list of
/// positive atoms that must all be derived to refute it. A clause with
/// a positive literal can't be handled by plain SLD refutation (it
/// would require negation-as-failure), so this returns `None` for it.
fn clause_to_subgoal(clause: &Clause) -> Option<Vec<fol_clause::Literal>> {
    clause
        .literals
        .iter()
        .map(|lit| {
            if lit.negated {
                Some(fol_clause::Literal::new(lit.predicate.clone(), lit.args.clone(), false))
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    fn clausify(f: &Formula, env: &mut SkolemEnv) -> Vec<Clause> {
        fol_normalize::to_clauses(f, env)
    }

    #[test]
    fn socrates_syllogism_is_proved() {
        let mut env = SkolemEnv::new();
        let man_x = Formula::predicate("man", vec![Term::var("x")]);
        let mortal_x = Formula::predicate("mortal", vec![Term::var("x")]);
        let universal = Formula::forall("x", Formula::implies(man_x, mortal_x));
        let man_socrates = Formula::predicate("man", vec![Term::constant("socrates")]);

        let mut premises = clausify(&universal, &mut env);
        premises.extend(clausify(&man_socrates, &mut env));

        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);
        let outcome = prove(&premises, &goal, &mut env, &ProveOptions::default());
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
    }

    #[test]
    fn unentailed_goal_fails() {
        let mut env = SkolemEnv::new();
        let man_socrates = Formula::predicate("man", vec![Term::constant("socrates")]);
        let premises = clausify(&man_socrates, &mut env);

        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);
        let outcome = prove(&premises, &goal, &mut env, &ProveOptions::default());
        assert_eq!(outcome.verdict, ProveVerdict::Failed);
    }

    #[test]
    fn equality_chain_is_proved_with_equality_mode_enabled() {
        let mut env = SkolemEnv::new();
        let eq = |l: &str, r: &str| Formula::Equals(Term::constant(l), Term::constant(r));
        let mut premises = clausify(&eq("a", "b"), &mut env);
        premises.extend(clausify(&eq("b", "c"), &mut env));
        premises.extend(clausify(&eq("c", "d"), &mut env));

        let goal = eq("a", "d");
        let options = ProveOptions {
            enable_equality: true,
            ..ProveOptions::default()
        };
        let outcome = prove(&premises, &goal, &mut env, &options);
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
    }

    #[test]
    fn inference_budget_reports_timeout_on_an_unprovable_recursive_goal() {
        let mut env = SkolemEnv::new();
        let p_x = Formula::predicate("p", vec![Term::var("x")]);
        let rule = Formula::forall("x", Formula::implies(p_x.clone(), p_x));
        let premises = clausify(&rule, &mut env);

        let goal = Formula::predicate("p", vec![Term::constant("a")]);
        let options = ProveOptions {
            max_inferences: 20,
            ..ProveOptions::default()
        };
        let outcome = prove(&premises, &goal, &mut env, &options);
        assert_eq!(outcome.verdict, ProveVerdict::Timeout);
    }
}
