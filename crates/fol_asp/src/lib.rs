//! Ground Datalog back-end with stratified negation-as-failure.

mod eval;
mod rule;
mod stratify;

pub use eval::{evaluate, Model};
pub use rule::{compile_program, rule_from_clause, Atom, BodyLiteral, Rule, BOTTOM};

use fol_ast::Formula;
use fol_clause::Clause;
use fol_normalize::SkolemEnv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProveVerdict {
    Proved,
    Failed,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub rules: usize,
}

#[derive(Debug, Clone)]
pub struct ProveOutcome {
    pub verdict: ProveVerdict,
    pub statistics: Statistics,
}

/// Proves `goal` against ground `premises` by checking whether
/// `premises ∧ ¬goal`, translated and shifted into a normal stratified
/// program, derives [`BOTTOM`] — i.e. has no model.
pub fn prove(premises: &[Clause], goal: &Formula, env: &mut SkolemEnv) -> ProveOutcome {
    let negated_goal = Formula::not(goal.clone());
    let goal_clauses = fol_normalize::to_clauses(&negated_goal, env);

    let mut all_clauses = premises.to_vec();
    all_clauses.extend(goal_clauses);

    let rules = match compile_program(&all_clauses) {
        Ok(rules) => rules,
        Err(e) => {
            return ProveOutcome {
                verdict: ProveVerdict::Error(e.to_string()),
                statistics: Statistics::default(),
            }
        }
    };

    let statistics = Statistics { rules: rules.len() };

    match evaluate(&rules) {
        Ok(model) => {
            let verdict = if model.contains(&rule::bottom_atom()) {
                ProveVerdict::Proved
            } else {
                ProveVerdict::Failed
            };
            ProveOutcome { verdict, statistics }
        }
        Err(e) => ProveOutcome {
            verdict: ProveVerdict::Error(e.to_string()),
            statistics,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn socrates_syllogism_is_proved() {
        let mut env = SkolemEnv::new();
        let x = Term::var("x");
        let man_x = Formula::predicate("man", vec![x.clone()]);
        let mortal_x = Formula::predicate("mortal", vec![x]);
        let rule = Formula::forall("x", Formula::implies(man_x, mortal_x));
        let fact = Formula::predicate("man", vec![Term::constant("socrates")]);
        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);

        let mut premises = fol_normalize::to_clauses(&rule, &mut env);
        premises.extend(fol_normalize::to_clauses(&fact, &mut env));

        let outcome = prove(&premises, &goal, &mut env);
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
    }

    #[test]
    fn unentailed_goal_fails() {
        let mut env = SkolemEnv::new();
        let fact = Formula::predicate("man", vec![Term::constant("socrates")]);
        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);
        let premises = fol_normalize::to_clauses(&fact, &mut env);
        let outcome = prove(&premises, &goal, &mut env);
        assert_eq!(outcome.verdict, ProveVerdict::Failed);
    }

    #[test]
    fn disjunctive_premise_reports_error_not_a_panic() {
        let mut env = SkolemEnv::new();
        let p_a = Formula::predicate("p", vec![Term::constant("a")]);
        let q_a = Formula::predicate("q", vec![Term::constant("a")]);
        let disjunction = Formula::or(p_a, q_a.clone());
        let premises = fol_normalize::to_clauses(&disjunction, &mut env);
        let outcome = prove(&premises, &q_a, &mut env);
        assert!(matches!(outcome.verdict, ProveVerdict::Error(_)));
    }
}
