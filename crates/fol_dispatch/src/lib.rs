//! Engine dispatcher: routes a prove request to a back-end,
//! either the caller's explicit choice or one chosen by inspecting the
//! clause form of `premises ∧ ¬goal`, and unifies every back-end's
//! outcome into one shape.

mod classify;
mod select;

pub use classify::{classify, equality_dominates, Classification};
pub use select::{route, Engine};

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use fol_ast::Formula;
use fol_clause::{Clause, Substitution};
use fol_normalize::SkolemEnv;

/// The caller's chosen search strategy. `Auto` is subject to the
/// dominant-equality heuristic; `Iterative` is always preserved
/// as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Auto,
    Iterative,
}

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub engine: Engine,
    pub strategy: Strategy,
    /// Overrides the back-end's own default inference budget when set.
    pub max_inferences: Option<usize>,
    pub enable_equality: bool,
    pub smt_options: fol_smt::SmtOptions,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        DispatchOptions {
            engine: Engine::Auto,
            strategy: Strategy::Auto,
            max_inferences: None,
            enable_equality: false,
            smt_options: fol_smt::SmtOptions::default(),
        }
    }
}

/// The closed `result` values every back-end collapses to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProveVerdict {
    Proved,
    Failed,
    Timeout,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub inferences: Option<usize>,
    pub clauses: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub verdict: ProveVerdict,
    /// The back-end and library actually used, e.g. `"sat/splr"`.
    pub engine_used: String,
    /// The strategy actually applied, after the equality-dominance
    /// heuristic.
    pub strategy_used: Strategy,
    pub bindings: Option<Substitution>,
    pub statistics: Statistics,
    /// The clause set the chosen back-end actually ran against, one
    /// clause per line.
    pub program: String,
}

fn conjoin(premises: &[Formula]) -> Formula {
    let mut it = premises.iter().cloned();
    let first = it.next().unwrap_or_else(|| Formula::predicate("true", vec![]));
    it.fold(first, Formula::and)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn try_clausify(f: &Formula, env: &mut SkolemEnv) -> Result<Vec<Clause>, String> {
    catch_unwind(AssertUnwindSafe(|| fol_normalize::to_clauses(f, env))).map_err(panic_message)
}

/// Clausifies each premise on its own, skipping (and logging) any one
/// that panics rather than discarding the whole batch — the back-ends
/// still get whatever of the input actually compiled.
fn clausify_premises_best_effort(premises: &[Formula], env: &mut SkolemEnv) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for (i, premise) in premises.iter().enumerate() {
        match try_clausify(premise, env) {
            Ok(mut c) => clauses.append(&mut c),
            Err(msg) => log::warn!("premise {i} failed to clausify, skipping it: {msg}"),
        }
    }
    clauses
}

/// Classifies `premises ∧ ¬goal` for routing and the strategy
/// heuristic, using a disposable Skolem environment so the session's
/// real one isn't advanced by this analysis pass.
fn classify_combined(premises: &[Formula], goal: &Formula) -> Result<Classification, String> {
    let combined = Formula::and(conjoin(premises), Formula::not(goal.clone()));
    let mut scratch = SkolemEnv::new();
    try_clausify(&combined, &mut scratch).map(|clauses| classify(&clauses))
}

fn effective_strategy(options: &DispatchOptions, classification: Option<&Classification>) -> Strategy {
    match options.strategy {
        Strategy::Iterative => Strategy::Iterative,
        Strategy::Auto => match classification {
            Some(c) if equality_dominates(c) => Strategy::Iterative,
            _ => Strategy::Auto,
        },
    }
}

fn effective_engine(options: &DispatchOptions, classification: Result<&Classification, &String>) -> Engine {
    match options.engine {
        Engine::Auto => match classification {
            Ok(c) => route(c, options.enable_equality, fol_smt::is_available()),
            Err(_) => Engine::Prolog,
        },
        explicit => explicit,
    }
}

fn inference_budget(options: &DispatchOptions, strategy: Strategy) -> usize {
    if let Some(n) = options.max_inferences {
        return n;
    }
    match strategy {
        Strategy::Iterative => fol_prolog::HIGH_POWER_MAX_INFERENCES,
        Strategy::Auto => fol_prolog::DEFAULT_MAX_INFERENCES,
    }
}

/// Proves `goal` against `premises`, auto-routing to a back-end when
/// `options.engine` is [`Engine::Auto`], otherwise honoring the
/// caller's explicit choice unconditionally.
pub fn prove(premises: &[Formula], goal: &Formula, options: &DispatchOptions, env: &mut SkolemEnv) -> DispatchOutcome {
    let classification = classify_combined(premises, goal);
    let engine = effective_engine(options, classification.as_ref());
    let strategy = effective_strategy(options, classification.as_ref().ok());
    // Auto-routing fell back to Prolog specifically to cover equality that
    // SMT would otherwise have handled; the fallback only works if the
    // rewrite table is actually on, regardless of what the caller asked for.
    let equality_forced = options.engine == Engine::Auto
        && engine == Engine::Prolog
        && classification.as_ref().map(|c| c.has_equality).unwrap_or(false);

    let clauses = clausify_premises_best_effort(premises, env);
    let program = clauses.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("\n");
    let budget = inference_budget(options, strategy);

    let run = AssertUnwindSafe(|| run_backend(engine, &clauses, goal, env, options, budget, equality_forced));
    let backend = match catch_unwind(run) {
        Ok(backend) => backend,
        Err(payload) => BackendOutcome {
            verdict: ProveVerdict::Error(panic_message(payload)),
            engine_used: format!("{}/panic", engine.as_str()),
            bindings: None,
            statistics: Statistics::default(),
        },
    };

    DispatchOutcome {
        verdict: backend.verdict,
        engine_used: backend.engine_used,
        strategy_used: strategy,
        bindings: backend.bindings,
        statistics: backend.statistics,
        program,
    }
}

/// What a back-end call produced, before the strategy actually used is
/// known to the caller.
struct BackendOutcome {
    verdict: ProveVerdict,
    engine_used: String,
    bindings: Option<Substitution>,
    statistics: Statistics,
}

fn run_backend(
    engine: Engine,
    clauses: &[Clause],
    goal: &Formula,
    env: &mut SkolemEnv,
    options: &DispatchOptions,
    budget: usize,
    equality_forced: bool,
) -> BackendOutcome {
    match engine {
        Engine::Auto => unreachable!("effective_engine always resolves Auto to a concrete back-end"),
        Engine::Prolog => {
            let prolog_options = fol_prolog::ProveOptions {
                max_inferences: budget,
                enable_equality: options.enable_equality || equality_forced,
            };
            let outcome = fol_prolog::prove(clauses, goal, env, &prolog_options);
            BackendOutcome {
                verdict: match outcome.verdict {
                    fol_prolog::ProveVerdict::Proved => ProveVerdict::Proved,
                    fol_prolog::ProveVerdict::Failed => ProveVerdict::Failed,
                    fol_prolog::ProveVerdict::Timeout => ProveVerdict::Timeout,
                    fol_prolog::ProveVerdict::Error(e) => ProveVerdict::Error(e),
                },
                engine_used: "prolog".to_string(),
                bindings: outcome.bindings,
                statistics: Statistics { inferences: Some(outcome.statistics.inferences), clauses: None },
            }
        }
        Engine::Sat => {
            let outcome = fol_sat::prove(clauses, goal, env);
            BackendOutcome {
                verdict: match outcome.verdict {
                    fol_sat::ProveVerdict::Proved => ProveVerdict::Proved,
                    fol_sat::ProveVerdict::Failed => ProveVerdict::Failed,
                    fol_sat::ProveVerdict::Timeout => ProveVerdict::Timeout,
                    fol_sat::ProveVerdict::Error(e) => ProveVerdict::Error(e),
                },
                engine_used: "sat/splr".to_string(),
                bindings: None,
                statistics: Statistics { inferences: None, clauses: Some(outcome.statistics.clauses) },
            }
        }
        Engine::Smt => {
            let outcome = fol_smt::prove(clauses, goal, env, &options.smt_options);
            BackendOutcome {
                verdict: match outcome.verdict {
                    fol_smt::ProveVerdict::Proved => ProveVerdict::Proved,
                    fol_smt::ProveVerdict::Failed => ProveVerdict::Failed,
                    fol_smt::ProveVerdict::Timeout => ProveVerdict::Timeout,
                    fol_smt::ProveVerdict::Error(e) => ProveVerdict::Error(e),
                },
                engine_used: "smt/z3".to_string(),
                bindings: None,
                statistics: Statistics { inferences: None, clauses: Some(outcome.statistics.clauses) },
            }
        }
        Engine::Asp => run_asp(clauses, goal, env),
    }
}

#[cfg(feature = "asp")]
fn run_asp(clauses: &[Clause], goal: &Formula, env: &mut SkolemEnv) -> BackendOutcome {
    let outcome = fol_asp::prove(clauses, goal, env);
    BackendOutcome {
        verdict: match outcome.verdict {
            fol_asp::ProveVerdict::Proved => ProveVerdict::Proved,
            fol_asp::ProveVerdict::Failed => ProveVerdict::Failed,
            fol_asp::ProveVerdict::Error(e) => ProveVerdict::Error(e),
        },
        engine_used: "asp".to_string(),
        bindings: None,
        statistics: Statistics { inferences: None, clauses: Some(outcome.statistics.rules) },
    }
}

#[cfg(not(feature = "asp"))]
fn run_asp(_clauses: &[Clause], _goal: &Formula, _env: &mut SkolemEnv) -> BackendOutcome {
    BackendOutcome {
        verdict: ProveVerdict::Error("the ASP back-end was not compiled in; rebuild with `--features asp`".to_string()),
        engine_used: "asp".to_string(),
        bindings: None,
        statistics: Statistics::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn auto_mode_routes_a_horn_syllogism_to_prolog() {
        let mut env = SkolemEnv::new();
        let x = Term::var("x");
        let premise = Formula::forall(
            "x",
            Formula::implies(Formula::predicate("man", vec![x.clone()]), Formula::predicate("mortal", vec![x])),
        );
        let fact = Formula::predicate("man", vec![Term::constant("socrates")]);
        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);

        let outcome = prove(&[premise, fact], &goal, &DispatchOptions::default(), &mut env);
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
        assert_eq!(outcome.engine_used, "prolog");
    }

    #[test]
    fn auto_mode_routes_a_non_horn_disjunction_to_sat() {
        let mut env = SkolemEnv::new();
        let p_a = Formula::predicate("p", vec![Term::constant("a")]);
        let q_a = Formula::predicate("q", vec![Term::constant("a")]);
        let premise = Formula::or(p_a.clone(), q_a.clone());
        let goal = Formula::or(q_a, p_a);

        let outcome = prove(&[premise], &goal, &DispatchOptions::default(), &mut env);
        assert_eq!(outcome.engine_used, "sat/splr");
    }

    #[test]
    fn auto_mode_routes_horn_equality_to_the_best_available_engine() {
        let mut env = SkolemEnv::new();
        let a = Term::constant("a");
        let b = Term::constant("b");
        let premise = Formula::Equals(a.clone(), b.clone());
        let goal = Formula::Equals(b, a);

        let outcome = prove(&[premise], &goal, &DispatchOptions::default(), &mut env);
        if fol_smt::is_available() {
            assert_eq!(outcome.engine_used, "smt/z3");
        } else {
            assert_eq!(outcome.engine_used, "prolog");
            assert_eq!(outcome.verdict, ProveVerdict::Proved);
        }
    }

    #[test]
    fn auto_mode_falls_back_to_prolog_for_horn_equality_when_smt_is_unavailable() {
        if fol_smt::is_available() {
            return;
        }
        let mut env = SkolemEnv::new();
        let eq = |l: &str, r: &str| Formula::Equals(Term::constant(l), Term::constant(r));
        let premises = [eq("a", "b"), eq("b", "c"), eq("c", "d")];
        let goal = eq("a", "d");

        let outcome = prove(&premises, &goal, &DispatchOptions::default(), &mut env);
        assert_eq!(outcome.engine_used, "prolog");
        assert_eq!(outcome.verdict, ProveVerdict::Proved);
    }

    #[test]
    fn explicit_engine_choice_is_never_overridden() {
        let mut env = SkolemEnv::new();
        let x = Term::var("x");
        let premise = Formula::forall(
            "x",
            Formula::implies(Formula::predicate("man", vec![x.clone()]), Formula::predicate("mortal", vec![x])),
        );
        let fact = Formula::predicate("man", vec![Term::constant("socrates")]);
        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);

        let options = DispatchOptions { engine: Engine::Sat, ..DispatchOptions::default() };
        let outcome = prove(&[premise, fact], &goal, &options, &mut env);
        assert_eq!(outcome.engine_used, "sat/splr");
    }

    #[test]
    fn equality_dominant_auto_strategy_is_raised_to_iterative() {
        let mut env = SkolemEnv::new();
        let a = Term::constant("a");
        let b = Term::constant("b");
        let premise = Formula::Equals(a.clone(), b.clone());
        let goal = Formula::Equals(b, a);

        let outcome = prove(&[premise], &goal, &DispatchOptions::default(), &mut env);
        assert_eq!(outcome.strategy_used, Strategy::Iterative);
    }

    #[test]
    fn explicitly_chosen_strategy_is_preserved() {
        let mut env = SkolemEnv::new();
        let man_x = Formula::predicate("man", vec![Term::var("x")]);
        let mortal_x = Formula::predicate("mortal", vec![Term::var("x")]);
        let premise = Formula::forall("x", Formula::implies(man_x, mortal_x));
        let fact = Formula::predicate("man", vec![Term::constant("socrates")]);
        let goal = Formula::predicate("mortal", vec![Term::constant("socrates")]);

        let options = DispatchOptions { strategy: Strategy::Iterative, ..DispatchOptions::default() };
        let outcome = prove(&[premise, fact], &goal, &options, &mut env);
        assert_eq!(outcome.strategy_used, Strategy::Iterative);
    }
}
