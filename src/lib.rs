//! Top-level tool surface: a single `Engine` type wiring the
//! parser, dispatcher, model finder and session registry together.
//! No transport (HTTP/stdio/MCP) is implemented here — callers wire
//! `Engine`'s methods to whatever transport they use.

use std::sync::Arc;

use fol_base::{EngineError, ErrorKind};
use fol_dispatch::{DispatchOptions, Engine as BackendEngine, ProveVerdict, Strategy};
use fol_model::{FindModelOptions, Interpretation, ResultKind};
use fol_normalize::SkolemEnv;
use fol_session::{CreateOptions, SessionManager};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed `result` values every tool response collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultValue {
    Proved,
    Failed,
    Timeout,
    Error,
    NoModelFound,
}

impl ResultValue {
    fn as_str(&self) -> &'static str {
        match self {
            ResultValue::Proved => "proved",
            ResultValue::Failed => "failed",
            ResultValue::Timeout => "timeout",
            ResultValue::Error => "error",
            ResultValue::NoModelFound => "no-model-found",
        }
    }
}

impl std::fmt::Display for ResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a response to populate: `Minimal` is just the
/// verdict booleans, `Standard` adds message/proof/bindings/error,
/// `Detailed` adds the compiled back-end program and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Minimal,
    #[default]
    Standard,
    Detailed,
}

fn parse_engine(name: Option<&str>) -> Result<BackendEngine, EngineError> {
    match name {
        None | Some("auto") => Ok(BackendEngine::Auto),
        Some("prolog") => Ok(BackendEngine::Prolog),
        Some("sat") => Ok(BackendEngine::Sat),
        Some("smt") => Ok(BackendEngine::Smt),
        Some("asp") => Ok(BackendEngine::Asp),
        Some(other) => Err(EngineError::new(ErrorKind::InvalidArgument, format!("unknown engine '{other}'"))),
    }
}

fn parse_strategy(name: Option<&str>) -> Result<Strategy, EngineError> {
    match name {
        None | Some("auto") => Ok(Strategy::Auto),
        Some("iterative") => Ok(Strategy::Iterative),
        Some(other) => Err(EngineError::new(ErrorKind::InvalidArgument, format!("unknown strategy '{other}'"))),
    }
}

fn parse_formula(input: &str) -> Result<fol_ast::Formula, EngineError> {
    fol_parser::parse(input).map_err(EngineError::from)
}

fn parse_formulas(inputs: &[String]) -> Result<Vec<fol_ast::Formula>, EngineError> {
    inputs.iter().map(|s| parse_formula(s)).collect()
}

/// `prove` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProveRequest {
    pub premises: Vec<String>,
    pub goal: String,
    pub engine: Option<String>,
    pub strategy: Option<String>,
    pub max_seconds: Option<u64>,
    pub max_inferences: Option<usize>,
    pub enable_equality: Option<bool>,
    pub verbosity: Option<Verbosity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub inferences: Option<usize>,
    pub clauses: Option<usize>,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProveResponse {
    pub found: bool,
    pub success: bool,
    pub result: String,
    pub message: Option<String>,
    pub proof: Option<String>,
    pub engine_used: Option<String>,
    pub error: Option<String>,
    pub statistics: Option<StatisticsResponse>,
    /// The compiled back-end program (clausified premises), one clause
    /// per line. Only populated at [`Verbosity::Detailed`].
    pub program: Option<String>,
}

fn prove_response(outcome: fol_dispatch::DispatchOutcome, elapsed: std::time::Duration, verbosity: Verbosity) -> ProveResponse {
    let (result, found, success, error) = match &outcome.verdict {
        ProveVerdict::Proved => (ResultValue::Proved, true, true, None),
        ProveVerdict::Failed => (ResultValue::Failed, false, false, None),
        ProveVerdict::Timeout => (ResultValue::Timeout, false, false, None),
        ProveVerdict::Error(msg) => (ResultValue::Error, false, false, Some(msg.clone())),
    };

    let mut response = ProveResponse {
        found,
        success,
        result: result.to_string(),
        message: None,
        proof: None,
        engine_used: None,
        error: None,
        statistics: None,
        program: None,
    };

    if verbosity == Verbosity::Minimal {
        return response;
    }

    response.message = Some(format!("{} via {}", result, outcome.engine_used));
    response.proof = outcome.bindings.map(|b| format!("{b:?}"));
    response.engine_used = Some(outcome.engine_used);
    response.error = error;

    if verbosity == Verbosity::Detailed {
        response.statistics = Some(StatisticsResponse {
            inferences: outcome.statistics.inferences,
            clauses: outcome.statistics.clauses,
            time_ms: elapsed.as_millis(),
        });
        response.program = Some(outcome.program);
    }

    response
}

/// `check-well-formed` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckWellFormedResponse {
    pub valid: bool,
    pub error: Option<String>,
}

/// `find-model` / `find-counterexample` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindModelRequest {
    pub premises: Vec<String>,
    pub domain_size: Option<usize>,
    pub max_domain_size: Option<usize>,
    pub count: Option<usize>,
    pub use_sat: Option<bool>,
    pub max_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    pub domain_size: usize,
    pub constants: std::collections::HashMap<String, usize>,
    pub relations: std::collections::HashMap<String, Vec<Vec<usize>>>,
}

fn model_response(model: &Interpretation) -> ModelResponse {
    let relations = model
        .relations
        .iter()
        .map(|((name, _arity), tuples)| {
            let mut tuples: Vec<Vec<usize>> = tuples.iter().cloned().collect();
            tuples.sort();
            (name.clone(), tuples)
        })
        .collect();
    ModelResponse {
        domain_size: model.domain_size,
        constants: model.constants.clone(),
        relations,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindModelResponse {
    pub success: bool,
    pub result: String,
    pub model: Option<ModelResponse>,
    pub models: Option<Vec<ModelResponse>>,
}

fn find_model_options(req: &FindModelRequest) -> FindModelOptions {
    let defaults = FindModelOptions::default();
    FindModelOptions {
        domain_size: req.domain_size,
        max_domain_size: req.max_domain_size.unwrap_or(defaults.max_domain_size),
        count: req.count.unwrap_or(defaults.count),
        use_sat: req.use_sat.unwrap_or(defaults.use_sat),
        sat_threshold: defaults.sat_threshold,
        max_seconds: req.max_seconds,
    }
}

fn find_model_response(outcome: fol_model::FindModelOutcome) -> FindModelResponse {
    let result = match outcome.result {
        ResultKind::Success => ResultValue::Proved,
        ResultKind::NoModelFound => ResultValue::NoModelFound,
        ResultKind::Timeout => ResultValue::Timeout,
    };
    let mut models: Vec<ModelResponse> = outcome.models.iter().map(model_response).collect();
    let model = if models.len() == 1 { models.first().cloned() } else { None };
    let models = if models.len() > 1 { Some(std::mem::take(&mut models)) } else { None };
    FindModelResponse { success: result == ResultValue::Proved, result: result.to_string(), model, models }
}

/// Session-scoped `prove`: runs `goal` against the session's
/// accumulated premises and its persistent `SkolemEnv`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuerySessionRequest {
    pub goal: String,
    pub engine: Option<String>,
    pub strategy: Option<String>,
    pub max_inferences: Option<usize>,
    pub enable_equality: Option<bool>,
    pub verbosity: Option<Verbosity>,
}

/// Wires the parser, dispatcher, model finder and session registry
/// into a single named tool surface. Owns the session registry's
/// background sweep task for its whole lifetime.
pub struct Engine {
    sessions: Arc<SessionManager>,
    sweeper: tokio::task::JoinHandle<()>,
}

impl Engine {
    pub fn new() -> Self {
        let sessions = Arc::new(SessionManager::new());
        let sweeper = fol_session::spawn_sweeper(sessions.clone());
        Engine { sessions, sweeper }
    }

    pub fn prove(&self, req: &ProveRequest) -> ProveResponse {
        let verbosity = req.verbosity.unwrap_or_default();
        let premises = match parse_formulas(&req.premises) {
            Ok(p) => p,
            Err(e) => return error_prove_response(e, verbosity),
        };
        let goal = match parse_formula(&req.goal) {
            Ok(g) => g,
            Err(e) => return error_prove_response(e, verbosity),
        };
        let engine = match parse_engine(req.engine.as_deref()) {
            Ok(e) => e,
            Err(e) => return error_prove_response(e, verbosity),
        };
        let strategy = match parse_strategy(req.strategy.as_deref()) {
            Ok(s) => s,
            Err(e) => return error_prove_response(e, verbosity),
        };

        let options = DispatchOptions {
            engine,
            strategy,
            max_inferences: req.max_inferences,
            enable_equality: req.enable_equality.unwrap_or(false),
            smt_options: fol_smt::SmtOptions::default(),
        };

        let mut env = SkolemEnv::new();
        let started = std::time::Instant::now();
        let outcome = fol_dispatch::prove(&premises, &goal, &options, &mut env);
        prove_response(outcome, started.elapsed(), verbosity)
    }

    pub fn check_well_formed(&self, formula: &str) -> CheckWellFormedResponse {
        match fol_parser::parse(formula) {
            Ok(_) => CheckWellFormedResponse { valid: true, error: None },
            Err(e) => CheckWellFormedResponse { valid: false, error: Some(e.to_string()) },
        }
    }

    pub fn find_model(&self, req: &FindModelRequest) -> Result<FindModelResponse, EngineError> {
        let premises = parse_formulas(&req.premises)?;
        let options = find_model_options(req);
        Ok(find_model_response(fol_model::find_model(&premises, &options)))
    }

    pub fn find_counterexample(&self, req: &FindModelRequest, conclusion: &str) -> Result<FindModelResponse, EngineError> {
        let premises = parse_formulas(&req.premises)?;
        let goal = parse_formula(conclusion)?;
        let options = find_model_options(req);
        Ok(find_model_response(fol_model::find_counterexample(&premises, &goal, &options)))
    }

    pub async fn create_session(&self, ttl_ms: Option<u64>) -> Result<Uuid, EngineError> {
        let opts = match ttl_ms {
            Some(ttl_ms) => CreateOptions { ttl_ms },
            None => CreateOptions::default(),
        };
        self.sessions.create(opts).await
    }

    pub async fn assert_premise(&self, id: Uuid, formula: String) -> Result<(), EngineError> {
        parse_formula(&formula)?;
        self.sessions.assert_premise(id, formula).await
    }

    pub async fn retract_premise(&self, id: Uuid, formula: &str) -> Result<bool, EngineError> {
        self.sessions.retract_premise(id, formula).await
    }

    pub async fn list_premises(&self, id: Uuid) -> Result<Vec<String>, EngineError> {
        self.sessions.get(id).await
    }

    pub async fn clear_session(&self, id: Uuid) -> Result<(), EngineError> {
        self.sessions.clear(id).await
    }

    pub async fn delete_session(&self, id: Uuid) -> Result<(), EngineError> {
        self.sessions.delete(id).await
    }

    pub async fn query_session(&self, id: Uuid, req: &QuerySessionRequest) -> Result<ProveResponse, EngineError> {
        let verbosity = req.verbosity.unwrap_or_default();
        let goal = parse_formula(&req.goal)?;
        let engine = parse_engine(req.engine.as_deref())?;
        let strategy = parse_strategy(req.strategy.as_deref())?;
        let options = DispatchOptions {
            engine,
            strategy,
            max_inferences: req.max_inferences,
            enable_equality: req.enable_equality.unwrap_or(false),
            smt_options: fol_smt::SmtOptions::default(),
        };

        let premises_text = self.sessions.get(id).await?;
        let premises = parse_formulas(&premises_text)?;

        let started = std::time::Instant::now();
        let outcome = self
            .sessions
            .with_session(id, |_premises, env| fol_dispatch::prove(&premises, &goal, &options, env))
            .await?;
        Ok(prove_response(outcome, started.elapsed(), verbosity))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

fn error_prove_response(err: EngineError, verbosity: Verbosity) -> ProveResponse {
    log::warn!("prove request rejected: {err}");
    let mut response = ProveResponse {
        found: false,
        success: false,
        result: ResultValue::Error.to_string(),
        message: None,
        proof: None,
        engine_used: None,
        error: None,
        statistics: None,
        program: None,
    };
    if verbosity != Verbosity::Minimal {
        response.error = Some(err.to_string());
        response.message = Some(err.message);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socrates_syllogism_is_proved() {
        let engine = Engine::new();
        let req = ProveRequest {
            premises: vec!["all x (man(x) -> mortal(x))".to_string(), "man(socrates)".to_string()],
            goal: "mortal(socrates)".to_string(),
            ..ProveRequest::default()
        };
        let response = engine.prove(&req);
        assert!(response.success);
        assert_eq!(response.result, "proved");
        assert_eq!(response.engine_used.as_deref(), Some("prolog"));
    }

    #[test]
    fn minimal_verbosity_omits_message_and_engine_used() {
        let engine = Engine::new();
        let req = ProveRequest {
            premises: vec!["man(socrates)".to_string()],
            goal: "man(socrates)".to_string(),
            verbosity: Some(Verbosity::Minimal),
            ..ProveRequest::default()
        };
        let response = engine.prove(&req);
        assert!(response.message.is_none());
        assert!(response.engine_used.is_none());
    }

    #[test]
    fn detailed_verbosity_reports_timing_and_the_compiled_program() {
        let engine = Engine::new();
        let req = ProveRequest {
            premises: vec!["all x (man(x) -> mortal(x))".to_string(), "man(socrates)".to_string()],
            goal: "mortal(socrates)".to_string(),
            verbosity: Some(Verbosity::Detailed),
            ..ProveRequest::default()
        };
        let response = engine.prove(&req);
        assert!(response.success);
        let stats = response.statistics.unwrap();
        assert!(stats.inferences.is_some());
        let program = response.program.unwrap();
        assert!(program.contains("man") && program.contains("mortal"));
    }

    #[test]
    fn malformed_goal_reports_an_error_result_without_panicking() {
        let engine = Engine::new();
        let req = ProveRequest {
            premises: vec!["man(socrates)".to_string()],
            goal: "P(x".to_string(),
            ..ProveRequest::default()
        };
        let response = engine.prove(&req);
        assert_eq!(response.result, "error");
        assert!(response.error.is_some());
    }

    #[test]
    fn check_well_formed_rejects_an_unclosed_paren() {
        let engine = Engine::new();
        let result = engine.check_well_formed("P(x");
        assert!(!result.valid);
        assert!(result.error.is_some());
    }

    #[test]
    fn find_counterexample_reports_p_true_q_false() {
        let engine = Engine::new();
        let req = FindModelRequest {
            premises: vec!["P(a)".to_string()],
            max_domain_size: Some(1),
            ..FindModelRequest::default()
        };
        let response = engine.find_counterexample(&req, "Q(a)").unwrap();
        assert_eq!(response.result, "proved");
        let model = response.model.unwrap();
        assert_eq!(model.domain_size, 1);
        assert_eq!(model.relations.get("P").map(|v| v.len()), Some(1));
        assert!(model.relations.get("Q").map(|v| v.is_empty()).unwrap_or(true));
    }

    #[tokio::test]
    async fn session_round_trip_proves_a_query_against_asserted_premises() {
        let engine = Engine::new();
        let id = engine.create_session(None).await.unwrap();
        engine.assert_premise(id, "all x (man(x) -> mortal(x))".to_string()).await.unwrap();
        engine.assert_premise(id, "man(socrates)".to_string()).await.unwrap();

        let query = QuerySessionRequest { goal: "mortal(socrates)".to_string(), ..QuerySessionRequest::default() };
        let response = engine.query_session(id, &query).await.unwrap();
        assert!(response.success);

        assert!(engine.retract_premise(id, "man(socrates)").await.unwrap());
        engine.delete_session(id).await.unwrap();
        assert!(engine.list_premises(id).await.is_err());
    }
}
