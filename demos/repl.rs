//! Thin manual smoke-test binary over `fol_engine::Engine`. Runs
//! a single `prove`/`check-well-formed`/`find-model` call when given a
//! subcommand, or drops into an interactive session-backed REPL
//! otherwise.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use fol_engine::{Engine, FindModelRequest, ProveRequest, QuerySessionRequest};

#[derive(Parser)]
#[command(name = "fol-repl")]
#[command(about = "Manual smoke-test driver for the FOL reasoning engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prove `goal` from `premises` once and exit.
    Prove {
        #[arg(long, value_delimiter = ';')]
        premises: Vec<String>,
        goal: String,
        #[arg(long)]
        engine: Option<String>,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        enable_equality: bool,
    },
    /// Check whether `formula` parses.
    CheckWellFormed { formula: String },
    /// Search for a model of `premises` and print it.
    FindModel {
        #[arg(long, value_delimiter = ';')]
        premises: Vec<String>,
        #[arg(long)]
        max_domain_size: Option<usize>,
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let engine = Engine::new();

    let exit_code = match cli.command {
        Some(Command::Prove { premises, goal, engine: backend, strategy, enable_equality }) => {
            run_prove(&engine, premises, goal, backend, strategy, enable_equality)
        }
        Some(Command::CheckWellFormed { formula }) => run_check_well_formed(&engine, &formula),
        Some(Command::FindModel { premises, max_domain_size, count }) => {
            run_find_model(&engine, premises, max_domain_size, count)
        }
        None => {
            if let Err(e) = run_repl(&engine).await {
                eprintln!("repl error: {e}");
                2
            } else {
                0
            }
        }
    };

    std::process::exit(exit_code);
}

fn run_prove(
    engine: &Engine,
    premises: Vec<String>,
    goal: String,
    backend: Option<String>,
    strategy: Option<String>,
    enable_equality: bool,
) -> i32 {
    let req = ProveRequest {
        premises,
        goal,
        engine: backend,
        strategy,
        enable_equality: Some(enable_equality),
        verbosity: Some(fol_engine::Verbosity::Detailed),
        ..ProveRequest::default()
    };
    let response = engine.prove(&req);
    println!("{}", serde_json::to_string_pretty(&response).unwrap_or_else(|e| e.to_string()));
    if response.result == "proved" {
        0
    } else {
        1
    }
}

fn run_check_well_formed(engine: &Engine, formula: &str) -> i32 {
    let response = engine.check_well_formed(formula);
    println!("{}", serde_json::to_string_pretty(&response).unwrap_or_else(|e| e.to_string()));
    if response.valid {
        0
    } else {
        1
    }
}

fn run_find_model(engine: &Engine, premises: Vec<String>, max_domain_size: Option<usize>, count: Option<usize>) -> i32 {
    let req = FindModelRequest { premises, max_domain_size, count, ..FindModelRequest::default() };
    match engine.find_model(&req) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response).unwrap_or_else(|e| e.to_string()));
            if response.success {
                0
            } else {
                1
            }
        }
        Err(e) => {
            eprintln!("{e}");
            2
        }
    }
}

/// A single persistent session: `assert`, `retract`, `list`, `prove`,
/// `quit`, one command per line.
async fn run_repl(engine: &Engine) -> Result<(), fol_base::EngineError> {
    let session_id = engine.create_session(None).await?;
    println!("session {session_id}; commands: assert <f> | retract <f> | list | prove <goal> | quit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.unwrap_or_default();
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "quit" | "exit" => break,
            "assert" => match engine.assert_premise(session_id, rest.to_string()).await {
                Ok(()) => println!("asserted"),
                Err(e) => println!("error: {e}"),
            },
            "retract" => match engine.retract_premise(session_id, rest).await {
                Ok(found) => println!("{}", if found { "retracted" } else { "not found" }),
                Err(e) => println!("error: {e}"),
            },
            "list" => match engine.list_premises(session_id).await {
                Ok(premises) => println!("{premises:?}"),
                Err(e) => println!("error: {e}"),
            },
            "prove" => {
                let query = QuerySessionRequest { goal: rest.to_string(), ..QuerySessionRequest::default() };
                match engine.query_session(session_id, &query).await {
                    Ok(response) => println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default()),
                    Err(e) => println!("error: {e}"),
                }
            }
            other => println!("unknown command {other:?}"),
        }
        let _ = stdout.flush();
    }

    engine.delete_session(session_id).await
}
