//! Normalization pipeline: simplify, negation normal form,
//! prenex, Skolemize, clausify. Each stage is pure; [`to_clauses`]
//! chains all five and is the entry point the rest of the engine uses.

mod clausify;
mod nnf;
mod prenex;
mod simplify;
mod skolem;

pub use clausify::clausify;
pub use nnf::to_nnf;
pub use prenex::to_prenex;
pub use simplify::simplify;
pub use skolem::{skolemize, SkolemEnv};

use fol_ast::Formula;
use fol_clause::Clause;

/// Runs the full pipeline on `f`, producing the clause form used by
/// every reasoning backend. `env` persists Skolem symbol assignments
/// across repeated calls within the same session.
pub fn to_clauses(f: &Formula, env: &mut SkolemEnv) -> Vec<Clause> {
    let simplified = simplify(f);
    let nnf = to_nnf(&simplified);
    let prenex = to_prenex(&nnf);
    let matrix = skolemize(&prenex, env);
    clausify::clausify(&matrix)
}
