//! Classifying a clause set for auto-mode routing.

use fol_ast::Term;
use fol_clause::{Clause, EQUALS_PREDICATE};

#[derive(Debug, Clone, Copy, Default)]
pub struct Classification {
    pub is_horn: bool,
    pub has_equality: bool,
    pub has_arithmetic: bool,
    pub equality_literal_count: usize,
    pub total_literal_count: usize,
}

fn term_uses_arithmetic(term: &Term) -> bool {
    match term {
        Term::Variable(_) | Term::Constant(_) => false,
        Term::Function(name, args) => {
            fol_smt::ARITHMETIC_FUNCTIONS.contains(&name.as_str()) || args.iter().any(term_uses_arithmetic)
        }
    }
}

/// Scans `clauses` for the facts auto-routing needs: whether the set
/// is Horn, whether it mentions equality, and whether it mentions any
/// designated arithmetic predicate or function.
pub fn classify(clauses: &[Clause]) -> Classification {
    let mut c = Classification {
        is_horn: fol_clause::is_horn_clause_set(clauses),
        ..Classification::default()
    };

    for clause in clauses {
        for literal in &clause.literals {
            c.total_literal_count += 1;
            if literal.predicate == EQUALS_PREDICATE {
                c.has_equality = true;
                c.equality_literal_count += 1;
                continue;
            }
            if fol_smt::ARITHMETIC_PREDICATES.contains(&literal.predicate.as_str()) {
                c.has_arithmetic = true;
            }
            if literal.args.iter().any(term_uses_arithmetic) {
                c.has_arithmetic = true;
            }
        }
    }

    c
}

/// Equality is "dominant" when at least half the clause set's literals
/// are equality literals.
pub fn equality_dominates(c: &Classification) -> bool {
    c.total_literal_count > 0 && c.equality_literal_count * 2 >= c.total_literal_count
}
