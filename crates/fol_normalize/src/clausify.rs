//! Clausification: distributes `Or` over `And` on the
//! quantifier-free Skolemized matrix, then flattens the resulting
//! conjunction of disjunctions into a deduplicated, tautology-free
//! `Vec<Clause>`.

use fol_ast::Formula;
use fol_clause::{Clause, Literal};

/// Converts a quantifier-free NNF matrix to conjunctive normal form.
fn to_cnf(f: &Formula) -> Formula {
    match f {
        Formula::And(l, r) => Formula::and(to_cnf(l), to_cnf(r)),
        Formula::Or(l, r) => distribute(&to_cnf(l), &to_cnf(r)),
        other => other.clone(),
    }
}

/// Distributes `Or` over any `And` found in either operand:
/// `(a & b) | c == (a | c) & (b | c)`, applied recursively until
/// neither side is a conjunction.
fn distribute(l: &Formula, r: &Formula) -> Formula {
    match (l, r) {
        (Formula::And(l1, l2), _) => Formula::and(distribute(l1, r), distribute(l2, r)),
        (_, Formula::And(r1, r2)) => Formula::and(distribute(l, r1), distribute(l, r2)),
        _ => Formula::or(l.clone(), r.clone()),
    }
}

fn flatten_and(f: &Formula, out: &mut Vec<Formula>) {
    match f {
        Formula::And(l, r) => {
            flatten_and(l, out);
            flatten_and(r, out);
        }
        other => out.push(other.clone()),
    }
}

fn flatten_or(f: &Formula, out: &mut Vec<Formula>) {
    match f {
        Formula::Or(l, r) => {
            flatten_or(l, out);
            flatten_or(r, out);
        }
        other => out.push(other.clone()),
    }
}

/// Converts one atomic-or-negated-atomic formula to a `Literal`.
fn formula_atom_to_literal(f: &Formula) -> Literal {
    match f {
        Formula::Predicate(name, args) => Literal::positive(name.clone(), args.clone()),
        Formula::Equals(l, r) => Literal::equals(l.clone(), r.clone(), false),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Predicate(name, args) => Literal::negative(name.clone(), args.clone()),
            Formula::Equals(l, r) => Literal::equals(l.clone(), r.clone(), true),
            other => panic!("clausify: negation of non-atomic formula {other:?} reached clausify — NNF invariant violated"),
        },
        other => panic!("clausify: non-atomic formula {other:?} reached clausify — NNF invariant violated"),
    }
}

fn is_tautology(clause: &Clause) -> bool {
    clause
        .literals
        .iter()
        .any(|lit| clause.literals.iter().any(|other| other.is_complement_of(lit)))
}

fn dedup_literals(mut literals: Vec<Literal>) -> Vec<Literal> {
    let mut out: Vec<Literal> = Vec::new();
    for lit in literals.drain(..) {
        if !out.contains(&lit) {
            out.push(lit);
        }
    }
    out
}

/// Converts a quantifier-free NNF matrix into a deduplicated,
/// tautology-free list of clauses.
pub fn clausify(f: &Formula) -> Vec<Clause> {
    let cnf = to_cnf(f);
    let mut conjuncts = Vec::new();
    flatten_and(&cnf, &mut conjuncts);

    let mut clauses = Vec::new();
    for conjunct in conjuncts {
        let mut disjuncts = Vec::new();
        flatten_or(&conjunct, &mut disjuncts);
        let literals = dedup_literals(disjuncts.iter().map(formula_atom_to_literal).collect());
        let clause = Clause::new(literals);
        if !is_tautology(&clause) {
            clauses.push(clause);
        }
    }
    clauses
}
