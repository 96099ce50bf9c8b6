//! Interning of ground literals to stable DIMACS integers.

use fol_base::{EngineError, EngineResult, ErrorKind};
use fol_clause::{Clause, Literal};
use std::collections::HashMap;

/// Maps each distinct ground atom `pred(args)` to a stable positive
/// integer, the key `splr`/DIMACS use to identify a propositional
/// variable.
#[derive(Debug, Default)]
pub struct VarTable {
    next_id: i32,
    ids: HashMap<String, i32>,
    atoms: Vec<String>,
}

impl VarTable {
    pub fn new() -> Self {
        VarTable::default()
    }

    /// Returns the existing id for `atom`, assigning a fresh one if
    /// this is the first time it's seen.
    pub fn intern(&mut self, atom: &str) -> i32 {
        if let Some(id) = self.ids.get(atom) {
            return *id;
        }
        self.next_id += 1;
        let id = self.next_id;
        self.ids.insert(atom.to_string(), id);
        self.atoms.push(atom.to_string());
        id
    }

    /// The atom name a variable id was interned from, for reporting
    /// satisfying assignments back in terms of predicates.
    pub fn atom_for(&self, var_id: i32) -> Option<&str> {
        self.atoms.get((var_id - 1) as usize).map(String::as_str)
    }

    pub fn variable_count(&self) -> usize {
        self.atoms.len()
    }
}

/// A stable key for a ground atom, ignoring polarity: `pred(a,b)`.
/// Fails `UNSUPPORTED` if the literal is not ground — this back-end
/// operates purely on already-grounded propositional problems.
pub fn atom_key(lit: &Literal) -> EngineResult<String> {
    if !lit.args.iter().all(|a| a.is_ground()) {
        return Err(EngineError::new(
            ErrorKind::Unsupported,
            format!("literal `{lit}` is not ground; the SAT back-end requires grounded input"),
        ));
    }
    let args: Vec<String> = lit.args.iter().map(|a| a.to_string()).collect();
    Ok(if args.is_empty() {
        lit.predicate.clone()
    } else {
        format!("{}({})", lit.predicate, args.join(","))
    })
}

/// Converts a ground literal to its signed DIMACS integer, interning
/// its atom in `table` as needed.
pub fn literal_to_int(lit: &Literal, table: &mut VarTable) -> EngineResult<i32> {
    let key = atom_key(lit)?;
    let id = table.intern(&key);
    Ok(if lit.negated { -id } else { id })
}

/// Converts a full ground clause set to DIMACS form.
pub fn to_dimacs(clauses: &[Clause]) -> EngineResult<(Vec<Vec<i32>>, VarTable)> {
    let mut table = VarTable::new();
    let mut out = Vec::with_capacity(clauses.len());
    for clause in clauses {
        let mut row = Vec::with_capacity(clause.literals.len());
        for lit in &clause.literals {
            row.push(literal_to_int(lit, &mut table)?);
        }
        out.push(row);
    }
    Ok((out, table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    #[test]
    fn same_atom_reuses_the_same_id() {
        let mut table = VarTable::new();
        let p_a = Literal::positive("p", vec![Term::constant("a")]);
        let not_p_a = Literal::negative("p", vec![Term::constant("a")]);
        let a = literal_to_int(&p_a, &mut table).unwrap();
        let b = literal_to_int(&not_p_a, &mut table).unwrap();
        assert_eq!(a, -b);
    }

    #[test]
    fn non_ground_literal_is_rejected() {
        let lit = Literal::positive("p", vec![Term::var("x")]);
        let mut table = VarTable::new();
        assert!(literal_to_int(&lit, &mut table).is_err());
    }
}
