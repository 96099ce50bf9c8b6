//! A candidate interpretation over a finite domain: the data model
//! `findModel` searches over and eventually returns.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

use crate::symbol::{ARITHMETIC_FUNCTIONS, ARITHMETIC_PREDICATES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub domain_size: usize,
    pub constants: HashMap<String, usize>,
    pub functions: HashMap<(String, usize), HashMap<Vec<usize>, usize>>,
    pub relations: HashMap<(String, usize), HashSet<Vec<usize>>>,
}

impl Interpretation {
    pub fn new(domain_size: usize) -> Self {
        Self {
            domain_size,
            constants: HashMap::new(),
            functions: HashMap::new(),
            relations: HashMap::new(),
        }
    }

    /// The fixed arithmetic extension for a designated predicate over
    /// this domain: `less(i,j)` iff `i<j`, `gt` the reverse,
    /// `lte`/`gte` their non-strict counterparts.
    pub fn arithmetic_predicate_holds(name: &str, args: &[usize]) -> Option<bool> {
        if !ARITHMETIC_PREDICATES.contains(&name) {
            return None;
        }
        let (i, j) = (args[0], args[1]);
        Some(match name {
            "less" => i < j,
            "gt" => i > j,
            "lte" => i <= j,
            "gte" => i >= j,
            _ => unreachable!(),
        })
    }

    /// The fixed arithmetic value for a designated function over this
    /// domain, or `None` if the true result falls outside `{0,…,n-1}`
    /// (the ground fact is simply absent when the result doesn't fit).
    pub fn arithmetic_function_value(name: &str, args: &[usize], domain_size: usize) -> Option<usize> {
        if !ARITHMETIC_FUNCTIONS.contains(&name) {
            return None;
        }
        let (i, j) = (args[0] as i64, args[1] as i64);
        let result = match name {
            "plus" => i + j,
            "times" => i * j,
            "minus" => i - j,
            _ => unreachable!(),
        };
        if result >= 0 && (result as usize) < domain_size {
            Some(result as usize)
        } else {
            None
        }
    }

    /// A canonical string signature: sorted relation tuples and
    /// function tables, independent of which domain elements happen
    /// to be named what. Two interpretations with the same signature
    /// are the same up to relabeling the domain.
    pub fn canonical_signature(&self) -> String {
        let mut out = format!("n={}:", self.domain_size);
        let mut relation_keys: Vec<_> = self.relations.keys().collect();
        relation_keys.sort();
        for key in relation_keys {
            let mut tuples: Vec<_> = self.relations[key].iter().cloned().collect();
            tuples.sort();
            let _ = write!(out, "{}/{}:{:?};", key.0, key.1, tuples);
        }
        let mut function_keys: Vec<_> = self.functions.keys().collect();
        function_keys.sort();
        for key in function_keys {
            let mut entries: Vec<_> = self.functions[key].iter().collect();
            entries.sort();
            let _ = write!(out, "{}/{}:{:?};", key.0, key.1, entries);
        }
        out
    }
}
