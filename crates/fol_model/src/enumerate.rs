//! Enumerating candidate interpretations over a finite domain.

use std::collections::{HashMap, HashSet};

/// Every tuple in `{0,…,domain_size-1}^arity`, in lexicographic order.
/// Arity zero yields the single empty tuple.
pub fn all_tuples(arity: usize, domain_size: usize) -> Vec<Vec<usize>> {
    let mut tuples = vec![Vec::new()];
    for _ in 0..arity {
        let mut next = Vec::with_capacity(tuples.len() * domain_size);
        for prefix in &tuples {
            for value in 0..domain_size {
                let mut extended = prefix.clone();
                extended.push(value);
                next.push(extended);
            }
        }
        tuples = next;
    }
    tuples
}

/// Every constant-to-domain-element assignment for `constants`,
/// restricted to *restricted growth strings*: the value assigned to
/// the `k`-th distinct constant (in first-occurrence order) is at
/// most one more than the running maximum of the previous assignments.
/// This is the symmetry-breaking step: assignments that differ only by
/// relabeling unused domain elements are never both generated.
pub fn constant_assignments(constants: &[String], domain_size: usize) -> Vec<HashMap<String, usize>> {
    let mut results = Vec::new();
    let mut partial = Vec::with_capacity(constants.len());
    backtrack_rgs(constants, domain_size, &mut partial, 0, &mut results);
    results
}

fn backtrack_rgs(
    constants: &[String],
    domain_size: usize,
    partial: &mut Vec<usize>,
    running_max: usize,
    results: &mut Vec<HashMap<String, usize>>,
) {
    if partial.len() == constants.len() {
        let assignment = constants.iter().cloned().zip(partial.iter().copied()).collect();
        results.push(assignment);
        return;
    }
    let is_first = partial.is_empty();
    let ceiling = if is_first { 0 } else { (running_max + 1).min(domain_size - 1) };
    for value in 0..=ceiling.min(domain_size.saturating_sub(1)) {
        partial.push(value);
        let new_max = running_max.max(value);
        backtrack_rgs(constants, domain_size, partial, new_max, results);
        partial.pop();
    }
}

/// Every possible table for a function of this `arity` over the
/// domain: one output value per input tuple.
pub fn function_tables(arity: usize, domain_size: usize) -> Vec<HashMap<Vec<usize>, usize>> {
    let tuples = all_tuples(arity, domain_size);
    let mut tables = vec![HashMap::new()];
    for tuple in &tuples {
        let mut next = Vec::with_capacity(tables.len() * domain_size);
        for table in &tables {
            for value in 0..domain_size {
                let mut extended = table.clone();
                extended.insert(tuple.clone(), value);
                next.push(extended);
            }
        }
        tables = next;
    }
    tables
}

/// Every possible extension (subset of argument tuples) for a
/// predicate of this `arity` over the domain.
pub fn relation_extensions(arity: usize, domain_size: usize) -> Vec<HashSet<Vec<usize>>> {
    let tuples = all_tuples(arity, domain_size);
    let mut extensions = Vec::with_capacity(1 << tuples.len().min(20));
    for mask in 0u64..(1u64 << tuples.len()) {
        let mut extension = HashSet::new();
        for (i, tuple) in tuples.iter().enumerate() {
            if mask & (1 << i) != 0 {
                extension.insert(tuple.clone());
            }
        }
        extensions.push(extension);
    }
    extensions
}
