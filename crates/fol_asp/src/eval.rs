//! Bottom-up naive evaluation of a stratified rule set.

use std::collections::{HashMap, HashSet};

use crate::rule::{bottom_atom, Atom, BodyLiteral, Rule, BOTTOM};
use crate::stratify::stratify;
use fol_base::EngineResult;

pub type Model = HashSet<Atom>;

/// Evaluates `rules` to their unique stratified model. Returns the set
/// of derived true atoms; [`BOTTOM`] being present means some
/// integrity constraint's body was satisfied, i.e. the program is
/// inconsistent.
pub fn evaluate(rules: &[Rule]) -> EngineResult<Model> {
    let strata = stratify(rules)?;

    let mut by_stratum: HashMap<usize, Vec<&Rule>> = HashMap::new();
    for rule in rules {
        let head_key = rule
            .head
            .as_ref()
            .map(|a| a.key())
            .unwrap_or_else(|| bottom_atom().key());
        let stratum = strata[&head_key];
        by_stratum.entry(stratum).or_default().push(rule);
    }

    let mut derived: Model = Model::new();
    let mut strata_in_order: Vec<usize> = by_stratum.keys().copied().collect();
    strata_in_order.sort_unstable();

    for stratum in strata_in_order {
        let stratum_rules = &by_stratum[&stratum];
        loop {
            let mut added_any = false;
            for rule in stratum_rules.iter() {
                if derived.contains(&bottom_atom()) {
                    return Ok(derived);
                }
                if body_satisfied(&rule.body, &derived) {
                    let produced = match &rule.head {
                        Some(head) => head.clone(),
                        None => bottom_atom(),
                    };
                    if derived.insert(produced) {
                        added_any = true;
                    }
                }
            }
            if !added_any {
                break;
            }
        }
    }

    Ok(derived)
}

fn body_satisfied(body: &[BodyLiteral], derived: &Model) -> bool {
    body.iter().all(|literal| match literal {
        BodyLiteral::Positive(a) => derived.contains(a),
        BodyLiteral::Naf(a) => !derived.contains(a),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ast::Term;

    fn atom(name: &str) -> Atom {
        Atom { predicate: name.to_string(), args: vec![] }
    }

    #[test]
    fn facts_are_derived_directly() {
        let rules = vec![Rule { head: Some(atom("foo")), body: vec![] }];
        let model = evaluate(&rules).unwrap();
        assert!(model.contains(&atom("foo")));
    }

    #[test]
    fn naf_succeeds_when_the_negated_atom_is_absent() {
        let rules = vec![
            Rule { head: Some(atom("foo")), body: vec![] },
            Rule { head: Some(atom("bar")), body: vec![BodyLiteral::Naf(atom("baz"))] },
        ];
        let model = evaluate(&rules).unwrap();
        assert!(model.contains(&atom("bar")));
        assert!(!model.contains(&atom("baz")));
    }

    #[test]
    fn integrity_constraint_derives_bottom_when_violated() {
        let rules = vec![
            Rule { head: Some(atom("foo")), body: vec![] },
            Rule { head: None, body: vec![BodyLiteral::Positive(atom("foo"))] },
        ];
        let model = evaluate(&rules).unwrap();
        assert!(model.contains(&Atom { predicate: BOTTOM.to_string(), args: vec![] }));
    }

    #[test]
    fn shifted_disjunction_is_mutually_naf_and_not_stratifiable() {
        // p(a) | q(a) shifts to: p(a) :- not q(a).  q(a) :- not p(a).
        // That's a cycle through negation, so it has no stratified model.
        let p = Atom { predicate: "p".to_string(), args: vec![Term::constant("a")] };
        let q = Atom { predicate: "q".to_string(), args: vec![Term::constant("a")] };
        let rules = vec![
            Rule { head: Some(p.clone()), body: vec![BodyLiteral::Naf(q.clone())] },
            Rule { head: Some(q.clone()), body: vec![BodyLiteral::Naf(p.clone())] },
        ];
        assert!(evaluate(&rules).is_err());
    }
}
