//! Depth-first SLD resolution bounded by an inference count.

use fol_clause::{apply_subst, unify_terms, Literal, Substitution};

use crate::equality::RewriteTable;
use crate::rule::Rule;

/// Exhausted the `maxInferences` budget before finding a refutation.
pub struct BudgetExceeded;

pub struct Solver<'a> {
    rules: &'a [Rule],
    equality: Option<&'a RewriteTable>,
    max_inferences: usize,
    inferences: usize,
    fresh_counter: usize,
}

impl<'a> Solver<'a> {
    pub fn new(rules: &'a [Rule], equality: Option<&'a RewriteTable>, max_inferences: usize) -> Self {
        Solver {
            rules,
            equality,
            max_inferences,
            inferences: 0,
            fresh_counter: 0,
        }
    }

    pub fn inferences(&self) -> usize {
        self.inferences
    }

    /// Attempts to prove every literal in `goals` conjunctively under
    /// `subst`. Returns `Ok(None)` on ordinary failure (goal exhausted
    /// without a match) and `Err(BudgetExceeded)` when the inference
    /// count runs out first.
    pub fn solve(
        &mut self,
        goals: &[Literal],
        subst: Substitution,
    ) -> Result<Option<Substitution>, BudgetExceeded> {
        let Some((first, rest)) = goals.split_first() else {
            return Ok(Some(subst));
        };

        let grounded = apply_subst_literal(first, &subst);

        if let Some(result) = self.try_equality_builtin(&grounded) {
            return if result {
                self.solve(rest, subst)
            } else {
                Ok(None)
            };
        }

        if self.inferences >= self.max_inferences {
            return Err(BudgetExceeded);
        }

        for rule in self.rules {
            self.inferences += 1;
            if self.inferences > self.max_inferences {
                return Err(BudgetExceeded);
            }

            let renamed = self.standardize_apart(rule);
            let mut candidate = subst.clone();
            if unify_terms_literal(&grounded, &renamed.head, &mut candidate).is_err() {
                continue;
            }

            let mut next_goals = renamed.body.clone();
            next_goals.extend_from_slice(rest);
            match self.solve(&next_goals, candidate)? {
                Some(found) => return Ok(Some(found)),
                None => continue,
            }
        }

        Ok(None)
    }

    /// Handles a ground or partially ground `=` literal as a builtin
    /// via the rewrite table rather than resolution, per the directed
    /// equality mode. Returns `None` when equality mode is off or the
    /// literal isn't an equality atom, so the caller falls through to
    /// ordinary resolution.
    fn try_equality_builtin(&self, lit: &Literal) -> Option<bool> {
        let table = self.equality?;
        if lit.predicate != fol_clause::EQUALS_PREDICATE {
            return None;
        }
        let (l, r) = (&lit.args[0], &lit.args[1]);
        if !l.is_ground() || !r.is_ground() {
            return None;
        }
        let equal = table.normalize(l) == table.normalize(r);
        Some(equal != lit.negated)
    }

    /// Renames every variable in `rule` to a fresh name unique to this
    /// resolution step, so repeated uses of the same rule don't share
    /// bindings ("standardizing apart").
    fn standardize_apart(&mut self, rule: &Rule) -> Rule {
        self.fresh_counter += 1;
        let suffix = format!("__{}", self.fresh_counter);
        let mut renamed_head = rule.head.clone();
        let mut renamed_body = rule.body.clone();
        rename_literal(&mut renamed_head, &suffix);
        for lit in &mut renamed_body {
            rename_literal(lit, &suffix);
        }
        Rule {
            head: renamed_head,
            body: renamed_body,
        }
    }
}

fn rename_literal(lit: &mut Literal, suffix: &str) {
    for arg in &mut lit.args {
        rename_term(arg, suffix);
    }
}

fn rename_term(term: &mut fol_ast::Term, suffix: &str) {
    match term {
        fol_ast::Term::Variable(name) => {
            if !name.ends_with(suffix) {
                name.push_str(suffix);
            }
        }
        fol_ast::Term::Function(_, args) => {
            for a in args {
                rename_term(a, suffix);
            }
        }
        fol_ast::Term::Constant(_) => {}
    }
}

fn apply_subst_literal(lit: &Literal, subst: &Substitution) -> Literal {
    Literal::new(
        lit.predicate.clone(),
        lit.args.iter().map(|a| apply_subst(a, subst)).collect(),
        lit.negated,
    )
}

fn unify_terms_literal(goal: &Literal, head: &Literal, subst: &mut Substitution) -> Result<(), ()> {
    if goal.key() != head.key() || goal.negated != head.negated {
        return Err(());
    }
    for (a, b) in goal.args.iter().zip(head.args.iter()) {
        unify_terms(a, b, subst).map_err(|_| ())?;
    }
    Ok(())
}
