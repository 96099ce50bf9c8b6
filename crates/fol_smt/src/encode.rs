//! Z3 encoding of clauses over an integer-sorted domain.
//!
//! Objects and Skolem constants share the integer sort, the same
//! placeholder trick the static verifier uses for its `Object` type:
//! Z3 never interprets the sort arithmetically unless a designated
//! arithmetic name is in play, so ordinary constants just behave as
//! distinguishable opaque values.

use std::collections::HashMap;

use fol_ast::{Formula, Term};
use fol_clause::{Clause, Literal, EQUALS_PREDICATE};
use fol_normalize::SkolemEnv;
use z3::ast::{Ast, Bool, Int};
use z3::{Config, Context, FuncDecl, SatResult, Solver, Sort};

use crate::{ProveOutcome, ProveVerdict, SmtOptions, Statistics, ARITHMETIC_FUNCTIONS, ARITHMETIC_PREDICATES};

pub fn prove(
    premises: &[Clause],
    goal: &Formula,
    env: &mut SkolemEnv,
    options: &SmtOptions,
) -> ProveOutcome {
    let negated_goal = Formula::not(goal.clone());
    let goal_clauses = fol_normalize::to_clauses(&negated_goal, env);

    let mut all_clauses = premises.to_vec();
    all_clauses.extend(goal_clauses);

    let mut cfg = Config::new();
    cfg.set_param_value("timeout", &options.timeout_ms.to_string());
    let ctx = Context::new(&cfg);
    let solver = Solver::new(&ctx);
    let mut encoder = Encoder::new(&ctx, options.enable_arithmetic);

    for clause in &all_clauses {
        solver.assert(&encoder.encode_clause(clause));
    }

    let statistics = Statistics {
        clauses: all_clauses.len(),
    };

    let verdict = match solver.check() {
        SatResult::Unsat => ProveVerdict::Proved,
        SatResult::Sat => ProveVerdict::Failed,
        SatResult::Unknown => ProveVerdict::Timeout,
    };

    ProveOutcome { verdict, statistics }
}

/// Encodes clauses and ground/free terms into Z3 ASTs, caching the
/// uninterpreted relation/function declarations it creates so that
/// repeated symbol occurrences resolve to the same Z3 `FuncDecl`.
struct Encoder<'ctx> {
    ctx: &'ctx Context,
    arithmetic: bool,
    relations: HashMap<(String, usize), FuncDecl<'ctx>>,
    functions: HashMap<(String, usize), FuncDecl<'ctx>>,
}

impl<'ctx> Encoder<'ctx> {
    fn new(ctx: &'ctx Context, arithmetic: bool) -> Self {
        Encoder {
            ctx,
            arithmetic,
            relations: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    fn relation(&mut self, name: &str, arity: usize) -> &FuncDecl<'ctx> {
        let int_sort = Sort::int(self.ctx);
        let bool_sort = Sort::bool(self.ctx);
        self.relations
            .entry((name.to_string(), arity))
            .or_insert_with(|| {
                let domain = vec![&int_sort; arity];
                FuncDecl::new(self.ctx, name, &domain, &bool_sort)
            })
    }

    fn function(&mut self, name: &str, arity: usize) -> &FuncDecl<'ctx> {
        let int_sort = Sort::int(self.ctx);
        self.functions
            .entry((name.to_string(), arity))
            .or_insert_with(|| {
                let domain = vec![&int_sort; arity];
                FuncDecl::new(self.ctx, name, &domain, &int_sort)
            })
    }

    /// Encodes a clause as the disjunction of its literals, universally
    /// closed over any variables the literals mention — a clause's
    /// variables are implicitly universal per the clause model.
    fn encode_clause(&mut self, clause: &Clause) -> Bool<'ctx> {
        let free_vars = clause_variables(clause);
        let literal_bools: Vec<Bool<'ctx>> = clause
            .literals
            .iter()
            .map(|lit| self.encode_literal(lit))
            .collect();
        let refs: Vec<&Bool<'ctx>> = literal_bools.iter().collect();
        let body = if refs.is_empty() {
            Bool::from_bool(self.ctx, false)
        } else {
            Bool::or(self.ctx, &refs)
        };

        if free_vars.is_empty() {
            return body;
        }

        let bound: Vec<Int<'ctx>> = free_vars
            .iter()
            .map(|name| Int::new_const(self.ctx, name.as_str()))
            .collect();
        let bound_refs: Vec<&dyn Ast<'ctx>> = bound.iter().map(|v| v as &dyn Ast<'ctx>).collect();
        z3::ast::forall_const(self.ctx, &bound_refs, &[], &body)
    }

    fn encode_literal(&mut self, lit: &Literal) -> Bool<'ctx> {
        if lit.predicate == EQUALS_PREDICATE {
            let l = self.encode_term(&lit.args[0]);
            let r = self.encode_term(&lit.args[1]);
            let eq = l._eq(&r);
            return if lit.negated { eq.not() } else { eq };
        }

        if self.arithmetic && ARITHMETIC_PREDICATES.contains(&lit.predicate.as_str()) && lit.args.len() == 2 {
            let l = self.encode_term(&lit.args[0]);
            let r = self.encode_term(&lit.args[1]);
            let positive = match lit.predicate.as_str() {
                "less" => l.lt(&r),
                "gt" => l.gt(&r),
                "lte" => l.le(&r),
                "gte" => l.ge(&r),
                _ => unreachable!("checked by ARITHMETIC_PREDICATES membership above"),
            };
            return if lit.negated { positive.not() } else { positive };
        }

        let args: Vec<Int<'ctx>> = lit.args.iter().map(|t| self.encode_term(t)).collect();
        let arg_refs: Vec<&dyn Ast<'ctx>> = args.iter().map(|a| a as &dyn Ast<'ctx>).collect();
        let relation = self.relation(&lit.predicate, lit.args.len()).clone();
        let applied = relation.apply(&arg_refs);
        let as_bool = applied
            .as_bool()
            .expect("relation FuncDecl was declared with a Bool range");
        if lit.negated {
            as_bool.not()
        } else {
            as_bool
        }
    }

    fn encode_term(&mut self, term: &Term) -> Int<'ctx> {
        match term {
            Term::Constant(name) => match name.parse::<i64>() {
                Ok(n) => Int::from_i64(self.ctx, n),
                Err(_) => Int::new_const(self.ctx, name.as_str()),
            },
            Term::Variable(name) => Int::new_const(self.ctx, name.as_str()),
            Term::Function(name, args) => {
                if self.arithmetic && ARITHMETIC_FUNCTIONS.contains(&name.as_str()) && args.len() == 2 {
                    let l = self.encode_term(&args[0]);
                    let r = self.encode_term(&args[1]);
                    return match name.as_str() {
                        "plus" => l + r,
                        "times" => l * r,
                        "minus" => l - r,
                        _ => unreachable!("checked by ARITHMETIC_FUNCTIONS membership above"),
                    };
                }
                let encoded_args: Vec<Int<'ctx>> = args.iter().map(|a| self.encode_term(a)).collect();
                let arg_refs: Vec<&dyn Ast<'ctx>> = encoded_args.iter().map(|a| a as &dyn Ast<'ctx>).collect();
                let func = self.function(name, args.len()).clone();
                func.apply(&arg_refs)
                    .as_int()
                    .expect("function FuncDecl was declared with an Int range")
            }
        }
    }
}

/// Distinct variable names appearing anywhere in a clause's literals,
/// in first-occurrence order.
fn clause_variables(clause: &Clause) -> Vec<String> {
    let mut seen = Vec::new();
    for lit in &clause.literals {
        for arg in &lit.args {
            collect_variables(arg, &mut seen);
        }
    }
    seen
}

fn collect_variables(term: &Term, seen: &mut Vec<String>) {
    match term {
        Term::Variable(name) => {
            if !seen.contains(name) {
                seen.push(name.clone());
            }
        }
        Term::Function(_, args) => {
            for a in args {
                collect_variables(a, seen);
            }
        }
        Term::Constant(_) => {}
    }
}
