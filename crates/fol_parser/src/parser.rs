//! Recursive-descent parser over the token stream. Operator precedence,
//! highest binding first: `&` > `|` > `->` > `<->`, with `-` as a
//! right-associative prefix.

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use fol_ast::{Formula, Term};
use fol_base::{ParseError, ParseResult, Span};

/// Variable naming convention: these identifiers are variables
/// wherever they appear bare (not as the head of a function/predicate
/// application), everything else is a constant.
const VARIABLE_NAMES: &[&str] = &["x", "y", "z", "u", "v", "w"];

fn is_variable_name(name: &str) -> bool {
    VARIABLE_NAMES.contains(&name)
}

pub struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        Self { input, tokens, pos: 0 }
    }

    /// Parses `input` into a single `Formula`. Trailing `.` is accepted
    /// and discarded; the parser is total over every string the lexer
    /// accepts.
    pub fn parse(input: &str) -> ParseResult<Formula> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut parser = Parser::new(input, tokens);
        let formula = parser.parse_formula()?;
        if parser.peek_kind() == &TokenKind::Dot {
            parser.advance();
        }
        parser.expect_eof()?;
        Ok(formula)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.input, self.peek().span)
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {:?}, found {:?}", kind, self.peek_kind())))
        }
    }

    fn expect_eof(&self) -> ParseResult<()> {
        if self.peek_kind() == &TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing token {:?}", self.peek_kind())))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("expected identifier, found {:?}", other))),
        }
    }

    // formula := iff
    fn parse_formula(&mut self) -> ParseResult<Formula> {
        self.parse_iff()
    }

    // iff := implies ('<->' implies)?  (right-associative, single level suffices)
    fn parse_iff(&mut self) -> ParseResult<Formula> {
        let lhs = self.parse_implies()?;
        if self.peek_kind() == &TokenKind::Iff {
            self.advance();
            let rhs = self.parse_iff()?;
            Ok(Formula::iff(lhs, rhs))
        } else {
            Ok(lhs)
        }
    }

    // implies := or ('->' or)?  (right-associative)
    fn parse_implies(&mut self) -> ParseResult<Formula> {
        let lhs = self.parse_or()?;
        if self.peek_kind() == &TokenKind::Implies {
            self.advance();
            let rhs = self.parse_implies()?;
            Ok(Formula::implies(lhs, rhs))
        } else {
            Ok(lhs)
        }
    }

    // or := and ('|' and)*
    fn parse_or(&mut self) -> ParseResult<Formula> {
        let mut lhs = self.parse_and()?;
        while self.peek_kind() == &TokenKind::Or {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Formula::or(lhs, rhs);
        }
        Ok(lhs)
    }

    // and := literal ('&' literal)*
    fn parse_and(&mut self) -> ParseResult<Formula> {
        let mut lhs = self.parse_literal()?;
        while self.peek_kind() == &TokenKind::And {
            self.advance();
            let rhs = self.parse_literal()?;
            lhs = Formula::and(lhs, rhs);
        }
        Ok(lhs)
    }

    // literal := '-'* (atom | term '=' term)
    fn parse_literal(&mut self) -> ParseResult<Formula> {
        let mut negations = 0usize;
        while self.peek_kind() == &TokenKind::Not {
            self.advance();
            negations += 1;
        }
        let mut formula = self.parse_atom_or_equality()?;
        for _ in 0..negations {
            formula = Formula::not(formula);
        }
        Ok(formula)
    }

    fn parse_atom_or_equality(&mut self) -> ParseResult<Formula> {
        match self.peek_kind().clone() {
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_formula()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) if name == "all" || name == "exists" => self.parse_quantified(),
            TokenKind::Ident(_) => {
                let term = self.parse_term()?;
                if self.peek_kind() == &TokenKind::Equals {
                    self.advance();
                    let rhs = self.parse_term()?;
                    Ok(Formula::Equals(term, rhs))
                } else {
                    Ok(term_to_predicate(term))
                }
            }
            other => Err(self.error(format!("expected a formula, found {:?}", other))),
        }
    }

    // quantified := ('all'|'exists') IDENT+ formula
    // Multi-variable quantifiers expand to nested quantifiers in
    // declaration order, left to right (see DESIGN.md open question d).
    fn parse_quantified(&mut self) -> ParseResult<Formula> {
        let keyword = self.expect_ident()?;
        let mut vars = Vec::new();
        loop {
            match self.peek_kind().clone() {
                TokenKind::Ident(name) if is_variable_name(&name) => {
                    vars.push(name);
                    self.advance();
                }
                _ => break,
            }
        }
        if vars.is_empty() {
            return Err(self.error("quantifier requires at least one bound variable"));
        }
        let body = self.parse_formula()?;
        let mut formula = body;
        for var in vars.into_iter().rev() {
            formula = if keyword == "all" {
                Formula::forall(var, formula)
            } else {
                Formula::exists(var, formula)
            };
        }
        Ok(formula)
    }

    // termList := term (',' term)*
    fn parse_term_list(&mut self) -> ParseResult<Vec<Term>> {
        let mut terms = vec![self.parse_term()?];
        while self.peek_kind() == &TokenKind::Comma {
            self.advance();
            terms.push(self.parse_term()?);
        }
        Ok(terms)
    }

    // term := IDENT ('(' termList ')')?
    fn parse_term(&mut self) -> ParseResult<Term> {
        let name = self.expect_ident()?;
        if self.peek_kind() == &TokenKind::LParen {
            self.advance();
            let args = if self.peek_kind() == &TokenKind::RParen {
                Vec::new()
            } else {
                self.parse_term_list()?
            };
            self.expect(&TokenKind::RParen)?;
            Ok(Term::function(name, args))
        } else if is_variable_name(&name) {
            Ok(Term::var(name))
        } else {
            Ok(Term::constant(name))
        }
    }
}

/// A bare term parsed at formula position becomes a predicate
/// application (0-ary if it was a plain constant/variable name).
fn term_to_predicate(term: Term) -> Formula {
    match term {
        Term::Function(name, args) => Formula::Predicate(name, args),
        Term::Constant(name) | Term::Variable(name) => Formula::Predicate(name, Vec::new()),
    }
}
