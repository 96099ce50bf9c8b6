//! Hand-written lexer. Two-character operators are matched greedily
//! before the single-character `-`, and `<->` before `->`.

use crate::token::{Token, TokenKind};
use fol_base::{ParseError, ParseResult, Span};

pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Tokenizes the full input, ending in a single `TokenKind::Eof`.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let start = self.pos;
            let Some(b) = self.peek_byte() else {
                tokens.push(Token::new(TokenKind::Eof, Span::new(start, start)));
                break;
            };
            let kind = match b {
                b'(' => {
                    self.pos += 1;
                    TokenKind::LParen
                }
                b')' => {
                    self.pos += 1;
                    TokenKind::RParen
                }
                b',' => {
                    self.pos += 1;
                    TokenKind::Comma
                }
                b'.' => {
                    self.pos += 1;
                    TokenKind::Dot
                }
                b'&' => {
                    self.pos += 1;
                    TokenKind::And
                }
                b'|' => {
                    self.pos += 1;
                    TokenKind::Or
                }
                b'=' => {
                    self.pos += 1;
                    TokenKind::Equals
                }
                b'-' if self.peek_at(1) == Some(b'>') => {
                    self.pos += 2;
                    TokenKind::Implies
                }
                b'-' => {
                    self.pos += 1;
                    TokenKind::Not
                }
                b'<' if self.peek_at(1) == Some(b'-') && self.peek_at(2) == Some(b'>') => {
                    self.pos += 3;
                    TokenKind::Iff
                }
                b if b.is_ascii_alphanumeric() || b == b'_' => {
                    while matches!(self.peek_byte(), Some(c) if c.is_ascii_alphanumeric() || c == b'_')
                    {
                        self.pos += 1;
                    }
                    TokenKind::Ident(self.input[start..self.pos].to_string())
                }
                other => {
                    return Err(ParseError::new(
                        format!("invalid character '{}'", other as char),
                        self.input,
                        Span::new(start, start + 1),
                    ));
                }
            };
            tokens.push(Token::new(kind, Span::new(start, self.pos)));
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_iff_before_implies_before_not() {
        assert_eq!(
            kinds("a<->b->c-d"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Iff,
                TokenKind::Ident("b".into()),
                TokenKind::Implies,
                TokenKind::Ident("c".into()),
                TokenKind::Not,
                TokenKind::Ident("d".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn invalid_character_fails_with_position() {
        let err = Lexer::new("P(x) ? Q").tokenize().unwrap_err();
        assert_eq!(err.pos(), 5);
    }
}
