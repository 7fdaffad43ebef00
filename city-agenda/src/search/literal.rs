//! Parser for the command-line literal syntax.
//!
//! Queries and date specs are written as nested literals:
//!
//! ```text
//! 'cinema'                          a single term
//! ['cinema', 'gràcia']              a list
//! ('teatre', 'cinema')              a tuple
//! [01/03/2024, (15/03/2024, -1, 2)] bare words and integers
//! ```
//!
//! Strings may be single- or double-quoted. Anything unquoted up to the
//! next delimiter is a word; words that parse as `i64` are integers.

use std::fmt;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    Int(i64),
    List(Vec<Literal>),
    Tuple(Vec<Literal>),
}

impl Literal {
    /// Parse a complete literal. Trailing input is an error.
    pub fn parse(input: &str) -> Result<Self, LiteralError> {
        let mut parser = Parser { input, pos: 0 };
        let value = parser.value()?;
        parser.skip_whitespace();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(value)
    }

    /// Short name of the literal kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::List(_) => "list",
            Literal::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Literal]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Literal::Str(s) => write!(f, "'{s}'"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::List(items) => {
                f.write_str("[")?;
                join(f, items)?;
                f.write_str("]")
            }
            Literal::Tuple(items) => {
                f.write_str("(")?;
                join(f, items)?;
                f.write_str(")")
            }
        }
    }
}

/// Syntax error in a literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at position {position}")]
pub struct LiteralError {
    pub position: usize,
    pub reason: &'static str,
}

const DELIMITERS: &[char] = &[',', '[', ']', '(', ')', '\'', '"'];

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: &'static str) -> LiteralError {
        LiteralError {
            position: self.pos,
            reason,
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(self.error("expected a value")),
            Some('[') => {
                self.bump();
                self.sequence(']').map(Literal::List)
            }
            Some('(') => {
                self.bump();
                self.sequence(')').map(Literal::Tuple)
            }
            Some(q @ ('\'' | '"')) => {
                self.bump();
                self.quoted(q).map(Literal::Str)
            }
            Some(c) if DELIMITERS.contains(&c) => Err(self.error("unexpected delimiter")),
            Some(_) => Ok(self.word()),
        }
    }

    fn sequence(&mut self, close: char) -> Result<Vec<Literal>, LiteralError> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(_) => return Err(self.error("expected ',' or closing bracket")),
                None => return Err(self.error("unclosed bracket")),
            }
        }
    }

    fn quoted(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        match self.rest().find(quote) {
            Some(len) => {
                self.pos += len + quote.len_utf8();
                Ok(self.input[start..start + len].to_string())
            }
            None => Err(self.error("unterminated string")),
        }
    }

    fn word(&mut self) -> Literal {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !DELIMITERS.contains(&c))
        {
            self.bump();
        }
        let word = &self.input[start..self.pos];
        match word.parse::<i64>() {
            Ok(n) => Literal::Int(n),
            Err(_) => Literal::Str(word.to_string()),
        }
    }
}
