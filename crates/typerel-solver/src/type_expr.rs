//! Textual type expressions.
//!
//! Declarations and queries name types in the familiar generic syntax:
//!
//! | Text | Expression |
//! |------|------------|
//! | `int` | named, no arguments |
//! | `Dictionary<int, string>` | named with arguments |
//! | `IDictionary<,>` | open definition of arity 2 |
//! | `int?` | nullable wrapper around `int` |
//! | `System.Collections.IEnumerable` | qualified name |
//!
//! Expressions are resolved against a [`TypeStore`](crate::TypeStore).

use crate::error::StoreError;
use std::fmt;
use std::str::FromStr;
use typerel_common::limits::MAX_PARSER_RECURSION_DEPTH;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A type name with zero or more generic arguments.
    Named { name: String, args: Vec<TypeExpr> },
    /// An unbound generic definition, `List<>`.
    Open { name: String, arity: usize },
    /// `T?`
    Nullable(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            args,
        }
    }

    pub fn parse(input: &str) -> Result<Self, StoreError> {
        let mut parser = Parser {
            input,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }
}

impl FromStr for TypeExpr {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeExpr::parse(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeExpr::Open { name, arity } => {
                write!(f, "{name}<{}>", ",".repeat(arity.saturating_sub(1)))
            }
            TypeExpr::Nullable(inner) => write!(f, "{inner}?"),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Current generic-argument nesting.
    depth: u32,
}

impl<'a> Parser<'a> {
    fn parse_type(&mut self) -> Result<TypeExpr, StoreError> {
        if self.depth >= MAX_PARSER_RECURSION_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        self.depth += 1;
        let expr = self.parse_type_inner();
        self.depth -= 1;
        expr
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, StoreError> {
        self.skip_whitespace();
        let name = self.parse_name()?;
        self.skip_whitespace();

        let mut expr = if self.eat('<') {
            self.skip_whitespace();
            if matches!(self.peek(), Some(',') | Some('>')) {
                let mut arity = 1;
                loop {
                    self.skip_whitespace();
                    if self.eat(',') {
                        arity += 1;
                    } else if self.eat('>') {
                        break;
                    } else {
                        return Err(self.error("expected `,` or `>` in open generic type"));
                    }
                }
                TypeExpr::Open { name, arity }
            } else {
                let mut args = vec![self.parse_type()?];
                loop {
                    self.skip_whitespace();
                    if self.eat(',') {
                        args.push(self.parse_type()?);
                    } else if self.eat('>') {
                        break;
                    } else {
                        return Err(self.error("expected `,` or `>` after generic argument"));
                    }
                }
                TypeExpr::Named { name, args }
            }
        } else {
            TypeExpr::Named {
                name,
                args: Vec::new(),
            }
        };

        loop {
            self.skip_whitespace();
            if !self.eat('?') {
                break;
            }
            expr = TypeExpr::Nullable(Box::new(expr));
        }
        Ok(expr)
    }

    fn parse_name(&mut self) -> Result<String, StoreError> {
        let start = self.pos;
        let rest = &self.input[start..];
        let len = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let name = &rest[..len];
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("malformed qualified name"));
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("type names cannot start with a digit"));
        }
        self.pos += len;
        Ok(name.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, message: &str) -> StoreError {
        StoreError::Parse {
            input: self.input.to_string(),
            offset: self.pos,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/type_expr_tests.rs"]
mod tests;
