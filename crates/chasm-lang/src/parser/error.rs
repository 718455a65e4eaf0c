use std::{borrow::Cow, ops::Range};

use smol_str::SmolStr;
use thiserror::Error;

use crate::parser::lexer::{Token, TokenKind};

/// A convenience type for `Result<T, ParseError>`
pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("unexpected token, expected {expected}, received `{found}`")]
    UnexpectedToken {
        expected: Cow<'static, str>,
        found: SmolStr,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: Cow<'static, str> },
    #[error("keyword `{0}` cannot start a statement")]
    UnknownKeyword(SmolStr),
    #[error("expected a statement, received {0}")]
    ExpectedStatement(TokenKind),
    #[error("expected an expression, received {0}")]
    ExpectedExpression(TokenKind),
    #[error("invalid number literal `{0}`")]
    InvalidNumber(SmolStr),
    #[error("nesting exceeds the limit of {0} levels")]
    NestingTooDeep(usize),
}

/// An error encountered while parsing, along with the token that caused it.
#[derive(Debug, Error, PartialEq)]
#[error("{kind}")]
pub struct ParseError {
    #[source]
    pub kind: ParseErrorKind,
    /// The offending token, or `None` if the input ended early.
    pub token: Option<Token>,
    pub span: Range<usize>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            span: token.range(),
            token: Some(token.clone()),
        }
    }

    pub fn eof(expected: impl Into<Cow<'static, str>>, offset: usize) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedEof {
                expected: expected.into(),
            },
            token: None,
            span: offset..offset,
        }
    }
}
