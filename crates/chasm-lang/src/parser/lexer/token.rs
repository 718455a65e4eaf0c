use std::{fmt, ops::Range};

use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Keyword,
    Operator,
    Identifier,
    Assignment,
    Paren,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Identifier => "identifier",
            TokenKind::Assignment => "assignment",
            TokenKind::Paren => "parenthesis",
            TokenKind::Comma => "comma",
        };
        f.write_str(s)
    }
}

/// A single lexeme of source text, along with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: SmolStr,
    offset: usize,
    line: usize,
    column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<SmolStr>,
        offset: usize,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
            line,
            column,
        }
    }

    /// The [`TokenKind`] of the token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text the token was scanned from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The byte offset pointing to the start of the token.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Zero-based line of the token start.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Zero-based byte column of the token start, relative to its line.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// Returns true if the token has both the given kind and text.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.text)
    }
}
