mod token;

use std::ops::Range;

use thiserror::Error;
use tracing::{debug, trace};

pub use token::*;

/// Keywords, in the order they are tried.
pub const KEYWORDS: &[&str] = &[
    "print", "var", "while", "endwhile", "if", "endif", "else", "proc", "endproc", "setpixel",
];

/// Operators, in the order they are tried. Two character comparisons must come before their
/// one character prefixes.
pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "==", "<=", ">=", "<", ">", "&&"];

/// A matcher returns the length of the match at the start of its input, if any. No matcher
/// may return `Some(0)`.
type Matcher = fn(&str) -> Option<usize>;

/// Matchers in precedence order. The first one to match wins, even if a later one would match
/// more text. Whitespace has no token kind and is dropped.
const MATCHERS: &[(Option<TokenKind>, Matcher)] = &[
    (Some(TokenKind::Number), number),
    (Some(TokenKind::Keyword), keyword),
    (None, whitespace),
    (Some(TokenKind::Operator), operator),
    (Some(TokenKind::Identifier), identifier),
    (Some(TokenKind::Assignment), assignment),
    (Some(TokenKind::Paren), paren),
    (Some(TokenKind::Comma), comma),
];

/// An error produced when no matcher accepts the text at some position.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unexpected character `{found}`")]
pub struct TokenizeError {
    pub found: char,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl TokenizeError {
    /// The byte range of the offending character.
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.found.len_utf8()
    }
}

/// Scans source text into a sequence of [`Token`]s.
#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer from the given source string.
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            line: 0,
            line_start: 0,
        }
    }

    /// Lex the entire source string. Fails on the first position no matcher accepts.
    pub fn lex(mut self) -> Result<Vec<Token>, TokenizeError> {
        debug!("began lexing");
        let mut tokens = vec![];

        while self.pos < self.src.len() {
            let rest = &self.src[self.pos..];
            let Some((kind, len)) = MATCHERS
                .iter()
                .find_map(|(kind, matcher)| matcher(rest).map(|len| (*kind, len)))
            else {
                return Err(self.error(rest));
            };
            debug_assert!(len > 0, "matcher produced an empty match");

            if let Some(kind) = kind {
                let text = &rest[..len];
                trace!(%kind, text, offset = self.pos, "lexed token");
                tokens.push(Token::new(
                    kind,
                    text,
                    self.pos,
                    self.line,
                    self.pos - self.line_start,
                ));
            }
            self.advance(len);
        }

        debug!(count = tokens.len(), "finished lexing");
        Ok(tokens)
    }

    fn advance(&mut self, len: usize) {
        let matched = &self.src[self.pos..self.pos + len];
        for (i, _) in matched.match_indices('\n') {
            self.line += 1;
            self.line_start = self.pos + i + 1;
        }
        self.pos += len;
    }

    fn error(&self, rest: &str) -> TokenizeError {
        TokenizeError {
            found: rest.chars().next().unwrap_or_default(),
            offset: self.pos,
            line: self.line,
            column: self.pos - self.line_start,
        }
    }
}

/// Scan `src` into tokens.
pub fn tokenize(src: &str) -> Result<Vec<Token>, TokenizeError> {
    Lexer::new(src).lex()
}

fn non_empty(len: usize) -> Option<usize> {
    (len > 0).then_some(len)
}

fn first_prefix(s: &str, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find(|candidate| s.starts_with(**candidate))
        .map(|candidate| candidate.len())
}

fn number(s: &str) -> Option<usize> {
    non_empty(
        s.bytes()
            .take_while(|b| b.is_ascii_digit() || *b == b'.')
            .count(),
    )
}

fn keyword(s: &str) -> Option<usize> {
    first_prefix(s, KEYWORDS)
}

fn whitespace(s: &str) -> Option<usize> {
    non_empty(
        s.chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum(),
    )
}

fn operator(s: &str) -> Option<usize> {
    first_prefix(s, OPERATORS)
}

fn identifier(s: &str) -> Option<usize> {
    non_empty(s.bytes().take_while(u8::is_ascii_lowercase).count())
}

fn assignment(s: &str) -> Option<usize> {
    s.starts_with('=').then_some(1)
}

fn paren(s: &str) -> Option<usize> {
    s.starts_with(['(', ')']).then_some(1)
}

fn comma(s: &str) -> Option<usize> {
    s.starts_with(',').then_some(1)
}
