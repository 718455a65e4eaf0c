//! # chasm-lang
//!
//! A compiler from chasm, a tiny procedural scripting language, to binary
//! [WebAssembly](https://webassembly.github.io/spec/core/binary/) modules.
//!
//! Compilation happens in three stages: [tokenizing](tokenize), [parsing](parse) and
//! [emitting](emit). [`compile`] runs all of them in sequence:
//!
//! ```
//! let module = chasm_lang::compile("proc main() print 8 endproc").unwrap();
//! assert_eq!(&module[..4], b"\0asm");
//! ```
//!
//! Every value is an `f32`. The produced module imports `env.print: (f32) -> ()` and a memory
//! of at least one page as `env.memory`, and exports `run: () -> ()`, which calls the `main`
//! procedure. `setpixel (x, y, color)` writes `color` as a byte at `y * 100 + x` of that
//! memory.

pub mod emitter;
pub mod parser;
pub mod traverse;

use std::ops::Range;

use thiserror::Error;
use tracing::debug;

pub use crate::{
    emitter::{emit, EmitError},
    parser::{
        ast::Program,
        error::{ParseError, ParseErrorKind},
        lexer::{tokenize, Token, TokenKind, TokenizeError},
        parse,
    },
};

/// Any error that stops compilation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

impl Error {
    /// The byte range of the source text that caused the error, if the error points at any.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Error::Tokenize(err) => Some(err.span()),
            Error::Parse(err) => Some(err.span.clone()),
            Error::Emit(_) => None,
        }
    }
}

/// Compile chasm source text to a binary WebAssembly module.
pub fn compile(src: &str) -> Result<Vec<u8>, Error> {
    let tokens = tokenize(src)?;
    let program = parse(&tokens)?;
    let module = emit(&program)?;
    debug!(bytes = module.len(), "compiled module");
    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_from_each_stage() {
        let err = compile("proc main() print # endproc").unwrap_err();
        assert!(matches!(err, Error::Tokenize(_)));
        assert_eq!(Some(18..19), err.span());

        let err = compile("proc main() print endproc").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(Some(18..25), err.span());

        let err = compile("proc foo() endproc").unwrap_err();
        assert!(matches!(err, Error::Emit(EmitError::MissingMain)));
        assert_eq!(None, err.span());
    }

    #[test]
    fn error_messages() {
        let err = compile("proc main() var x = ( endproc").unwrap_err();
        insta::assert_snapshot!(err, @"expected an expression, received keyword");
    }
}
