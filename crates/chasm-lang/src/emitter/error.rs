use std::io;

use thiserror::Error;

use crate::parser::ast::Ident;

/// A convenience type for `Result<T, EmitError>`
pub type Result<T> = std::result::Result<T, EmitError>;

/// An error encountered while lowering a program to a module.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("no `main` procedure was declared")]
    MissingMain,
    #[error("the `main` procedure was declared {0} times")]
    DuplicateMain(usize),
    #[error("the `main` procedure cannot take parameters, found {0}")]
    MainHasParameters(usize),
    #[error("procedure `{0}` was declared more than once")]
    DuplicateProcedure(Ident),
    #[error("call to undeclared procedure `{0}`")]
    UndeclaredProcedure(Ident),
    #[error("`setpixel` takes 3 arguments, received {0}")]
    SetpixelArity(usize),
    #[error("procedure `{name}` takes {expected} arguments, received {found}")]
    ArityMismatch {
        name: Ident,
        expected: usize,
        found: usize,
    },
    #[error("use of undeclared identifier `{name}` in procedure `{procedure}`")]
    UndeclaredIdentifier { name: Ident, procedure: Ident },
    #[error("failed to encode module")]
    Encode(#[from] io::Error),
}
