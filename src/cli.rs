use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Compile a chasm program to a WebAssembly module.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// The chasm source file to compile.
    pub input: PathBuf,
    /// Where to write the output. Defaults to the input's file stem with a `.wasm` extension,
    /// in the current directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Which stage of the compiler to output.
    #[arg(long, value_enum, default_value_t = Emit::Wasm)]
    pub emit: Emit,
    /// When to color error reports.
    #[arg(long, value_enum, default_value_t = Color::Auto)]
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// The binary module.
    Wasm,
    /// One token per line.
    Tokens,
    /// The parsed syntax tree.
    Ast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Auto,
    Always,
    Never,
}
