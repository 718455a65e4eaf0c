mod cli;

use std::{
    fs,
    io::{self, IsTerminal, Write},
    ops::Range,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use ariadne::{Config, Label, Report, ReportKind, Source};
use chasm_lang::{compile, parse, tokenize, Error};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Color, Emit};

fn main() -> Result<()> {
    // Logging setup
    let fmt_layer = fmt::layer().with_writer(io::stderr);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()
        .context("error reading logging directives")?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let args = Cli::parse();
    let src = fs::read_to_string(&args.input).context("error reading input file")?;
    let name = args.input.display().to_string();

    let out = match run_stage(&src, args.emit) {
        Ok(out) => out,
        Err(err) => {
            print_err(&err, &src, &name, args.color);
            bail!("could not compile `{name}`");
        }
    };

    let out_path = match (args.out, args.emit) {
        (Some(path), _) => path,
        (None, Emit::Wasm) => default_out_path(&args.input)?,
        // textual stages go to stdout unless asked otherwise
        (None, Emit::Tokens | Emit::Ast) => {
            io::stdout()
                .write_all(&out)
                .context("error writing to stdout")?;
            return Ok(());
        }
    };
    debug!(path = %out_path.display(), bytes = out.len(), "writing output");
    fs::write(&out_path, out)
        .with_context(|| format!("error writing output to {}", out_path.display()))?;

    Ok(())
}

/// Run the compiler up to the stage requested by `emit`, rendering its result as bytes.
fn run_stage(src: &str, emit: Emit) -> Result<Vec<u8>, Error> {
    let out = match emit {
        Emit::Wasm => compile(src)?,
        Emit::Tokens => tokenize(src)?
            .iter()
            .map(|tok| format!("{}:{} {tok}\n", tok.line() + 1, tok.column() + 1))
            .collect::<String>()
            .into_bytes(),
        Emit::Ast => {
            let program = parse(&tokenize(src)?)?;
            format!("{program:#?}\n").into_bytes()
        }
    };
    Ok(out)
}

/// `<stem>.wasm` in the current directory.
fn default_out_path(input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .context("input path should have a file name")?;
    Ok(format!("{}.wasm", stem.to_string_lossy()).into())
}

fn print_err(err: &Error, src: &str, name: &str, color: Color) {
    let Some(span) = err.span() else {
        eprintln!("error: {err}");
        return;
    };
    let color = match color {
        Color::Auto => io::stderr().is_terminal(),
        Color::Always => true,
        Color::Never => false,
    };
    let span = label_span(src, span);

    let report = Report::build(ReportKind::Error, name, span.start)
        .with_config(Config::default().with_color(color))
        .with_message(err.to_string())
        .with_label(
            Label::new((name, span))
                .with_message("error happened here")
                .with_color(ariadne::Color::Red),
        )
        .finish()
        .eprint((name, Source::from(src)));
    if report.is_err() {
        eprintln!("error: {err}");
    }
}

/// Convert a byte range into the character range reports are indexed by. Empty ranges are
/// widened to cover one character so they stay visible.
fn label_span(src: &str, span: Range<usize>) -> Range<usize> {
    let to_char = |byte: usize| src.get(..byte).map_or(byte, |s| s.chars().count());
    let (start, end) = (to_char(span.start), to_char(span.end));
    if start < end {
        return start..end;
    }
    let start = start.min(src.chars().count().saturating_sub(1));
    start..start + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_span_counts_chars() {
        let src = "é print $";
        // `$` starts at byte 9 but char 8
        assert_eq!(8..9, label_span(src, 9..10));
        assert_eq!(0..1, label_span(src, 0..2));
    }

    #[test]
    fn label_span_widens_empty_ranges() {
        let src = "proc main() print 1";
        assert_eq!(18..19, label_span(src, 19..19));
        assert_eq!(4..5, label_span(src, 4..4));
    }

    #[test]
    fn default_out_path_uses_stem() {
        assert_eq!(
            PathBuf::from("prog.wasm"),
            default_out_path(Path::new("some/dir/prog.chasm")).unwrap()
        );
        assert!(default_out_path(Path::new("..")).is_err());
    }
}
