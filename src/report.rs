//! Text and JSON reports
//!
//! - token report: one `KIND: lexeme (line L, column C)` line per token
//! - symbol table report: name, type, value, register, lines
//! - syntax tree and annotated tree: pretty JSON [`TreeNode`] documents
//! - diagnostics: one message per line
//!
//! Writers take any [`Write`] so callers can target files or memory.

use crate::config::Config;
use crate::parser::lexer::{Token, TokenKind};
use crate::pipeline::{Compilation, Diagnostic};
use crate::semantic::symbols::SymbolTable;
use crate::semantic::tree::TreeNode;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write every non-error token except the end marker
pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        if token.is_error() || token.kind == TokenKind::Eof {
            continue;
        }
        writeln!(
            out,
            "{}: {} (line {}, column {})",
            token.kind.category(),
            token.lexeme.escape_debug(),
            token.location.line,
            token.location.column
        )?;
    }
    Ok(())
}

pub fn write_symbols<W: Write>(out: &mut W, symbols: &SymbolTable) -> io::Result<()> {
    let name_width = symbols
        .iter()
        .map(|s| s.name.len())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(4);

    writeln!(
        out,
        "{:<name_width$}  {:<7}  {:<12}  {:<8}  lines",
        "name", "type", "value", "register"
    )?;

    for symbol in symbols.iter() {
        let value = symbol
            .value
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let lines = symbol
            .lines
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "{:<name_width$}  {:<7}  {:<12}  {:<8}  {}",
            symbol.name, symbol.ty, value, symbol.register, lines
        )?;
    }
    Ok(())
}

pub fn write_tree<W: Write>(out: &mut W, tree: &TreeNode) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, tree)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}

pub fn write_diagnostics<W: Write>(out: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out, "{}", diagnostic)?;
    }
    Ok(())
}

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> ReportError + '_ {
    move |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    File::create(path).map(BufWriter::new).map_err(io_at(path))
}

fn finish(mut out: BufWriter<File>, path: &Path) -> Result<(), ReportError> {
    out.flush().map_err(io_at(path))
}

/// Write the artifacts of `compilation` under `config`.
///
/// The token report is always written. After a syntax error the tree and
/// symbol files are truncated so no stale output from an earlier run is
/// left behind. Returns the paths written.
pub fn write_artifacts(
    config: &Config,
    compilation: &Compilation,
) -> Result<Vec<PathBuf>, ReportError> {
    if !config.write_artifacts {
        return Ok(Vec::new());
    }

    let mut written = Vec::new();

    let path = config.tokens_path();
    let mut out = create(&path)?;
    write_tokens(&mut out, &compilation.tokens).map_err(io_at(&path))?;
    finish(out, &path)?;
    written.push(path);

    let failed = compilation.syntax_error().is_some();

    if let Some(tree) = compilation.syntax_tree() {
        let path = config.tree_path();
        let mut out = create(&path)?;
        write_tree(&mut out, &tree)?;
        finish(out, &path)?;
        written.push(path);
    } else if failed {
        let path = config.tree_path();
        finish(create(&path)?, &path)?;
        written.push(path);
    }

    if let Some(analysis) = compilation.analysis.as_ref() {
        let path = config.annotated_path();
        let mut out = create(&path)?;
        write_tree(&mut out, &analysis.tree)?;
        finish(out, &path)?;
        written.push(path);

        let path = config.symbols_path();
        let mut out = create(&path)?;
        write_symbols(&mut out, &analysis.symbols).map_err(io_at(&path))?;
        finish(out, &path)?;
        written.push(path);
    } else if failed {
        for path in [config.annotated_path(), config.symbols_path()] {
            finish(create(&path)?, &path)?;
            written.push(path);
        }
    }

    for path in &written {
        info!("wrote {}", path.display());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::compile;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_token_report_skips_errors() {
        let compilation = compile("main { a = 3. ; }");
        let text = render(|out| write_tokens(out, &compilation.tokens));

        assert!(text.starts_with("RESERVED_WORD: main (line 1, column 1)"));
        assert!(text.contains("IDENTIFIER: a (line 1, column 8)"));
        assert!(!text.contains("3."));
        assert!(!text.contains("EOF"));
    }

    #[test]
    fn test_symbol_report() {
        let compilation = compile("main {\n int count;\n float f;\n count = 2;\n}");
        let analysis = compilation.analysis.unwrap();
        let text = render(|out| write_symbols(out, &analysis.symbols));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name "));
        assert!(lines[1].starts_with("count  int"));
        assert!(lines[1].ends_with("2, 4"));
        assert!(lines[2].contains(" - "));
    }

    #[test]
    fn test_tree_json() {
        let compilation = compile("main { int a; a = 1; }");
        let mut buf = Vec::new();
        write_tree(&mut buf, &compilation.analysis.unwrap().tree).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["label"], "main");
        assert_eq!(json["children"][1]["label"], "=");
        assert_eq!(json["children"][1]["type"], "int");
        assert_eq!(json["children"][1]["value"], 1);
    }

    #[test]
    fn test_diagnostics_listing() {
        let compilation = compile("main { x = 1; }");
        let text = render(|out| write_diagnostics(out, &compilation.diagnostics));
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("'x'"));
    }
}
