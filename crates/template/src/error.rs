//! Error types for template tokenizing and compiling.

use std::{
    cmp::{max, min},
    fmt::Write as _,
};

use thiserror::Error;

use crate::lexer::Pos;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while compiling a template. Every variant aborts the compile.
pub enum Error {
    #[error("{message}")]
    /// Malformed token stream: unknown key, missing `:`, missing or unterminated value.
    Lexer {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// Illegal state transition or an unparsable setting value.
    Parser {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// Malformed color literal.
    Color {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Tokenizer error at `pos`.
    pub(crate) fn lexer(pos: Pos, message: impl Into<String>) -> Self {
        Self::Lexer {
            line: pos.line,
            col: pos.col,
            message: message.into(),
        }
    }

    /// Compile error at `pos`.
    pub(crate) fn parser(pos: Pos, message: impl Into<String>) -> Self {
        Self::Parser {
            line: pos.line,
            col: pos.col,
            message: message.into(),
        }
    }

    /// Color literal error at `pos`.
    pub(crate) fn color(pos: Pos, message: impl Into<String>) -> Self {
        Self::Color {
            line: pos.line,
            col: pos.col,
            message: message.into(),
        }
    }

    /// 1-based line of the offending input.
    pub fn line(&self) -> usize {
        match self {
            Self::Lexer { line, .. } | Self::Parser { line, .. } | Self::Color { line, .. } => {
                *line
            }
        }
    }

    /// 1-based column of the offending input.
    pub fn col(&self) -> usize {
        match self {
            Self::Lexer { col, .. } | Self::Parser { col, .. } | Self::Color { col, .. } => *col,
        }
    }

    /// The bare message, without location.
    pub fn message(&self) -> &str {
        match self {
            Self::Lexer { message, .. }
            | Self::Parser { message, .. }
            | Self::Color { message, .. } => message,
        }
    }

    /// Short name of the error kind.
    fn kind(&self) -> &'static str {
        match self {
            Self::Lexer { .. } => "Template syntax",
            Self::Parser { .. } => "Template",
            Self::Color { .. } => "Color",
        }
    }

    /// Render a human-friendly error message with location and an excerpt of `source`.
    pub fn pretty(&self, source: &str) -> String {
        format!(
            "{} error at line {}, column {}\n{}\n{}",
            self.kind(),
            self.line(),
            self.col(),
            self.message(),
            excerpt_at(source, self.line(), self.col())
        )
    }
}

/// Error from a literal parser, before it is tied to a template position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct LiteralError(pub(crate) String);

/// Build a small excerpt of up to four lines with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
