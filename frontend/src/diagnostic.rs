//! Source-annotated reports for parse failures, rendered with ariadne.

use crate::error::ParseError;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::io;
use std::ops::Range;

fn build(error: &ParseError, color: bool) -> Report<'static, Range<usize>> {
    let token = error.token();
    let span: Range<usize> = token.span.into();

    Report::build(ReportKind::Error, (), span.start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("unexpected {} on line {}", token.kind, token.line))
        .with_label(
            Label::new(span)
                .with_message(format!("expected {}", error.expected()))
                .with_color(Color::Red),
        )
        .finish()
}

/// Render `error` against `source` as plain text.
pub fn render(error: &ParseError, source: &str) -> io::Result<String> {
    let mut buf = Vec::new();
    build(error, false).write(Source::from(source), &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Print a coloured report for `error` to stderr.
pub fn eprint(error: &ParseError, source: &str) -> io::Result<()> {
    build(error, true).eprint(Source::from(source))
}
