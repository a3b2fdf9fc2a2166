//! Terminal rendering of diagnostics
//!
//! ```text
//! demo.cj:1:3 syntax error: Expected expression, found '@'
//!   1 | 1 @ 2
//!     |   ^
//! ```

use super::Diagnostic;
use crossterm::style::{style, Stylize};
use std::fmt::Write;

/// Render a diagnostic as a header line followed by the offending source
/// line with the diagnostic's span highlighted.
///
/// With `color` set the span is drawn bold, underlined and red; otherwise a
/// caret line marks it.
pub fn render(diagnostic: &Diagnostic, source: &str, file_label: &str, color: bool) -> String {
    let mut out = String::new();
    let location = diagnostic.location;

    let header = format!("{}:{}:{}", file_label, location.line, location.column);
    if color {
        let _ = writeln!(
            out,
            "{} {}: {}",
            style(header).bold(),
            style(diagnostic.kind).red().bold(),
            diagnostic.message
        );
    } else {
        let _ = writeln!(out, "{} {}: {}", header, diagnostic.kind, diagnostic.message);
    }

    let Some(line) = source_line(source, location.line) else {
        return out;
    };

    let chars: Vec<char> = line.chars().collect();
    let start = location.column.saturating_sub(1).min(chars.len());
    let end = (start + diagnostic.width).min(chars.len());
    let before: String = chars[..start].iter().collect();
    let marked: String = chars[start..end].iter().collect();
    let after: String = chars[end..].iter().collect();

    let gutter = location.line.to_string();
    let pad = " ".repeat(gutter.len());
    if color {
        let _ = writeln!(
            out,
            "  {} | {}{}{}",
            style(&gutter).bold(),
            before,
            style(&marked).red().bold().underlined(),
            after
        );
    } else {
        let _ = writeln!(out, "  {} | {}{}{}", gutter, before, marked, after);
    }

    let indent = " ".repeat(start);
    let carets = "^".repeat(diagnostic.width.max(1));
    if color {
        let _ = writeln!(out, "  {} | {}{}", pad, indent, style(carets).red().bold());
    } else {
        let _ = writeln!(out, "  {} | {}{}", pad, indent, carets);
    }

    out
}

/// The 1-based `line` of `source`, without its line terminator.
fn source_line(source: &str, line: usize) -> Option<&str> {
    source.lines().nth(line.checked_sub(1)?)
}
