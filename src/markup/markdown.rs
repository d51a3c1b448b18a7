//! Markdown rendering
//!
//! Cells write their prose as indented raw strings, so the source is dedented
//! before it reaches pulldown-cmark. Raw HTML in the source is escaped and
//! shown as text.

use pulldown_cmark::{html, Event, Options, Parser};

use super::Html;

/// Render indented Markdown source to HTML
pub fn md(source: &str) -> Html {
    let text = dedent(source);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let events = Parser::new_ext(&text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::from("<div class=\"md\">");
    html::push_html(&mut out, events);
    out.push_str("</div>");
    Html::raw(out)
}

/// Leading ASCII spaces and tabs, in bytes
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Strip the common leading indentation of all non-blank lines
///
/// Only ASCII spaces and tabs count as indentation, so every cut lands on a
/// char boundary.
fn dedent(source: &str) -> String {
    let indent = source
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(indent_of)
        .min()
        .unwrap_or(0);

    source
        .lines()
        .map(|l| &l[indent_of(l).min(indent)..])
        .collect::<Vec<_>>()
        .join("\n")
}
