//! Page markup
//!
//! HTML fragments produced by cells, Markdown rendering, number
//! formatting for summary statistics, and the document layout that wraps a
//! rendered page.

pub mod format;
pub mod layout;
pub mod markdown;

pub use format::{currency, percent, thousands};
pub use layout::{layout, AppWidth};
pub use markdown::md;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fragment of trusted HTML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Html(String);

impl Html {
    /// Wrap a string that is already valid, escaped HTML
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Escape plain text into HTML
    pub fn text(text: &str) -> Self {
        Self(escape(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, other: Html) {
        self.0.push_str(&other.0);
    }

    /// Builder method: append another fragment
    pub fn and(mut self, other: Html) -> Self {
        self.push(other);
        self
    }

    pub fn concat(parts: impl IntoIterator<Item = Html>) -> Self {
        parts.into_iter().fold(Html::default(), Html::and)
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape the five HTML-significant characters
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a simple HTML table with a header row
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> Html {
    let mut html = String::from("<table class=\"frame\"><thead><tr>");
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    Html(html)
}
