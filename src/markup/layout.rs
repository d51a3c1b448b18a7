//! Page document layout

use serde::{Deserialize, Serialize};

use super::{escape, Html};

/// Maximum content width of a rendered page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppWidth {
    Compact,
    #[default]
    Medium,
    Full,
}

impl AppWidth {
    /// CSS max-width for the page body
    pub fn max_width(&self) -> &'static str {
        match self {
            AppWidth::Compact => "740px",
            AppWidth::Medium => "1110px",
            AppWidth::Full => "100%",
        }
    }
}

impl std::str::FromStr for AppWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(AppWidth::Compact),
            "medium" => Ok(AppWidth::Medium),
            "full" => Ok(AppWidth::Full),
            other => Err(format!("unknown width '{}'", other)),
        }
    }
}

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;background:#f9fafb;color:#1f2937;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;line-height:1.5}
main{margin:0 auto;padding:24px 16px}
.cell{background:#fff;border:1px solid #e5e7eb;border-radius:8px;padding:12px 20px;margin-bottom:16px}
.cell:empty{display:none}
h1,h2,h3{line-height:1.25;margin:12px 0 8px}
code{background:#f3f4f6;border-radius:4px;padding:1px 4px}
a{color:#2563eb}
svg.chart{width:100%;height:auto;display:block}
table.frame{border-collapse:collapse;font-size:13px;margin:8px 0}
table.frame th,table.frame td{border-bottom:1px solid #e5e7eb;padding:4px 10px;text-align:right}
table.frame th{background:#f3f4f6}
"#;

/// Wrap cell outputs into a complete HTML document
pub fn layout(title: &str, width: AppWidth, cells: &[Html]) -> Html {
    let mut body = String::new();
    for cell in cells {
        body.push_str(&format!("<section class=\"cell\">{}</section>\n", cell));
    }

    Html::raw(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <main style=\"max-width:{width}\">\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
        style = STYLE,
        width = width.max_width(),
        body = body,
    ))
}
