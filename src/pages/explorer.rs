//! Data explorer page

use crate::frame::{sample, Frame};
use crate::markup::{md, table, AppWidth, Html};
use crate::notebook::{CellSpec, Notebook};

/// Rows in the explorer sample
pub const ROWS: usize = 100;

/// Rows shown in the table preview
pub const PREVIEW_ROWS: usize = 10;

const COLUMNS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

pub fn notebook() -> Notebook {
    Notebook::new("Data Explorer")
        .width(AppWidth::Medium)
        .cell(CellSpec::new("intro").run(|_| {
            Ok(Some(md(r#"
                # Data Explorer

                Explore a randomly generated dataset of six normally distributed columns.
                "#)))
        }))
        .cell(CellSpec::new("sample").defs(["sample_data"]).run(|ctx| {
            let mut sample_data = Frame::new();
            for name in COLUMNS {
                sample_data = sample_data.with_column(name, sample::randn(ctx.rng(), ROWS))?;
            }

            let html = Html::concat([
                md(&format!(
                    "## Sample Data\n\n{} rows x {} columns. [Download CSV](/api/v1/export?page=/explorer&binding=sample_data)",
                    sample_data.n_rows(),
                    sample_data.n_cols()
                )),
                table(&sample_data.column_names(), &sample_data.head(PREVIEW_ROWS)),
            ]);

            ctx.bind("sample_data", sample_data)?;
            Ok(Some(html))
        }))
        .cell(CellSpec::new("summary").refs(["sample_data"]).run(|ctx| {
            let rows: Vec<Vec<String>> = ctx
                .frame("sample_data")?
                .describe()?
                .into_iter()
                .map(|s| {
                    vec![
                        s.name,
                        s.count.to_string(),
                        format!("{:.4}", s.mean),
                        format!("{:.4}", s.std),
                        format!("{:.4}", s.min),
                        format!("{:.4}", s.max),
                    ]
                })
                .collect();

            Ok(Some(Html::concat([
                md("## Summary"),
                table(&["column", "count", "mean", "std", "min", "max"], &rows),
            ])))
        }))
        .cell(CellSpec::new("footer").run(|_| Ok(Some(md("Return to [Home](/).")))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sample_table_shape() {
        let page = notebook().render(&mut StdRng::seed_from_u64(11)).unwrap();
        let data = page.bindings.frame("sample_data").unwrap();

        assert_eq!(data.n_rows(), ROWS);
        assert_eq!(data.n_cols(), 6);
        assert_eq!(data.column_names(), COLUMNS.to_vec());
    }

    #[test]
    fn test_preview_and_summary() {
        let page = notebook().render(&mut StdRng::seed_from_u64(12)).unwrap();

        let preview = page.outputs[1].as_str();
        assert!(preview.contains("100 rows x 6 columns"));
        // Header row plus preview rows
        assert_eq!(preview.matches("<tr>").count(), PREVIEW_ROWS + 1);
        assert!(preview.contains("href=\"/api/v1/export?page=/explorer&amp;binding=sample_data\""));

        let summary = page.outputs[2].as_str();
        assert_eq!(summary.matches("<tr>").count(), COLUMNS.len() + 1);
    }
}
