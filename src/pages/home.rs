//! Landing page

use crate::chart::Chart;
use crate::frame::{sample, Frame};
use crate::markup::{md, AppWidth, Html};
use crate::notebook::{CellSpec, Notebook};

/// Number of points in the sample scatter plot
pub const SAMPLE_POINTS: usize = 100;

const CATEGORIES: [&str; 3] = ["A", "B", "C"];

pub fn notebook() -> Notebook {
    Notebook::new("Data App")
        .width(AppWidth::Medium)
        .cell(CellSpec::new("intro").run(|_| {
            Ok(Some(md(r#"
                # Welcome to the Data App

                This is the main dashboard for our data application. Navigate between pages to explore different features:

                - **Dashboard**: View analytics and metrics [Dashboard](/dashboard)
                - **Data Explorer**: Explore and analyze datasets [Data Explorer](/explorer)
                "#)))
        }))
        .cell(
            CellSpec::new("sample")
                .defs(["data", "chart"])
                .run(|ctx| {
                    let x = sample::randn(ctx.rng(), SAMPLE_POINTS);
                    let y = sample::randn(ctx.rng(), SAMPLE_POINTS);
                    let category = sample::choice(ctx.rng(), &CATEGORIES, SAMPLE_POINTS)?;

                    let data = Frame::new()
                        .with_column("x", x)?
                        .with_column("y", y)?
                        .with_column("category", category)?;

                    let chart = Chart::scatter("Sample Data Visualization", "x", "y");
                    let html = Html::concat([md("## Sample Visualization"), chart.render(&data)?]);

                    ctx.bind("data", data)?;
                    ctx.bind("chart", chart)?;
                    Ok(Some(html))
                }),
        )
        .cell(CellSpec::new("footer").run(|_| {
            Ok(Some(md(
                "Navigate to other pages using the URL paths: `/dashboard` for analytics.",
            )))
        }))
}
