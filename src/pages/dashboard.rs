//! Analytics dashboard page

use chrono::NaiveDate;

use crate::chart::Chart;
use crate::frame::{sample, Frame};
use crate::markup::{currency, md, percent, thousands, AppWidth, Html};
use crate::notebook::{CellSpec, Notebook};

/// Number of daily rows in the metrics table
pub const DAYS: usize = 30;

fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

pub fn notebook() -> Notebook {
    Notebook::new("Analytics Dashboard")
        .width(AppWidth::Medium)
        .cell(CellSpec::new("intro").run(|_| {
            Ok(Some(md(r#"
                # Analytics Dashboard

                This page contains various analytics and metrics for monitoring your data and application performance.
                "#)))
        }))
        .cell(
            CellSpec::new("metrics")
                .defs(["metrics_data", "users_chart", "revenue_chart"])
                .run(|ctx| {
                    let users = sample::randint(ctx.rng(), 100, 1000, DAYS)?;
                    let revenue = sample::uniform(ctx.rng(), 1000.0, 5000.0, DAYS)?;
                    let conversion = sample::uniform(ctx.rng(), 0.02, 0.08, DAYS)?;

                    let metrics_data = Frame::new()
                        .with_column("date", sample::date_range(first_day(), DAYS))?
                        .with_column("users", users)?
                        .with_column("revenue", revenue)?
                        .with_column("conversion_rate", conversion)?;

                    let users_chart = Chart::line("Daily Active Users", "date", "users");
                    let revenue_chart = Chart::bar("Daily Revenue", "date", "revenue");

                    let html = Html::concat([
                        md("## Key Metrics\n\n### User Analytics"),
                        users_chart.render(&metrics_data)?,
                        md("### Revenue Analytics"),
                        revenue_chart.render(&metrics_data)?,
                    ]);

                    ctx.bind("metrics_data", metrics_data)?;
                    ctx.bind("users_chart", users_chart)?;
                    ctx.bind("revenue_chart", revenue_chart)?;
                    Ok(Some(html))
                }),
        )
        .cell(
            CellSpec::new("summary")
                .refs(["metrics_data"])
                .defs(["total_users", "avg_revenue", "avg_conversion"])
                .run(|ctx| {
                    let metrics_data = ctx.frame("metrics_data")?;
                    let total_users = metrics_data.sum_i64("users")?;
                    let avg_revenue = metrics_data.mean("revenue")?;
                    let avg_conversion = metrics_data.mean("conversion_rate")?;

                    ctx.bind("total_users", total_users)?;
                    ctx.bind("avg_revenue", avg_revenue)?;
                    ctx.bind("avg_conversion", avg_conversion)?;

                    Ok(Some(md(&format!(
                        "## Summary Statistics\n\n\
                         - **Total Users**: {}\n\
                         - **Average Daily Revenue**: {}\n\
                         - **Average Conversion Rate**: {}",
                        thousands(total_users),
                        currency(avg_revenue),
                        percent(avg_conversion)
                    ))))
                }),
        )
        .cell(CellSpec::new("footer").run(|_| {
            Ok(Some(md(
                "Return to [Home](/) or explore other sections of the application.",
            )))
        }))
}
