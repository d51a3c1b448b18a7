//! Charts
//!
//! Line, bar and scatter charts drawn from a [`Frame`] into inline SVG.
//! Layout follows the dashboard canvas chart: fixed margins, a padded
//! y-range, six horizontal grid lines with value labels and six x-axis
//! labels.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::frame::{Column, Frame, FrameError};
use crate::markup::{escape, Html};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 44.0;
const MARGIN_BOTTOM: f64 = 40.0;

const GRID_LINES: usize = 5;
const X_LABELS: usize = 5;

/// Series color (blue)
const SERIES_COLOR: &str = "#2196F3";

/// Chart rendering errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Chart '{chart}': {source}")]
    Frame {
        chart: String,
        #[source]
        source: FrameError,
    },

    #[error("Chart '{chart}': column '{column}' is {dtype}, cannot be used as {axis} axis")]
    UnsupportedAxis {
        chart: String,
        column: String,
        dtype: &'static str,
        axis: &'static str,
    },
}

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

/// A chart definition: which columns to plot and how
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x: String,
    pub y: String,
}

/// How x positions map back to axis labels
#[derive(Clone, Copy)]
enum XAxis {
    Date,
    Number,
}

impl Chart {
    fn new(kind: ChartKind, title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn line(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, title, x, y)
    }

    pub fn bar(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, title, x, y)
    }

    pub fn scatter(title: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self::new(ChartKind::Scatter, title, x, y)
    }

    /// Render the chart against `frame`
    pub fn render(&self, frame: &Frame) -> ChartResult<Html> {
        let (xs, axis) = self.x_values(frame)?;
        let ys = self.y_values(frame)?;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<figure class=\"chart chart-{kind}\"><svg class=\"chart\" xmlns=\"http://www.w3.org/2000/svg\" \
             viewBox=\"0 0 {w} {h}\" role=\"img\" aria-label=\"{title}\">",
            kind = kind_name(self.kind),
            w = WIDTH,
            h = HEIGHT,
            title = escape(&self.title),
        ));
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
            WIDTH, HEIGHT
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"26\" font-size=\"16\" font-weight=\"600\" fill=\"#1f2937\">{}</text>",
            MARGIN_LEFT,
            escape(&self.title)
        ));

        if ys.is_empty() {
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"16\" fill=\"#6b7280\" text-anchor=\"middle\">No data</text>",
                WIDTH / 2.0,
                HEIGHT / 2.0
            ));
            svg.push_str("</svg></figure>");
            return Ok(Html::raw(svg));
        }

        let chart_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let chart_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

        let (y_min, y_max) = y_domain(&ys, self.kind == ChartKind::Bar);
        let (x_min, x_max) = x_domain(&xs);

        let scale_y = |v: f64| MARGIN_TOP + ((y_max - v) / (y_max - y_min)) * chart_height;
        let scale_x = |v: f64| MARGIN_LEFT + ((v - x_min) / (x_max - x_min)) * chart_width;

        // Grid and y-axis labels
        for i in 0..=GRID_LINES {
            let frac = i as f64 / GRID_LINES as f64;
            let y = MARGIN_TOP + frac * chart_height;
            let value = y_max - frac * (y_max - y_min);
            svg.push_str(&format!(
                "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#e5e7eb\" stroke-width=\"1\"/>",
                MARGIN_LEFT,
                y,
                WIDTH - MARGIN_RIGHT,
                y
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#6b7280\" text-anchor=\"end\">{}</text>",
                MARGIN_LEFT - 6.0,
                y + 4.0,
                format_tick(value)
            ));
        }

        let color = SERIES_COLOR;
        match self.kind {
            ChartKind::Line => {
                let mut d = String::new();
                for (i, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    d.push_str(&format!("{}{:.1},{:.1} ", cmd, scale_x(x), scale_y(y)));
                }
                svg.push_str(&format!(
                    "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
                    d.trim_end(),
                    color
                ));
                for (&x, &y) in xs.iter().zip(&ys) {
                    svg.push_str(&point(scale_x(x), scale_y(y), 3.0, color, 1.0));
                }
            }
            ChartKind::Scatter => {
                for (&x, &y) in xs.iter().zip(&ys) {
                    svg.push_str(&point(scale_x(x), scale_y(y), 4.0, color, 0.7));
                }
            }
            ChartKind::Bar => {
                // One equal-width slot per row, in row order
                let n = ys.len() as f64;
                let slot = chart_width / n;
                let baseline = scale_y(0.0_f64.clamp(y_min, y_max));
                for (i, &y) in ys.iter().enumerate() {
                    let x = MARGIN_LEFT + i as f64 * slot + slot * 0.1;
                    let top = scale_y(y);
                    let (rect_y, rect_h) = if top <= baseline {
                        (top, baseline - top)
                    } else {
                        (baseline, top - baseline)
                    };
                    svg.push_str(&format!(
                        "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>",
                        x,
                        rect_y,
                        slot * 0.8,
                        rect_h,
                        color
                    ));
                }
            }
        }

        // X-axis labels
        for i in 0..=X_LABELS {
            let frac = i as f64 / X_LABELS as f64;
            let px = MARGIN_LEFT + frac * chart_width;
            let value = match self.kind {
                ChartKind::Bar => {
                    let idx = ((frac * (xs.len() - 1) as f64).round() as usize).min(xs.len() - 1);
                    xs[idx]
                }
                _ => x_min + frac * (x_max - x_min),
            };
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#6b7280\" text-anchor=\"middle\">{}</text>",
                px,
                HEIGHT - 14.0,
                axis_label(axis, value)
            ));
        }

        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" fill=\"#374151\" text-anchor=\"middle\">{}</text>",
            MARGIN_LEFT + chart_width / 2.0,
            HEIGHT - 1.0,
            escape(&self.x)
        ));

        svg.push_str("</svg></figure>");
        Ok(Html::raw(svg))
    }

    fn frame_error(&self, source: FrameError) -> ChartError {
        ChartError::Frame {
            chart: self.title.clone(),
            source,
        }
    }

    fn x_values(&self, frame: &Frame) -> ChartResult<(Vec<f64>, XAxis)> {
        let column = frame.column(&self.x).map_err(|e| self.frame_error(e))?;
        match column {
            Column::Date(dates) => Ok((
                dates.iter().map(|d| d.num_days_from_ce() as f64).collect(),
                XAxis::Date,
            )),
            Column::Float(_) | Column::Int(_) => Ok((
                column.to_f64().unwrap_or_default(),
                XAxis::Number,
            )),
            Column::Category(_) => Err(ChartError::UnsupportedAxis {
                chart: self.title.clone(),
                column: self.x.clone(),
                dtype: column.dtype(),
                axis: "x",
            }),
        }
    }

    fn y_values(&self, frame: &Frame) -> ChartResult<Vec<f64>> {
        let column = frame.column(&self.y).map_err(|e| self.frame_error(e))?;
        column.to_f64().ok_or_else(|| ChartError::UnsupportedAxis {
            chart: self.title.clone(),
            column: self.y.clone(),
            dtype: column.dtype(),
            axis: "y",
        })
    }
}

fn kind_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Line => "line",
        ChartKind::Bar => "bar",
        ChartKind::Scatter => "scatter",
    }
}

/// Y range padded by 10%, or by 1.0 when all values are equal.
/// Bar charts always include zero.
fn y_domain(ys: &[f64], include_zero: bool) -> (f64, f64) {
    let mut min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
    let min = if include_zero && min == 0.0 { 0.0 } else { min - padding };
    (min, max + padding)
}

fn x_domain(xs: &[f64]) -> (f64, f64) {
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn point(x: f64, y: f64, r: f64, color: &str, opacity: f64) -> String {
    format!(
        "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
        x, y, r, color, opacity
    )
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

fn axis_label(axis: XAxis, value: f64) -> String {
    match axis {
        XAxis::Date => NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
            .map(|d| d.format("%m/%d").to_string())
            .unwrap_or_default(),
        XAxis::Number => format_tick(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::sample;

    fn daily_frame() -> Frame {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Frame::new()
            .with_column("date", sample::date_range(start, 3))
            .unwrap()
            .with_column("users", Column::Int(vec![100, 300, 200]))
            .unwrap()
            .with_column("label", Column::Category(vec!["a".into(), "b".into(), "c".into()]))
            .unwrap()
    }

    #[test]
    fn test_line_chart() {
        let html = Chart::line("Daily Active Users", "date", "users")
            .render(&daily_frame())
            .unwrap();
        let svg = html.as_str();

        assert!(svg.contains("aria-label=\"Daily Active Users\""));
        assert!(svg.contains("<path d=\"M"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(">01/01<"));
        assert!(svg.contains(">01/03<"));
    }

    #[test]
    fn test_bar_chart_draws_one_rect_per_row() {
        let html = Chart::bar("Daily Revenue", "date", "users")
            .render(&daily_frame())
            .unwrap();
        // One background rect plus one per bar
        assert_eq!(html.as_str().matches("<rect").count(), 4);
    }

    #[test]
    fn test_scatter_chart() {
        let frame = Frame::new()
            .with_column("x", Column::Float(vec![-1.0, 0.0, 1.5]))
            .unwrap()
            .with_column("y", Column::Float(vec![0.5, -0.5, 2.0]))
            .unwrap();
        let html = Chart::scatter("Sample", "x", "y").render(&frame).unwrap();
        assert_eq!(html.as_str().matches("<circle").count(), 3);
    }

    #[test]
    fn test_empty_frame_renders_placeholder() {
        let frame = Frame::new()
            .with_column("x", Column::Float(vec![]))
            .unwrap()
            .with_column("y", Column::Float(vec![]))
            .unwrap();
        let html = Chart::scatter("Empty", "x", "y").render(&frame).unwrap();
        assert!(html.as_str().contains("No data"));
    }

    #[test]
    fn test_missing_column() {
        let err = Chart::line("Broken", "date", "revenue")
            .render(&daily_frame())
            .unwrap_err();
        assert!(matches!(
            err,
            ChartError::Frame { source: FrameError::ColumnNotFound(_), .. }
        ));
    }

    #[test]
    fn test_category_axis_rejected() {
        let err = Chart::line("Bad", "label", "users")
            .render(&daily_frame())
            .unwrap_err();
        assert!(matches!(err, ChartError::UnsupportedAxis { axis: "x", .. }));

        let err = Chart::line("Bad", "date", "label")
            .render(&daily_frame())
            .unwrap_err();
        assert!(matches!(err, ChartError::UnsupportedAxis { axis: "y", .. }));
    }

    #[test]
    fn test_y_domain_padding() {
        assert_eq!(y_domain(&[5.0, 5.0], false), (4.0, 6.0));
        let (min, max) = y_domain(&[0.0, 10.0], false);
        assert!((min + 1.0).abs() < 1e-9 && (max - 11.0).abs() < 1e-9);
        let (min, max) = y_domain(&[100.0, 200.0], true);
        assert_eq!(min, 0.0);
        assert!((max - 220.0).abs() < 1e-9);
    }
}
