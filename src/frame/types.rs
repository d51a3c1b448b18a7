//! Column-oriented sample tables
//!
//! A `Frame` is an ordered set of named, equally long columns. Frames live
//! for a single page render; aggregates always run over the full column.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::{FrameError, FrameResult};

/// A single typed column of values
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Date(Vec<NaiveDate>),
    Category(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Date(v) => v.len(),
            Column::Category(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Type name used in error messages
    pub fn dtype(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Int(_) => "int",
            Column::Date(_) => "date",
            Column::Category(_) => "category",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Float(_) | Column::Int(_))
    }

    /// Numeric values widened to f64, None for non-numeric columns
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Float(v) => Some(v.clone()),
            Column::Int(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    /// Display form of the value at `row`, as written to CSV and HTML tables
    pub fn cell(&self, row: usize) -> String {
        match self {
            Column::Float(v) => v[row].to_string(),
            Column::Int(v) => v[row].to_string(),
            Column::Date(v) => v[row].format("%Y-%m-%d").to_string(),
            Column::Category(v) => v[row].clone(),
        }
    }
}

/// Per-column summary produced by [`Frame::describe`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// In-memory table of named columns with equal row counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append a column
    ///
    /// The first column fixes the row count; every later column must match it.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> FrameResult<Self> {
        let name = name.into();

        if self.columns.iter().any(|(n, _)| *n == name) {
            return Err(FrameError::DuplicateColumn(name));
        }

        if let Some((_, first)) = self.columns.first() {
            if first.len() != column.len() {
                return Err(FrameError::LengthMismatch {
                    column: name,
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }

        self.columns.push((name, column));
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> FrameResult<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    fn numeric(&self, name: &str) -> FrameResult<Vec<f64>> {
        let column = self.column(name)?;
        column.to_f64().ok_or_else(|| FrameError::TypeMismatch {
            column: name.to_string(),
            expected: "numeric",
            actual: column.dtype(),
        })
    }

    /// Exact integer sum of an int column
    pub fn sum_i64(&self, name: &str) -> FrameResult<i64> {
        match self.column(name)? {
            Column::Int(v) => v
                .iter()
                .try_fold(0i64, |acc, &x| acc.checked_add(x))
                .ok_or_else(|| FrameError::Overflow {
                    column: name.to_string(),
                    stat: "sum",
                }),
            other => Err(FrameError::TypeMismatch {
                column: name.to_string(),
                expected: "int",
                actual: other.dtype(),
            }),
        }
    }

    pub fn sum(&self, name: &str) -> FrameResult<f64> {
        Ok(self.numeric(name)?.iter().sum())
    }

    pub fn mean(&self, name: &str) -> FrameResult<f64> {
        let values = self.numeric(name)?;
        if values.is_empty() {
            return Err(insufficient(name, "mean", 1));
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator)
    pub fn std(&self, name: &str) -> FrameResult<f64> {
        let values = self.numeric(name)?;
        if values.len() < 2 {
            return Err(insufficient(name, "std", 2));
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (values.len() - 1) as f64;
        Ok(variance.sqrt())
    }

    pub fn min(&self, name: &str) -> FrameResult<f64> {
        let values = self.numeric(name)?;
        if values.is_empty() {
            return Err(insufficient(name, "min", 1));
        }
        Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
    }

    pub fn max(&self, name: &str) -> FrameResult<f64> {
        let values = self.numeric(name)?;
        if values.is_empty() {
            return Err(insufficient(name, "max", 1));
        }
        Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Summary statistics for every numeric column, in column order
    pub fn describe(&self) -> FrameResult<Vec<ColumnSummary>> {
        self.columns
            .iter()
            .filter(|(_, c)| c.is_numeric())
            .map(|(name, _)| {
                Ok(ColumnSummary {
                    name: name.clone(),
                    count: self.n_rows(),
                    mean: self.mean(name)?,
                    std: self.std(name)?,
                    min: self.min(name)?,
                    max: self.max(name)?,
                })
            })
            .collect()
    }

    /// First `n` rows as display strings
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..self.n_rows().min(n))
            .map(|row| self.columns.iter().map(|(_, c)| c.cell(row)).collect())
            .collect()
    }

    /// Serialize as CSV with a header row
    pub fn to_csv(&self) -> FrameResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.column_names())?;

        for row in 0..self.n_rows() {
            writer.write_record(self.columns.iter().map(|(_, c)| c.cell(row)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FrameError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FrameError::Csv(e.to_string()))
    }
}

fn insufficient(name: &str, stat: &'static str, required: usize) -> FrameError {
    FrameError::InsufficientData {
        column: name.to_string(),
        stat,
        required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        Frame::new()
            .with_column("users", Column::Int(vec![100, 250, 400]))
            .unwrap()
            .with_column("revenue", Column::Float(vec![1000.0, 2000.0, 4500.0]))
            .unwrap()
            .with_column(
                "category",
                Column::Category(vec!["A".into(), "B".into(), "A".into()]),
            )
            .unwrap()
    }

    #[test]
    fn test_shape() {
        let frame = sample();
        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.n_cols(), 3);
        assert_eq!(frame.column_names(), vec!["users", "revenue", "category"]);
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::new();
        assert_eq!(frame.n_rows(), 0);
        assert_eq!(frame.n_cols(), 0);
        assert!(frame.head(5).is_empty());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = sample()
            .with_column("short", Column::Float(vec![1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            FrameError::LengthMismatch { expected: 3, actual: 1, .. }
        ));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = sample()
            .with_column("users", Column::Int(vec![1, 2, 3]))
            .unwrap_err();
        assert_eq!(err, FrameError::DuplicateColumn("users".to_string()));
    }

    #[test]
    fn test_aggregates_cover_all_rows() {
        let frame = sample();
        assert_eq!(frame.sum_i64("users").unwrap(), 750);
        assert_eq!(frame.sum("users").unwrap(), 750.0);
        assert!((frame.mean("revenue").unwrap() - 2500.0).abs() < 1e-9);
        assert_eq!(frame.min("revenue").unwrap(), 1000.0);
        assert_eq!(frame.max("revenue").unwrap(), 4500.0);
    }

    #[test]
    fn test_int_sum_overflow() {
        let frame = Frame::new()
            .with_column("n", Column::Int(vec![i64::MAX, 1]))
            .unwrap();
        assert_eq!(
            frame.sum_i64("n"),
            Err(FrameError::Overflow {
                column: "n".to_string(),
                stat: "sum",
            })
        );

        let frame = Frame::new()
            .with_column("n", Column::Int(vec![i64::MAX, -1, 1]))
            .unwrap();
        assert_eq!(frame.sum_i64("n").unwrap(), i64::MAX);
    }

    #[test]
    fn test_sample_std() {
        let frame = Frame::new()
            .with_column("v", Column::Float(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]))
            .unwrap();
        // Sample variance is 32 / 7
        assert!((frame.std("v").unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_type_mismatch() {
        let frame = sample();
        assert!(matches!(
            frame.mean("category"),
            Err(FrameError::TypeMismatch { expected: "numeric", actual: "category", .. })
        ));
        assert!(matches!(
            frame.sum_i64("revenue"),
            Err(FrameError::TypeMismatch { expected: "int", actual: "float", .. })
        ));
    }

    #[test]
    fn test_insufficient_data() {
        let frame = Frame::new()
            .with_column("v", Column::Float(vec![1.0]))
            .unwrap();
        assert!(frame.mean("v").is_ok());
        assert!(matches!(
            frame.std("v"),
            Err(FrameError::InsufficientData { required: 2, .. })
        ));
    }

    #[test]
    fn test_describe_skips_non_numeric() {
        let summary = sample().describe().unwrap();
        let names: Vec<_> = summary.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["users", "revenue"]);
        assert_eq!(summary[0].count, 3);
        assert_eq!(summary[0].max, 400.0);
    }

    #[test]
    fn test_to_csv() {
        let frame = Frame::new()
            .with_column(
                "date",
                Column::Date(vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]),
            )
            .unwrap()
            .with_column("users", Column::Int(vec![42]))
            .unwrap()
            .with_column("label", Column::Category(vec!["a,b".into()]))
            .unwrap();

        let csv = frame.to_csv().unwrap();
        assert_eq!(csv, "date,users,label\n2024-01-01,42,\"a,b\"\n");
    }
}
