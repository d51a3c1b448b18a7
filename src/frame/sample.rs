//! Random sample generators
//!
//! Generators take the caller's RNG so that a seeded page render is
//! reproducible end to end.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::error::{FrameError, FrameResult};
use super::types::Column;

/// `n` draws from the standard normal distribution (Box-Muller)
pub fn randn<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Column {
    let values = (0..n)
        .map(|_| {
            // 1 - u keeps the log argument in (0, 1]
            let u1: f64 = 1.0 - rng.gen::<f64>();
            let u2: f64 = rng.gen();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        })
        .collect();
    Column::Float(values)
}

/// `n` integers drawn uniformly from `[low, high)`
pub fn randint<R: Rng + ?Sized>(rng: &mut R, low: i64, high: i64, n: usize) -> FrameResult<Column> {
    if low >= high {
        return Err(FrameError::InvalidRange(format!("randint [{}, {})", low, high)));
    }
    Ok(Column::Int((0..n).map(|_| rng.gen_range(low..high)).collect()))
}

/// `n` floats drawn uniformly from `[low, high)`
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64, n: usize) -> FrameResult<Column> {
    if !(low < high) {
        return Err(FrameError::InvalidRange(format!("uniform [{}, {})", low, high)));
    }
    Ok(Column::Float((0..n).map(|_| rng.gen_range(low..high)).collect()))
}

/// `n` labels picked uniformly (with replacement) from `options`
pub fn choice<R: Rng + ?Sized>(rng: &mut R, options: &[&str], n: usize) -> FrameResult<Column> {
    if options.is_empty() {
        return Err(FrameError::InvalidRange("choice from no options".to_string()));
    }
    Ok(Column::Category(
        (0..n)
            .map(|_| options[rng.gen_range(0..options.len())].to_string())
            .collect(),
    ))
}

/// `periods` consecutive days starting at `start`
pub fn date_range(start: NaiveDate, periods: usize) -> Column {
    Column::Date(
        (0..periods)
            .map(|i| start + Duration::days(i as i64))
            .collect(),
    )
}
