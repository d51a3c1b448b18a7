//! Sample tables
//!
//! Small column-oriented tables used by page cells, plus the random
//! generators that fill them.

pub mod error;
pub mod sample;
pub mod types;

pub use error::{FrameError, FrameResult};
pub use types::{Column, ColumnSummary, Frame};
