//! Notebook error types

use thiserror::Error;

use crate::chart::ChartError;
use crate::frame::FrameError;

/// Errors raised while validating or running a notebook
#[derive(Error, Debug)]
pub enum NotebookError {
    /// A cell reads a name that no earlier cell defines
    #[error("Cell '{cell}' references '{name}', which no earlier cell defines")]
    UnresolvedRef { cell: String, name: String },

    /// Two cells define the same name
    #[error("Cell '{cell}' redefines '{name}', already defined by cell '{previous}'")]
    Redefinition {
        cell: String,
        name: String,
        previous: String,
    },

    /// A running cell read a name it did not declare
    #[error("Cell '{cell}' read undeclared name '{name}'")]
    UndeclaredRef { cell: String, name: String },

    /// A running cell bound a name it did not declare
    #[error("Cell '{cell}' bound undeclared name '{name}'")]
    UndeclaredDef { cell: String, name: String },

    /// A cell finished without binding one of its declared names
    #[error("Cell '{cell}' did not define '{name}'")]
    MissingDef { cell: String, name: String },

    /// A binding holds a different kind of value than requested
    #[error("'{name}' is a {actual}, expected a {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Sample table operation failed
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// A cell failed while running
    #[error("Cell '{cell}' failed: {source}")]
    CellFailed {
        cell: String,
        #[source]
        source: Box<NotebookError>,
    },
}

/// Result type alias for notebook operations
pub type NotebookResult<T> = Result<T, NotebookError>;
