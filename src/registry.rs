//! Page Registry
//!
//! Flat lookup table from URL path to notebook. Built once at startup and
//! shared read-only by every request.

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::notebook::{Notebook, NotebookError};

/// Errors raised while registering pages
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid page path '{0}': must start with '/'")]
    InvalidPath(String),

    #[error("Page path '{0}' is already registered")]
    DuplicatePath(String),

    #[error("Page '{path}' is invalid: {source}")]
    InvalidNotebook {
        path: String,
        #[source]
        source: NotebookError,
    },
}

/// Path -> notebook routing table
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    pages: BTreeMap<String, Arc<Notebook>>,
}

/// Normalize a page path: `""` and `"/"` are the root, trailing slashes are dropped
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: mount `notebook` at `path`
    ///
    /// The notebook is validated before it is accepted.
    pub fn with_page(mut self, path: &str, notebook: Notebook) -> Result<Self, RegistryError> {
        let path = normalize_path(path);
        if !path.starts_with('/') {
            return Err(RegistryError::InvalidPath(path));
        }
        if self.pages.contains_key(&path) {
            return Err(RegistryError::DuplicatePath(path));
        }

        notebook
            .validate()
            .map_err(|source| RegistryError::InvalidNotebook {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %path,
            title = %notebook.title(),
            cells = notebook.cells().len(),
            "Registered page"
        );

        self.pages.insert(path, Arc::new(notebook));
        Ok(self)
    }

    /// Look up the notebook mounted at `path`
    pub fn resolve(&self, path: &str) -> Option<&Arc<Notebook>> {
        self.pages.get(&normalize_path(path))
    }

    /// Registered (path, title) pairs in path order
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().map(|(p, n)| (p.as_str(), n.title()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
