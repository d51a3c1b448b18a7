//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

use crate::config::RenderConfig;
use crate::notebook::RenderedPage;
use crate::registry::PageRegistry;

use super::error::{ServerError, ServerResult};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Mounted pages
    pub registry: Arc<PageRegistry>,
    /// Render settings
    pub render: Arc<RenderConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(registry: PageRegistry, render: RenderConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            render: Arc::new(render),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Fresh RNG for one render: seeded when configured, else from entropy
    fn rng(&self) -> StdRng {
        match self.render.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Resolve `path` and run the page's cells
    pub fn render_page(&self, path: &str) -> ServerResult<RenderedPage> {
        let notebook = self
            .registry
            .resolve(path)
            .ok_or_else(|| ServerError::NotFound(format!("No page mounted at {}", path)))?;

        let mut page = notebook.render(&mut self.rng())?;
        if let Some(width) = self.render.width {
            page.width = width;
        }
        Ok(page)
    }
}
