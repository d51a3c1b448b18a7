//! # Data App
//!
//! A multi-page data application: each page is a notebook of cells that
//! generate random sample data, compute summary statistics and render
//! Markdown and charts to HTML, served over HTTP with Axum.
//!
//! ## Modules
//!
//! - [`frame`]: Column-oriented sample tables and random generators
//! - [`chart`]: Line, bar and scatter charts rendered to SVG
//! - [`markup`]: Markdown rendering, number formatting and page layout
//! - [`notebook`]: Cells with declared inputs/outputs, run in order
//! - [`registry`]: Path -> notebook routing table
//! - [`pages`]: The home, dashboard and explorer notebooks
//! - [`server`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use data_app::config::Config;
//! use data_app::pages::default_registry;
//! use data_app::server::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let state = AppState::new(default_registry()?, config.render.clone());
//!
//!     // Listens on 0.0.0.0:7860 until Ctrl+C
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod frame;
pub mod markup;
pub mod notebook;
pub mod pages;
pub mod registry;
pub mod server;

// Re-export top-level types for convenience
pub use chart::{Chart, ChartError, ChartKind};
pub use config::{Config, ConfigError, LoggingConfig, RenderConfig, ServerConfig};
pub use frame::{Column, Frame, FrameError};
pub use markup::{AppWidth, Html};
pub use notebook::{Bindings, CellSpec, Notebook, NotebookError, RenderedPage, Value};
pub use registry::{PageRegistry, RegistryError};
pub use server::{build_router, serve, AppState, ServerError};
