//! Pages
//!
//! The notebooks served by the application and the routing table that
//! mounts them.
//!
//! - `/` - Landing page with a sample scatter plot
//! - `/dashboard` - Daily metrics charts and summary statistics
//! - `/explorer` - Six-column sample table with preview and summary

pub mod dashboard;
pub mod explorer;
pub mod home;

use crate::registry::{PageRegistry, RegistryError};

/// Registry with every built-in page mounted
pub fn default_registry() -> Result<PageRegistry, RegistryError> {
    PageRegistry::new()
        .with_page("", home::notebook())?
        .with_page("/dashboard", dashboard::notebook())?
        .with_page("/explorer", explorer::notebook())
}
