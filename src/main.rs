//! Data App server
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, else the default locations),
//! then environment variables, then command-line flags:
//! - `DATA_APP_HOST`: Host to bind to (default: 0.0.0.0)
//! - `DATA_APP_PORT`: Port to listen on (default: 7860)
//! - `DATA_APP_SEED`: Fixed random seed for sample data (default: unset)
//! - `DATA_APP_LOG_LEVEL`: Log level (default: info)
//! - `DATA_APP_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use data_app::config::{generate_default_config, Config, LoggingConfig};
use data_app::pages::default_registry;
use data_app::server::{serve, AppState};

#[derive(Parser)]
#[command(name = "data-app")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Multi-page data application server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fixed random seed for sample data
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render one page to stdout
    Render {
        /// Page path, e.g. / or /dashboard
        path: String,
    },

    /// List mounted pages
    Routes,

    /// Print a default config file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let bootstrap = bootstrap_subscriber(std::io::stderr);
    let mut config = tracing::subscriber::with_default(bootstrap, || load_config(&cli))?;

    init_tracing(&config.logging);

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Starting Data App v{}", env!("CARGO_PKG_VERSION"));
            if let Some(seed) = config.render.seed {
                tracing::info!("Sample data seeded with {}", seed);
            }

            let registry = default_registry().context("building page registry")?;
            for (path, title) in registry.routes() {
                tracing::info!(path = %path, title = %title, "Page mounted");
            }

            let state = AppState::new(registry, config.render.clone());
            serve(state, &config.server).await?;
        }

        Commands::Render { path } => {
            let registry = default_registry().context("building page registry")?;
            let state = AppState::new(registry, config.render.clone());
            let page = state
                .render_page(&path)
                .with_context(|| format!("rendering {}", path))?;
            println!("{}", page.to_html());
        }

        Commands::Routes => {
            let registry = default_registry().context("building page registry")?;
            for (path, title) in registry.routes() {
                println!("{:<12} {}", path, title);
            }
        }

        Commands::InitConfig => {
            print!("{}", generate_default_config());
        }
    }

    Ok(())
}

/// Config file, then environment, then `--seed`
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(seed) = cli.seed {
        config.render.seed = Some(seed);
    }
    Ok(config)
}

/// Subscriber active while the config loads, before its logging section is known
fn bootstrap_subscriber<W>(writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("data_app={},tower_http={}", logging.level, logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_config_applies_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9100\n").unwrap();

        let cli = Cli::parse_from([
            "data-app",
            "--config",
            file.path().to_str().unwrap(),
            "--seed",
            "7",
            "routes",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.render.seed, Some(7));
    }

    #[test]
    fn test_bootstrap_subscriber_records_config_warnings() {
        let captured = Captured::default();
        let writer = captured.clone();

        tracing::subscriber::with_default(bootstrap_subscriber(move || writer.clone()), || {
            tracing::warn!("Failed to load config from {:?}", "./config.toml");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Failed to load config"));
    }
}
