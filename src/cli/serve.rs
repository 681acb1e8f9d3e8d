//! Serve command handler
//!
//! Runs the placement API in the foreground:
//!
//! - `POST /api/place` places trees in a viewport
//! - `GET /api/status` reports classifier settings and cache size

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Classify by reverse geocoding only (no tile pixel sampling)
    #[arg(long)]
    pub no_pixel_sampling: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_pixel_sampling {
            config.classifier.pixel_sampling = false;
        }
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    init_logging("info");

    let mut config = Config::load()?;
    args.apply(&mut config);

    info!(
        zoom = config.classifier.zoom,
        pixel_sampling = config.classifier.pixel_sampling,
        "tree-scatter v{} serving POST /api/place and GET /api/status on http://{}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    server::run(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ServeArgs,
    }

    #[test]
    fn test_overrides_applied() {
        let cli = TestCli::try_parse_from([
            "serve", "--host", "0.0.0.0", "-p", "9100", "--no-pixel-sampling",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.args.apply(&mut config);

        assert_eq!(config.server_addr(), "0.0.0.0:9100");
        assert!(!config.classifier.pixel_sampling);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = TestCli::try_parse_from(["serve"]).unwrap();

        let mut config = Config::default();
        config.server.port = 8123;
        cli.args.apply(&mut config);

        assert_eq!(config.server_addr(), "127.0.0.1:8123");
        assert!(config.classifier.pixel_sampling);
    }
}
