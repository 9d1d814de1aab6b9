//! Serve command

use crate::app::ServeArgs;
use anyhow::Result;
use courtside_core::Config;

pub async fn run(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    eprintln!(
        "Serving /nba on http://{}:{} (Ctrl+C to stop)",
        config.server.host, config.server.port
    );
    courtside_server::start_server(&config).await
}
