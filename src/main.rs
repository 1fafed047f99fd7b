use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proteus::config::cli::Cli;
use proteus::config::ProxyConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proteus=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version land on stdout and exit cleanly; real
            // argument errors exit 1.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    let config = match ProxyConfig::from_cli(cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid arguments");
            std::process::exit(1);
        }
    };

    if let Err(err) = proteus::lifecycle::run(config).await {
        tracing::error!(error = %err, "Proxy terminated");
        std::process::exit(1);
    }
}
