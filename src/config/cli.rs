//! Command-line interface schema.

use clap::Parser;

/// Forward every request to a single fixed upstream target.
#[derive(Debug, Parser)]
#[command(name = "proteus")]
#[command(about = "Single-target HTTP reverse proxy", long_about = None)]
pub struct Cli {
    /// Upstream target URL all requests are forwarded to.
    pub target: String,

    /// HTTP header to set on the request when proxying, as name=value.
    #[arg(short = 'H', long = "header")]
    pub header: Vec<String>,

    /// Address to listen on.
    #[arg(long, default_value = ":8080")]
    pub addr: String,
}
