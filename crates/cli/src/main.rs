//! release-fanout - publish a release artifact to every regional bucket
//!
//! Uploads a file, publicly readable, to one S3 bucket per region under
//! `folder/version/file_name`, rendering SAM templates per region first.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use release_fanout::commands::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --debug opens up the library diagnostics
    let default_directive = if cli.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
