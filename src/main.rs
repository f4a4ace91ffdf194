use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod anilist;
mod command;
mod delivery;
mod format;
mod store;
mod telegraph;
#[cfg(test)]
mod testing;

use command::Cli;

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "anilist_info=debug"
    } else {
        "anilist_info=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);

    cli.run().await
}
