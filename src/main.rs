use clap::Parser;
use crop_series::frontend::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    cli::run(args).await
}
