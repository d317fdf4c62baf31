use anyhow::Result;
use clap::Parser;

use prepush_tidy::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run().await
}
