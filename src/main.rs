use anyhow::Result;
use docassist::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
