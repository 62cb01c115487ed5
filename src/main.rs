use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = passkeep::cli::Cli::parse();
    cli.run()
}
