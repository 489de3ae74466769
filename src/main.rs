use anyhow::Result;
use clap::Parser;

use checkmate::{cli::Cli, runtime::Orchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging is installed by the orchestrator once it knows whether the
    // terminal UI will own the screen
    let orchestrator = Orchestrator::new(cli)?;
    let code = orchestrator.run().await?;

    // Exit with appropriate code
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
