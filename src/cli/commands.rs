use anyhow::Result;
use colored::Colorize;

use crate::{
    app::{get_config_dir, get_log_path, init_config, Config},
    verifier::VerifierFactory,
};

use super::Commands;

/// Handle CLI subcommands
pub async fn handle_command(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Init => {
            println!("Initializing Checkmate configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
        }
        Commands::Version => show_version(),
        Commands::Status => show_status(config).await?,
    }
    Ok(())
}

/// Show version information
pub fn show_version() {
    println!("Checkmate v{}", env!("CARGO_PKG_VERSION"));
    println!("   Multi-modal content verification from the terminal");
}

/// Show configuration and backend reachability
async fn show_status(config: &Config) -> Result<()> {
    println!("Checkmate Status:");
    println!();

    // Check configuration
    let config_path = get_config_dir()?.join("config.toml");
    if config_path.exists() {
        println!("  {} Configuration: {}", "[OK]".green(), config_path.display());
    } else {
        println!(
            "  {} Configuration: Not found (using defaults, run `checkmate init`)",
            "[WARNING]".yellow()
        );
    }

    // Check the verification engine
    let verifier = VerifierFactory::create(config)?;
    if verifier.validate_connection().await? {
        println!("  {} Engine: {}", "[OK]".green(), verifier.name());
    } else {
        println!("  {} Engine: {} is not reachable", "[ERROR]".red(), verifier.name());
    }

    println!();
    println!("  Settings:");
    println!("    • Theme: {}", config.ui.theme);
    println!("    • Default mode: {}", config.ui.default_mode);
    println!("    • Upload limit: {} bytes", config.input.max_upload_bytes);
    match config.endpoint.request_timeout_secs {
        Some(secs) => println!("    • Request timeout: {}s", secs),
        None => println!("    • Request timeout: none"),
    }
    if let Ok(log_path) = get_log_path() {
        println!("    • Interactive log: {}", log_path.display());
    }

    println!();
    Ok(())
}
