use anyhow::{Context, Result};
use colored::Colorize;

use crate::{
    app::{get_log_path, load_config, load_config_file, Config},
    cli::{handle_command, Cli},
    runtime::{NonInteractiveRunner, Submission},
    tui::{run_ui, App},
    utils::{init_file_logger, init_logger, log_info, log_warn},
    verifier::VerifierFactory,
    widget::RequestOrchestrator,
};

/// Main runtime orchestrator
pub struct Orchestrator {
    cli: Cli,
    config: Config,
}

impl Orchestrator {
    /// Create a new orchestrator from CLI args
    pub fn new(cli: Cli) -> Result<Self> {
        // An explicit --config must load; the layered lookup falls back to defaults
        let mut config = if let Some(config_path) = &cli.config {
            load_config_file(config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?
        } else {
            match load_config() {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("⚠️  Failed to load config: {}. Using defaults.", e);
                    Config::default()
                }
            }
        };

        apply_overrides(&mut config, &cli);

        Ok(Self { cli, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the orchestrator, returning the process exit code
    pub async fn run(self) -> Result<i32> {
        // Handle subcommands
        if let Some(command) = &self.cli.command {
            init_logger(self.cli.verbose);
            handle_command(command, &self.config).await?;
            return Ok(0);
        }

        if let Some(submission) = Submission::from_cli(&self.cli) {
            init_logger(self.cli.verbose);
            return self.run_once(submission).await;
        }

        self.run_interactive().await?;
        Ok(0)
    }

    async fn run_once(&self, submission: Submission) -> Result<i32> {
        let runner = NonInteractiveRunner::new(&self.config)?;
        let result = runner.execute(submission).await?;

        println!("{}", runner.format_result(&result, self.cli.output_format));

        Ok(if result.is_failure() { 1 } else { 0 })
    }

    async fn run_interactive(&self) -> Result<()> {
        // The alternate screen owns stderr, so logs go to a file
        let log_path = get_log_path()?;
        if let Err(e) = init_file_logger(self.cli.verbose, &log_path) {
            eprintln!("⚠️  Could not open log file {}: {}", log_path.display(), e);
        }

        let verifier = VerifierFactory::create(&self.config)?;
        let engine = verifier.name();

        if verifier.validate_connection().await? {
            log_info("🔌", format!("Engine ready: {}", engine));
        } else {
            log_warn("🔌", format!("Engine not reachable: {}", engine));
            eprintln!(
                "{} {} is not reachable; submissions will fail until it is up (or use --demo).",
                "⚠️ ".yellow(),
                engine
            );
        }

        println!("🔍 Starting Checkmate with engine: {}", engine.green());

        let app = App::new(engine, &self.config);
        run_ui(app, RequestOrchestrator::new(verifier)).await
    }
}

/// Fold command-line overrides into the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if cli.demo {
        config.verifier.backend = "demo".to_string();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.base_url = endpoint.clone();
    }
    if let Some(mode) = cli.mode {
        config.ui.default_mode = mode;
    }
}
