use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::widget::Mode;

#[derive(Parser, Debug)]
#[command(name = "checkmate")]
#[command(version = "0.1.0")]
#[command(
    about = "Verify text, images, URLs and audio against a fact-checking backend",
    long_about = None
)]
#[command(group(ArgGroup::new("content").args(["text", "url", "image", "audio"])))]
pub struct Cli {
    /// Mode the interactive widget opens on (text, image, url, audio)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Verify this text and exit
    #[arg(long)]
    pub text: Option<String>,

    /// Verify this article URL and exit
    #[arg(long)]
    pub url: Option<String>,

    /// Verify this image file and exit
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Verify this audio file and exit
    #[arg(long)]
    pub audio: Option<PathBuf>,

    /// Output format for non-interactive mode
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Use the offline demo engine instead of the HTTP backend
    #[arg(long)]
    pub demo: bool,

    /// Base URL of the verification service (e.g. http://127.0.0.1:5000)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    Mode::from_str(s).ok_or_else(|| format!("unknown mode '{}' (text, image, url, audio)", s))
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Show version information
    Version,
    /// Check the verification backend and configuration
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
    /// Markdown formatted output
    Markdown,
}
