use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    app::Config,
    cli::{Cli, OutputFormat},
    verifier::{MediaKind, SelectedFile, Verdict, Verifier, VerifierFactory},
    widget::{Card, Event, Mode, Outcome, VerifierWidget},
};

/// Content named on the command line for a single run
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Text(String),
    Url(String),
    Image(PathBuf),
    Audio(PathBuf),
}

impl Submission {
    /// The content flag given on the command line, if any
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        if let Some(text) = &cli.text {
            Some(Self::Text(text.clone()))
        } else if let Some(url) = &cli.url {
            Some(Self::Url(url.clone()))
        } else if let Some(path) = &cli.image {
            Some(Self::Image(path.clone()))
        } else {
            cli.audio.clone().map(Self::Audio)
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Text(_) => Mode::Text,
            Self::Url(_) => Mode::Url,
            Self::Image(_) => Mode::Image,
            Self::Audio(_) => Mode::Audio,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Text(text) | Self::Url(text) => text.clone(),
            Self::Image(path) | Self::Audio(path) => path.display().to_string(),
        }
    }
}

/// Result of a non-interactive run
#[derive(Debug, Serialize)]
pub struct NonInteractiveResult {
    /// Mode the content was submitted under
    pub mode: Mode,
    /// The submitted text, URL or file path
    pub input: String,
    /// Parsed verdict, when the engine answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    /// Result cards in display order
    pub cards: Vec<Card>,
    /// Validation prompt, when the input was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Any errors that occurred
    pub errors: Vec<String>,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

impl NonInteractiveResult {
    /// Whether the process should exit with a failure status
    pub fn is_failure(&self) -> bool {
        self.prompt.is_some()
            || !self.errors.is_empty()
            || self.cards.iter().any(|card| matches!(card, Card::Error { .. }))
    }
}

#[derive(Debug, Serialize)]
pub struct ExecutionMetadata {
    /// Engine used
    pub engine: String,
    /// When the run finished
    pub verified_at: chrono::DateTime<chrono::Local>,
    /// Execution time in milliseconds
    pub duration_ms: u128,
}

/// Non-interactive runner for single submissions
pub struct NonInteractiveRunner {
    verifier: Arc<dyn Verifier>,
    max_upload_bytes: u64,
}

impl NonInteractiveRunner {
    /// Create a runner for the configured engine
    pub fn new(config: &Config) -> Result<Self> {
        let verifier = VerifierFactory::create(config)?;
        Ok(Self::with_verifier(verifier, config.input.max_upload_bytes))
    }

    pub fn with_verifier(verifier: Arc<dyn Verifier>, max_upload_bytes: u64) -> Self {
        Self {
            verifier,
            max_upload_bytes,
        }
    }

    /// Submit the content once and collect the rendered outcome
    pub async fn execute(&self, submission: Submission) -> Result<NonInteractiveResult> {
        let start_time = std::time::Instant::now();
        let mode = submission.mode();
        let input = submission.describe();
        let mut errors = Vec::new();

        let mut widget = VerifierWidget::new(Arc::clone(&self.verifier), mode);
        match submission {
            Submission::Text(text) => {
                widget.dispatch(Event::EditText(text));
            }
            Submission::Url(url) => {
                widget.dispatch(Event::EditUrl(url));
            }
            Submission::Image(path) => {
                match SelectedFile::load(&path, MediaKind::Image, self.max_upload_bytes) {
                    Ok(file) => {
                        widget.dispatch(Event::SelectImage(Some(file)));
                    }
                    Err(e) => errors.push(e.to_string()),
                }
            }
            Submission::Audio(path) => {
                match SelectedFile::load(&path, MediaKind::Audio, self.max_upload_bytes) {
                    Ok(file) => {
                        widget.dispatch(Event::SelectAudio(Some(file)));
                    }
                    Err(e) => errors.push(e.to_string()),
                }
            }
        }

        let cards = widget.submit().await;
        let state = widget.state();

        let verdict = match state.outcome() {
            Some(Outcome::Verdict(verdict)) => Some(verdict.clone()),
            Some(Outcome::Error(err)) => {
                if let Some(detail) = &err.detail {
                    errors.push(detail.clone());
                }
                None
            }
            None => None,
        };

        Ok(NonInteractiveResult {
            mode,
            input,
            verdict,
            cards,
            prompt: state.prompt().map(str::to_string),
            errors,
            metadata: ExecutionMetadata {
                engine: self.verifier.name(),
                verified_at: chrono::Local::now(),
                duration_ms: start_time.elapsed().as_millis(),
            },
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => {
                let mut output = String::new();

                if let Some(prompt) = &result.prompt {
                    output.push_str(prompt);
                    output.push('\n');
                }

                for card in &result.cards {
                    output.push_str(&format!("--- {} ---\n", card.title()));
                    for line in card.plain_lines() {
                        output.push_str(&line);
                        output.push('\n');
                    }
                    output.push('\n');
                }

                if !result.errors.is_empty() {
                    output.push_str("--- Errors ---\n");
                    for error in &result.errors {
                        output.push_str(&format!("• {}\n", error));
                    }
                }

                output.trim_end().to_string()
            }
            OutputFormat::Markdown => {
                let mut output = String::new();

                output.push_str(&format!("# {} Verification\n\n", result.mode));

                if let Some(prompt) = &result.prompt {
                    output.push_str(&format!("> {}\n\n", prompt));
                }

                for card in &result.cards {
                    output.push_str(&format!("## {}\n\n", card.title()));
                    match card {
                        Card::Evidence { articles } => {
                            output.push_str(&format!("{} found\n\n", articles.len()));
                            for article in articles {
                                output.push_str(&format!(
                                    "- [{}]({})",
                                    article.title, article.link
                                ));
                                if !article.snippet.is_empty() {
                                    output.push_str(&format!(": {}", article.snippet));
                                }
                                output.push('\n');
                            }
                        }
                        Card::Verdict(verdict) => {
                            output.push_str(&format!("**{} {}**\n", verdict.glyph, verdict.label));
                            if let Some(reasoning) = &verdict.reasoning {
                                output.push_str(&format!("\n**Reasoning:** {}\n", reasoning));
                            }
                        }
                        _ => {
                            for line in card.plain_lines() {
                                output.push_str(&line);
                                output.push('\n');
                            }
                        }
                    }
                    output.push('\n');
                }

                if !result.errors.is_empty() {
                    output.push_str("## Errors\n\n");
                    for error in &result.errors {
                        output.push_str(&format!("- {}\n", error));
                    }
                    output.push('\n');
                }

                output.push_str("---\n");
                output.push_str(&format!(
                    "*Engine: {} | Verified: {} | Duration: {}ms*\n",
                    result.metadata.engine,
                    result.metadata.verified_at.format("%Y-%m-%d %H:%M:%S"),
                    result.metadata.duration_ms
                ));

                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{DemoVerifier, MockVerifier, VerifierError};
    use clap::Parser;
    use serde_json::json;
    use std::time::Duration;

    fn demo_runner() -> NonInteractiveRunner {
        NonInteractiveRunner::with_verifier(Arc::new(DemoVerifier::new(Duration::ZERO)), 1024)
    }

    #[test]
    fn test_submission_from_cli() {
        let cli = Cli::try_parse_from(["checkmate", "--audio", "memo.wav"]).unwrap();
        assert_eq!(
            Submission::from_cli(&cli),
            Some(Submission::Audio(PathBuf::from("memo.wav")))
        );
        let cli = Cli::try_parse_from(["checkmate"]).unwrap();
        assert_eq!(Submission::from_cli(&cli), None);
    }

    #[tokio::test]
    async fn test_demo_text_run() {
        let runner = demo_runner();
        let result = runner
            .execute(Submission::Text("this claim is fake".into()))
            .await
            .unwrap();

        assert!(!result.is_failure());
        assert_eq!(result.verdict.as_ref().and_then(|v| v.label.as_deref()), Some("FAKE"));

        let text = runner.format_result(&result, OutputFormat::Text);
        assert!(text.starts_with("--- Final Content Verdict ---\n✕ FAKE"));
        assert!(text.contains("Reasoning: "));
    }

    #[tokio::test]
    async fn test_blank_input_fails() {
        let result = demo_runner()
            .execute(Submission::Url("   ".into()))
            .await
            .unwrap();
        assert!(result.is_failure());
        assert!(result.cards.is_empty());
        assert_eq!(result.prompt.as_deref(), Some("Please provide input for URL!"));
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_without_request() {
        let mut mock = MockVerifier::new();
        mock.expect_verify().never();
        mock.expect_name().return_const("mock".to_string());
        let runner = NonInteractiveRunner::with_verifier(Arc::new(mock), 1024);

        let result = runner
            .execute(Submission::Image(PathBuf::from("/no/such/image.png")))
            .await
            .unwrap();
        assert!(result.is_failure());
        assert_eq!(result.errors.len(), 1);
        assert!(result.prompt.is_some());
    }

    #[tokio::test]
    async fn test_engine_failure_is_reported() {
        let mut mock = MockVerifier::new();
        mock.expect_verify()
            .times(1)
            .returning(|_| Err(VerifierError::Status { status: 500, body: "boom".into() }.into()));
        mock.expect_name().return_const("mock".to_string());
        let runner = NonInteractiveRunner::with_verifier(Arc::new(mock), 1024);

        let result = runner.execute(Submission::Text("claim".into())).await.unwrap();
        assert!(result.is_failure());
        assert!(result.errors[0].contains("500"));

        let json: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(json["cards"][0]["card"], "error");
        assert_eq!(json["mode"], "text");
    }

    #[tokio::test]
    async fn test_markdown_lists_articles() {
        let mut mock = MockVerifier::new();
        mock.expect_verify().times(1).returning(|_| {
            Ok(json!({
                "final_verdict": "UNCERTAIN",
                "text_articles": [{"title": "A", "snippet": "B", "link": "https://a.example"}]
            }))
        });
        mock.expect_name().return_const("mock".to_string());
        let runner = NonInteractiveRunner::with_verifier(Arc::new(mock), 1024);

        let result = runner
            .execute(Submission::Url("https://example.com".into()))
            .await
            .unwrap();
        let markdown = runner.format_result(&result, OutputFormat::Markdown);
        assert!(markdown.starts_with("# URL Verification"));
        assert!(markdown.contains("## Related Fact-Checks & Articles\n\n1 found"));
        assert!(markdown.contains("- [A](https://a.example): B"));
        assert!(markdown.contains("*Engine: mock"));
    }
}
