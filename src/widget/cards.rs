use serde::Serialize;

use super::state::{Outcome, RequestLifecycle};
use crate::verifier::{Article, Verdict, VerdictLabel};

/// Glyph shown on the error card
pub const ERROR_GLYPH: char = '⚠';

/// Presentation style of the primary verdict card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStyle {
    Real,
    Fake,
    Uncertain,
}

impl VerdictStyle {
    /// Style for a raw label; unrecognised labels get the uncertain style
    pub fn for_label(raw: &str) -> Self {
        match VerdictLabel::classify(raw) {
            VerdictLabel::Real => Self::Real,
            VerdictLabel::Fake => Self::Fake,
            VerdictLabel::Uncertain => Self::Uncertain,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Fake => "fake",
            Self::Uncertain => "uncertain",
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Self::Real => '✓',
            Self::Fake => '✕',
            Self::Uncertain => '•',
        }
    }
}

/// The primary verdict card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictCard {
    /// Label exactly as the engine sent it
    pub label: String,
    pub style: VerdictStyle,
    pub glyph: char,
    pub reasoning: Option<String>,
}

/// One card of the verification report, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "card", rename_all = "snake_case")]
pub enum Card {
    Transcription { text: String },
    Verdict(VerdictCard),
    Evidence { articles: Vec<Article> },
    Error { message: String },
}

impl Card {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Transcription { .. } => "Transcribed Text",
            Self::Verdict(_) => "Final Content Verdict",
            Self::Evidence { .. } => "Related Fact-Checks & Articles",
            Self::Error { .. } => "Verification Error",
        }
    }

    /// Plain-text body of the card, one entry per line
    pub fn plain_lines(&self) -> Vec<String> {
        match self {
            Self::Transcription { text } => vec![format!("\"{}\"", text)],
            Self::Verdict(card) => {
                let mut lines = vec![format!("{} {}", card.glyph, card.label)];
                if let Some(reasoning) = &card.reasoning {
                    lines.push(format!("Reasoning: {}", reasoning));
                }
                lines
            }
            Self::Evidence { articles } => {
                let mut lines = vec![format!("{} found", articles.len())];
                for article in articles {
                    lines.push(format!("- {} <{}>", article.title, article.link));
                    if !article.snippet.is_empty() {
                        lines.push(format!("  {}", article.snippet));
                    }
                }
                lines
            }
            Self::Error { message } => vec![format!("{} {}", ERROR_GLYPH, message)],
        }
    }
}

/// Map the current lifecycle to the cards to show.
///
/// Only a settled submission renders anything. An error renders alone;
/// a verdict renders transcription, verdict and evidence cards in that
/// order, each omitted when its field is absent.
pub fn render_cards(lifecycle: &RequestLifecycle) -> Vec<Card> {
    match lifecycle {
        RequestLifecycle::Settled(Outcome::Verdict(verdict)) => verdict_cards(verdict),
        RequestLifecycle::Settled(Outcome::Error(error)) => vec![Card::Error {
            message: error.message.clone(),
        }],
        RequestLifecycle::Idle | RequestLifecycle::InFlight { .. } => Vec::new(),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn verdict_cards(verdict: &Verdict) -> Vec<Card> {
    let mut cards = Vec::new();

    if let Some(text) = present(&verdict.transcribed_text) {
        cards.push(Card::Transcription {
            text: text.to_string(),
        });
    }

    if let Some(label) = present(&verdict.label) {
        let style = VerdictStyle::for_label(label);
        cards.push(Card::Verdict(VerdictCard {
            label: label.to_string(),
            style,
            glyph: style.glyph(),
            reasoning: present(&verdict.explanation).map(str::to_string),
        }));
    }

    if !verdict.related_articles.is_empty() {
        cards.push(Card::Evidence {
            articles: verdict.related_articles.clone(),
        });
    }

    cards
}
