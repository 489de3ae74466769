use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fact-check reference returned alongside a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Categorical outcome of a verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerdictLabel {
    Real,
    Fake,
    Uncertain,
}

impl VerdictLabel {
    /// Total mapping from the engine's label text.
    ///
    /// Anything that is not REAL or FAKE lands on `Uncertain`.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "REAL" => Self::Real,
            "FAKE" => Self::Fake,
            _ => Self::Uncertain,
        }
    }
}

/// Parsed verification result. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "final_verdict", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    #[serde(rename = "text_articles", default)]
    pub related_articles: Vec<Article>,
}

// Older backend builds answer with per-modality keys
const LABEL_KEYS: &[&str] = &["final_verdict", "text_verdict", "image_verdict"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "text_explanation"];
const TRANSCRIPTION_KEYS: &[&str] = &["transcribed_text"];
const ARTICLES_KEY: &str = "text_articles";

impl Verdict {
    /// Read a response body field by field.
    ///
    /// Missing keys, wrong types and empty strings all count as absent, so a
    /// partially valid body still yields whatever it does carry.
    pub fn from_response(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        let text_field = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| object.get(*key).and_then(Value::as_str))
                .find(|s| !s.trim().is_empty())
                .map(str::to_string)
        };

        let related_articles = object
            .get(ARTICLES_KEY)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(parse_article).collect())
            .unwrap_or_default();

        Self {
            label: text_field(LABEL_KEYS),
            explanation: text_field(EXPLANATION_KEYS),
            transcribed_text: text_field(TRANSCRIPTION_KEYS),
            related_articles,
        }
    }

    /// Classified label, if the engine sent one
    pub fn classified_label(&self) -> Option<VerdictLabel> {
        self.label.as_deref().map(VerdictLabel::classify)
    }
}

fn parse_article(entry: &Value) -> Option<Article> {
    let object = entry.as_object()?;
    let field = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(Article {
        title: field("title"),
        snippet: field("snippet"),
        link: field("link"),
    })
}

/// Error string carried by a body that reports failure in-band
pub fn response_error(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
}
