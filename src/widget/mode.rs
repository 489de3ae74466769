use serde::{Deserialize, Serialize};
use std::fmt;

/// The four input modalities, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free text or a claim
    #[default]
    Text,
    /// A single image file
    Image,
    /// An article URL
    Url,
    /// A single audio recording
    Audio,
}

impl Mode {
    /// All modes in tab order
    pub const ALL: [Mode; 4] = [Mode::Text, Mode::Image, Mode::Url, Mode::Audio];

    /// Cycle to the next mode in the sequence
    pub fn cycle(&self) -> Self {
        match self {
            Self::Text => Self::Image,
            Self::Image => Self::Url,
            Self::Url => Self::Audio,
            Self::Audio => Self::Text,
        }
    }

    /// Cycle to the previous mode in the sequence
    pub fn cycle_reverse(&self) -> Self {
        match self {
            Self::Text => Self::Audio,
            Self::Audio => Self::Url,
            Self::Url => Self::Image,
            Self::Image => Self::Text,
        }
    }

    /// Tab label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Url => "URL",
            Self::Audio => "Audio",
        }
    }

    /// Multipart field carrying this mode's content
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Url => "url",
            Self::Audio => "audio",
        }
    }

    /// Whether the mode takes a file rather than typed content
    pub fn is_file(&self) -> bool {
        matches!(self, Self::Image | Self::Audio)
    }

    /// Placeholder shown in an empty input box
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Text => "Paste the text or claim to verify...",
            Self::Image => "Path to an image (JPG, PNG up to 10MB), Ctrl+O to load",
            Self::Url => "Paste the article URL (e.g., https://example.com/article)...",
            Self::Audio => "Path to an audio file (MP3, WAV up to 10MB), Ctrl+O to load",
        }
    }

    /// Parse mode from string (for config files and flags)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "image" | "img" => Some(Self::Image),
            "url" | "link" => Some(Self::Url),
            "audio" | "voice" => Some(Self::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
