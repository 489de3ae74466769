use std::sync::{Arc, Weak};
use tracing::debug;

use super::mode::Mode;
use crate::verifier::{Payload, SelectedFile};

/// Display description of a selected image.
///
/// Dropped together with the last [`PreviewHandle`] pointing at it.
#[derive(Debug, PartialEq, Eq)]
pub struct Preview {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl Drop for Preview {
    fn drop(&mut self) {
        debug!("Released preview for {}", self.name);
    }
}

/// Owned handle to an image preview
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    inner: Arc<Preview>,
}

impl PreviewHandle {
    /// Derive a preview from a freshly selected file
    pub fn derive(file: &SelectedFile) -> Self {
        Self {
            inner: Arc::new(Preview {
                name: file.name.clone(),
                size: file.size(),
                mime: file.mime.clone(),
            }),
        }
    }

    pub fn preview(&self) -> &Preview {
        &self.inner
    }

    /// One-line caption, e.g. "cat.png · image/png · 12.0 KB"
    pub fn caption(&self) -> String {
        format!(
            "{} · {} · {}",
            self.inner.name,
            self.inner.mime,
            format_size(self.inner.size)
        )
    }

    /// Weak reference that stops upgrading once the preview is released
    pub fn downgrade(&self) -> Weak<Preview> {
        Arc::downgrade(&self.inner)
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// An image selection and the preview derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSelection {
    pub file: SelectedFile,
    pub preview: PreviewHandle,
}

impl ImageSelection {
    pub fn new(file: SelectedFile) -> Self {
        let preview = PreviewHandle::derive(&file);
        Self { file, preview }
    }
}

/// Input buffer of the active mode.
///
/// Only the active mode's buffer exists, so content typed in one mode can
/// never leak into another mode's submission.
#[derive(Debug, Clone, PartialEq)]
pub enum InputState {
    Text(String),
    Image(Option<ImageSelection>),
    Url(String),
    Audio(Option<SelectedFile>),
}

impl Default for InputState {
    fn default() -> Self {
        Self::empty(Mode::default())
    }
}

impl InputState {
    /// Fresh, empty buffer for a mode
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Text => Self::Text(String::new()),
            Mode::Image => Self::Image(None),
            Mode::Url => Self::Url(String::new()),
            Mode::Audio => Self::Audio(None),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Text(_) => Mode::Text,
            Self::Image(_) => Mode::Image,
            Self::Url(_) => Mode::Url,
            Self::Audio(_) => Mode::Audio,
        }
    }

    /// Presence validation: non-blank text, or a selected file
    pub fn has_input(&self) -> bool {
        match self {
            Self::Text(text) | Self::Url(text) => !text.trim().is_empty(),
            Self::Image(selection) => selection.is_some(),
            Self::Audio(file) => file.is_some(),
        }
    }

    /// Request body for the active mode, if it passes validation
    pub fn to_payload(&self) -> Option<Payload> {
        if !self.has_input() {
            return None;
        }
        match self {
            Self::Text(text) => Some(Payload::Text(text.clone())),
            Self::Url(url) => Some(Payload::Url(url.clone())),
            Self::Image(selection) => selection
                .as_ref()
                .map(|selection| Payload::Image(selection.file.clone())),
            Self::Audio(file) => file.clone().map(Payload::Audio),
        }
    }

    /// Typed buffer of the text and URL modes
    pub fn typed(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Url(text) => Some(text),
            _ => None,
        }
    }

    /// Selected file of the image and audio modes
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            Self::Image(selection) => selection.as_ref().map(|s| &s.file),
            Self::Audio(file) => file.as_ref(),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        match self {
            Self::Image(Some(selection)) => Some(&selection.preview),
            _ => None,
        }
    }
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}
