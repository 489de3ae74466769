use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::constants::{AUDIO_EXTENSIONS, IMAGE_EXTENSIONS};
use crate::utils::CheckmateError;
use crate::widget::Mode;

const OCTET_STREAM: &str = "application/octet-stream";

/// Kind of binary content a file slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
}

impl MediaKind {
    fn extensions(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Image => IMAGE_EXTENSIONS,
            Self::Audio => AUDIO_EXTENSIONS,
        }
    }

    /// Human readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
        }
    }

    /// Mime type for an extension this kind accepts
    pub fn mime_for(&self, extension: &str) -> Option<&'static str> {
        let extension = extension.to_ascii_lowercase();
        self.extensions()
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, mime)| *mime)
    }

    /// Identify which kind (if any) claims an extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        [Self::Image, Self::Audio]
            .into_iter()
            .find(|kind| kind.mime_for(extension).is_some())
    }
}

/// A file picked by the user for an image or audio submission
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub bytes: Bytes,
    pub mime: String,
}

impl SelectedFile {
    /// Read a file from disk for the given slot.
    ///
    /// Rejects missing files, files over `max_bytes`, and files whose
    /// extension belongs to the other media kind.
    pub fn load(path: &Path, kind: MediaKind, max_bytes: u64) -> Result<Self, CheckmateError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            CheckmateError::InputError(format!("Cannot open {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(CheckmateError::InputError(format!(
                "{} is not a file",
                path.display()
            )));
        }
        if metadata.len() > max_bytes {
            return Err(CheckmateError::InputError(format!(
                "{} is {} bytes, the limit is {} bytes",
                path.display(),
                metadata.len(),
                max_bytes
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let mime = match MediaKind::from_extension(extension) {
            Some(found) if found != kind => {
                return Err(CheckmateError::InputError(format!(
                    "{} looks like an {} file, expected {}",
                    path.display(),
                    found.label(),
                    kind.label()
                )));
            }
            Some(_) => kind.mime_for(extension).unwrap_or(OCTET_STREAM),
            None => OCTET_STREAM,
        };

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            bytes: Bytes::from(bytes),
            mime: mime.to_string(),
        })
    }

    /// Build a selection from in-memory content
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>, kind: MediaKind) -> Self {
        let name = name.into();
        let mime = Path::new(&name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| kind.mime_for(ext))
            .unwrap_or(OCTET_STREAM);
        Self {
            path: PathBuf::from(&name),
            name,
            bytes: bytes.into(),
            mime: mime.to_string(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// The single-field body of one verification request
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Image(SelectedFile),
    Url(String),
    Audio(SelectedFile),
}

impl Payload {
    /// Multipart field name the engine expects for this payload
    pub fn field_name(&self) -> &'static str {
        self.mode().field_name()
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Text(_) => Mode::Text,
            Self::Image(_) => Mode::Image,
            Self::Url(_) => Mode::Url,
            Self::Audio(_) => Mode::Audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_mime_lookup() {
        assert_eq!(MediaKind::Image.mime_for("PNG"), Some("image/png"));
        assert_eq!(MediaKind::Audio.mime_for("wav"), Some("audio/wav"));
        assert_eq!(MediaKind::Image.mime_for("mp3"), None);
        assert_eq!(MediaKind::from_extension("mp3"), Some(MediaKind::Audio));
        assert_eq!(MediaKind::from_extension("docx"), None);
    }

    #[test]
    fn test_load_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        fs::write(&path, b"jpegdata").unwrap();

        let file = SelectedFile::load(&path, MediaKind::Image, 1024).unwrap();
        assert_eq!(file.name, "photo.jpg");
        assert_eq!(file.mime, "image/jpeg");
        assert_eq!(file.size(), 8);
    }

    #[test]
    fn test_load_rejects_wrong_kind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voice.mp3");
        fs::write(&path, b"id3").unwrap();

        let err = SelectedFile::load(&path, MediaKind::Image, 1024).unwrap_err();
        assert!(err.to_string().contains("expected image"));
    }

    #[test]
    fn test_load_rejects_oversized_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.wav");
        fs::write(&path, vec![0u8; 64]).unwrap();

        assert!(SelectedFile::load(&path, MediaKind::Audio, 32).is_err());
        assert!(SelectedFile::load(&dir.path().join("nope.wav"), MediaKind::Audio, 32).is_err());
        assert!(SelectedFile::load(dir.path(), MediaKind::Audio, 32).is_err());
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("capture.raw");
        fs::write(&path, b"raw").unwrap();

        let file = SelectedFile::load(&path, MediaKind::Audio, 1024).unwrap();
        assert_eq!(file.mime, "application/octet-stream");
    }

    #[test]
    fn test_payload_field_names() {
        let image = SelectedFile::from_bytes("a.png", vec![1u8], MediaKind::Image);
        let audio = SelectedFile::from_bytes("a.wav", vec![1u8], MediaKind::Audio);
        assert_eq!(Payload::Text("x".into()).field_name(), "text");
        assert_eq!(Payload::Image(image).field_name(), "image");
        assert_eq!(Payload::Url("x".into()).field_name(), "url");
        assert_eq!(Payload::Audio(audio).field_name(), "audio");
    }
}
