use thiserror::Error;

/// Main error type for Checkmate
#[derive(Error, Debug)]
pub enum CheckmateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Input error: {0}")]
    InputError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckmateError::InputError("no file".into());
        assert_eq!(err.to_string(), "Input error: no file");
        let err: CheckmateError = std::io::Error::other("denied").into();
        assert_eq!(err.to_string(), "IO error: denied");
    }
}
