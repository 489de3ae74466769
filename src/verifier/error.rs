use thiserror::Error;

/// Failures raised while talking to a verification engine
#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Verification endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode verification response: {0}")]
    Decode(String),

    #[error("Verification engine rejected the submission: {0}")]
    Rejected(String),
}
