// Gateway module for the verification engine - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod demo;
mod error;
mod factory;
mod http;
mod response;
mod traits;
mod types;

// Public re-exports - the ONLY way to access verifier functionality
pub use demo::DemoVerifier;
pub use error::VerifierError;
pub use factory::VerifierFactory;
pub use http::HttpVerifier;
pub use response::{response_error, Article, Verdict, VerdictLabel};
pub use traits::Verifier;
pub use types::{MediaKind, Payload, SelectedFile};

#[cfg(test)]
pub use traits::MockVerifier;
