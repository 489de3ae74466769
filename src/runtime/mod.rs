/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::{ExecutionMetadata, NonInteractiveResult, NonInteractiveRunner, Submission};
pub use orchestrator::Orchestrator;
