// Gateway module for the verifier widget - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod cards;
mod input;
mod mode;
mod orchestrator;
mod state;

// Public re-exports - the ONLY way to access widget functionality
pub use cards::{render_cards, Card, VerdictCard, VerdictStyle, ERROR_GLYPH};
pub use input::{format_size, ImageSelection, InputState, Preview, PreviewHandle};
pub use mode::Mode;
pub use orchestrator::{RequestOrchestrator, VerifierWidget};
pub use state::{
    Command, Event, Outcome, RequestLifecycle, VerificationError, VerificationRequest, WidgetState,
};
