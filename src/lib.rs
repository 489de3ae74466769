pub mod app;
pub mod cli;
pub mod constants;
pub mod runtime;
pub mod tui;
pub mod utils;
pub mod verifier;
pub mod widget;

pub use app::{load_config, Config};
pub use tui::run_ui;
pub use utils::CheckmateError;
pub use verifier::{Verdict, VerdictLabel, Verifier, VerifierFactory};
pub use widget::{render_cards, Card, Event, Mode, VerifierWidget, WidgetState};
