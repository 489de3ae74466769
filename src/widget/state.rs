use serde::Serialize;
use tracing::debug;

use super::cards::{render_cards, Card};
use super::input::{ImageSelection, InputState};
use super::mode::Mode;
use crate::constants::VERIFICATION_FAILED_MESSAGE;
use crate::verifier::{Payload, SelectedFile, Verdict};

/// Failure outcome of one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationError {
    /// User-facing message
    pub message: String,
    /// Diagnostic detail for operators; never shown on a card
    #[serde(skip)]
    pub detail: Option<String>,
}

impl VerificationError {
    /// The fixed user-facing failure, keeping the cause for the logs
    pub fn fallback(detail: impl Into<String>) -> Self {
        Self {
            message: VERIFICATION_FAILED_MESSAGE.to_string(),
            detail: Some(detail.into()),
        }
    }
}

/// Terminal result of one submission: a verdict or an error, never both
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(Verdict),
    Error(VerificationError),
}

/// Where the current submission stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestLifecycle {
    #[default]
    Idle,
    InFlight {
        generation: u64,
    },
    Settled(Outcome),
}

/// A request the widget wants sent to the verification engine
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationRequest {
    /// Submission number; the settlement must carry the same value
    pub generation: u64,
    pub payload: Payload,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Verify(VerificationRequest),
}

/// Everything that can happen to the widget
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A mode tab was chosen
    SetMode(Mode),
    /// Text buffer edited (text mode only)
    EditText(String),
    /// URL buffer edited (URL mode only)
    EditUrl(String),
    /// Image picked or cleared (image mode only)
    SelectImage(Option<SelectedFile>),
    /// Audio file picked or cleared (audio mode only)
    SelectAudio(Option<SelectedFile>),
    /// Verify button pressed
    Submit,
    /// A verification request finished
    Settled { generation: u64, outcome: Outcome },
    /// The validation prompt was acknowledged
    DismissPrompt,
}

/// Complete state of one verifier widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    input: InputState,
    lifecycle: RequestLifecycle,
    generation: u64,
    prompt: Option<String>,
}

impl WidgetState {
    /// Fresh state opened on the given mode
    pub fn new(mode: Mode) -> Self {
        Self {
            input: InputState::empty(mode),
            ..Self::default()
        }
    }

    /// Apply one event.
    ///
    /// Total over every event: anything that does not apply to the current
    /// state leaves it unchanged. A `Command` is returned only when a
    /// verification request must be sent.
    pub fn reduce(mut self, event: Event) -> (Self, Option<Command>) {
        match event {
            Event::SetMode(mode) => {
                // Bumping the generation orphans any request still running
                self.input = InputState::empty(mode);
                self.lifecycle = RequestLifecycle::Idle;
                self.prompt = None;
                self.generation += 1;
            }
            Event::EditText(text) => match &mut self.input {
                InputState::Text(buffer) => {
                    *buffer = text;
                    self.prompt = None;
                }
                other => debug!("Ignoring text edit in {} mode", other.mode()),
            },
            Event::EditUrl(url) => match &mut self.input {
                InputState::Url(buffer) => {
                    *buffer = url;
                    self.prompt = None;
                }
                other => debug!("Ignoring URL edit in {} mode", other.mode()),
            },
            Event::SelectImage(file) => match &mut self.input {
                InputState::Image(selection) => {
                    // Replacing the selection drops the previous preview
                    *selection = file.map(ImageSelection::new);
                    self.prompt = None;
                }
                other => debug!("Ignoring image selection in {} mode", other.mode()),
            },
            Event::SelectAudio(file) => match &mut self.input {
                InputState::Audio(selection) => {
                    *selection = file;
                    self.prompt = None;
                }
                other => debug!("Ignoring audio selection in {} mode", other.mode()),
            },
            Event::Submit => return self.submit(),
            Event::Settled { generation, outcome } => match self.lifecycle {
                RequestLifecycle::InFlight { generation: current } if current == generation => {
                    self.lifecycle = RequestLifecycle::Settled(outcome);
                }
                _ => debug!(
                    generation,
                    current = self.generation,
                    "Discarding stale verification result"
                ),
            },
            Event::DismissPrompt => self.prompt = None,
        }
        (self, None)
    }

    fn submit(mut self) -> (Self, Option<Command>) {
        if self.is_loading() {
            debug!("Submit ignored while a request is in flight");
            return (self, None);
        }

        let Some(payload) = self.input.to_payload() else {
            self.prompt = Some(format!("Please provide input for {}!", self.mode()));
            return (self, None);
        };

        // Clear the previous result before the loading indicator shows
        self.generation += 1;
        self.prompt = None;
        self.lifecycle = RequestLifecycle::InFlight {
            generation: self.generation,
        };
        let request = VerificationRequest {
            generation: self.generation,
            payload,
        };
        (self, Some(Command::Verify(request)))
    }

    pub fn mode(&self) -> Mode {
        self.input.mode()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, RequestLifecycle::InFlight { .. })
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.lifecycle {
            RequestLifecycle::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Pending validation prompt, if any
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Result cards for the current state
    pub fn cards(&self) -> Vec<Card> {
        render_cards(&self.lifecycle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::MediaKind;
    use pretty_assertions::assert_eq;

    fn apply(state: WidgetState, event: Event) -> WidgetState {
        state.reduce(event).0
    }

    fn verdict(label: &str) -> Outcome {
        Outcome::Verdict(Verdict {
            label: Some(label.to_string()),
            ..Verdict::default()
        })
    }

    fn image(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, vec![1u8, 2, 3], MediaKind::Image)
    }

    fn audio(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, vec![1u8, 2, 3], MediaKind::Audio)
    }

    /// Fill the active mode's buffer with valid content
    fn fill(state: WidgetState) -> WidgetState {
        let event = match state.mode() {
            Mode::Text => Event::EditText("claim".into()),
            Mode::Image => Event::SelectImage(Some(image("a.png"))),
            Mode::Url => Event::EditUrl("https://example.com".into()),
            Mode::Audio => Event::SelectAudio(Some(audio("a.wav"))),
        };
        apply(state, event)
    }

    fn settle(state: WidgetState, outcome: Outcome) -> WidgetState {
        let (state, command) = state.reduce(Event::Submit);
        let Some(Command::Verify(request)) = command else {
            panic!("expected a verification command");
        };
        apply(
            state,
            Event::Settled {
                generation: request.generation,
                outcome,
            },
        )
    }

    #[test]
    fn test_empty_submit_prompts_without_command() {
        for mode in Mode::ALL {
            let (state, command) = WidgetState::new(mode).reduce(Event::Submit);
            assert_eq!(command, None);
            assert_eq!(state.lifecycle(), &RequestLifecycle::Idle);
            assert_eq!(
                state.prompt(),
                Some(format!("Please provide input for {}!", mode.display_name()).as_str())
            );
        }
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let state = apply(WidgetState::new(Mode::Text), Event::EditText("   ".into()));
        let (state, command) = state.reduce(Event::Submit);
        assert_eq!(command, None);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_submit_emits_single_field_payload() {
        for mode in Mode::ALL {
            let (state, command) = fill(WidgetState::new(mode)).reduce(Event::Submit);
            let Some(Command::Verify(request)) = command else {
                panic!("expected a command for {}", mode);
            };
            assert_eq!(request.payload.mode(), mode);
            assert_eq!(request.payload.field_name(), mode.field_name());
            assert_eq!(
                state.lifecycle(),
                &RequestLifecycle::InFlight {
                    generation: request.generation
                }
            );
        }
    }

    #[test]
    fn test_mode_switch_clears_everything() {
        for from in Mode::ALL {
            for to in Mode::ALL {
                let state = settle(fill(WidgetState::new(from)), verdict("REAL"));
                assert!(state.outcome().is_some());

                let state = apply(state, Event::SetMode(to));
                assert_eq!(state.mode(), to);
                assert_eq!(state.input(), &InputState::empty(to));
                assert_eq!(state.lifecycle(), &RequestLifecycle::Idle);
                assert!(state.cards().is_empty());
            }
        }
    }

    #[test]
    fn test_edits_for_inactive_mode_are_ignored() {
        let state = WidgetState::new(Mode::Url);
        let state = apply(state, Event::EditText("sneaky".into()));
        let state = apply(state, Event::SelectImage(Some(image("x.png"))));
        let state = apply(state, Event::SelectAudio(Some(audio("x.wav"))));
        assert_eq!(state.input(), &InputState::Url(String::new()));
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let (state, first) = fill(WidgetState::new(Mode::Text)).reduce(Event::Submit);
        assert!(first.is_some());

        let (state, second) = state.reduce(Event::Submit);
        assert_eq!(second, None);
        assert!(state.is_loading());
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let state = settle(fill(WidgetState::new(Mode::Text)), verdict("FAKE"));
        assert!(!state.cards().is_empty());

        let (state, command) = state.reduce(Event::Submit);
        assert!(command.is_some());
        assert!(state.is_loading());
        assert!(state.outcome().is_none());
        assert!(state.cards().is_empty());
    }

    #[test]
    fn test_second_submission_replaces_first() {
        let state = settle(fill(WidgetState::new(Mode::Text)), verdict("FAKE"));
        let first_generation = state.generation();

        let state = settle(state, verdict("REAL"));
        assert!(state.generation() > first_generation);
        assert_eq!(state.outcome(), Some(&verdict("REAL")));
    }

    #[test]
    fn test_stale_result_after_mode_switch_is_discarded() {
        let (state, command) = fill(WidgetState::new(Mode::Text)).reduce(Event::Submit);
        let Some(Command::Verify(request)) = command else {
            panic!("expected a command");
        };

        let state = apply(state, Event::SetMode(Mode::Image));
        let state = apply(
            state,
            Event::Settled {
                generation: request.generation,
                outcome: verdict("FAKE"),
            },
        );
        assert_eq!(state.lifecycle(), &RequestLifecycle::Idle);
        assert_eq!(state.mode(), Mode::Image);
    }

    #[test]
    fn test_stale_result_after_resubmit_is_discarded() {
        // Switch back and forth so an old request is orphaned, then resubmit
        let (state, old) = fill(WidgetState::new(Mode::Text)).reduce(Event::Submit);
        let Some(Command::Verify(old)) = old else {
            panic!("expected a command");
        };
        let state = fill(apply(state, Event::SetMode(Mode::Text)));
        let (state, new) = state.reduce(Event::Submit);
        let Some(Command::Verify(new)) = new else {
            panic!("expected a command");
        };

        let state = apply(
            state,
            Event::Settled {
                generation: old.generation,
                outcome: verdict("FAKE"),
            },
        );
        assert!(state.is_loading());

        let state = apply(
            state,
            Event::Settled {
                generation: new.generation,
                outcome: verdict("REAL"),
            },
        );
        assert_eq!(state.outcome(), Some(&verdict("REAL")));
    }

    #[test]
    fn test_settled_when_idle_is_ignored() {
        let state = apply(
            WidgetState::new(Mode::Text),
            Event::Settled {
                generation: 0,
                outcome: verdict("REAL"),
            },
        );
        assert_eq!(state.lifecycle(), &RequestLifecycle::Idle);
    }

    #[test]
    fn test_error_outcome_keeps_detail_out_of_message() {
        let error = VerificationError::fallback("connection refused");
        let state = settle(fill(WidgetState::new(Mode::Url)), Outcome::Error(error));

        let Some(Outcome::Error(error)) = state.outcome() else {
            panic!("expected an error outcome");
        };
        assert_eq!(error.message, VERIFICATION_FAILED_MESSAGE);
        assert_eq!(error.detail.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_prompt_cleared_by_dismiss_and_edit() {
        let (state, _) = WidgetState::new(Mode::Text).reduce(Event::Submit);
        assert!(state.prompt().is_some());
        let state = apply(state, Event::DismissPrompt);
        assert_eq!(state.prompt(), None);

        let (state, _) = state.reduce(Event::Submit);
        let state = apply(state, Event::EditText("x".into()));
        assert_eq!(state.prompt(), None);
    }

    #[test]
    fn test_replacing_image_releases_preview() {
        let state = apply(WidgetState::new(Mode::Image), Event::SelectImage(Some(image("a.png"))));
        let first = state.input().preview().unwrap().downgrade();

        let state = apply(state, Event::SelectImage(Some(image("b.png"))));
        assert!(first.upgrade().is_none());
        assert!(state.input().preview().is_some());

        let second = state.input().preview().unwrap().downgrade();
        let state = apply(state, Event::SetMode(Mode::Audio));
        assert!(second.upgrade().is_none());
        assert_eq!(state.mode(), Mode::Audio);
    }
}
