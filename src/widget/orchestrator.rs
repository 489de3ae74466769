use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::cards::Card;
use super::mode::Mode;
use super::state::{Command, Event, Outcome, VerificationError, VerificationRequest, WidgetState};
use crate::verifier::{response_error, Verdict, Verifier, VerifierError};

/// Sends verification requests and turns every completion into a settlement
#[derive(Clone)]
pub struct RequestOrchestrator {
    verifier: Arc<dyn Verifier>,
}

impl RequestOrchestrator {
    pub fn new(verifier: Arc<dyn Verifier>) -> Self {
        Self { verifier }
    }

    /// Run one request to completion.
    ///
    /// Always yields a `Settled` event for the request's generation; engine
    /// failures are logged and replaced by the fixed user-facing message.
    pub async fn execute(&self, request: VerificationRequest) -> Event {
        let VerificationRequest { generation, payload } = request;
        debug!(generation, mode = %payload.mode(), "Verification started");

        let outcome = match self.verifier.verify(&payload).await {
            Ok(body) => match response_error(&body) {
                Some(message) => {
                    let err = VerifierError::Rejected(message.to_string());
                    error!(generation, "Verification error: {}", err);
                    Outcome::Error(VerificationError::fallback(err.to_string()))
                }
                None => Outcome::Verdict(Verdict::from_response(&body)),
            },
            Err(e) => {
                error!(generation, "Verification error: {:#}", e);
                Outcome::Error(VerificationError::fallback(format!("{:#}", e)))
            }
        };

        Event::Settled { generation, outcome }
    }

    /// Run a request in the background, delivering its settlement on `tx`
    pub fn spawn(&self, request: VerificationRequest, tx: mpsc::Sender<Event>) {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            let event = orchestrator.execute(request).await;
            // The receiver is gone once the UI has shut down
            if tx.send(event).await.is_err() {
                debug!("Settlement dropped, UI no longer listening");
            }
        });
    }
}

/// A widget instance bound to a verification engine
pub struct VerifierWidget {
    state: WidgetState,
    orchestrator: RequestOrchestrator,
}

impl VerifierWidget {
    pub fn new(verifier: Arc<dyn Verifier>, mode: Mode) -> Self {
        Self {
            state: WidgetState::new(mode),
            orchestrator: RequestOrchestrator::new(verifier),
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Apply an event without performing the resulting command
    pub fn dispatch(&mut self, event: Event) -> Option<Command> {
        let (state, command) = std::mem::take(&mut self.state).reduce(event);
        self.state = state;
        command
    }

    /// Press "verify" and wait for the request, if any, to settle
    pub async fn submit(&mut self) -> Vec<Card> {
        if let Some(Command::Verify(request)) = self.dispatch(Event::Submit) {
            let settlement = self.orchestrator.execute(request).await;
            self.dispatch(settlement);
        }
        self.state.cards()
    }
}
