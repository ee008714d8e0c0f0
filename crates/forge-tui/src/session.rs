//! Form/session controller.
//!
//! Owns the [`SessionState`], the single in-flight generation and the timer
//! that clears the "Copied!" indicator. Work that finishes later (a
//! generation, a timer) reports back as an [`Action`] on the app's action
//! bus, which the main loop feeds to [`Session::handle_action`].
//!
//! The session is Idle or Busy. Busy lasts from a successful submit until
//! the matching `GenerationFinished` arrives; submits in between are ignored.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use forge_client::ContentGenerator;
use forge_core::{ContentType, GenerationOutcome, GenerationRequest, Length, Tone};

use crate::action::Action;
use crate::clipboard::ClipboardSink;

/// How long the "Copied!" indicator stays up after a copy.
pub const COPY_CONFIRM_DURATION: Duration = Duration::from_secs(2);

/// Everything the user can see or change in one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub content_type: ContentType,
    pub prompt: String,
    pub tone: Tone,
    pub length: Length,
    pub is_busy: bool,
    /// Only the most recent outcome is kept.
    pub last_outcome: Option<GenerationOutcome>,
    /// Set only while `last_outcome` is a success.
    pub clipboard_confirmed: bool,
}

/// What happened to a submit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A generation call was dispatched with this request id.
    Started(u64),
    /// A call is already in flight; nothing changed.
    IgnoredBusy,
    /// The prompt was empty; the validation failure is now the last outcome.
    Invalid,
}

/// What happened to a copy trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyResult {
    Copied,
    /// No successful outcome to copy.
    NothingToCopy,
    /// The clipboard rejected the write.
    Failed(String),
}

struct InFlight {
    id: u64,
    cancel: CancellationToken,
}

struct PendingRevert {
    id: u64,
    task: JoinHandle<()>,
}

pub struct Session {
    state: SessionState,
    generator: Arc<ContentGenerator>,
    clipboard: Box<dyn ClipboardSink>,
    tx: mpsc::UnboundedSender<Action>,
    in_flight: Option<InFlight>,
    revert: Option<PendingRevert>,
    next_request_id: u64,
    next_copy_id: u64,
}

impl Session {
    pub fn new(
        generator: Arc<ContentGenerator>,
        clipboard: Box<dyn ClipboardSink>,
        tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            generator,
            clipboard,
            tx,
            in_flight: None,
            revert: None,
            next_request_id: 0,
            next_copy_id: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy
    }

    // ── Field edits (accepted in any state) ─────────────────

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.state.content_type = content_type;
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.state.prompt = prompt;
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.state.tone = tone;
    }

    pub fn set_length(&mut self, length: Length) {
        self.state.length = length;
    }

    // ── Generation ──────────────────────────────────────────

    /// Validate the form and, if it is valid, start one generation call.
    pub fn submit(&mut self) -> Submission {
        if self.state.is_busy {
            debug!("Submit ignored: generation already in flight");
            return Submission::IgnoredBusy;
        }

        let request = match GenerationRequest::new(
            self.state.content_type,
            self.state.prompt.clone(),
            self.state.tone,
            self.state.length,
        ) {
            Ok(request) => request,
            Err(e) => {
                self.clear_confirmation();
                self.state.last_outcome = Some(GenerationOutcome::Failure(e.to_string()));
                return Submission::Invalid;
            }
        };

        self.clear_confirmation();
        self.state.last_outcome = None;
        self.state.is_busy = true;

        self.next_request_id += 1;
        let id = self.next_request_id;
        let cancel = CancellationToken::new();

        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        let token = cancel.clone();
        tokio::spawn(async move {
            if let Some(outcome) = generator.generate_cancellable(&request, &token).await {
                let _ = tx.send(Action::GenerationFinished {
                    request_id: id,
                    outcome,
                });
            }
        });

        info!(request_id = id, "Generation started");
        self.in_flight = Some(InFlight { id, cancel });
        Submission::Started(id)
    }

    /// Store the outcome of the in-flight call and return to Idle.
    /// Returns false if `request_id` is not the call in flight.
    pub fn finish(&mut self, request_id: u64, outcome: GenerationOutcome) -> bool {
        match self.in_flight {
            Some(ref in_flight) if in_flight.id == request_id => {}
            _ => {
                debug!(request_id, "Discarding outcome for a request that is not in flight");
                return false;
            }
        }

        info!(request_id, success = outcome.is_success(), "Generation finished");
        self.in_flight = None;
        self.state.last_outcome = Some(outcome);
        self.state.is_busy = false;
        true
    }

    // ── Clipboard ───────────────────────────────────────────

    /// Copy the last successful output and (re)start the confirmation timer.
    pub fn copy(&mut self) -> CopyResult {
        let Some(text) = self
            .state
            .last_outcome
            .as_ref()
            .and_then(GenerationOutcome::text)
            .map(str::to_owned)
        else {
            return CopyResult::NothingToCopy;
        };

        if let Err(e) = self.clipboard.set_text(&text) {
            warn!("Copy to clipboard failed: {}", e);
            return CopyResult::Failed(e.to_string());
        }

        self.state.clipboard_confirmed = true;
        self.schedule_revert();
        CopyResult::Copied
    }

    /// Clear the confirmation if `copy_id` belongs to the latest copy.
    pub fn revert_clipboard(&mut self, copy_id: u64) -> bool {
        match self.revert {
            Some(ref pending) if pending.id == copy_id => {
                self.revert = None;
                self.state.clipboard_confirmed = false;
                true
            }
            _ => false,
        }
    }

    /// Read text from the clipboard, for pasting into the prompt.
    pub fn read_clipboard(&mut self) -> anyhow::Result<String> {
        self.clipboard.get_text()
    }

    /// Replace any pending revert with a fresh one. The old timer is aborted;
    /// if it already fired, its action carries a stale id and is ignored.
    fn schedule_revert(&mut self) {
        if let Some(previous) = self.revert.take() {
            previous.task.abort();
        }

        self.next_copy_id += 1;
        let id = self.next_copy_id;
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(COPY_CONFIRM_DURATION).await;
            let _ = tx.send(Action::ClipboardReverted { copy_id: id });
        });
        self.revert = Some(PendingRevert { id, task });
    }

    fn clear_confirmation(&mut self) {
        if let Some(pending) = self.revert.take() {
            pending.task.abort();
        }
        self.state.clipboard_confirmed = false;
    }

    // ── Lifecycle ───────────────────────────────────────────

    /// Cancel the in-flight call and the revert timer.
    pub fn shutdown(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            info!(request_id = in_flight.id, "Cancelling in-flight generation");
            in_flight.cancel.cancel();
            self.state.is_busy = false;
        }
        if let Some(pending) = self.revert.take() {
            pending.task.abort();
        }
    }

    /// Apply a bus action. Returns a status-bar update when there is news.
    pub fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetContentType(content_type) => {
                self.set_content_type(*content_type);
                None
            }
            Action::SetPrompt(prompt) => {
                self.set_prompt(prompt.clone());
                None
            }
            Action::SetTone(tone) => {
                self.set_tone(*tone);
                None
            }
            Action::SetLength(length) => {
                self.set_length(*length);
                None
            }
            Action::SubmitForm => match self.submit() {
                Submission::Started(_) => Some(Action::SetStatus(format!(
                    "Generating with {}...",
                    self.generator.model()
                ))),
                Submission::IgnoredBusy => Some(Action::SetStatus(
                    "Still generating, please wait".to_string(),
                )),
                Submission::Invalid => Some(Action::SetStatus("Enter a prompt first".to_string())),
            },
            Action::CopyOutput => match self.copy() {
                CopyResult::Copied => Some(Action::SetStatus("Copied to clipboard".to_string())),
                CopyResult::NothingToCopy => None,
                CopyResult::Failed(e) => Some(Action::SetStatus(format!("Copy failed: {}", e))),
            },
            Action::GenerationFinished {
                request_id,
                outcome,
            } => {
                if !self.finish(*request_id, outcome.clone()) {
                    return None;
                }
                let status = if outcome.is_success() {
                    "Content generated"
                } else {
                    "Generation failed"
                };
                Some(Action::SetStatus(status.to_string()))
            }
            Action::ClipboardReverted { copy_id } => {
                self.revert_clipboard(*copy_id);
                None
            }
            _ => None,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
