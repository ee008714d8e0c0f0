//! Action enum, the central message bus for the TUI.
//! All user interactions and async results flow through here.

use forge_core::{ContentType, GenerationOutcome, Length, Tone};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations.
    Tick,
    /// Esc: leave the prompt editor or close an overlay.
    Escape,

    // ── Focus ───────────────────────────────────────────────
    /// Move focus to the next form field.
    FocusNext,
    /// Move focus to the previous form field.
    FocusPrev,
    /// Select the next option of the focused selector.
    CycleNext,
    /// Select the previous option of the focused selector.
    CyclePrev,

    // ── Session field edits ─────────────────────────────────
    SetContentType(ContentType),
    SetPrompt(String),
    SetTone(Tone),
    SetLength(Length),

    // ── Session triggers ────────────────────────────────────
    /// Generate content from the current form values.
    SubmitForm,
    /// Copy the generated content to the system clipboard.
    CopyOutput,

    // ── Async results ───────────────────────────────────────
    /// A generation call finished.
    GenerationFinished {
        request_id: u64,
        outcome: GenerationOutcome,
    },
    /// The "Copied!" indicator for a given copy has expired.
    ClipboardReverted { copy_id: u64 },

    // ── Text Input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Insert a newline in the prompt.
    NewlineInput,
    /// Paste text from the system clipboard (Ctrl+V in editing mode).
    PasteInput,
    /// Bulk paste from bracketed paste mode (terminal sends entire text at once).
    PasteBulk(String),

    // ── Scrolling ───────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}

impl Action {
    /// Actions that come from timers or async work rather than the keyboard.
    pub fn is_background(&self) -> bool {
        matches!(
            self,
            Action::Tick
                | Action::SetStatus(_)
                | Action::ClearStatus
                | Action::GenerationFinished { .. }
                | Action::ClipboardReverted { .. }
        )
    }
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the active component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are global shortcuts.
    Normal,
    /// Keys go to the prompt editor.
    Editing,
}

/// The focusable fields of the generation form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ContentType,
    Prompt,
    Tone,
    Length,
}

impl Field {
    /// Get all fields in tab order.
    pub fn all() -> &'static [Field] {
        &[Field::ContentType, Field::Prompt, Field::Tone, Field::Length]
    }

    /// Block title for the field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::ContentType => " Content Type ",
            Field::Prompt => " Your Prompt ",
            Field::Tone => " Tone of Voice ",
            Field::Length => " Content Length ",
        }
    }

    /// Get the next field, wrapping around.
    pub fn next(&self) -> Field {
        match self {
            Field::ContentType => Field::Prompt,
            Field::Prompt => Field::Tone,
            Field::Tone => Field::Length,
            Field::Length => Field::ContentType,
        }
    }

    /// Get the previous field, wrapping around.
    pub fn prev(&self) -> Field {
        match self {
            Field::ContentType => Field::Length,
            Field::Prompt => Field::ContentType,
            Field::Tone => Field::Prompt,
            Field::Length => Field::Tone,
        }
    }
}
