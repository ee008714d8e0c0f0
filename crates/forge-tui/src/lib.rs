//! Terminal front end for content-forge: the session controller and the
//! ratatui app that drives it.

pub mod action;
pub mod app;
pub mod clipboard;
pub mod components;
pub mod event;
pub mod session;
pub mod theme;

pub use app::App;
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use session::{CopyResult, Session, SessionState, Submission, COPY_CONFIRM_DURATION};
