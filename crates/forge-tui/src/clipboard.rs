//! System clipboard access.

use tracing::warn;

/// Somewhere generated text can be copied to and pasted from.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
    fn get_text(&mut self) -> anyhow::Result<String>;
}

/// The OS clipboard via `arboard`.
///
/// The handle is opened on first use and kept. On headless Linux there may
/// be no clipboard at all; every call then returns an error and the caller
/// reports it in the status bar.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> anyhow::Result<&mut arboard::Clipboard> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| {
                warn!("Clipboard unavailable: {}", e);
                anyhow::anyhow!("clipboard unavailable: {e}")
            })?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("clipboard unavailable"))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.handle()?.set_text(text.to_owned())?;
        Ok(())
    }

    fn get_text(&mut self) -> anyhow::Result<String> {
        Ok(self.handle()?.get_text()?)
    }
}
