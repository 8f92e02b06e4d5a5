use crate::{capability::Clipboard, engine::Engine};
use std::sync::Arc;

/// "Next clipboard text, if it changed since the last call."
///
/// Polling is one way to answer it; an OS change-event subscription would be
/// another, and the engine does not care which.
pub trait ClipSource: Send {
    fn next_change(&mut self) -> Option<String>;
}

/// Change detection by sampling the clipboard and comparing with the last
/// value seen.
pub struct PollingSource {
    clipboard: Arc<dyn Clipboard>,
    last: Option<String>,
}

impl PollingSource {
    /// Seeds the last value from the live clipboard, so whatever is on the
    /// clipboard at start is not reported as a new copy.
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        let last = match clipboard.read_text() {
            Ok(text) if !text.is_empty() => Some(text),
            Ok(_) => None,
            Err(err) => {
                log::debug!("[watcher] can't seed from clipboard: {err:?}");
                None
            }
        };
        Self { clipboard, last }
    }
}

impl ClipSource for PollingSource {
    fn next_change(&mut self) -> Option<String> {
        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(err) => {
                log::trace!("[watcher] skipping tick: {err:?}");
                return None;
            }
        };

        if text.is_empty() || self.last.as_deref() == Some(text.as_str()) {
            return None;
        }

        self.last = Some(text.clone());
        Some(text)
    }
}

/// Feeds clipboard changes into the history, one tick at a time.
pub(crate) struct Watcher {
    source: Box<dyn ClipSource>,
    engine: Engine,
}

impl Watcher {
    pub(crate) fn new(source: Box<dyn ClipSource>, engine: Engine) -> Self {
        Self { source, engine }
    }

    pub(crate) fn tick(&mut self) {
        if let Some(text) = self.source.next_change() {
            log::info!("[watcher] new clipboard text ({} bytes)", text.len());
            self.engine.record_copy(&text);
        }
    }
}
