use crate::capability::{Clipboard, Desktop, Picker};
use anyhow::{Context as _, Result};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// A paste keystroke was sent; `focus_restored` tells whether the
    /// previously focused window was re-activated first.
    Pasted { focus_restored: bool },
    /// Only the clipboard was updated (or not even that); the user has to
    /// paste manually.
    ClipboardOnly,
}

/// Puts a history entry back into the application the user came from.
pub struct PasteOrchestrator {
    clipboard: Arc<dyn Clipboard>,
    desktop: Arc<dyn Desktop>,
    picker: Arc<dyn Picker>,
    settle_delay: Duration,
    previous_focus: Mutex<Option<String>>,
}

impl PasteOrchestrator {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        desktop: Arc<dyn Desktop>,
        picker: Arc<dyn Picker>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            clipboard,
            desktop,
            picker,
            settle_delay,
            previous_focus: Mutex::new(None),
        }
    }

    /// Must be called right before the picker is shown, while the target
    /// application still has focus.
    pub fn capture_focus(&self) {
        let focus = match self.desktop.focused_window_title() {
            Ok(title) => title,
            Err(err) => {
                log::warn!("[paste] can't query focused window: {err:?}");
                None
            }
        };
        log::debug!("[paste] previous focus = {focus:?}");
        *self.previous_focus.lock().expect("lock is poisoned") = focus;
    }

    /// Never fails: the worst case is that `text` is on the clipboard and
    /// the user pastes by hand.
    pub async fn activate(&self, text: &str) -> PasteOutcome {
        let clipboard_ok = match self.clipboard.write_text(text) {
            Ok(()) => true,
            Err(err) => {
                log::error!("[paste] failed to write clipboard: {err:?}");
                false
            }
        };

        self.picker.hide();

        let previous_focus = self.previous_focus.lock().expect("lock is poisoned").take();

        if !clipboard_ok {
            return PasteOutcome::ClipboardOnly;
        }

        // let the window manager finish hiding the picker
        tokio::time::sleep(self.settle_delay).await;

        let focus_restored = match previous_focus {
            Some(title) => match self
                .on_desktop(move |desktop| desktop.activate_window(&title))
                .await
            {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("[paste] failed to restore focus, pasting anyway: {err:?}");
                    false
                }
            },
            None => false,
        };

        match self.on_desktop(|desktop| desktop.send_paste_keystroke()).await {
            Ok(()) => PasteOutcome::Pasted { focus_restored },
            Err(err) => {
                log::warn!("[paste] failed to send paste keystroke: {err:?}");
                PasteOutcome::ClipboardOnly
            }
        }
    }

    /// Desktop calls spawn processes and may wait on the window manager, so
    /// they run on the blocking pool, away from the thread driving the poll
    /// loop.
    async fn on_desktop<T: Send + 'static>(
        &self,
        call: impl FnOnce(&dyn Desktop) -> Result<T> + Send + 'static,
    ) -> Result<T> {
        let desktop = Arc::clone(&self.desktop);
        tokio::task::spawn_blocking(move || call(desktop.as_ref()))
            .await
            .context("desktop call panicked")?
    }
}
