use crate::capability::{Clipboard, Desktop};
use anyhow::{Context as _, Result, anyhow, bail};
use std::{process::Command, sync::Mutex};

/// The OS clipboard through `arboard`.
///
/// One `arboard::Clipboard` is kept alive for the whole service so that text
/// written on X11 stays owned (and pasteable) after `write_text` returns.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("failed to open system clipboard")?;
        Ok(Self {
            inner: Mutex::new(inner),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("lock is poisoned"))?
            .get_text()
            .context("failed to read clipboard text")
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("lock is poisoned"))?
            .set_text(text)
            .context("failed to write clipboard text")
    }
}

/// Window focus and keystroke injection by shelling out to `xdotool`.
#[derive(Default)]
pub struct Xdotool;

impl Xdotool {
    fn run(args: &[&str]) -> Result<String> {
        let output = Command::new("xdotool")
            .args(args)
            .output()
            .context("failed to spawn xdotool")?;
        if !output.status.success() {
            bail!(
                "xdotool {args:?} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Desktop for Xdotool {
    fn focused_window_title(&self) -> Result<Option<String>> {
        let title = Self::run(&["getactivewindow", "getwindowname"])?;
        let title = title.trim_end_matches('\n');
        Ok((!title.is_empty()).then(|| title.to_string()))
    }

    fn activate_window(&self, title: &str) -> Result<()> {
        let pattern = format!("^{}$", escape_regex(title));
        Self::run(&[
            "search",
            "--limit",
            "1",
            "--name",
            pattern.as_str(),
            "windowactivate",
        ])
        .with_context(|| format!("failed to activate window {title:?}"))?;
        Ok(())
    }

    fn send_paste_keystroke(&self) -> Result<()> {
        Self::run(&["key", "--clearmodifiers", "ctrl+v"])?;
        Ok(())
    }
}

/// `xdotool search --name` takes a regex; titles are matched literally.
fn escape_regex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_regex_metacharacters() {
        assert_eq!(escape_regex("a.b (1) [x]"), r"a\.b \(1\) \[x\]");
        assert_eq!(escape_regex("plain title"), "plain title");
    }
}
