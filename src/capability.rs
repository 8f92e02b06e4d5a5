//! Narrow interfaces to the operating system and to the picker UI.
//!
//! Every call may fail; callers treat failures as transient.

use anyhow::Result;

pub trait Clipboard: Send + Sync {
    /// Current clipboard text. Non-text content is an error.
    fn read_text(&self) -> Result<String>;

    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait Desktop: Send + Sync {
    /// Title of the window that currently has keyboard focus, if any.
    fn focused_window_title(&self) -> Result<Option<String>>;

    fn activate_window(&self, title: &str) -> Result<()>;

    /// Synthesizes the platform paste shortcut (Ctrl+V / Cmd+V).
    fn send_paste_keystroke(&self) -> Result<()>;
}

/// The history picker window, owned by the presentation layer.
pub trait Picker: Send + Sync {
    fn hide(&self);
}
