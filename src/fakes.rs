use crate::capability::{Clipboard, Desktop, Picker};
use anyhow::{Result, bail};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// In-memory clipboard; `None` makes reads fail.
#[derive(Default)]
pub(crate) struct FakeClipboard {
    pub(crate) content: Mutex<Option<String>>,
    pub(crate) fail_writes: bool,
}

impl FakeClipboard {
    pub(crate) fn holding(text: &str) -> Self {
        Self {
            content: Mutex::new(Some(text.to_string())),
            fail_writes: false,
        }
    }

    pub(crate) fn set(&self, text: Option<&str>) {
        *self.content.lock().unwrap() = text.map(str::to_string);
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn read_text(&self) -> Result<String> {
        match self.get() {
            Some(text) => Ok(text),
            None => bail!("clipboard is locked"),
        }
    }

    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail_writes {
            bail!("clipboard is locked");
        }
        self.set(Some(text));
        Ok(())
    }
}

/// Records every desktop call in order.
#[derive(Default)]
pub(crate) struct FakeDesktop {
    pub(crate) focused: Option<String>,
    pub(crate) fail_query: bool,
    pub(crate) fail_activate: bool,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeDesktop {
    pub(crate) fn focused_on(title: &str) -> Self {
        Self {
            focused: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Desktop for FakeDesktop {
    fn focused_window_title(&self) -> Result<Option<String>> {
        if self.fail_query {
            bail!("no window manager");
        }
        Ok(self.focused.clone())
    }

    fn activate_window(&self, title: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("activate {title}"));
        if self.fail_activate {
            bail!("window is gone");
        }
        Ok(())
    }

    fn send_paste_keystroke(&self) -> Result<()> {
        self.calls.lock().unwrap().push("paste".to_string());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePicker {
    hidden: AtomicUsize,
}

impl FakePicker {
    pub(crate) fn hide_count(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }
}

impl Picker for FakePicker {
    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }
}
