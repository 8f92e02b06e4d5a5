use anyhow::{Result, bail};
use clipkeep::{Clipboard, Config, Desktop, Handle, Picker, Snapshot, Store};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

#[derive(Default)]
struct MemoryClipboard(Mutex<String>);

impl MemoryClipboard {
    fn set(&self, text: &str) {
        *self.0.lock().unwrap() = text.to_string();
    }

    fn get(&self) -> String {
        self.0.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&self) -> Result<String> {
        Ok(self.get())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        self.set(text);
        Ok(())
    }
}

/// A desktop with no window manager to talk to.
struct Headless {
    pastes: AtomicUsize,
}

impl Desktop for Headless {
    fn focused_window_title(&self) -> Result<Option<String>> {
        bail!("no display")
    }

    fn activate_window(&self, _title: &str) -> Result<()> {
        bail!("no display")
    }

    fn send_paste_keystroke(&self) -> Result<()> {
        self.pastes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A window manager that takes its time to activate windows.
#[derive(Default)]
struct SlowDesktop {
    activating: AtomicBool,
}

impl Desktop for SlowDesktop {
    fn focused_window_title(&self) -> Result<Option<String>> {
        Ok(Some("editor".to_string()))
    }

    fn activate_window(&self, _title: &str) -> Result<()> {
        self.activating.store(true, Ordering::SeqCst);
        std::thread::sleep(Duration::from_secs(1));
        Ok(())
    }

    fn send_paste_keystroke(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct CountingPicker(AtomicUsize);

impl Picker for CountingPicker {
    fn hide(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn fast_config() -> Config {
    Config {
        max_items: 3,
        poll_interval_ms: 5,
        paste_delay_ms: 5,
    }
}

fn wait_until(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn texts(snapshot: &Snapshot) -> Vec<&str> {
    snapshot.iter().map(|e| e.text.as_str()).collect()
}

struct Service {
    _dir: tempfile::TempDir,
    clipboard: Arc<MemoryClipboard>,
    desktop: Arc<Headless>,
    picker: Arc<CountingPicker>,
    handle: Handle,
}

fn start() -> Service {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = Arc::new(MemoryClipboard::default());
    let desktop = Arc::new(Headless {
        pastes: AtomicUsize::new(0),
    });
    let picker = Arc::new(CountingPicker::default());
    let handle = Handle::start(
        &fast_config(),
        Store::new(dir.path()),
        clipboard.clone(),
        desktop.clone(),
        picker.clone(),
    )
    .unwrap();
    Service {
        _dir: dir,
        clipboard,
        desktop,
        picker,
        handle,
    }
}

#[test]
fn copies_are_pushed_to_subscribers() {
    let service = start();
    let mut updates = service.handle.subscribe();
    assert!(updates.blocking_recv().unwrap().is_empty());

    service.clipboard.set("a");
    let snapshot = updates.blocking_recv().unwrap();
    assert_eq!(texts(&snapshot), ["a"]);

    service.clipboard.set("b");
    let snapshot = updates.blocking_recv().unwrap();
    assert_eq!(texts(&snapshot), ["b", "a"]);

    service.handle.stop().unwrap();
}

#[test]
fn capacity_and_promotion_through_the_service() {
    let service = start();
    let mut updates = service.handle.subscribe();
    let _ = updates.blocking_recv();

    for text in ["a", "b", "c", "d", "b"] {
        service.clipboard.set(text);
        let snapshot = updates.blocking_recv().unwrap();
        assert_eq!(snapshot[0].text, text);
    }

    assert_eq!(texts(&service.handle.get_snapshot()), ["b", "d", "c"]);
    service.handle.stop().unwrap();
}

#[test]
fn activate_without_known_focus_writes_hides_and_pastes() {
    let service = start();
    service.clipboard.set("x");
    wait_until(|| service.handle.get_snapshot().len() == 1);
    service.clipboard.set("y");
    wait_until(|| service.handle.get_snapshot().len() == 2);

    service.handle.capture_focus();
    service.handle.request_activate("x");

    wait_until(|| service.desktop.pastes.load(Ordering::SeqCst) == 1);
    assert_eq!(service.clipboard.get(), "x");
    assert_eq!(service.picker.0.load(Ordering::SeqCst), 1);

    // the self-write is absorbed as a promotion, not a new entry
    wait_until(|| service.handle.get_snapshot()[0].text == "x");
    assert_eq!(texts(&service.handle.get_snapshot()), ["x", "y"]);

    service.handle.stop().unwrap();
}

#[test]
fn delete_and_clear_are_persisted_and_stop_flushes() {
    let service = start();
    service.clipboard.set("keep");
    wait_until(|| service.handle.get_snapshot().len() == 1);
    service.clipboard.set("drop");
    wait_until(|| service.handle.get_snapshot().len() == 2);

    let id = service.handle.get_snapshot()[0].id.clone();
    service.handle.request_delete(&id);
    service.handle.request_delete(&id);
    assert_eq!(texts(&service.handle.get_snapshot()), ["keep"]);

    let Service { _dir: dir, handle, .. } = service;
    assert_eq!(Store::new(dir.path()).load().len(), 1);

    handle.request_clear();
    handle.stop().unwrap();
    assert!(Store::new(dir.path()).load().is_empty());
}

#[test]
fn copies_are_recorded_while_a_paste_waits_on_the_window_manager() {
    let dir = tempfile::tempdir().unwrap();
    let clipboard = Arc::new(MemoryClipboard::default());
    let desktop = Arc::new(SlowDesktop::default());
    let handle = Handle::start(
        &fast_config(),
        Store::new(dir.path()),
        clipboard.clone(),
        desktop.clone(),
        Arc::new(CountingPicker::default()),
    )
    .unwrap();

    handle.capture_focus();
    handle.request_activate("x");
    wait_until(|| desktop.activating.load(Ordering::SeqCst));

    let copied_at = Instant::now();
    clipboard.set("new copy");
    wait_until(|| handle.get_snapshot().iter().any(|e| e.text == "new copy"));
    assert!(copied_at.elapsed() < Duration::from_millis(500));

    handle.stop().unwrap();
}

#[test]
fn clear_empties_history() {
    let service = start();
    service.clipboard.set("a");
    wait_until(|| service.handle.get_snapshot().len() == 1);

    service.handle.request_clear();
    assert!(service.handle.get_snapshot().is_empty());
    service.handle.stop().unwrap();
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        max_items: 0,
        ..Config::default()
    };
    let result = Handle::start(
        &config,
        Store::new(dir.path()),
        Arc::new(MemoryClipboard::default()),
        Arc::new(Headless {
            pastes: AtomicUsize::new(0),
        }),
        Arc::new(CountingPicker::default()),
    );
    assert!(result.is_err());
}
