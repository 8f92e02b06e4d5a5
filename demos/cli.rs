use anyhow::Result;
use clipkeep::{Config, ConfigReadOption, Handle, Logger, Picker};
use std::{io::BufRead as _, sync::Arc};

/// Stands in for the picker window: there is nothing to hide in a terminal.
struct TerminalPicker;

impl Picker for TerminalPicker {
    fn hide(&self) {
        log::info!("picker hidden");
    }
}

fn main() -> Result<()> {
    Logger::init();

    let config = Config::read_or_default(ConfigReadOption::FromUserConfigDir);
    let handle = Handle::start_system(&config, Arc::new(TerminalPicker))?;

    let mut updates = handle.subscribe();
    std::thread::spawn(move || {
        while let Some(snapshot) = updates.blocking_recv() {
            log::info!("history has {} entries", snapshot.len());
        }
    });

    println!("commands: list | show | paste <index> | delete <id> | clear | exit");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let input = match line {
            Ok(input) => input,
            Err(err) => {
                log::error!("Error reading from console: {}", err);
                break;
            }
        };
        let (command, arg) = input
            .trim()
            .split_once(' ')
            .map_or((input.trim(), ""), |(c, a)| (c, a.trim()));

        match command {
            "exit" => break,
            "list" => {
                for (index, entry) in handle.get_snapshot().iter().enumerate() {
                    let preview: String = entry.text.chars().take(60).collect();
                    println!("{index:>3} {} {preview:?}", entry.id);
                }
            }
            "show" => {
                // the terminal is the "picker": remember who had focus before it
                handle.capture_focus();
                println!("focus captured, pick an entry with `paste <index>`");
            }
            "paste" => match arg.parse::<usize>() {
                Ok(index) => match handle.get_snapshot().get(index) {
                    Some(entry) => handle.request_activate(entry.text.clone()),
                    None => println!("no entry #{index}"),
                },
                Err(_) => println!("usage: paste <index>"),
            },
            "delete" => handle.request_delete(arg),
            "clear" => handle.request_clear(),
            "" => {}
            other => println!("unknown command {other:?}"),
        }
    }

    handle.stop()
}
