extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Runtime};
use crate::{error, lang::Error};
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs `script` to completion, or the interactive prompt when there is
/// none. Returns false when an error stopped the script.
pub fn main(script: Option<&Path>, cycles: usize) -> bool {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        warn!(%error, "Ctrl-C handler not installed");
    }
    let result = match script {
        Some(path) => run_file(path, cycles, interrupted),
        None => main_loop(cycles, interrupted).map(|_| true),
    };
    match result {
        Ok(success) => success,
        Err(error) => {
            eprintln!("{}", error);
            false
        }
    }
}

fn run_file(path: &Path, cycles: usize, interrupted: Arc<AtomicBool>) -> std::io::Result<bool> {
    let mut runtime = Runtime::default();
    let source = match load(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            return Ok(false);
        }
    };
    info!(path = %path.display(), "running script");
    runtime.run_script(&source);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut success = true;
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(cycles) {
            Event::Stopped => break,
            Event::Running => {}
            Event::Print(s) => out.write_all(s.as_bytes())?,
            Event::Errors(errors) => {
                out.flush()?;
                for error in errors.iter() {
                    success &= !error.aborts_script();
                    eprintln!("{}", Style::new().bold().paint(error.to_string()));
                }
            }
            Event::Load(path) => warn!(%path, "nested script load ignored"),
        }
    }
    out.flush()?;
    Ok(success)
}

fn main_loop(cycles: usize, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let command = Interface::new("batch")?;
    command.set_prompt("Shell> ")?;
    let mut runtime = Runtime::default();

    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            runtime.interrupt();
        }
        match runtime.execute(cycles) {
            Event::Stopped => {
                let string = match command.read_line()? {
                    ReadResult::Input(string) => string,
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                };
                if runtime.enter(&string) {
                    command.add_history_unique(string);
                }
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    command.write_fmt(format_args!(
                        "{}\n",
                        Style::new().bold().paint(error.to_string())
                    ))?;
                }
            }
            Event::Running => {}
            Event::Print(s) => {
                command.write_fmt(format_args!("{}", s))?;
            }
            Event::Load(s) => match load(Path::new(&s)) {
                Ok(source) => runtime.run_script(&source),
                Err(error) => command.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint(error.to_string())
                ))?,
            },
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<String, Error> {
    match std::fs::read_to_string(path) {
        Ok(source) => Ok(source),
        Err(error) => {
            let msg = format!("{}: {}", path.display(), error);
            match error.kind() {
                ErrorKind::NotFound => Err(error!(FileNotFound; &msg)),
                _ => Err(error!(InternalError; &msg)),
            }
        }
    }
}
