use super::command::{endfor_command, for_command, goto_command};
use super::{JumpState, Session};
use crate::error;
use crate::lang::{Error, Line};
use tracing::{debug, trace};

/// ## Events returned by the runtime

#[derive(Debug)]
pub enum Event {
    Stopped,
    Running,
    Print(String),
    Errors(Vec<Error>),
    Load(String),
}

/// ## Script runner
///
/// Reads the active script one line per cycle, substitutes loop
/// variables and dispatches commands. While a `goto` is scanning for its
/// label only labels, `for` and `endfor` are looked at.

#[derive(Debug, Default)]
pub struct Runtime {
    session: Session,
    direct: Option<Line>,
    load: Option<String>,
}

impl Runtime {
    pub fn new() -> Runtime {
        Runtime::default()
    }

    /// Accepts a direct mode line. Returns false for lines not worth
    /// keeping in history.
    pub fn enter(&mut self, s: &str) -> bool {
        let line = Line::new(0, s);
        match line.command() {
            None => return false,
            Some(command) if command.ends_with(".nsh") => {
                self.load = Some(line.args()[0].clone());
            }
            Some(_) => self.direct = Some(line),
        }
        true
    }

    pub fn run_script(&mut self, source: &str) {
        self.session.begin_script(source);
    }

    pub fn interrupt(&mut self) {
        if self.session.is_batch_mode_active() {
            let line_number = self.session.current_line_number();
            self.session.fail(error!(Break, line_number));
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn execute(&mut self, cycles: usize) -> Event {
        for _ in 0..cycles {
            let errors = self.session.take_errors();
            if !errors.is_empty() {
                return Event::Errors(errors);
            }
            let output = self.session.take_output();
            if !output.is_empty() {
                return Event::Print(output);
            }
            if let Some(path) = self.load.take() {
                return Event::Load(path);
            }
            if let Some(line) = self.direct.take() {
                self.statement(line);
                continue;
            }
            if !self.session.is_batch_mode_active() {
                return Event::Stopped;
            }
            if self.session.is_aborted() {
                self.session.end_script();
                continue;
            }
            match self.session.next_line() {
                Some(line) => self.script_line(line),
                None => self.end_of_script(),
            }
        }
        Event::Running
    }

    fn script_line(&mut self, line: Line) {
        if let Some(jump) = self.session.jump() {
            if jump.is_exhausted(line.number()) {
                let error = error!(LabelNotFound, Some(jump.origin()); jump.label());
                self.session.fail(error.in_command("goto"));
                return;
            }
            if line.is_label(jump.label()) {
                if let Err(error) = self.session.land_jump() {
                    let error = error.in_line_number(Some(line.number()));
                    self.session.fail(error.in_command("goto"));
                }
                return;
            }
            match line.command().as_deref() {
                Some("for") | Some("endfor") => {}
                _ => return,
            }
        }
        self.statement(line);
    }

    fn end_of_script(&mut self) {
        if !self.session.is_goto_active() {
            self.session.end_script();
            return;
        }
        if let Err(error) = self.session.rewind_jump() {
            let origin = self.session.jump().map(JumpState::origin);
            self.session.fail(error.in_line_number(origin).in_command("goto"));
        }
    }

    fn statement(&mut self, mut line: Line) {
        substitute(&self.session, &mut line);
        let command = match line.command() {
            Some(command) => command,
            None => return,
        };
        trace!(line = line.number(), %command, "dispatch");
        let args = line.args();
        let result = match command.as_str() {
            "for" => for_command(&mut self.session, args),
            "endfor" => endfor_command(&mut self.session, args),
            "goto" => goto_command(&mut self.session, args),
            "echo" => {
                self.session.print(&args[1..].join(" "));
                self.session.print("\n");
                Ok(())
            }
            _ => {
                let line_number = self.session.current_line_number();
                let error = error!(UnknownCommand, line_number; &args[0]);
                Err(self.session.fail(error))
            }
        };
        if let Err(error) = result {
            debug!(%error, "statement failed");
        }
    }
}

/// Replaces `%x` with the current value of the innermost loop over `x`.
/// The variable of a `for` line is left alone.
fn substitute(session: &Session, line: &mut Line) {
    let skip = match line.command().as_deref() {
        Some("for") => Some(1),
        _ => None,
    };
    for (index, arg) in line.args_mut().iter_mut().enumerate() {
        if Some(index) == skip || !arg.contains('%') {
            continue;
        }
        let mut s = String::new();
        let mut chars = arg.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '%' {
                let value = chars
                    .peek()
                    .filter(|var| var.is_ascii_alphabetic())
                    .and_then(|var| session.lookup(*var));
                if let Some(value) = value {
                    s.push_str(value);
                    chars.next();
                    continue;
                }
            }
            s.push(ch);
        }
        *arg = s;
    }
}
