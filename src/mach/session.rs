use super::{Bindings, ForLoop, Frame, FrameKind, JumpPhase, JumpState, Live, StatementStack, Step};
use crate::error;
use crate::lang::{Error, Line, LineNumber, Script, ScriptPosition};
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// ## Interpreter session
///
/// Everything one script run needs: the reader, both statement stacks,
/// the in-flight jump and the abort flag. Handlers receive it explicitly.

#[derive(Debug, Default)]
pub struct Session {
    script: Option<Script>,
    statements: StatementStack,
    jump: Option<JumpState>,
    abort: bool,
    output: String,
    errors: Vec<Error>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn begin_script(&mut self, source: &str) {
        self.end_script();
        self.script = Some(Script::new(source));
    }

    /// Tear down the run. Every frame still on either stack, and with it
    /// every pending binding, is released here.
    pub fn end_script(&mut self) {
        if self.script.is_some() {
            debug!(
                frames = self.statements.depth(Live::Primary) + self.statements.depth(Live::Extra),
                aborted = self.abort,
                "script ended"
            );
        }
        self.statements.clear();
        self.jump = None;
        self.script = None;
        self.abort = false;
    }

    pub fn is_batch_mode_active(&self) -> bool {
        self.script.is_some()
    }

    pub fn next_line(&mut self) -> Option<Line> {
        self.script.as_mut()?.read_line()
    }

    pub fn current_line_number(&self) -> Option<LineNumber> {
        self.script.as_ref().map(Script::line_number)
    }

    pub fn current_position(&self) -> Result<ScriptPosition> {
        match &self.script {
            Some(script) => Ok(script.position()),
            None => Err(error!(OnlyInScript)),
        }
    }

    pub fn set_position(&mut self, position: ScriptPosition) -> Result<()> {
        match self.script.as_mut() {
            Some(script) => script.seek(position),
            None => Err(error!(OnlyInScript)),
        }
    }

    pub fn abort_script(&mut self) {
        self.abort = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.abort
    }

    pub fn statements(&self) -> &StatementStack {
        &self.statements
    }

    pub fn statements_mut(&mut self) -> &mut StatementStack {
        &mut self.statements
    }

    pub fn print(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Emit the diagnostic and, for fatal errors, stop the script.
    pub fn fail(&mut self, error: Error) -> Error {
        if error.aborts_script() && self.is_batch_mode_active() {
            self.abort_script();
        }
        self.errors.push(error.clone());
        error
    }

    // *** Loop iteration

    pub fn enter_loop(&mut self, variable: char, bindings: Bindings, live: Live) -> Result<()> {
        let begin = self.current_position()?;
        self.statements
            .push(Frame::For(ForLoop::new(variable, bindings, begin)), live)
    }

    pub fn end_iteration(&mut self) -> Result<()> {
        let step = match self.statements.top_mut(Live::Primary) {
            Some(Frame::For(for_loop)) => for_loop.step(),
            _ => return Err(error!(NoCorrespondingFor)),
        };
        match step {
            Step::Repeat(begin) => self.set_position(begin),
            Step::Exit => self.statements.pop(1, Live::Primary),
        }
    }

    /// Current value of `%variable`. While a jump is scanning, only the
    /// loops enclosing the scan position are visible.
    pub fn lookup(&self, variable: char) -> Option<&str> {
        match &self.jump {
            Some(jump) => self.statements.scan_lookup(variable, jump.depth()),
            None => self.statements.lookup(variable),
        }
    }

    // *** Jumps

    pub fn is_goto_active(&self) -> bool {
        self.jump.is_some()
    }

    /// True once the label scan has restarted from the top of the script.
    pub fn is_search_phase(&self) -> bool {
        match &self.jump {
            Some(jump) => jump.phase() == JumpPhase::Rewind,
            None => false,
        }
    }

    pub fn jump(&self) -> Option<&JumpState> {
        self.jump.as_ref()
    }

    pub fn start_jump(&mut self, label: &str) -> Result<()> {
        let origin = self.current_position()?.line;
        let depth = self.statements.depth(Live::Primary);
        debug!(label, origin, depth, "goto");
        self.jump = Some(JumpState::new(label, origin, depth));
        Ok(())
    }

    pub fn try_consume_level(&mut self, kind: FrameKind) -> Result<bool> {
        let position = self.current_position()?;
        match self.jump.as_mut() {
            Some(jump) => jump.try_consume_level(&self.statements, kind, position),
            None => Ok(false),
        }
    }

    pub fn move_down(&mut self, kind: FrameKind) -> Result<()> {
        match self.jump.as_mut() {
            Some(jump) => jump.move_down(&self.statements, kind),
            None => Err(error!(InternalError; "NO JUMP IN PROGRESS")),
        }
    }

    /// End of script reached while scanning: restart from the top once,
    /// the second time the label does not exist.
    pub fn rewind_jump(&mut self) -> Result<()> {
        let jump = match self.jump.as_mut() {
            Some(jump) => jump,
            None => return Err(error!(InternalError; "NO JUMP IN PROGRESS")),
        };
        if jump.phase() == JumpPhase::Rewind {
            return Err(error!(LabelNotFound; jump.label()));
        }
        jump.rewind(&mut self.statements)?;
        if let Some(script) = self.script.as_mut() {
            script.rewind();
        }
        Ok(())
    }

    pub fn land_jump(&mut self) -> Result<()> {
        match self.jump.take() {
            Some(jump) => jump.land(&mut self.statements),
            None => Err(error!(InternalError; "NO JUMP IN PROGRESS")),
        }
    }
}
