use super::{FrameKind, Live, StatementStack};
use crate::error;
use crate::lang::{Error, LineNumber, ScriptPosition};
use std::rc::Rc;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    /// Scanning from the `goto` towards the end of the script.
    Forward,
    /// Restarted from the top of the script after the forward scan failed.
    Rewind,
}

/// ## An in-flight `goto`
///
/// `depth` counts the primary frames still enclosing the scan position.
/// While scanning, `for`/`endfor` move `depth` or grow and shrink the
/// extra stack; bindings are never touched. When the label is found the
/// primary stack is cut to `depth` and the extra frames are merged in.

#[derive(Debug, Clone, PartialEq)]
pub struct JumpState {
    label: Rc<str>,
    phase: JumpPhase,
    depth: usize,
    origin: LineNumber,
}

impl JumpState {
    pub fn new(label: &str, origin: LineNumber, depth: usize) -> JumpState {
        JumpState {
            label: label.into(),
            phase: JumpPhase::Forward,
            depth,
            origin,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn origin(&self) -> LineNumber {
        self.origin
    }

    /// The rewind scan has come back around to the `goto` itself.
    pub fn is_exhausted(&self, line: LineNumber) -> bool {
        self.phase == JumpPhase::Rewind && line >= self.origin
    }

    /// Restart the scan from the top of the script. Nothing is enclosing
    /// the first line, and whatever the forward scan entered is dropped.
    pub fn rewind(&mut self, statements: &mut StatementStack) -> Result<()> {
        debug!(label = %self.label, "rewinding jump scan");
        let extra = statements.depth(Live::Extra);
        statements.pop(extra, Live::Extra)?;
        self.phase = JumpPhase::Rewind;
        self.depth = 0;
        Ok(())
    }

    /// During the rewind scan, a structure that opens at `position` may be
    /// one the primary stack already holds. If the next frame up the jump
    /// path is that very structure, step into it instead of pushing.
    pub fn try_consume_level(
        &mut self,
        statements: &StatementStack,
        kind: FrameKind,
        position: ScriptPosition,
    ) -> Result<bool> {
        if self.depth > statements.depth(Live::Primary) {
            return Err(error!(InternalError; "JUMP PATH ABOVE STACK"));
        }
        if !statements.is_empty(Live::Extra) {
            return Ok(false);
        }
        match statements.get(self.depth, Live::Primary) {
            Some(frame) if frame.kind() == kind && frame.begin() == position => {
                self.depth += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// The scan left a structure it did not enter itself. It must be the
    /// innermost frame on the jump path and of the same kind.
    pub fn move_down(&mut self, statements: &StatementStack, kind: FrameKind) -> Result<()> {
        if self.depth > statements.depth(Live::Primary) {
            return Err(error!(InternalError; "JUMP PATH ABOVE STACK"));
        }
        if self.depth == 0 {
            return Err(error!(NoCorrespondingFor));
        }
        match statements.get(self.depth - 1, Live::Primary) {
            Some(frame) if frame.kind() == kind => {
                self.depth -= 1;
                Ok(())
            }
            _ => Err(error!(NoCorrespondingFor)),
        }
    }

    /// Label found: leave the structures the jump exits and enter the ones
    /// it was found inside.
    pub fn land(self, statements: &mut StatementStack) -> Result<()> {
        let exited = statements
            .depth(Live::Primary)
            .checked_sub(self.depth)
            .ok_or_else(|| error!(InternalError; "JUMP PATH ABOVE STACK"))?;
        debug!(
            label = %self.label,
            exited,
            entered = statements.depth(Live::Extra),
            "jump landed"
        );
        statements.pop(exited, Live::Primary)?;
        statements.merge_extra()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use crate::mach::{Bindings, ForLoop, Frame};

    fn pos(line: usize) -> ScriptPosition {
        ScriptPosition { line, offset: line * 10 }
    }

    fn for_frame(values: &[&str], line: usize) -> Frame {
        Frame::For(ForLoop::new('a', Bindings::new(values), pos(line)))
    }

    #[test]
    fn test_move_down_then_land_exits_loop() {
        let mut s = StatementStack::new();
        s.push(for_frame(&["1", "2"], 1), Live::Primary).unwrap();
        s.push(for_frame(&["8", "9"], 2), Live::Primary).unwrap();
        let mut j = JumpState::new("next", 4, s.depth(Live::Primary));
        j.move_down(&s, FrameKind::For).unwrap();
        assert_eq!(j.depth(), 1);
        j.land(&mut s).unwrap();
        assert_eq!(s.depth(Live::Primary), 1);
        assert_eq!(s.lookup('a'), Some("1"));
    }

    #[test]
    fn test_move_down_past_bottom_is_not_found() {
        let s = StatementStack::new();
        let mut j = JumpState::new("x", 1, 0);
        let e = j.move_down(&s, FrameKind::For).unwrap_err();
        assert_eq!(e.code(), ErrorCode::NoCorrespondingFor);
    }

    #[test]
    fn test_move_down_onto_if_is_not_found() {
        let mut s = StatementStack::new();
        s.push(Frame::If(pos(1)), Live::Primary).unwrap();
        let mut j = JumpState::new("x", 2, 1);
        let e = j.move_down(&s, FrameKind::For).unwrap_err();
        assert_eq!(e.code(), ErrorCode::NoCorrespondingFor);
        assert_eq!(j.depth(), 1);
    }

    #[test]
    fn test_land_merges_extra() {
        let mut s = StatementStack::new();
        s.push(for_frame(&["1"], 1), Live::Primary).unwrap();
        s.push(for_frame(&["p", "q"], 5), Live::Extra).unwrap();
        let j = JumpState::new("inner", 3, 1);
        j.land(&mut s).unwrap();
        assert_eq!(s.depth(Live::Primary), 2);
        assert!(s.is_empty(Live::Extra));
        assert_eq!(s.lookup('a'), Some("p"));
    }

    #[test]
    fn test_rewind_drops_extra_and_resets_depth() {
        let mut s = StatementStack::new();
        s.push(for_frame(&["1"], 1), Live::Primary).unwrap();
        s.push(for_frame(&["2"], 5), Live::Extra).unwrap();
        let mut j = JumpState::new("x", 3, 1);
        j.rewind(&mut s).unwrap();
        assert_eq!(j.phase(), JumpPhase::Rewind);
        assert_eq!(j.depth(), 0);
        assert!(s.is_empty(Live::Extra));
        assert_eq!(s.depth(Live::Primary), 1);
    }

    #[test]
    fn test_try_consume_matches_by_position() {
        let mut s = StatementStack::new();
        s.push(for_frame(&["1"], 5), Live::Primary).unwrap();
        let mut j = JumpState::new("x", 7, 1);
        j.rewind(&mut s).unwrap();
        assert!(!j.try_consume_level(&s, FrameKind::For, pos(2)).unwrap());
        assert_eq!(j.depth(), 0);
        assert!(j.try_consume_level(&s, FrameKind::For, pos(5)).unwrap());
        assert_eq!(j.depth(), 1);
        assert!(!j.try_consume_level(&s, FrameKind::For, pos(6)).unwrap());
    }

    #[test]
    fn test_try_consume_refused_inside_extra() {
        let mut s = StatementStack::new();
        s.push(for_frame(&["1"], 5), Live::Primary).unwrap();
        let mut j = JumpState::new("x", 7, 1);
        j.rewind(&mut s).unwrap();
        s.push(for_frame(&["1"], 2), Live::Extra).unwrap();
        assert!(!j.try_consume_level(&s, FrameKind::For, pos(5)).unwrap());
    }

    #[test]
    fn test_exhausted_only_when_rewound() {
        let mut s = StatementStack::new();
        let mut j = JumpState::new("x", 3, 0);
        assert!(!j.is_exhausted(3));
        j.rewind(&mut s).unwrap();
        assert!(!j.is_exhausted(2));
        assert!(j.is_exhausted(3));
    }
}
