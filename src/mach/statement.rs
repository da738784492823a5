use super::{Bindings, Stack};
use crate::lang::{Error, ScriptPosition};
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// ## Control structure frames

#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    For(ForLoop),
    If(ScriptPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    For,
    If,
}

impl Frame {
    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::For(_) => FrameKind::For,
            Frame::If(_) => FrameKind::If,
        }
    }

    pub fn begin(&self) -> ScriptPosition {
        match self {
            Frame::For(for_loop) => for_loop.begin,
            Frame::If(begin) => *begin,
        }
    }
}

/// What `endfor` does after releasing the current value.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Seek here and run the body again.
    Repeat(ScriptPosition),
    /// Nothing left; pop the frame.
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    variable: char,
    bindings: Bindings,
    begin: ScriptPosition,
}

impl ForLoop {
    pub fn new(variable: char, bindings: Bindings, begin: ScriptPosition) -> ForLoop {
        ForLoop {
            variable,
            bindings,
            begin,
        }
    }

    pub fn variable(&self) -> char {
        self.variable
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn begin(&self) -> ScriptPosition {
        self.begin
    }

    /// Releases the current value. A loop that never got a value (its body
    /// was skipped) exits without running.
    pub fn step(&mut self) -> Step {
        if let Some(value) = self.bindings.consume() {
            trace!(variable = %self.variable, %value, "released");
        }
        if self.bindings.is_empty() {
            Step::Exit
        } else {
            Step::Repeat(self.begin)
        }
    }
}

/// Which of the two stacks an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Live {
    Primary,
    Extra,
}

/// ## Statement stack
///
/// The primary stack mirrors the structures lexically enclosing the
/// execution point. The extra stack holds frames a jump scan walked into
/// but has not yet landed in.

#[derive(Debug)]
pub struct StatementStack {
    primary: Stack<Frame>,
    extra: Stack<Frame>,
}

impl Default for StatementStack {
    fn default() -> StatementStack {
        StatementStack::new()
    }
}

impl StatementStack {
    pub fn new() -> StatementStack {
        StatementStack {
            primary: Stack::new("STATEMENT STACK OVERFLOW"),
            extra: Stack::new("EXTRA STATEMENT STACK OVERFLOW"),
        }
    }

    fn live(&self, live: Live) -> &Stack<Frame> {
        match live {
            Live::Primary => &self.primary,
            Live::Extra => &self.extra,
        }
    }

    fn live_mut(&mut self, live: Live) -> &mut Stack<Frame> {
        match live {
            Live::Primary => &mut self.primary,
            Live::Extra => &mut self.extra,
        }
    }

    pub fn push(&mut self, frame: Frame, live: Live) -> Result<()> {
        trace!(?live, kind = ?frame.kind(), "push");
        self.live_mut(live).push(frame)
    }

    pub fn pop(&mut self, count: usize, live: Live) -> Result<()> {
        trace!(?live, count, "pop");
        self.live_mut(live).pop_n(count).map(drop)
    }

    pub fn top(&self, live: Live) -> Option<&Frame> {
        self.live(live).last()
    }

    pub fn top_mut(&mut self, live: Live) -> Option<&mut Frame> {
        self.live_mut(live).last_mut()
    }

    /// Frame `index` counted from the bottom.
    pub fn get(&self, index: usize, live: Live) -> Option<&Frame> {
        self.live(live).get(index)
    }

    pub fn depth(&self, live: Live) -> usize {
        self.live(live).len()
    }

    pub fn is_empty(&self, live: Live) -> bool {
        self.live(live).is_empty()
    }

    /// Moves every extra frame, bottom first, onto the primary stack.
    pub fn merge_extra(&mut self) -> Result<()> {
        self.primary.append(&mut self.extra)
    }

    /// Current value of the innermost loop over `variable`.
    pub fn lookup(&self, variable: char) -> Option<&str> {
        innermost(self.primary.iter().rev(), variable)
    }

    /// Lookup as seen from a jump scan: the frames the scan entered, then
    /// the bottom `depth` primary frames it has not left.
    pub fn scan_lookup(&self, variable: char, depth: usize) -> Option<&str> {
        let enclosing = self.primary.iter().take(depth).rev();
        innermost(self.extra.iter().rev().chain(enclosing), variable)
    }

    pub fn clear(&mut self) {
        self.primary.clear();
        self.extra.clear();
    }
}

fn innermost<'a, I>(frames: I, variable: char) -> Option<&'a str>
where
    I: Iterator<Item = &'a Frame>,
{
    frames
        .filter_map(|frame| match frame {
            Frame::For(for_loop) => Some(for_loop),
            _ => None,
        })
        .find(|for_loop| for_loop.variable().eq_ignore_ascii_case(&variable))
        .and_then(|for_loop| for_loop.bindings().current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn pos(line: usize) -> ScriptPosition {
        ScriptPosition { line, offset: line * 10 }
    }

    fn for_frame(variable: char, values: &[&str], line: usize) -> Frame {
        Frame::For(ForLoop::new(variable, Bindings::new(values), pos(line)))
    }

    #[test]
    fn test_empty_top_differs_from_if_top() {
        let mut s = StatementStack::new();
        assert_eq!(s.top(Live::Primary), None);
        s.push(Frame::If(pos(1)), Live::Primary).unwrap();
        assert_eq!(s.top(Live::Primary).map(Frame::kind), Some(FrameKind::If));
    }

    #[test]
    fn test_pop_selects_stack() {
        let mut s = StatementStack::new();
        s.push(for_frame('a', &["1"], 1), Live::Primary).unwrap();
        s.push(for_frame('b', &["1"], 2), Live::Extra).unwrap();
        s.push(for_frame('c', &["1"], 3), Live::Extra).unwrap();
        s.pop(2, Live::Extra).unwrap();
        assert!(s.is_empty(Live::Extra));
        assert_eq!(s.depth(Live::Primary), 1);
        let e = s.pop(2, Live::Primary).unwrap_err();
        assert_eq!(e.code(), ErrorCode::InternalError);
        assert_eq!(s.depth(Live::Primary), 1);
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut s = StatementStack::new();
        s.push(for_frame('a', &["1"], 1), Live::Primary).unwrap();
        s.push(for_frame('b', &["1"], 2), Live::Extra).unwrap();
        s.push(for_frame('c', &["1"], 3), Live::Extra).unwrap();
        s.merge_extra().unwrap();
        assert_eq!(s.depth(Live::Primary), 3);
        assert_eq!(s.depth(Live::Extra), 0);
        assert_eq!(s.top(Live::Primary).map(Frame::begin), Some(pos(3)));
    }

    #[test]
    fn test_lookup_innermost_wins() {
        let mut s = StatementStack::new();
        s.push(for_frame('a', &["outer"], 1), Live::Primary).unwrap();
        s.push(for_frame('b', &["x"], 2), Live::Primary).unwrap();
        assert_eq!(s.lookup('A'), Some("outer"));
        s.push(for_frame('a', &["inner"], 3), Live::Primary).unwrap();
        assert_eq!(s.lookup('a'), Some("inner"));
        assert_eq!(s.lookup('z'), None);
    }

    #[test]
    fn test_lookup_ignores_extra() {
        let mut s = StatementStack::new();
        s.push(for_frame('a', &["1"], 1), Live::Extra).unwrap();
        assert_eq!(s.lookup('a'), None);
    }

    #[test]
    fn test_scan_lookup_sees_entered_frames() {
        let mut s = StatementStack::new();
        s.push(for_frame('a', &["outer"], 1), Live::Primary).unwrap();
        s.push(for_frame('n', &["left"], 2), Live::Primary).unwrap();
        s.push(for_frame('n', &["2", "3"], 5), Live::Extra).unwrap();
        assert_eq!(s.scan_lookup('n', 1), Some("2"));
        assert_eq!(s.scan_lookup('a', 1), Some("outer"));
        s.pop(1, Live::Extra).unwrap();
        assert_eq!(s.scan_lookup('n', 1), None);
        assert_eq!(s.scan_lookup('n', 2), Some("left"));
        assert_eq!(s.scan_lookup('a', 0), None);
    }

    #[test]
    fn test_step_walks_values() {
        let mut l = ForLoop::new('a', Bindings::new(&["1", "2"]), pos(4));
        assert_eq!(l.step(), Step::Repeat(pos(4)));
        assert_eq!(l.bindings().current(), Some("2"));
        assert_eq!(l.step(), Step::Exit);
    }

    #[test]
    fn test_step_without_values_exits() {
        let mut l = ForLoop::new('a', Bindings::default(), pos(4));
        assert_eq!(l.step(), Step::Exit);
    }
}
