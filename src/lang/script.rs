use super::{Error, Line, LineNumber};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// ## Reader cursor
///
/// `line` is the number of the last line read, `offset` is the byte
/// offset where the next line starts. Seeking to a saved position makes
/// the following read return the line after the one that was current.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptPosition {
    pub line: LineNumber,
    pub offset: usize,
}

/// ## Script text with a seekable reader

#[derive(Debug, Default)]
pub struct Script {
    source: String,
    position: ScriptPosition,
}

impl Script {
    pub fn new(source: &str) -> Script {
        Script {
            source: source.to_string(),
            position: ScriptPosition::default(),
        }
    }

    pub fn read_line(&mut self) -> Option<Line> {
        let rest = self.source.get(self.position.offset..)?;
        if rest.is_empty() {
            return None;
        }
        let (text, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.position.line += 1;
        self.position.offset += consumed;
        Some(Line::new(self.position.line, text))
    }

    pub fn position(&self) -> ScriptPosition {
        self.position
    }

    pub fn line_number(&self) -> LineNumber {
        self.position.line
    }

    pub fn seek(&mut self, position: ScriptPosition) -> Result<()> {
        let offset = position.offset;
        let at_line_start = offset == 0
            || offset == self.source.len()
            || (offset < self.source.len() && self.source.as_bytes()[offset - 1] == b'\n');
        if !at_line_start {
            return Err(error!(BadFilePosition; &format!("OFFSET {}", offset)));
        }
        self.position = position;
        Ok(())
    }

    pub fn rewind(&mut self) {
        self.position = ScriptPosition::default();
    }
}
