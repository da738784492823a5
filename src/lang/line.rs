use super::lex::*;
use super::LineNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: LineNumber,
    args: Vec<String>,
}

impl Line {
    pub fn new(number: LineNumber, s: &str) -> Line {
        Line {
            number,
            args: lex(s),
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    /// Argument vector, command name first.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn args_mut(&mut self) -> &mut [String] {
        &mut self.args
    }

    /// Command name, lowercased. Labels are not commands.
    pub fn command(&self) -> Option<String> {
        match self.args.first() {
            Some(word) if !word.starts_with(':') => Some(word.to_ascii_lowercase()),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self.args.first() {
            Some(word) if word.starts_with(':') => Some(&word[1..]),
            _ => None,
        }
    }

    pub fn is_label(&self, target: &str) -> bool {
        match self.label() {
            Some(label) => label.eq_ignore_ascii_case(target),
            None => false,
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.args.join(" "))
    }
}
