use crate::error;
use crate::lang::Error;
use std::collections::VecDeque;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const MAX_RANGE_LEN: usize = u16::max_value() as usize;

/// ## Pending values of a `for` loop
///
/// The head is the value bound to the loop variable for the current
/// iteration. `endfor` releases the head; the loop is over when nothing
/// is left.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: VecDeque<Rc<str>>,
}

impl Bindings {
    pub fn new<I, S>(values: I) -> Bindings
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Bindings {
            values: values.into_iter().map(|s| s.as_ref().into()).collect(),
        }
    }

    /// Values of `run (start end [step])`. The tokens may carry the
    /// parentheses or have them standing alone.
    pub fn from_range<S: AsRef<str>>(tokens: &[S]) -> Result<Bindings> {
        let joined = tokens
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        let inner = joined
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| error!(SyntaxError; "EXPECTED (START END [STEP])"))?;
        let mut numbers = vec![];
        for word in inner.split_whitespace() {
            match word.parse::<i32>() {
                Ok(n) => numbers.push(i64::from(n)),
                Err(_) => return Err(error!(SyntaxError; "RANGE IS NOT AN INTEGER")),
            }
        }
        let (start, end, step) = match numbers.as_slice() {
            [start, end] => (*start, *end, if start <= end { 1 } else { -1 }),
            [start, end, step] => (*start, *end, *step),
            _ => return Err(error!(SyntaxError; "EXPECTED (START END [STEP])")),
        };
        if step == 0 || (end - start).signum() * step.signum() < 0 {
            return Err(error!(SyntaxError; "STEP NEVER REACHES END"));
        }
        let count = (end - start) / step + 1;
        if count as usize > MAX_RANGE_LEN {
            return Err(error!(OutOfMemory; "RANGE TOO LONG"));
        }
        Ok(Bindings::new(
            (0..count).map(|n| (start + n * step).to_string()),
        ))
    }

    pub fn current(&self) -> Option<&str> {
        self.values.front().map(|v| v.as_ref())
    }

    pub fn consume(&mut self) -> Option<Rc<str>> {
        self.values.pop_front()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.as_ref())
    }
}
