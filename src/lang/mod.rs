/*!
# Rust Language Module

This Rust module reads script text: splitting lines into argument
tokens, recognizing labels, and keeping a seekable reader position.

*/

pub type LineNumber = usize;

#[macro_use]
mod error;
mod lex;
mod line;
mod script;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;
pub use script::Script;
pub use script::ScriptPosition;

#[cfg(test)]
mod tests;
