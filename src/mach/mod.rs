/*!
## Rust Machine Module

This Rust module runs scripts: the statement stack of active loops,
the jump resolver that keeps it consistent across `goto`, and the
command handlers that drive them.

*/

mod binding;
mod command;
mod jump;
mod runtime;
mod session;
mod stack;
mod statement;

pub use binding::Bindings;
pub use command::endfor_command;
pub use command::endfor_line_help;
pub use command::for_command;
pub use command::for_line_help;
pub use command::goto_command;
pub use jump::JumpPhase;
pub use jump::JumpState;
pub use runtime::Event;
pub use runtime::Runtime;
pub use session::Session;
pub use stack::Stack;
pub use statement::ForLoop;
pub use statement::Frame;
pub use statement::FrameKind;
pub use statement::Live;
pub use statement::StatementStack;
pub use statement::Step;

#[cfg(test)]
mod tests;
