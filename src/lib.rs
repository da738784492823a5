//! # Batch
//!
//! Script interpreter for a pre-boot command shell.
//!
//! Scripts are plain text, one command per line. Loops iterate over a
//! list of values or a numeric range, and `goto` may jump to any
//! `:label`, including into, out of or across loop bodies.
//! ```text
//! for %a in one two
//!   for %i run (1 2)
//!     echo %a %i
//!   endfor
//!   goto skip
//!   echo never
//!   :skip
//! endfor
//! ```
//!
//! Run a script with `batch startup.nsh`, or start `batch` without
//! arguments for an interactive prompt where typing the name of a
//! `.nsh` file runs it.

#[macro_use]
pub mod lang;
pub mod mach;
pub mod term;
