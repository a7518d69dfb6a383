//! # Tiny BASIC
//!
//! The Tiny BASIC interpretive language (IL) virtual machine as it was
//! in 1976: a 64KiB core image holding the IL program, the stored BASIC
//! source and both runtime stacks, driven by a single dispatch loop.
//!
//! Begin by opening a terminal and running the executable. If you get
//! the following, you have achieved success.
//! ```text
//! TINY BASIC
//! :█
//! ```
//!
//! Programs are entered one numbered line at a time and run with `RUN`.
//! The supported statements are LET, GOTO, GOSUB/RETURN, PRINT, IF,
//! INPUT, REM, LIST, CLEAR and END, with the RND and USR functions.

pub mod mach;
pub mod term;
