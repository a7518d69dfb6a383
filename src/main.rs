//! # TINY BASIC
//!
//! Tiny BASIC as Tom Pittman shipped it in 1976: a 64K core image, an
//! IL interpreter, and a colon prompt.
//!

fn main() {
    tinybasic::term::main()
}
