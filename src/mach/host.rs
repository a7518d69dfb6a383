/// ## Host capabilities
///
/// The machine owns no I/O. A host supplies one character sink, one
/// character source and a break poll; everything the interpreter
/// prints (program output, prompts, diagnostics, debug dumps) goes
/// through the same sink.
pub trait Host {
    /// Deliver one printable character or a newline. Not expected
    /// to fail.
    fn char_out(&mut self, ch: u8);

    /// Non-blocking read of one character. `None` means no input is
    /// available right now; the interpreter suspends at the input
    /// opcode and `interpret` returns `Event::AwaitingInput`.
    fn char_in(&mut self) -> Option<u8>;

    /// Cooperative cancellation poll, checked once per opcode and
    /// once per listed line.
    fn break_requested(&mut self) -> bool;
}
