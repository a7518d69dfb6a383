/*!
## Rust Machine Module

This Rust module is the Tiny BASIC virtual machine: the 64KiB core
image, the IL dispatch loop, and the debug surface around them.

*/

/// Core memory address. The core is 16-bit addressable.
pub type Address = u16;

mod error;
mod core;
mod host;
mod il;
mod opcode;
mod program;
mod runtime;
mod stack;
mod trace;

pub use self::core::Core;
pub use error::Error;
pub use error::ErrorCode;
pub use host::Host;
pub use il::STANDARD_IL;
pub use opcode::Opcode;
pub use runtime::Event;
pub use runtime::Vm;

#[cfg(test)]
mod tests;
