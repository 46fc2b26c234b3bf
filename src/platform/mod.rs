//! Platform frontends. The core is device-agnostic; this module adapts a
//! POSIX terminal to the event-source and display-sink contracts.

pub mod terminal;

pub use terminal::{AnsiScreen, TerminalInput};

#[cfg(unix)]
pub use terminal::RawModeGuard;
