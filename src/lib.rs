//! Single-tasking text-mode desktop.
//!
//! Invariant: single composition gate — every drawn cell flows through a
//! [`DisplaySink`], and at most one active window holds focus at any time.
//!
//! # Public API Overview
//! - Build a [`Desktop`] context and launch applications into windows via its
//!   entry points (`launch_calculator`, `launch_notepad`, `launch_terminal`,
//!   `launch_file_browser`).
//! - Feed keystrokes with [`runtime::handle_key`] or drive a blocking
//!   [`core::input::EventSource`] with [`runtime::run`].
//! - Compose onto any [`DisplaySink`]; [`CellGrid`] is the offscreen
//!   implementation and `platform::AnsiScreen` flushes to a POSIX terminal.
//! - Inspect or seed the in-memory [`FileStore`] shared by the applications.

pub mod config;
pub mod logging;

pub mod apps;
pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;
pub mod store;
pub mod wm;

/// Keyboard events and the blocking event-source contract.
pub use crate::core::input::{is_printable, EventSource, Key};

/// Render-layer cell and sink types.
pub use crate::render::{CellGrid, Color, ColorPair, DisplaySink};

/// In-memory file store.
pub use crate::store::{FileStore, StoreError};

/// Window manager types.
pub use crate::wm::{Window, WindowError, WindowId, WindowManager};

/// Application bindings and state machines.
pub use crate::apps::{AppBinding, AppRequest, Calculator, FileBrowser, Notepad, Terminal};

/// Desktop context, input routing, and the event loop.
pub use crate::runtime::{handle_key, run, AppRegistry, Desktop, LaunchError};
