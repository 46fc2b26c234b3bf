//! Window management: geometry, focus, text buffers, composition.

pub mod manager;
pub mod window;

pub use manager::{WindowError, WindowManager, FOCUS_BORDER};
pub use window::{Window, WindowId, MAX_WINDOWS, MAX_WINDOW_TEXT_LINES};
