//! Application state machines and tagged dispatch.
//!
//! Each application is an explicit per-instance state machine: `handle_key`
//! mutates instance state one keystroke at a time, `render` rebuilds the full
//! visible line set from that state. Instances live in fixed-capacity pools,
//! one per type, and are addressed through [`AppBinding`], a closed variant
//! carrying the instance's pool handle.

pub mod calculator;
pub mod file_browser;
pub mod notepad;
pub mod terminal;

pub use calculator::Calculator;
pub use file_browser::FileBrowser;
pub use notepad::Notepad;
pub use terminal::Terminal;

use crate::core::input::Key;
use crate::core::pool::{Handle, Pool};
use crate::store::FileStore;

/// Instances per application type.
pub const APP_POOL_CAPACITY: usize = 5;

/// Binding of a window to one application instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AppBinding {
    Calculator(Handle),
    Notepad(Handle),
    Terminal(Handle),
    FileBrowser(Handle),
}

impl AppBinding {
    pub fn kind_name(self) -> &'static str {
        match self {
            AppBinding::Calculator(_) => "calculator",
            AppBinding::Notepad(_) => "notepad",
            AppBinding::Terminal(_) => "terminal",
            AppBinding::FileBrowser(_) => "file-browser",
        }
    }
}

/// Cross-application request surfaced by `handle_key`.
///
/// The file browser is the only producer: opening a file means allocating a
/// fresh notepad window, which the router owns, not the state machine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppRequest {
    OpenFile(String),
}

/// The per-type instance pools.
pub struct AppPools {
    pub(crate) calculators: Pool<Calculator>,
    pub(crate) notepads: Pool<Notepad>,
    pub(crate) terminals: Pool<Terminal>,
    pub(crate) file_browsers: Pool<FileBrowser>,
}

impl Default for AppPools {
    fn default() -> Self {
        Self::new()
    }
}

impl AppPools {
    pub fn new() -> Self {
        Self {
            calculators: Pool::with_capacity(APP_POOL_CAPACITY),
            notepads: Pool::with_capacity(APP_POOL_CAPACITY),
            terminals: Pool::with_capacity(APP_POOL_CAPACITY),
            file_browsers: Pool::with_capacity(APP_POOL_CAPACITY),
        }
    }

    /// Routes one key to the bound instance. Stale bindings drop the key.
    pub fn handle_key(
        &mut self,
        binding: AppBinding,
        store: &mut FileStore,
        key: Key,
    ) -> Option<AppRequest> {
        match binding {
            AppBinding::Calculator(handle) => {
                if let Some(calculator) = self.calculators.get_mut(handle) {
                    calculator.handle_key(key);
                }
                None
            }
            AppBinding::Notepad(handle) => {
                if let Some(notepad) = self.notepads.get_mut(handle) {
                    notepad.handle_key(store, key);
                }
                None
            }
            AppBinding::Terminal(handle) => {
                if let Some(terminal) = self.terminals.get_mut(handle) {
                    terminal.handle_key(store, key);
                }
                None
            }
            AppBinding::FileBrowser(handle) => self
                .file_browsers
                .get_mut(handle)
                .and_then(|browser| browser.handle_key(store, key)),
        }
    }

    /// Rebuilds the bound instance's visible line set. `None` on a stale
    /// binding.
    pub fn render(&self, binding: AppBinding) -> Option<Vec<String>> {
        match binding {
            AppBinding::Calculator(handle) => {
                self.calculators.get(handle).map(Calculator::render)
            }
            AppBinding::Notepad(handle) => self.notepads.get(handle).map(Notepad::render),
            AppBinding::Terminal(handle) => self.terminals.get(handle).map(Terminal::render),
            AppBinding::FileBrowser(handle) => {
                self.file_browsers.get(handle).map(FileBrowser::render)
            }
        }
    }

    /// Frees the bound instance's pool slot for reuse.
    pub fn release(&mut self, binding: AppBinding) {
        match binding {
            AppBinding::Calculator(handle) => {
                self.calculators.remove(handle);
            }
            AppBinding::Notepad(handle) => {
                self.notepads.remove(handle);
            }
            AppBinding::Terminal(handle) => {
                self.terminals.remove(handle);
            }
            AppBinding::FileBrowser(handle) => {
                self.file_browsers.remove(handle);
            }
        }
    }

    /// Re-snapshots every live file browser against the store.
    pub fn refresh_file_browsers(&mut self, store: &FileStore) {
        for (_, browser) in self.file_browsers.iter_mut() {
            browser.refresh(store);
        }
    }
}
