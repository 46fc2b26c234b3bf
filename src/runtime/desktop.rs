//! Desktop context: one explicitly owned struct threading every shared
//! resource through the event loop.

use thiserror::Error;

use crate::apps::{AppBinding, AppPools, Calculator, FileBrowser, Notepad, Terminal};
use crate::render::sink::{fill_rect, put_str};
use crate::render::{Color, ColorPair, DisplaySink};
use crate::runtime::registry::AppRegistry;
use crate::store::FileStore;
use crate::wm::{WindowId, WindowManager};

const DESKTOP_FILL: ColorPair = ColorPair::new(Color::LightGray, Color::Blue);
const ICON_COLORS: ColorPair = ColorPair::new(Color::White, Color::Blue);
const HINT_COLORS: ColorPair = ColorPair::new(Color::Yellow, Color::Blue);
const MOVE_HINT_COLORS: ColorPair = ColorPair::new(Color::Black, Color::Yellow);

const CALCULATOR_COLORS: ColorPair = ColorPair::new(Color::Black, Color::White);
const NOTEPAD_COLORS: ColorPair = ColorPair::new(Color::Black, Color::LightCyan);
const TERMINAL_COLORS: ColorPair = ColorPair::new(Color::White, Color::Black);
const BROWSER_COLORS: ColorPair = ColorPair::new(Color::White, Color::Cyan);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum LaunchError {
    #[error("no free window slot")]
    WindowSlots,
    #[error("application instance pool is full")]
    InstancePool,
}

/// Aggregate of window manager, registry, application pools, and file store.
///
/// Constructed once at startup and threaded through the event loop; there is
/// no hidden global state. All mutation happens on the single event thread.
pub struct Desktop {
    pub windows: WindowManager,
    pub store: FileStore,
    pub(crate) registry: AppRegistry,
    pub(crate) apps: AppPools,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new()
    }
}

impl Desktop {
    pub fn new() -> Self {
        Self {
            windows: WindowManager::default(),
            store: FileStore::new(),
            registry: AppRegistry::new(),
            apps: AppPools::new(),
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Launches a calculator: staggered window, pool slot, binding, focus.
    pub fn launch_calculator(&mut self) -> Result<WindowId, LaunchError> {
        let offset = self.apps.calculators.live() as u16 * 2;
        let handle = self
            .apps
            .calculators
            .insert(Calculator::new())
            .ok_or(LaunchError::InstancePool)?;
        let window = match self.windows.create_window(
            10 + offset,
            5 + offset,
            28,
            12,
            " Calculator ",
            CALCULATOR_COLORS,
        ) {
            Ok(window) => window,
            Err(_) => {
                self.apps.calculators.remove(handle);
                return Err(LaunchError::WindowSlots);
            }
        };
        self.bind(window, AppBinding::Calculator(handle));
        Ok(window)
    }

    pub fn launch_notepad(&mut self) -> Result<WindowId, LaunchError> {
        let offset = self.apps.notepads.live() as u16 * 2;
        let handle = self
            .apps
            .notepads
            .insert(Notepad::new())
            .ok_or(LaunchError::InstancePool)?;
        let window = match self.windows.create_window(
            15 + offset,
            8 + offset,
            50,
            15,
            " Notepad ",
            NOTEPAD_COLORS,
        ) {
            Ok(window) => window,
            Err(_) => {
                self.apps.notepads.remove(handle);
                return Err(LaunchError::WindowSlots);
            }
        };
        self.bind(window, AppBinding::Notepad(handle));
        Ok(window)
    }

    pub fn launch_terminal(&mut self) -> Result<WindowId, LaunchError> {
        let offset = self.apps.terminals.live() as u16 * 2;
        let handle = self
            .apps
            .terminals
            .insert(Terminal::new())
            .ok_or(LaunchError::InstancePool)?;
        let window = match self.windows.create_window(
            8 + offset,
            4 + offset,
            60,
            18,
            " Terminal ",
            TERMINAL_COLORS,
        ) {
            Ok(window) => window,
            Err(_) => {
                self.apps.terminals.remove(handle);
                return Err(LaunchError::WindowSlots);
            }
        };
        self.bind(window, AppBinding::Terminal(handle));
        Ok(window)
    }

    pub fn launch_file_browser(&mut self) -> Result<WindowId, LaunchError> {
        let offset = self.apps.file_browsers.live() as u16 * 2;
        let handle = self
            .apps
            .file_browsers
            .insert(FileBrowser::new(&self.store))
            .ok_or(LaunchError::InstancePool)?;
        let window = match self.windows.create_window(
            12 + offset,
            6 + offset,
            55,
            18,
            " File Manager ",
            BROWSER_COLORS,
        ) {
            Ok(window) => window,
            Err(_) => {
                self.apps.file_browsers.remove(handle);
                return Err(LaunchError::WindowSlots);
            }
        };
        self.bind(window, AppBinding::FileBrowser(handle));
        Ok(window)
    }

    fn bind(&mut self, window: WindowId, binding: AppBinding) {
        self.registry.register(window, binding);
        self.sync_window(window, binding);
        self.windows.focus_window(window);
    }

    /// Opens a stored file in a fresh notepad, the one cross-application
    /// operation. Empty or missing payloads leave the new notepad blank and
    /// unbound (kept from the original behavior).
    pub fn open_in_editor(&mut self, name: &str) -> Result<WindowId, LaunchError> {
        let window = self.launch_notepad()?;
        let bytes = self
            .store
            .read(name)
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default();
        if !bytes.is_empty() {
            if let Some(AppBinding::Notepad(handle)) = self.registry.lookup(window) {
                if let Some(notepad) = self.apps.notepads.get_mut(handle) {
                    notepad.load(name, &bytes);
                }
                self.sync_window(window, AppBinding::Notepad(handle));
            }
        }
        Ok(window)
    }

    /// Closes the focused window and frees its application instance.
    pub fn close_focused(&mut self) {
        let Some(window) = self.windows.focused() else {
            return;
        };
        if let Some(binding) = self.registry.unregister(window) {
            self.apps.release(binding);
        }
        self.windows.close_window(window);
    }

    /// Bulk teardown of every window and application instance.
    pub fn close_all(&mut self) {
        for entry in self.registry.take_all() {
            self.apps.release(entry.binding);
        }
        self.windows.close_all_windows();
    }

    /// Rebuilds one window's text buffer from its bound application
    /// (full-buffer replace; text never accumulates across renders).
    pub(crate) fn sync_window(&mut self, window: WindowId, binding: AppBinding) {
        let Some(lines) = self.apps.render(binding) else {
            return;
        };
        self.windows.clear_window_text(window);
        for line in &lines {
            self.windows.add_window_text(window, line);
        }
    }

    /// Refreshes every live file browser and its window text; called by the
    /// router when the store revision moves.
    pub(crate) fn refresh_file_browsers(&mut self) {
        self.apps.refresh_file_browsers(&self.store);
        let browser_entries: Vec<_> = self
            .registry
            .entries()
            .iter()
            .filter(|entry| matches!(entry.binding, AppBinding::FileBrowser(_)))
            .copied()
            .collect();
        for entry in browser_entries {
            self.sync_window(entry.window, entry.binding);
        }
    }

    /// Composes the backdrop and every window onto the sink. Row 0 is left
    /// untouched for the external menu overlay.
    pub fn draw(&self, sink: &mut dyn DisplaySink) {
        let columns = sink.columns();
        let rows = sink.rows();
        fill_rect(sink, 0, 1, columns, rows.saturating_sub(1), ' ', DESKTOP_FILL);

        put_str(sink, 2, 2, "[Calc]", ICON_COLORS);
        put_str(sink, 2, 4, "[Note]", ICON_COLORS);
        put_str(sink, 2, 6, "[Term]", ICON_COLORS);
        put_str(sink, 2, 8, "[File]", ICON_COLORS);

        let hint_row = rows.saturating_sub(1);
        if self.windows.move_mode() {
            put_str(
                sink,
                2,
                hint_row,
                "MOVE MODE - Arrows to move, F5 to exit",
                MOVE_HINT_COLORS,
            );
        } else {
            put_str(
                sink,
                2,
                hint_row,
                "F1:Menu TAB:Switch F4:Close F5:Move",
                HINT_COLORS,
            );
        }

        self.windows.draw_all_windows(sink);
    }
}
