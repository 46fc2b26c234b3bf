//! Window-to-application bindings.

use crate::apps::AppBinding;
use crate::logging::log_debug;
use crate::wm::WindowId;

/// Binding table capacity; matches the window manager's slot count so every
/// window can carry an application.
pub const MAX_APP_WINDOWS: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegistryEntry {
    pub window: WindowId,
    pub binding: AppBinding,
}

/// Non-owning association between windows and application instances.
///
/// Semantics:
/// - A window id appears in at most one entry.
/// - Inserting past capacity silently drops the binding; the app stays
///   alive but unreachable by input.
/// - Entries are removed before their window closes; removal compacts by
///   swap, so order among the remaining entries is not significant.
#[derive(Default)]
pub struct AppRegistry {
    entries: Vec<RegistryEntry>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, window: WindowId, binding: AppBinding) {
        if self.entries.len() >= MAX_APP_WINDOWS {
            log_debug(&format!(
                "registry full; dropping {} binding for window {}",
                binding.kind_name(),
                window.index()
            ));
            return;
        }
        self.entries.push(RegistryEntry { window, binding });
    }

    pub fn lookup(&self, window: WindowId) -> Option<AppBinding> {
        self.entries
            .iter()
            .find(|entry| entry.window == window)
            .map(|entry| entry.binding)
    }

    pub fn unregister(&mut self, window: WindowId) -> Option<AppBinding> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.window == window)?;
        Some(self.entries.swap_remove(index).binding)
    }

    /// Drains every entry (bulk teardown).
    pub fn take_all(&mut self) -> Vec<RegistryEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppRegistry, MAX_APP_WINDOWS};
    use crate::apps::AppBinding;
    use crate::render::ColorPair;
    use crate::wm::WindowManager;

    fn binding() -> AppBinding {
        let mut pool = crate::core::pool::Pool::with_capacity(1);
        AppBinding::Calculator(pool.insert(crate::apps::Calculator::new()).unwrap())
    }

    #[test]
    fn register_lookup_unregister_round_trip() {
        let mut wm = WindowManager::default();
        let window = wm.create_window(0, 1, 4, 3, "w", ColorPair::default()).unwrap();
        let mut registry = AppRegistry::new();

        let bound = binding();
        registry.register(window, bound);
        assert_eq!(registry.lookup(window), Some(bound));
        assert_eq!(registry.unregister(window), Some(bound));
        assert_eq!(registry.lookup(window), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn inserts_past_capacity_are_dropped() {
        let mut wm = WindowManager::default();
        let mut registry = AppRegistry::new();
        let mut windows = Vec::new();
        for i in 0..MAX_APP_WINDOWS {
            windows.push(
                wm.create_window(0, 1, 4, 3, &format!("w{i}"), ColorPair::default())
                    .unwrap(),
            );
        }
        for window in &windows {
            registry.register(*window, binding());
        }
        assert_eq!(registry.len(), MAX_APP_WINDOWS);

        // The table is full; this binding is silently dropped.
        registry.register(windows[0], binding());
        assert_eq!(registry.len(), MAX_APP_WINDOWS);
    }
}
