//! Input routing: global keys, app dispatch, cross-application opens.

use crate::apps::AppRequest;
use crate::core::input::Key;
use crate::logging::log_debug;
use crate::runtime::desktop::Desktop;

/// Routes one key event. Returns whether the display needs recomposition.
///
/// Global keys (Tab: cycle focus, F4: close focused, F5: move mode) are
/// consumed here; everything else goes to the focused window's application.
/// With no focused window, non-global keys are dropped.
pub fn handle_key(desktop: &mut Desktop, key: Key) -> bool {
    if desktop.windows.move_mode() {
        return handle_move_mode_key(desktop, key);
    }

    match key {
        Key::Tab => {
            desktop.windows.cycle_focus();
            true
        }
        Key::Function(4) => {
            desktop.close_focused();
            true
        }
        Key::Function(5) => {
            desktop.windows.set_move_mode(true);
            true
        }
        _ => dispatch_to_focused(desktop, key),
    }
}

fn handle_move_mode_key(desktop: &mut Desktop, key: Key) -> bool {
    match key {
        Key::Function(5) | Key::Escape => {
            desktop.windows.set_move_mode(false);
            true
        }
        Key::Up => desktop.windows.move_focused(0, -1),
        Key::Down => desktop.windows.move_focused(0, 1),
        Key::Left => desktop.windows.move_focused(-1, 0),
        Key::Right => desktop.windows.move_focused(1, 0),
        _ => false,
    }
}

fn dispatch_to_focused(desktop: &mut Desktop, key: Key) -> bool {
    let Some(window) = desktop.windows.focused() else {
        return false;
    };
    let Some(binding) = desktop.registry.lookup(window) else {
        return false;
    };

    let revision_before = desktop.store.revision();
    let request = desktop.apps.handle_key(binding, &mut desktop.store, key);
    desktop.sync_window(window, binding);

    if let Some(AppRequest::OpenFile(name)) = request {
        if let Err(error) = desktop.open_in_editor(&name) {
            log_debug(&format!("dropped open request for {name}: {error}"));
        }
    }

    if desktop.store.revision() != revision_before {
        desktop.refresh_file_browsers();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::handle_key;
    use crate::core::input::Key;
    use crate::runtime::desktop::Desktop;

    fn type_str(desktop: &mut Desktop, text: &str) {
        for c in text.chars() {
            handle_key(desktop, Key::Char(c));
        }
    }

    #[test]
    fn keys_reach_the_focused_application_only() {
        let mut desktop = Desktop::new();
        let calc = desktop.launch_calculator().unwrap();
        let pad = desktop.launch_notepad().unwrap();

        type_str(&mut desktop, "abc");
        handle_key(&mut desktop, Key::Tab);
        assert_eq!(desktop.windows.focused(), Some(calc));
        type_str(&mut desktop, "12");

        let calc_lines = desktop.windows.window(calc).unwrap().lines();
        assert!(calc_lines.iter().any(|line| line == "Display: 12"));
        let pad_lines = desktop.windows.window(pad).unwrap().lines();
        assert!(pad_lines.iter().any(|line| line == "abc_"));
    }

    #[test]
    fn keys_with_no_focus_are_dropped() {
        let mut desktop = Desktop::new();
        assert!(!handle_key(&mut desktop, Key::Char('x')));
    }

    #[test]
    fn f4_closes_the_focused_window() {
        let mut desktop = Desktop::new();
        desktop.launch_calculator().unwrap();
        let pad = desktop.launch_notepad().unwrap();
        assert_eq!(desktop.windows.focused(), Some(pad));

        handle_key(&mut desktop, Key::Function(4));
        assert_eq!(desktop.windows.active_count(), 1);
        assert_ne!(desktop.windows.focused(), Some(pad));
        assert_eq!(desktop.registry().len(), 1);
    }

    #[test]
    fn move_mode_captures_arrows_until_exited() {
        let mut desktop = Desktop::new();
        let calc = desktop.launch_calculator().unwrap();
        let origin = {
            let window = desktop.windows.window(calc).unwrap();
            (window.x(), window.y())
        };

        handle_key(&mut desktop, Key::Function(5));
        assert!(desktop.windows.move_mode());
        handle_key(&mut desktop, Key::Right);
        handle_key(&mut desktop, Key::Down);
        // Printable keys are ignored while moving.
        type_str(&mut desktop, "9");
        handle_key(&mut desktop, Key::Escape);
        assert!(!desktop.windows.move_mode());

        let window = desktop.windows.window(calc).unwrap();
        assert_eq!((window.x(), window.y()), (origin.0 + 1, origin.1 + 1));
        assert!(window.lines().iter().any(|line| line == "Display: 0"));
    }

    #[test]
    fn browser_enter_opens_a_fresh_notepad() {
        let mut desktop = Desktop::new();
        desktop.store.write("a.txt", b"hi\nyo").unwrap();
        let browser = desktop.launch_file_browser().unwrap();

        handle_key(&mut desktop, Key::Enter);
        let focused = desktop.windows.focused().unwrap();
        assert_ne!(focused, browser);
        let lines = desktop.windows.window(focused).unwrap().lines();
        assert!(lines.iter().any(|line| line == "File: a.txt"));
    }

    #[test]
    fn store_mutations_refresh_every_browser_window() {
        let mut desktop = Desktop::new();
        desktop.store.write("a.txt", b"x").unwrap();
        let browser = desktop.launch_file_browser().unwrap();

        // A notepad save mutates the store while the browser is unfocused.
        desktop.launch_notepad().unwrap();
        type_str(&mut desktop, "data");
        handle_key(&mut desktop, Key::Function(2));
        type_str(&mut desktop, "b.txt");
        handle_key(&mut desktop, Key::Enter);

        let lines = desktop.windows.window(browser).unwrap().lines();
        assert!(lines.iter().any(|line| line.contains("b.txt")));
    }

    #[test]
    fn browser_delete_reaches_the_application() {
        let mut desktop = Desktop::new();
        desktop.store.write("a.txt", b"x").unwrap();
        desktop.launch_file_browser().unwrap();

        handle_key(&mut desktop, Key::Delete);
        assert!(!desktop.store.exists("a.txt"));
    }
}
