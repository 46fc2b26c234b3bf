//! File browser: a cached store snapshot with a selection cursor.

use crate::core::input::Key;
use crate::store::FileStore;

use super::AppRequest;

/// File rows visible at once.
const VISIBLE_FILES: usize = 12;

#[derive(Clone, Debug, Eq, PartialEq)]
struct FileRow {
    name: String,
    size: usize,
}

/// Browser over the store's namespace.
///
/// Holds a `(name, size)` snapshot so `render` is a pure read; the snapshot
/// is refreshed after every structural change: its own deletes, and (via the
/// router) any store mutation made by other applications.
#[derive(Debug, Default)]
pub struct FileBrowser {
    files: Vec<FileRow>,
    selected: usize,
}

impl FileBrowser {
    pub fn new(store: &FileStore) -> Self {
        let mut browser = Self {
            files: Vec::new(),
            selected: 0,
        };
        browser.refresh(store);
        browser
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Re-snapshots the store and re-clamps the selection.
    pub fn refresh(&mut self, store: &FileStore) {
        self.files = store
            .list()
            .into_iter()
            .map(|name| {
                let size = store.size(&name).unwrap_or(0);
                FileRow { name, size }
            })
            .collect();
        if self.files.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.files.len() - 1);
        }
    }

    pub fn handle_key(&mut self, store: &mut FileStore, key: Key) -> Option<AppRequest> {
        match key {
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Key::Down => {
                if self.selected + 1 < self.files.len() {
                    self.selected += 1;
                }
                None
            }
            Key::Delete => {
                let name = self.files.get(self.selected).map(|row| row.name.clone());
                if let Some(name) = name {
                    let _ = store.delete(&name);
                    self.refresh(store);
                }
                None
            }
            Key::Enter => self
                .files
                .get(self.selected)
                .map(|row| AppRequest::OpenFile(row.name.clone())),
            _ => None,
        }
    }

    pub fn render(&self) -> Vec<String> {
        let mut out = vec![
            "File Manager".to_string(),
            "--------------------------------".to_string(),
            "UP/DOWN: Navigate  ENTER: Open".to_string(),
            "DELETE: Remove file".to_string(),
            String::new(),
        ];

        if self.files.is_empty() {
            out.push("No files found.".to_string());
            out.push("Create files in Notepad (F2)".to_string());
            return out;
        }

        for (index, row) in self.files.iter().take(VISIBLE_FILES).enumerate() {
            let marker = if index == self.selected { "> " } else { "  " };
            out.push(format!("{marker}{} ({}B)", row.name, row.size));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::FileBrowser;
    use crate::apps::AppRequest;
    use crate::core::input::Key;
    use crate::store::FileStore;

    fn seeded_store() -> FileStore {
        let mut store = FileStore::new();
        store.write("a.txt", b"aa").unwrap();
        store.write("b.txt", b"bbb").unwrap();
        store.write("c.txt", b"c").unwrap();
        store
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut store = seeded_store();
        let mut browser = FileBrowser::new(&store);

        assert_eq!(browser.handle_key(&mut store, Key::Up), None);
        assert_eq!(browser.selected(), 0);

        for _ in 0..10 {
            browser.handle_key(&mut store, Key::Down);
        }
        assert_eq!(browser.selected(), 2);
    }

    #[test]
    fn delete_removes_the_selected_file_and_reclamps() {
        let mut store = seeded_store();
        let mut browser = FileBrowser::new(&store);
        browser.handle_key(&mut store, Key::Down);
        browser.handle_key(&mut store, Key::Down);
        browser.handle_key(&mut store, Key::Delete);

        assert!(!store.exists("c.txt"));
        assert_eq!(browser.file_count(), 2);
        assert_eq!(browser.selected(), 1);
    }

    #[test]
    fn delete_on_an_empty_store_is_a_no_op() {
        let mut store = FileStore::new();
        let mut browser = FileBrowser::new(&store);
        assert_eq!(browser.handle_key(&mut store, Key::Delete), None);
        assert_eq!(browser.file_count(), 0);
    }

    #[test]
    fn enter_requests_the_selected_file() {
        let mut store = seeded_store();
        let mut browser = FileBrowser::new(&store);
        browser.handle_key(&mut store, Key::Down);
        assert_eq!(
            browser.handle_key(&mut store, Key::Enter),
            Some(AppRequest::OpenFile("b.txt".to_string()))
        );
    }

    #[test]
    fn enter_with_no_files_requests_nothing() {
        let mut store = FileStore::new();
        let mut browser = FileBrowser::new(&store);
        assert_eq!(browser.handle_key(&mut store, Key::Enter), None);
    }

    #[test]
    fn render_marks_the_selection_and_sizes() {
        let mut store = seeded_store();
        let mut browser = FileBrowser::new(&store);
        browser.handle_key(&mut store, Key::Down);

        let lines = browser.render();
        assert_eq!(lines[5], "  a.txt (2B)");
        assert_eq!(lines[6], "> b.txt (3B)");
    }

    #[test]
    fn render_reports_an_empty_store() {
        let store = FileStore::new();
        let browser = FileBrowser::new(&store);
        let lines = browser.render();
        assert_eq!(lines[5], "No files found.");
    }

    #[test]
    fn refresh_tracks_external_mutations() {
        let mut store = seeded_store();
        let mut browser = FileBrowser::new(&store);
        store.write("d.txt", b"dddd").unwrap();
        browser.refresh(&store);
        assert_eq!(browser.file_count(), 4);
    }
}
