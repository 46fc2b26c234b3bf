//! Blocking event loop.

use crate::core::input::EventSource;
use crate::render::DisplaySink;
use crate::runtime::desktop::Desktop;
use crate::runtime::router;

/// Drives the desktop until the event source is exhausted.
///
/// Draws once up front, then blocks on `next_key`; there is no polling and
/// no background work, and every event runs to completion before the next
/// one is considered. Handled events recompose the whole display.
pub fn run(desktop: &mut Desktop, source: &mut dyn EventSource, sink: &mut dyn DisplaySink) {
    desktop.draw(sink);
    sink.present();

    while let Some(key) = source.next_key() {
        if router::handle_key(desktop, key) {
            desktop.draw(sink);
            sink.present();
        }
    }
}
