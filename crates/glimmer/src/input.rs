//! Terminal input plumbing: mouse capture and the virtual scroll position.

use std::io::{self, stdout};

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use glimmer_core::ScrollProgress;

/// Enables mouse and focus reporting for as long as it is alive.
pub struct MouseCapture;

impl MouseCapture {
    pub fn enable() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
        Ok(Self)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    }
}

/// Lines in the virtual page the scroll keys move through.
pub const PAGE_LINES: u32 = 100;

/// Scroll offset within a virtual page of [`PAGE_LINES`] lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: u32,
}

impl ScrollState {
    /// Move by `delta` lines, stopping at either end.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = self.offset as i64 + delta as i64;
        self.offset = next.clamp(0, PAGE_LINES as i64) as u32;
    }

    pub fn to_start(&mut self) {
        self.offset = 0;
    }

    pub fn to_end(&mut self) {
        self.offset = PAGE_LINES;
    }

    pub fn progress(&self) -> ScrollProgress {
        ScrollProgress::from_offset(self.offset as f32, PAGE_LINES as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_stops_at_ends() {
        let mut scroll = ScrollState::default();
        scroll.scroll_by(-5);
        assert_eq!(scroll.offset, 0);
        scroll.scroll_by(250);
        assert_eq!(scroll.offset, PAGE_LINES);
        assert_eq!(scroll.progress(), ScrollProgress::END);
    }

    #[test]
    fn test_scroll_progress() {
        let mut scroll = ScrollState::default();
        assert_eq!(scroll.progress(), ScrollProgress::START);
        scroll.scroll_by(25);
        assert!((scroll.progress().percent() - 25.0).abs() < 1e-4);
        scroll.to_end();
        scroll.scroll_by(-10);
        assert!((scroll.progress().percent() - 90.0).abs() < 1e-4);
        scroll.to_start();
        assert_eq!(scroll.offset, 0);
    }
}
