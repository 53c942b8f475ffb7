//! Copy the grid selection with Ctrl+C

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::KeyHandler;
use crate::grid::GridContext;

/// Queues a copy of the current selection
///
/// - `Ctrl+C`: copy values only
/// - `Ctrl+Shift+C`: copy values with column headers
#[derive(Debug, Default)]
pub struct CopyKeyHandler;

impl CopyKeyHandler {
    pub const ORDER: i32 = 100;

    pub fn new() -> Self {
        Self
    }
}

impl KeyHandler<GridContext> for CopyKeyHandler {
    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn on_down(&self, event: &KeyEvent, grid: &mut GridContext) -> bool {
        let is_copy_key = matches!(event.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
            && !event.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER);
        if !is_copy_key {
            return false;
        }

        let include_headers = event.modifiers.contains(KeyModifiers::SHIFT);
        grid.copy_selection(include_headers)
    }

    fn name(&self) -> &'static str {
        "CopyKeyHandler"
    }
}
