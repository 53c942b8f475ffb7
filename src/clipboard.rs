//! # Clipboard Module
//!
//! Abstraction over the place copied grid text ends up.
//! Supports both the system clipboard and an in-memory implementation.

use anyhow::Result;
use std::sync::{Arc, Mutex};

/// Trait for clipboard implementations
pub trait Clipboard: Send {
    /// Replace the clipboard content with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Memory-based clipboard
///
/// Clones share the same storage, so a caller can keep a clone to read back
/// what a handler wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any
    pub fn content(&self) -> Option<String> {
        self.content.lock().ok().and_then(|content| content.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        tracing::debug!("Writing {} characters to memory clipboard", text.len());
        let mut content = self
            .content
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock clipboard: {}", e))?;
        *content = Some(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// System clipboard implementation
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("clipboard", &"<system clipboard>")
            .finish()
    }
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new()
            .map_err(|e| anyhow::anyhow!("Failed to access system clipboard: {}", e))?;
        Ok(Self { clipboard })
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        tracing::debug!("Writing {} characters to system clipboard", text.len());
        self.clipboard
            .set_text(text)
            .map_err(|e| anyhow::anyhow!("Failed to set clipboard text: {}", e))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

/// Open the system clipboard, falling back to memory when there is none
/// (headless sessions, missing display server)
pub fn system_or_memory() -> Box<dyn Clipboard> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("{}; copied text will only be kept in memory", e);
            Box::new(MemoryClipboard::new())
        }
    }
}
