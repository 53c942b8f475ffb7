//! # gridcopy - Grid Copy Workflow and Key Handling
//!
//! Control logic for copying data out of an interactive data grid.
//! Rendering is left to the host; this crate decides what the copy UI
//! shows and when.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  key down   ┌──────────────────┐  CopyOperation  ┌─────────────┐
//! │  Host grid  │────────────▶│ KeyHandlerRegistry│───────────────▶│ CopyHandler │
//! │             │             │  - CopyKeyHandler │  (GridContext)  │             │
//! │ - Rendering │◀────────────┴──────────────────┘                 │ - fetch     │
//! │ - Input     │           status / button / visibility           │ - clipboard │
//! └─────────────┘◀─────────────────────────────────────────────────│ - hide timer│
//!                                                                   └──────┬──────┘
//!                                                                          │ text_snapshot
//!                                                                          ▼
//!                                                                   ┌─────────────┐
//!                                                                   │  GridModel  │
//!                                                                   └─────────────┘
//! ```

pub mod clipboard;
pub mod cmd_args;
pub mod config;
pub mod copy;
pub mod format;
pub mod grid;
pub mod key_handler;

// Re-export main types for easy access
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::CopyConfig;
pub use copy::{CopyHandler, CopyOperation, CopyState, HeaderCopy, RangesCopy};
pub use grid::{GridContext, GridModel, GridRange, MemoryGridModel, MovedColumn};
pub use key_handler::{CopyKeyHandler, KeyHandler, KeyHandlerRegistry};
