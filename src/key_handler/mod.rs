//! # Key Handlers
//!
//! Pluggable units that react to key-down events on a grid. Handlers are
//! composed in a [`KeyHandlerRegistry`] and offered each event in ascending
//! [`KeyHandler::order`]; the first one to consume the event wins.
//!
//! ## Ordering
//!
//! - Orders below [`BUILT_IN_ORDER_LIMIT`] are reserved for the grid's own
//!   handlers.
//! - Handlers that do not override `order()` get [`DEFAULT_ORDER`], so
//!   user-supplied handlers run after the built-in ones.

pub mod copy_key_handler;
pub mod registry;

pub use copy_key_handler::CopyKeyHandler;
pub use registry::KeyHandlerRegistry;

use crossterm::event::KeyEvent;

/// Order used when a handler does not choose one
pub const DEFAULT_ORDER: i32 = 5000;

/// Orders below this value belong to built-in handlers
pub const BUILT_IN_ORDER_LIMIT: i32 = 1000;

/// A unit that can handle key-down events on a grid
///
/// `G` is the grid context the handler inspects and acts on.
pub trait KeyHandler<G: ?Sized>: Send + Sync {
    /// Dispatch priority; lower values run first
    fn order(&self) -> i32 {
        DEFAULT_ORDER
    }

    /// Handle a key-down event
    ///
    /// Returns `true` when the event was consumed. The dispatcher then stops
    /// offering it to later handlers and the host suppresses any default
    /// behavior for the key.
    fn on_down(&self, event: &KeyEvent, grid: &mut G) -> bool;

    /// Handler name for debugging and logging
    fn name(&self) -> &'static str;
}
