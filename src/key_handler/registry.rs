//! # Key Handler Registry
//!
//! Keeps handlers sorted by order and offers each key-down event to them in
//! turn until one consumes it.

use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::Arc;

use super::KeyHandler;

// Type alias for shared handler trait objects
type KeyHandlerArc<G> = Arc<dyn KeyHandler<G>>;

pub struct KeyHandlerRegistry<G: ?Sized> {
    handlers: Vec<KeyHandlerArc<G>>,
}

impl<G: ?Sized> KeyHandlerRegistry<G> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Add a handler, keeping handlers sorted by order
    ///
    /// Handlers with equal order run in registration order.
    pub fn register(&mut self, handler: KeyHandlerArc<G>) {
        let order = handler.order();
        let position = self
            .handlers
            .partition_point(|existing| existing.order() <= order);
        tracing::debug!(
            "Registering key handler {} (order {}) at position {}",
            handler.name(),
            order,
            position
        );
        self.handlers.insert(position, handler);
    }

    /// Offer a key event to each handler until one consumes it
    ///
    /// Only key-down (press and repeat) events are dispatched.
    pub fn handle_key_down(&self, event: &KeyEvent, grid: &mut G) -> bool {
        if event.kind == KeyEventKind::Release {
            return false;
        }

        for handler in &self.handlers {
            if handler.on_down(event, grid) {
                tracing::debug!("Key {:?} consumed by {}", event.code, handler.name());
                return true;
            }
        }

        tracing::trace!("No key handler consumed {:?}", event.code);
        false
    }

    /// Registered handlers in dispatch order
    pub fn handlers(&self) -> &[KeyHandlerArc<G>] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<G: ?Sized> Default for KeyHandlerRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}
