//! # Copy Workflow
//!
//! The clipboard copy state machine and the types it is driven with.

pub mod handler;
pub mod operation;
pub mod state;
pub mod task;

pub use handler::{CopyHandler, CopyView};
pub use operation::{CopyOperation, HeaderCopy, RangesCopy};
pub use state::{Animation, ButtonState, CopyState};
pub use task::{CopyMessage, FetchOutcome, HideTimer, PendingFetch};
