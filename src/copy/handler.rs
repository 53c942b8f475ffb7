//! # Copy Handler
//!
//! Drives one copy-to-clipboard cycle at a time for a grid:
//!
//! ```text
//!   set_operation ──▶ start_copy ──┬─▶ Done (preset error) ──▶ hide timer
//!                                  ├─▶ ConfirmationRequired ──(copy click)──┐
//!                                  └─▶ start_fetch ◀───────────────────────┘
//!                                        │
//!                 ┌──────────────────────┼────────────────────────┐
//!             canceled               failed                  completed
//!             (silent)          FetchError/Retry     clipboard ok ─▶ Done ─▶ hide timer
//!                                                    clipboard err ─▶ ClickRequired
//! ```
//!
//! The fetch and the hide timer run as tokio tasks. Their results come back
//! through an internal channel and are applied by [`CopyHandler::process_pending`]
//! or [`CopyHandler::process_next`], so all state changes happen on the task
//! that owns the handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use super::operation::{CopyOperation, HeaderCopy, RangesCopy};
use super::state::{
    Animation, ButtonState, CopyState, CLIPBOARD_PERMISSION_MESSAGE, INVALID_HEADER_MESSAGE,
};
use super::task::{CopyMessage, FetchOutcome, HideTimer, PendingFetch};
use crate::clipboard::Clipboard;
use crate::config::CopyConfig;
use crate::grid::{
    display_formatter, plain_formatter, resolve_model_index, resolve_model_ranges,
    subtract_columns, GridModel,
};

/// Display properties of the copy UI at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyView {
    pub is_shown: bool,
    pub animation: Animation,
    pub message: Option<String>,
    pub button_label: &'static str,
    pub is_button_enabled: bool,
    pub copy_state: CopyState,
}

/// State machine for the grid copy workflow
pub struct CopyHandler {
    model: Arc<dyn GridModel>,
    clipboard: Box<dyn Clipboard>,
    config: CopyConfig,

    operation: Option<Arc<CopyOperation>>,
    copy_state: CopyState,
    button_state: ButtonState,
    is_shown: bool,
    animation: Animation,
    error: Option<String>,
    /// Text from the last successful fetch, reused by manual copy clicks
    text_data: Option<String>,

    fetch: Option<PendingFetch>,
    hide_timer: Option<HideTimer>,
    next_task_id: u64,

    message_sender: mpsc::UnboundedSender<CopyMessage>,
    message_receiver: mpsc::UnboundedReceiver<CopyMessage>,
}

impl CopyHandler {
    pub fn new(model: Arc<dyn GridModel>, clipboard: Box<dyn Clipboard>) -> Self {
        Self::with_config(model, clipboard, CopyConfig::default())
    }

    pub fn with_config(
        model: Arc<dyn GridModel>,
        clipboard: Box<dyn Clipboard>,
        config: CopyConfig,
    ) -> Self {
        let (message_sender, message_receiver) = mpsc::unbounded_channel();
        tracing::debug!(
            "Creating CopyHandler ({} clipboard, threshold {} rows, hide after {:?})",
            clipboard.name(),
            config.confirmation_threshold,
            config.hide_delay
        );
        Self {
            model,
            clipboard,
            config,
            operation: None,
            copy_state: CopyState::Idle,
            button_state: ButtonState::Copy,
            is_shown: false,
            animation: Animation::Exit,
            error: None,
            text_data: None,
            fetch: None,
            hide_timer: None,
            next_task_id: 0,
            message_sender,
            message_receiver,
        }
    }

    // ========================================
    // Exposed surface
    // ========================================

    pub fn operation(&self) -> Option<&Arc<CopyOperation>> {
        self.operation.as_ref()
    }

    pub fn copy_state(&self) -> CopyState {
        self.copy_state
    }

    pub fn button_state(&self) -> ButtonState {
        self.button_state
    }

    pub fn is_shown(&self) -> bool {
        self.is_shown
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.fetch.is_some()
    }

    pub fn has_hide_timer(&self) -> bool {
        self.hide_timer.is_some()
    }

    pub fn status_message(&self) -> Option<String> {
        let row_count = self
            .operation
            .as_ref()
            .map(|op| op.row_count())
            .unwrap_or(0);
        self.copy_state.message(row_count, self.error.as_deref())
    }

    pub fn button_label(&self) -> &'static str {
        self.button_state.label()
    }

    /// The button does nothing while hidden, while a fetch is running, or
    /// once the cycle is done
    pub fn is_button_enabled(&self) -> bool {
        self.is_shown && !self.copy_state.is_fetching() && self.copy_state != CopyState::Done
    }

    pub fn view(&self) -> CopyView {
        CopyView {
            is_shown: self.is_shown,
            animation: self.animation,
            message: self.status_message(),
            button_label: self.button_label(),
            is_button_enabled: self.is_button_enabled(),
            copy_state: self.copy_state,
        }
    }

    // ========================================
    // Triggers
    // ========================================

    /// Supply the current copy operation
    ///
    /// A new cycle starts only when `operation` is a different `Arc` than the
    /// one already held (or the presence of an operation changes).
    pub fn set_operation(&mut self, operation: Option<Arc<CopyOperation>>) {
        let unchanged = match (&self.operation, &operation) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            tracing::trace!("CopyHandler: operation unchanged, ignoring");
            return;
        }

        self.operation = operation;
        self.start_copy();
    }

    /// Begin a copy cycle for the current operation
    pub fn start_copy(&mut self) {
        self.stop_fetch();
        self.stop_hide_timer();
        self.text_data = None;
        self.error = None;

        let Some(operation) = self.operation.clone() else {
            tracing::debug!("CopyHandler: no operation, hiding");
            self.hide();
            return;
        };

        if let Some(error) = operation.error() {
            tracing::info!("CopyHandler: operation rejected by caller: {}", error);
            self.error = Some(error.to_string());
            self.set_state(CopyState::Done, ButtonState::Copy);
            self.show();
            self.start_hide_timer();
            return;
        }

        self.show();
        self.button_state = ButtonState::Copy;

        if let CopyOperation::Ranges(ranges) = operation.as_ref() {
            let row_count = crate::grid::row_count(&ranges.ranges);
            if row_count > self.config.confirmation_threshold {
                tracing::info!(
                    "CopyHandler: {} rows exceeds threshold {}, asking for confirmation",
                    row_count,
                    self.config.confirmation_threshold
                );
                self.set_state(CopyState::ConfirmationRequired, ButtonState::Copy);
                return;
            }
        }

        self.start_fetch();
    }

    /// Copy/retry button
    pub fn handle_copy_click(&mut self) {
        if !self.is_button_enabled() {
            tracing::debug!("CopyHandler: copy click ignored in {:?}", self.copy_state);
            return;
        }

        match self.text_data.clone() {
            Some(text) => {
                tracing::debug!("CopyHandler: copying cached text on click");
                match self.clipboard.write_text(&text) {
                    Ok(()) => self.copy_succeeded(),
                    Err(e) => {
                        tracing::warn!("CopyHandler: clipboard write failed on click: {}", e);
                        self.error = Some(CLIPBOARD_PERMISSION_MESSAGE.to_string());
                    }
                }
            }
            None => self.start_fetch(),
        }
    }

    /// Cancel button: abandon the cycle and hide immediately
    pub fn handle_cancel_click(&mut self) {
        tracing::debug!("CopyHandler: cancel clicked in {:?}", self.copy_state);
        self.stop_fetch();
        self.stop_hide_timer();
        self.hide();
    }

    /// Click outside the copy UI; only dismisses a finished cycle
    pub fn handle_background_click(&mut self) {
        if self.copy_state == CopyState::Done {
            self.stop_hide_timer();
            self.hide();
        }
    }

    /// Cancel all outstanding work and drop cached text
    pub fn dispose(&mut self) {
        self.stop_fetch();
        self.stop_hide_timer();
        self.text_data = None;
    }

    // ========================================
    // Message pump
    // ========================================

    /// Apply every message that is already waiting; returns how many there were
    pub fn process_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(message) = self.message_receiver.try_recv() {
            self.handle_message(message);
            count += 1;
        }
        count
    }

    /// Wait for the next message from an outstanding fetch or timer and apply it
    ///
    /// Returns `false` without waiting when there is no outstanding work and
    /// nothing queued.
    pub async fn process_next(&mut self) -> bool {
        if self.fetch.is_none() && self.hide_timer.is_none() {
            return self.process_pending() > 0;
        }
        match self.message_receiver.recv().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }

    fn handle_message(&mut self, message: CopyMessage) {
        match message {
            CopyMessage::FetchFinished { id, outcome } => {
                if self.fetch.as_ref().map(PendingFetch::id) != Some(id) {
                    tracing::trace!("CopyHandler: ignoring result of stale fetch {}", id);
                    return;
                }
                self.fetch = None;
                self.fetch_finished(outcome);
            }
            CopyMessage::HideTimerElapsed { id } => {
                if self.hide_timer.as_ref().map(HideTimer::id) != Some(id) {
                    tracing::trace!("CopyHandler: ignoring stale hide timer {}", id);
                    return;
                }
                self.hide_timer = None;
                tracing::debug!("CopyHandler: hide timer elapsed");
                self.hide();
            }
        }
    }

    // ========================================
    // Fetch stage
    // ========================================

    fn start_fetch(&mut self) {
        self.stop_fetch();
        self.stop_hide_timer();
        self.error = None;

        let Some(operation) = self.operation.clone() else {
            return;
        };

        match operation.as_ref() {
            CopyOperation::Header(header) => self.start_header_fetch(header),
            CopyOperation::Ranges(ranges) => self.start_ranges_fetch(ranges),
        }
    }

    fn start_header_fetch(&mut self, header: &HeaderCopy) {
        self.set_state(CopyState::FetchHeaderInProgress, ButtonState::FetchInProgress);

        let model_index = resolve_model_index(header.column_index, &header.moved_columns);
        let Some(text) = self
            .model
            .text_for_column_header(model_index, header.column_depth)
        else {
            tracing::warn!(
                "CopyHandler: no header at column {} depth {}",
                model_index,
                header.column_depth
            );
            self.error = Some(INVALID_HEADER_MESSAGE.to_string());
            self.set_state(CopyState::Done, ButtonState::Copy);
            self.start_hide_timer();
            return;
        };

        let id = self.next_id();
        tracing::debug!("CopyHandler: fetch {} for header {}", id, model_index);
        self.fetch = Some(PendingFetch::spawn(
            id,
            async move { Ok::<_, anyhow::Error>(text) },
            self.message_sender.clone(),
        ));
    }

    fn start_ranges_fetch(&mut self, op: &RangesCopy) {
        self.set_state(CopyState::FetchRangesInProgress, ButtonState::FetchInProgress);

        let mut model_ranges = resolve_model_ranges(&op.ranges, &op.moved_columns);
        let hidden_columns = op.hidden_columns();
        if !hidden_columns.is_empty() {
            model_ranges = subtract_columns(&model_ranges, &hidden_columns);
        }

        let formatter = if op.format_values {
            display_formatter(Arc::clone(&self.model))
        } else {
            plain_formatter()
        };

        let id = self.next_id();
        tracing::debug!(
            "CopyHandler: fetch {} for {} model ranges (headers: {}, formatted: {})",
            id,
            model_ranges.len(),
            op.include_headers,
            op.format_values
        );

        let model = Arc::clone(&self.model);
        let include_headers = op.include_headers;
        self.fetch = Some(PendingFetch::spawn(
            id,
            async move {
                model
                    .text_snapshot(model_ranges, include_headers, formatter)
                    .await
            },
            self.message_sender.clone(),
        ));
    }

    fn fetch_finished(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Canceled => {
                tracing::debug!("CopyHandler: fetch canceled");
            }
            FetchOutcome::Failed(message) => {
                tracing::error!("CopyHandler: fetch failed: {}", message);
                self.set_state(CopyState::FetchError, ButtonState::Retry);
            }
            FetchOutcome::Completed(text) => {
                tracing::debug!("CopyHandler: fetched {} characters", text.len());
                let result = self.clipboard.write_text(&text);
                self.text_data = Some(text);
                match result {
                    Ok(()) => self.copy_succeeded(),
                    Err(e) => {
                        tracing::warn!(
                            "CopyHandler: clipboard write failed, waiting for click: {}",
                            e
                        );
                        self.set_state(CopyState::ClickRequired, ButtonState::ClickToCopy);
                    }
                }
            }
        }
    }

    // ========================================
    // Transitions
    // ========================================

    fn copy_succeeded(&mut self) {
        tracing::info!("CopyHandler: copied to clipboard");
        self.error = None;
        self.set_state(CopyState::Done, ButtonState::Copy);
        self.animation = Animation::Flash;
        self.start_hide_timer();
    }

    fn set_state(&mut self, copy_state: CopyState, button_state: ButtonState) {
        if self.copy_state != copy_state {
            tracing::debug!(
                "CopyHandler: {:?} -> {:?}",
                self.copy_state,
                copy_state
            );
        }
        self.copy_state = copy_state;
        self.button_state = button_state;
    }

    fn show(&mut self) {
        self.is_shown = true;
        self.animation = Animation::Enter;
    }

    fn hide(&mut self) {
        self.is_shown = false;
        self.animation = Animation::Exit;
        self.set_state(CopyState::Idle, ButtonState::Copy);
    }

    fn start_hide_timer(&mut self) {
        self.stop_hide_timer();
        let id = self.next_id();
        self.hide_timer = Some(HideTimer::start(
            id,
            self.config.hide_delay,
            self.message_sender.clone(),
        ));
    }

    fn stop_hide_timer(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            timer.cancel();
        }
    }

    fn stop_fetch(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            fetch.cancel();
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_task_id += 1;
        self.next_task_id
    }
}

impl Drop for CopyHandler {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for CopyHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyHandler")
            .field("copy_state", &self.copy_state)
            .field("button_state", &self.button_state)
            .field("is_shown", &self.is_shown)
            .field("error", &self.error)
            .field("has_text", &self.text_data.is_some())
            .field("fetch", &self.fetch.as_ref().map(PendingFetch::id))
            .field("hide_timer", &self.hide_timer.as_ref().map(HideTimer::id))
            .finish()
    }
}
