//! Test doubles shared by the integration tests

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use gridcopy::clipboard::Clipboard;
use gridcopy::grid::{CellValue, Column, GridModel, GridRange, ValueFormatter};

/// A snapshot request seen by [`ControlledModel`]
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    pub ranges: Vec<GridRange>,
    pub include_headers: bool,
}

/// Model whose snapshots wait until the test resolves them
#[derive(Default)]
pub struct ControlledModel {
    columns: Vec<Column>,
    headers: Vec<Option<String>>,
    requests: Mutex<Vec<SnapshotRequest>>,
    pending: Mutex<VecDeque<oneshot::Sender<Result<String>>>>,
}

impl ControlledModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            columns: vec![Column::new("A", "string"), Column::new("B", "int")],
            headers: vec![Some("A".into()), None],
            ..Default::default()
        })
    }

    pub fn requests(&self) -> Vec<SnapshotRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Resolve the oldest waiting snapshot
    pub fn resolve(&self, result: Result<String>) {
        let sender = self
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("no snapshot is waiting");
        // The fetch may have been cancelled already
        let _ = sender.send(result);
    }
}

#[async_trait]
impl GridModel for ControlledModel {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        100_000
    }

    fn text_for_column_header(&self, column: usize, depth: usize) -> Option<String> {
        if depth > 0 {
            return None;
        }
        self.headers.get(column).cloned().flatten()
    }

    fn display_string(&self, value: &CellValue, _column_type: &str, _column_name: &str) -> String {
        value.to_string()
    }

    async fn text_snapshot(
        &self,
        ranges: Vec<GridRange>,
        include_headers: bool,
        _formatter: ValueFormatter,
    ) -> Result<String> {
        let (sender, receiver) = oneshot::channel();
        self.requests.lock().unwrap().push(SnapshotRequest {
            ranges,
            include_headers,
        });
        self.pending.lock().unwrap().push_back(sender);
        receiver
            .await
            .map_err(|_| anyhow::anyhow!("snapshot abandoned"))?
    }
}

/// Clipboard that can be told to fail, counting every write attempt
#[derive(Clone, Default)]
pub struct FlakyClipboard {
    fail: Arc<AtomicBool>,
    attempts: Arc<AtomicUsize>,
    content: Arc<Mutex<Option<String>>>,
}

impl FlakyClipboard {
    pub fn failing() -> Self {
        let clipboard = Self::default();
        clipboard.set_failing(true);
        clipboard
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn content(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

impl Clipboard for FlakyClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("clipboard access denied");
        }
        *self.content.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

/// Let spawned tasks run until they block
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
