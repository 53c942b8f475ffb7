//! # Copy Tasks
//!
//! Owned handles for the asynchronous work a copy cycle starts: the text
//! fetch and the auto-hide timer. Both run as tokio tasks and report back
//! over the handler's channel, tagged with the id of the handle that
//! started them so results from cancelled work can be told apart.
//!
//! Dropping a handle cancels its task; cancelling twice is a no-op.

use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How a fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Completed(String),
    Failed(String),
    /// The fetch was abandoned; not an error
    Canceled,
}

/// Messages delivered to the handler by its tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyMessage {
    FetchFinished { id: u64, outcome: FetchOutcome },
    HideTimerElapsed { id: u64 },
}

/// An in-flight, cancelable text fetch
#[derive(Debug)]
pub struct PendingFetch {
    id: u64,
    token: CancellationToken,
}

impl PendingFetch {
    /// Spawn `fetch` and report its outcome on `sender`
    pub fn spawn<F>(id: u64, fetch: F, sender: mpsc::UnboundedSender<CopyMessage>) -> Self
    where
        F: Future<Output = Result<String>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = cancelled.cancelled() => FetchOutcome::Canceled,
                result = fetch => match result {
                    Ok(text) => FetchOutcome::Completed(text),
                    Err(e) => FetchOutcome::Failed(e.to_string()),
                },
            };
            // The handler may already be gone
            let _ = sender.send(CopyMessage::FetchFinished { id, outcome });
        });

        tracing::trace!("Fetch {} spawned", id);
        Self { id, token }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("Cancelling fetch {}", self.id);
            self.token.cancel();
        }
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A one-shot timer that hides the status UI
#[derive(Debug)]
pub struct HideTimer {
    id: u64,
    handle: JoinHandle<()>,
}

impl HideTimer {
    pub fn start(id: u64, delay: Duration, sender: mpsc::UnboundedSender<CopyMessage>) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = sender.send(CopyMessage::HideTimerElapsed { id });
        });
        tracing::trace!("Hide timer {} started ({:?})", id, delay);
        Self { id, handle }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pending_fetch_should_report_completed_text() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _fetch = PendingFetch::spawn(7, async { Ok::<_, anyhow::Error>("a\tb".to_string()) }, sender);

        let message = receiver.recv().await.unwrap();
        assert_eq!(
            message,
            CopyMessage::FetchFinished {
                id: 7,
                outcome: FetchOutcome::Completed("a\tb".to_string())
            }
        );
    }

    #[tokio::test]
    async fn pending_fetch_should_report_failure_text() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _fetch = PendingFetch::spawn(1, async { Err::<String, _>(anyhow::anyhow!("boom")) }, sender);

        let message = receiver.recv().await.unwrap();
        assert_eq!(
            message,
            CopyMessage::FetchFinished {
                id: 1,
                outcome: FetchOutcome::Failed("boom".to_string())
            }
        );
    }

    #[tokio::test]
    async fn cancelled_fetch_should_resolve_as_canceled() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let fetch = PendingFetch::spawn(3, std::future::pending::<Result<String>>(), sender);
        fetch.cancel();
        fetch.cancel();

        let message = receiver.recv().await.unwrap();
        assert_eq!(
            message,
            CopyMessage::FetchFinished {
                id: 3,
                outcome: FetchOutcome::Canceled
            }
        );
    }

    #[tokio::test]
    async fn dropping_fetch_should_cancel_it() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        drop(PendingFetch::spawn(4, std::future::pending::<Result<String>>(), sender));

        let message = receiver.recv().await.unwrap();
        assert!(matches!(
            message,
            CopyMessage::FetchFinished {
                outcome: FetchOutcome::Canceled,
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn hide_timer_should_fire_after_delay() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();
        let _timer = HideTimer::start(9, Duration::from_millis(3000), sender);

        let message = receiver.recv().await.unwrap();
        assert_eq!(message, CopyMessage::HideTimerElapsed { id: 9 });
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_hide_timer_should_never_fire() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let timer = HideTimer::start(2, Duration::from_millis(3000), sender);
        timer.cancel();
        drop(timer);

        // Sender is dropped with the aborted task, closing the channel
        assert_eq!(receiver.recv().await, None);
    }
}
