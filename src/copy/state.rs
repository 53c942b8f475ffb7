//! # Copy States
//!
//! The state tags of the copy workflow and the text the visual shell shows
//! for each of them.

use crate::format::format_count;

pub const COPIED_MESSAGE: &str = "Copied to Clipboard!";
pub const FETCH_ERROR_MESSAGE: &str = "Unable to copy data.";
pub const FETCH_HEADER_MESSAGE: &str = "Fetching header for clipboard...";
pub const INVALID_HEADER_MESSAGE: &str = "Invalid column header selected.";
pub const CLIPBOARD_PERMISSION_MESSAGE: &str = "Unable to copy. Verify your browser permissions.";

/// Where the current copy cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    ConfirmationRequired,
    FetchRangesInProgress,
    FetchHeaderInProgress,
    FetchError,
    ClickRequired,
    Done,
}

impl CopyState {
    pub fn is_fetching(self) -> bool {
        matches!(
            self,
            CopyState::FetchRangesInProgress | CopyState::FetchHeaderInProgress
        )
    }

    /// Status text for this state
    ///
    /// `error` overrides the default text of the terminal states.
    pub fn message(self, row_count: usize, error: Option<&str>) -> Option<String> {
        let rows = format_count(row_count);
        match self {
            CopyState::Idle => None,
            CopyState::ConfirmationRequired => Some(format!(
                "Are you sure you want to copy {rows} rows to your clipboard?"
            )),
            CopyState::FetchRangesInProgress => {
                Some(format!("Fetching {rows} rows for clipboard..."))
            }
            CopyState::FetchHeaderInProgress => Some(FETCH_HEADER_MESSAGE.to_string()),
            CopyState::FetchError => Some(FETCH_ERROR_MESSAGE.to_string()),
            CopyState::ClickRequired => Some(
                error
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Fetched {rows} rows!")),
            ),
            CopyState::Done => Some(error.unwrap_or(COPIED_MESSAGE).to_string()),
        }
    }
}

/// What the action button does next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Copy,
    FetchInProgress,
    ClickToCopy,
    Retry,
}

impl ButtonState {
    pub fn label(self) -> &'static str {
        match self {
            ButtonState::Copy => "Copy",
            ButtonState::FetchInProgress => "Fetching...",
            ButtonState::ClickToCopy => "Click to Copy",
            ButtonState::Retry => "Retry",
        }
    }
}

/// Transition the shell plays for the status UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    Enter,
    #[default]
    Exit,
    /// A copy cycle just completed successfully
    Flash,
}
