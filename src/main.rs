//! # gridcopy Main Entry Point
//!
//! Copies part of a JSON data grid to the clipboard, driving the same copy
//! workflow an interactive grid would and printing its status to stderr.

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

use gridcopy::clipboard::{self, Clipboard, MemoryClipboard};
use gridcopy::cmd_args::{CommandLineArgs, Span};
use gridcopy::config::{CopyConfig, LOG_LEVEL_ENV_VAR};
use gridcopy::copy::{CopyHandler, CopyState, CopyView};
use gridcopy::grid::{GridContext, GridModel, GridRange, MemoryGridModel};
use gridcopy::key_handler::{CopyKeyHandler, KeyHandlerRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber();

    let args = CommandLineArgs::parse();
    let model = Arc::new(MemoryGridModel::load(args.data())?);

    let memory_clipboard = args.memory_clipboard().then(MemoryClipboard::new);
    let clipboard: Box<dyn Clipboard> = match &memory_clipboard {
        Some(memory) => Box::new(memory.clone()),
        None => clipboard::system_or_memory(),
    };

    let mut grid = GridContext::new();
    grid.moved_columns = args.moves().to_vec();
    grid.user_column_widths = args.hidden_columns().iter().map(|&c| (c, 0)).collect();
    grid.format_values = args.format_values();
    queue_copy(&args, model.as_ref(), &mut grid)?;

    let mut handler = CopyHandler::with_config(model, clipboard, CopyConfig::from_env());
    handler.set_operation(grid.take_copy_operation());
    run_copy_ui(&mut handler, args.yes()).await?;

    if let Some(text) = memory_clipboard.and_then(|memory| memory.content()) {
        println!("{text}");
    }
    Ok(())
}

fn init_tracing_subscriber() {
    let filter =
        EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}

/// Put the requested copy on the grid, the way a user would trigger it
fn queue_copy(args: &CommandLineArgs, model: &dyn GridModel, grid: &mut GridContext) -> Result<()> {
    if let Some(header) = args.header() {
        grid.copy_header(header.column, header.depth);
        return Ok(());
    }

    let row_count = model.row_count();
    let column_count = model.columns().len();
    if row_count == 0 || column_count == 0 {
        bail!("Nothing to copy: {} is empty", args.data().display());
    }

    let rows = args.rows().unwrap_or(Span {
        start: 0,
        end: row_count - 1,
    });
    let columns = args.columns().unwrap_or(Span {
        start: 0,
        end: column_count - 1,
    });
    grid.select(vec![GridRange::new(
        columns.start,
        rows.start,
        columns.end,
        rows.end,
    )]);

    let mut registry: KeyHandlerRegistry<GridContext> = KeyHandlerRegistry::new();
    registry.register(Arc::new(CopyKeyHandler::new()));

    let key = if args.include_headers() {
        KeyEvent::new(KeyCode::Char('C'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
    } else {
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    };
    if !registry.handle_key_down(&key, grid) {
        bail!("Nothing selected to copy");
    }
    Ok(())
}

/// Terminal stand-in for the copy UI: show each status change and answer
/// the button prompts from stdin
async fn run_copy_ui(handler: &mut CopyHandler, auto_confirm: bool) -> Result<()> {
    let mut last_view: Option<CopyView> = None;

    loop {
        let view = handler.view();
        if last_view.as_ref() != Some(&view) {
            render(&view);
            last_view = Some(view.clone());
        }
        if !view.is_shown {
            return Ok(());
        }

        match view.copy_state {
            CopyState::ConfirmationRequired => {
                if auto_confirm || ask("Copy them?").await? {
                    handler.handle_copy_click();
                } else {
                    handler.handle_cancel_click();
                }
            }
            CopyState::FetchError | CopyState::ClickRequired => {
                if ask(&format!("{}?", view.button_label)).await? {
                    handler.handle_copy_click();
                } else {
                    handler.handle_cancel_click();
                }
                // A failed manual copy leaves the view unchanged; show it again
                last_view = None;
            }
            _ => {
                let interrupted = tokio::select! {
                    processed = handler.process_next() => !processed,
                    _ = tokio::signal::ctrl_c() => true,
                };
                if interrupted {
                    handler.handle_cancel_click();
                }
            }
        }
    }
}

fn render(view: &CopyView) {
    match &view.message {
        Some(message) if view.is_shown => eprintln!("gridcopy: {message}"),
        _ => tracing::debug!("Copy UI hidden"),
    }
}

async fn ask(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    let answer = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await??;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
