//! Terminal front end for the session controller.
//!
//! Each stdin line either replaces the search box contents or is a command:
//!
//! - `:more`: the scroll sentinel became visible
//! - `:clear`: press the clear button
//! - `:show N`: open item N (1-based) in the detail view
//! - `:close`: close the detail view
//! - `:quit`: exit

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::info;

use crate::giphy::MediaItem;
use crate::session::{Mode, RelayClient, SessionController, SessionView, UiEvent};

/// A parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Quit,
    /// A command that could not be understood.
    Unknown(String),
}

/// Interpret one line of input.
#[must_use]
pub fn parse_command(line: &str) -> Command {
    let Some(command) = line.strip_prefix(':') else {
        return Command::Event(UiEvent::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("more"), None) => Command::Event(UiEvent::SentinelVisible),
        (Some("clear"), None) => Command::Event(UiEvent::ClearSearch),
        (Some("close"), None) => Command::Event(UiEvent::CloseDetails),
        (Some("quit" | "q"), None) => Command::Quit,
        (Some("show"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Command::Event(UiEvent::Select(n - 1)),
            _ => Command::Unknown(line.to_string()),
        },
        _ => Command::Unknown(line.to_string()),
    }
}

/// One-paragraph summary of the grid.
#[must_use]
pub fn render_summary(view: &SessionView) -> String {
    let session = &view.session;
    let mut out = String::new();

    let heading = match session.mode() {
        Mode::Trending => "Trending".to_string(),
        Mode::Search => format!("Search \"{}\"", session.query()),
    };
    let _ = write!(out, "{heading}: {} GIFs", session.items().len());
    if session.is_loading() {
        out.push_str(" (Loading more GIFs...)");
    } else if !session.has_more() && !session.items().is_empty() {
        out.push_str(" (No more GIFs to load)");
    }

    for (i, item) in session.items().iter().enumerate() {
        let _ = write!(out, "\n{:>4}. {}", i + 1, display_title(item));
    }
    out
}

/// Detail view for a selected item.
#[must_use]
pub fn render_details(item: &MediaItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "GIF Details: {}", display_title(item));
    let _ = writeln!(out, "  Rating: {}", item.rating);
    if let Some(username) = &item.username {
        let _ = writeln!(out, "  Creator: {username}");
    }
    if let Some(source) = &item.source {
        let _ = writeln!(out, "  Source: {} <{source}>", item.source_label());
    }
    if let Some(date) = item.uploaded_on() {
        let _ = writeln!(out, "  Uploaded: {date}");
    }
    if let Some(date) = item.trending_since() {
        let _ = writeln!(out, "  Trending since: {date}");
    }
    if !item.url.is_empty() {
        let _ = writeln!(out, "  View on Giphy: {}", item.url);
    }
    if let Some(original) = item.original() {
        let _ = write!(out, "  Download Original: {}", original.url);
    }
    out.trim_end().to_string()
}

fn display_title(item: &MediaItem) -> &str {
    if item.title.trim().is_empty() {
        &item.id
    } else {
        &item.title
    }
}

/// Run the terminal browser against the relay at `relay_url` until stdin
/// closes or `:quit` is entered.
///
/// # Errors
///
/// Returns an error if the relay client cannot be created or stdin fails.
pub async fn run(relay_url: &str, debounce: Duration) -> Result<()> {
    let client = RelayClient::new(relay_url).context("Failed to create relay client")?;
    let controller = SessionController::new(client, debounce);
    let view = controller.subscribe();

    let (events_tx, events_rx) = mpsc::channel(32);
    let session_task = tokio::spawn(controller.run(events_rx));
    let printer_task = tokio::spawn(print_views(view));

    info!(relay = %relay_url, "Browsing; type a query or :more, :clear, :show N, :close, :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_command(&line) {
            Command::Event(event) => {
                if events_tx.send(event).await.is_err() {
                    break;
                }
            }
            Command::Quit => break,
            Command::Unknown(input) => eprintln!("Unknown command: {input}"),
        }
    }

    drop(events_tx);
    session_task.await.context("Session task panicked")?;
    printer_task.abort();
    Ok(())
}

async fn print_views(mut view: watch::Receiver<SessionView>) {
    let mut last_summary = String::new();
    let mut last_selected: Option<String> = None;

    while view.changed().await.is_ok() {
        let current = view.borrow_and_update().clone();

        let summary = render_summary(&current);
        if summary != last_summary {
            println!("{summary}");
            last_summary = summary;
        }

        let selected = current.selected.as_ref().map(|item| item.id.clone());
        if selected != last_selected {
            if let Some(item) = &current.selected {
                println!("{}", render_details(item));
            }
            last_selected = selected;
        }
    }
}
