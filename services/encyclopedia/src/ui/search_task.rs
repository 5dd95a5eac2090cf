//! services/encyclopedia/src/ui/search_task.rs
//!
//! This module contains the asynchronous "worker" function that runs one
//! incremental search and streams its progress into the UI state.

use std::sync::Arc;

use hadith_core::ports::ContentService;
use hadith_core::search::{scan_books, SearchOutcome};
use hadith_core::HadithBook;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::ui::state::UiState;

/// The main asynchronous task for a single search.
///
/// The scan and the state updates run side by side: matches show up in
/// `UiState::results` batch by batch while later books are still being scanned.
pub async fn search_process(
    content: Arc<dyn ContentService>,
    state: Arc<Mutex<UiState>>,
    books: Vec<HadithBook>,
    query: String,
    cancellation_token: CancellationToken,
    generation: u64,
) -> SearchOutcome {
    info!("Search #{} started for '{}'.", generation, query);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    let scan = async move {
        let outcome = scan_books(
            content.as_ref(),
            &books,
            &query,
            &cancellation_token,
            &events_tx,
        )
        .await;
        // Closing the channel ends the drain loop below.
        drop(events_tx);
        outcome
    };
    let drain = async {
        while let Some(event) = events_rx.recv().await {
            state.lock().await.apply_search_event(generation, event);
        }
    };

    let (outcome, ()) = tokio::join!(scan, drain);
    state.lock().await.finish_search(generation, &outcome);
    info!("Search #{} ended: {}", generation, outcome.status_message());
    outcome
}
