//! crates/hadith_core/src/search.rs
//!
//! The incremental full-text search over the content API.
//!
//! The content API has no search endpoint, so every book is scanned in batches
//! of `SEARCH_BATCH_SIZE` and filtered locally. Matches are streamed out as
//! they are found so a view can render partial results while the scan runs.

use std::ops::RangeInclusive;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{Hadith, HadithBook};
use crate::ports::ContentService;

pub const SEARCH_BATCH_SIZE: u32 = 300;

pub const STATUS_STOPPED: &str = "Pencarian dihentikan.";

/// Progress reported by a running scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A new book is being scanned.
    Scanning { book_name: String },
    /// Matches found in one batch, in numeric order.
    Matches(Vec<Hadith>),
    /// A batch could not be fetched and was skipped.
    BatchSkipped { book_id: String, start: u32, end: u32 },
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Completed { total: usize },
    Stopped,
}

impl SearchOutcome {
    pub fn status_message(&self) -> String {
        match self {
            SearchOutcome::Completed { total } => {
                format!("Pencarian selesai. Ditemukan {} hasil.", total)
            }
            SearchOutcome::Stopped => STATUS_STOPPED.to_string(),
        }
    }
}

pub fn scanning_status(book_name: &str) -> String {
    format!("Memindai {}...", book_name)
}

/// Splits `1..=total` into consecutive ranges of at most `batch_size` items.
pub fn batch_ranges(total: u32, batch_size: u32) -> impl Iterator<Item = RangeInclusive<u32>> {
    let batch_size = batch_size.max(1);
    let batches = total.div_ceil(batch_size);
    (0..batches).map(move |i| {
        let start = i * batch_size + 1;
        let end = ((i + 1) * batch_size).min(total);
        start..=end
    })
}

/// Substring match used by the scan.
///
/// `lowercase_query` must already be lowercased. The translation is compared
/// case-insensitively, the Arabic text as-is.
pub fn matches_query(hadith: &Hadith, lowercase_query: &str) -> bool {
    hadith.arabic.contains(lowercase_query)
        || hadith.translation.to_lowercase().contains(lowercase_query)
}

/// Hands out cancellation tokens so that at most one search is outstanding.
#[derive(Debug, Default)]
pub struct SearchCoordinator {
    current: Option<CancellationToken>,
    generation: u64,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the running search, if any, and returns the token and generation
    /// number for a fresh one.
    pub fn begin(&mut self) -> (CancellationToken, u64) {
        self.cancel();
        let token = CancellationToken::new();
        self.current = Some(token.clone());
        self.generation += 1;
        (token, self.generation)
    }

    /// Cancels the running search. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Generation of the most recent search; older events should be discarded.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Scans `books` for `query`, streaming progress through `events`.
///
/// Cancellation is checked before every book and every batch, and once more
/// after the last batch, so a cancelled scan never reports completion. An
/// in-flight request is allowed to finish but its matches are discarded.
/// Failed batches are skipped.
pub async fn scan_books(
    content: &dyn ContentService,
    books: &[HadithBook],
    query: &str,
    cancellation_token: &CancellationToken,
    events: &UnboundedSender<SearchEvent>,
) -> SearchOutcome {
    let lowercase_query = query.to_lowercase();
    let mut total = 0usize;

    for book in books {
        if cancellation_token.is_cancelled() {
            info!("Search for '{}' cancelled.", query);
            return SearchOutcome::Stopped;
        }
        let _ = events.send(SearchEvent::Scanning {
            book_name: book.name.clone(),
        });

        for range in batch_ranges(book.total_hadiths, SEARCH_BATCH_SIZE) {
            if cancellation_token.is_cancelled() {
                info!("Search for '{}' cancelled.", query);
                return SearchOutcome::Stopped;
            }
            tokio::task::yield_now().await;

            let (start, end) = (*range.start(), *range.end());
            let batch = match content.get_range(&book.slug, start, end).await {
                Ok(batch) => batch,
                Err(e) => {
                    warn!("Failed to load batch {}-{} for {}: {}", start, end, book.name, e);
                    let _ = events.send(SearchEvent::BatchSkipped {
                        book_id: book.slug.clone(),
                        start,
                        end,
                    });
                    continue;
                }
            };

            if cancellation_token.is_cancelled() {
                info!("Search for '{}' cancelled.", query);
                return SearchOutcome::Stopped;
            }

            let matches: Vec<Hadith> = batch
                .into_iter()
                .filter(|h| matches_query(h, &lowercase_query))
                .map(|h| Hadith {
                    book: book.name.clone(),
                    ..h
                })
                .collect();
            debug!("{} matches in {} {}-{}", matches.len(), book.slug, start, end);

            if !matches.is_empty() {
                total += matches.len();
                let _ = events.send(SearchEvent::Matches(matches));
            }
        }
    }

    if cancellation_token.is_cancelled() {
        return SearchOutcome::Stopped;
    }
    SearchOutcome::Completed { total }
}
