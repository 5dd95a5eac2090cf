//! services/encyclopedia/src/ui/state.rs
//!
//! Defines the application's shared services and the mutable UI state.

use std::collections::HashSet;
use std::sync::Arc;

use hadith_core::navigation::{Navigator, View};
use hadith_core::pagination::{Paginator, ITEMS_PER_PAGE};
use hadith_core::ports::{
    BackendService, ContentService, ExplanationService, RelatedHadithService, TokenStore,
};
use hadith_core::search::{scanning_status, SearchCoordinator, SearchEvent, SearchOutcome};
use hadith_core::{Hadith, HadithBook, HadithFigure, User};
use tracing::debug;

use crate::ui::dashboard::DashboardState;

//=========================================================================================
// AppState (Shared Across All Handlers)
//=========================================================================================

/// The shared services, created once at startup and passed to the controller.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentService>,
    pub backend: Arc<dyn BackendService>,
    pub explainer: Arc<dyn ExplanationService>,
    pub related: Arc<dyn RelatedHadithService>,
    pub tokens: Arc<dyn TokenStore>,
}

//=========================================================================================
// UiState (Everything the Screen Renders From)
//=========================================================================================

pub struct UiState {
    pub navigator: Navigator,
    pub current_user: Option<User>,
    pub auth_initialized: bool,

    pub books: Vec<HadithBook>,
    pub recommendations: Vec<Hadith>,
    pub recommendations_loading: bool,

    // --- Search ---
    pub search_term: String,
    pub results: Vec<Hadith>,
    pub search_status: String,
    pub is_searching: bool,
    pub search_page: Paginator,
    pub search: SearchCoordinator,

    // --- Selection ---
    pub selected_hadith: Option<Hadith>,
    pub selected_book: Option<HadithBook>,
    pub selected_figure: Option<&'static HadithFigure>,
    pub ai_explanation: String,
    pub related_hadiths: Vec<Hadith>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Bumped whenever the selection is dropped, so a late detail load can tell it is stale.
    pub detail_generation: u64,

    // --- Book listing ---
    pub book_page: Paginator,
    pub book_hadiths: Vec<Hadith>,
    pub book_loading: bool,

    /// Hadith ids with a favorite toggle in flight.
    pub toggling_favorites: HashSet<String>,

    pub dashboard: DashboardState,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            navigator: Navigator::default(),
            current_user: None,
            auth_initialized: false,
            books: Vec::new(),
            recommendations: Vec::new(),
            recommendations_loading: false,
            search_term: String::new(),
            results: Vec::new(),
            search_status: String::new(),
            is_searching: false,
            search_page: Paginator::new(ITEMS_PER_PAGE),
            search: SearchCoordinator::new(),
            selected_hadith: None,
            selected_book: None,
            selected_figure: None,
            ai_explanation: String::new(),
            related_hadiths: Vec::new(),
            is_loading: false,
            error: None,
            detail_generation: 0,
            book_page: Paginator::new(ITEMS_PER_PAGE),
            book_hadiths: Vec::new(),
            book_loading: false,
            toggling_favorites: HashSet::new(),
            dashboard: DashboardState::default(),
        }
    }

    pub fn view(&self) -> View {
        self.navigator.current()
    }

    /// Drops the selected hadith, book and figure along with the AI results.
    pub fn clear_selection(&mut self) {
        self.selected_hadith = None;
        self.selected_book = None;
        self.selected_figure = None;
        self.ai_explanation.clear();
        self.related_hadiths.clear();
        self.book_hadiths.clear();
        self.is_loading = false;
        self.detail_generation += 1;
    }

    /// The search results on the current page.
    pub fn search_results_page(&self) -> &[Hadith] {
        let (start, end) = self.search_page.slice_bounds();
        &self.results[start..end]
    }

    pub fn is_favorite(&self, hadith_id: &str) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| user.favorites.contains(hadith_id))
    }

    /// Applies one progress event of search `generation`. Events of superseded
    /// or stopped searches are dropped; returns whether the event was applied.
    pub fn apply_search_event(&mut self, generation: u64, event: SearchEvent) -> bool {
        if generation != self.search.generation() || !self.is_searching {
            debug!("Dropping event from stale search #{}", generation);
            return false;
        }
        match event {
            SearchEvent::Scanning { book_name } => {
                self.search_status = scanning_status(&book_name);
            }
            SearchEvent::Matches(matches) => {
                self.results.extend(matches);
                self.search_page.set_total(self.results.len());
            }
            SearchEvent::BatchSkipped { .. } => {}
        }
        true
    }

    /// Records the end of search `generation`, unless a newer search has started
    /// or the search was already stopped from the UI.
    pub fn finish_search(&mut self, generation: u64, outcome: &SearchOutcome) {
        if generation != self.search.generation() || !self.is_searching {
            return;
        }
        self.is_searching = false;
        self.search_status = outcome.status_message();
    }
}
