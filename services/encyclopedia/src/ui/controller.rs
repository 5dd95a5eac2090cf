//! services/encyclopedia/src/ui/controller.rs
//!
//! The handlers that drive the encyclopedia. Each handler calls a service
//! port, then writes the result into the shared `UiState`; a view only ever
//! renders from that state.
//!
//! The state lock is never held across a network call, so a long-running
//! search or AI request does not block navigation.

use std::sync::Arc;

use futures::future::join_all;
use hadith_core::catalog::{book_from_summary, find_book_by_name, find_figure};
use hadith_core::navigation::View;
use hadith_core::pagination::{Paginator, ITEMS_PER_PAGE};
use hadith_core::recommend::sample_recommendations;
use hadith_core::search::{SearchOutcome, STATUS_STOPPED};
use hadith_core::{AuthSession, FavoriteRef, Favorites, Hadith, Registration, User};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::ui::dashboard::Notice;
use crate::ui::search_task::search_process;
use crate::ui::state::{AppState, UiState};

pub const BOOKS_LOAD_FAILED: &str = "Gagal memuat daftar kitab hadits.";
pub const HADITH_NOT_FOUND: &str = "Hadits tidak ditemukan.";
pub const AI_EXPLANATION_FAILED: &str =
    "Gagal memuat penjelasan dari AI. Periksa koneksi Anda atau coba lagi nanti.";
pub const PASSWORD_MISMATCH: &str = "Password dan konfirmasi password tidak cocok.";

/// The application controller. Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Encyclopedia {
    pub(crate) services: Arc<AppState>,
    pub(crate) state: Arc<Mutex<UiState>>,
}

impl Encyclopedia {
    pub fn new(services: AppState) -> Self {
        Self {
            services: Arc::new(services),
            state: Arc::new(Mutex::new(UiState::new())),
        }
    }

    pub fn state(&self) -> &Arc<Mutex<UiState>> {
        &self.state
    }

    //=====================================================================================
    // Startup
    //=====================================================================================

    /// Loads the catalog (then recommendations) while restoring the session.
    pub async fn initialize(&self) {
        let catalog = async {
            self.load_books().await;
            self.load_recommendations().await;
        };
        tokio::join!(catalog, self.initialize_auth());
    }

    pub async fn load_books(&self) {
        match self.services.content.list_books().await {
            Ok(summaries) => {
                let books: Vec<_> = summaries.into_iter().map(book_from_summary).collect();
                info!("Loaded {} books.", books.len());
                self.state.lock().await.books = books;
            }
            Err(e) => {
                error!("Failed to load books: {}", e);
                self.state.lock().await.error = Some(BOOKS_LOAD_FAILED.to_string());
            }
        }
    }

    pub async fn load_recommendations(&self) {
        let books = {
            let mut state = self.state.lock().await;
            if state.books.is_empty() {
                return;
            }
            state.recommendations_loading = true;
            state.books.clone()
        };

        let mut rng = StdRng::from_os_rng();
        let picks = sample_recommendations(self.services.content.as_ref(), &books, &mut rng).await;

        let mut state = self.state.lock().await;
        state.recommendations = picks;
        state.recommendations_loading = false;
    }

    /// Restores the session from the stored token. Success lands on home,
    /// anything else on the login view.
    pub async fn initialize_auth(&self) {
        let restored = match self.services.tokens.token() {
            Some(_) => match self.services.backend.current_user().await {
                Ok(user) => Some(self.load_user_favorites(user).await),
                Err(e) => {
                    info!("Stored session is no longer valid: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut state = self.state.lock().await;
        match restored {
            Some(user) => {
                state.current_user = Some(user);
                state.navigator.reset(View::Home);
            }
            None => {
                state.current_user = None;
                state.navigator.reset(View::Login);
            }
        }
        state.auth_initialized = true;
    }

    //=====================================================================================
    // Authentication
    //=====================================================================================

    pub async fn login(&self, email: &str, password: &str) -> bool {
        match self.services.backend.login(email, password).await {
            Ok(session) => {
                self.start_session(session).await;
                true
            }
            Err(e) => {
                error!("Login failed: {}", e);
                false
            }
        }
    }

    pub async fn register(&self, registration: Registration) -> Notice {
        if registration.password != registration.password_confirmation {
            return Notice::failed(PASSWORD_MISMATCH);
        }
        match self.services.backend.register(&registration).await {
            Ok(session) => {
                self.start_session(session).await;
                Notice::ok("Registration successful")
            }
            Err(e) => {
                error!("Registration failed: {}", e);
                Notice::failed("Registration failed")
            }
        }
    }

    /// Ends the session locally even if the backend call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.services.backend.logout().await {
            error!("Logout failed: {}", e);
        }
        if let Err(e) = self.services.tokens.clear_token() {
            error!("Failed to clear the stored token: {}", e);
        }

        let mut state = self.state.lock().await;
        state.current_user = None;
        state.clear_selection();
        state.navigator.reset(View::Login);
    }

    async fn start_session(&self, session: AuthSession) {
        if let Err(e) = self.services.tokens.set_token(&session.token) {
            error!("Failed to persist the session token: {}", e);
        }
        let user = self.load_user_favorites(session.user).await;
        info!("Signed in as {}.", user.email);

        let mut state = self.state.lock().await;
        state.current_user = Some(user);
        state.navigator.reset(View::Home);
    }

    /// Resolves the backend's favorite rows into hadiths. Rows whose hadith can
    /// no longer be fetched are dropped; a failed listing yields no favorites.
    async fn load_user_favorites(&self, user: User) -> User {
        let favorites = match self.services.backend.list_favorites().await {
            Ok(rows) => {
                let content = self.services.content.as_ref();
                let fetched = join_all(
                    rows.iter()
                        .map(|row| content.get_hadith(&row.book_id, row.hadith_number)),
                )
                .await;
                Favorites::from_hadiths(fetched.into_iter().flatten().collect())
            }
            Err(e) => {
                error!("Failed to load user favorites: {}", e);
                Favorites::default()
            }
        };
        User { favorites, ..user }
    }

    //=====================================================================================
    // Search
    //=====================================================================================

    /// Starts a search for `query`, superseding any search still running.
    ///
    /// A blank query just clears the results. Otherwise the scan runs on its
    /// own task; the returned handle resolves once it completes or is stopped.
    pub async fn search(&self, query: &str) -> Option<JoinHandle<SearchOutcome>> {
        let mut state = self.state.lock().await;
        state.search_term = query.to_string();
        state.results.clear();
        state.search_page.set_total(0);
        state.search_page.reset();

        if query.trim().is_empty() {
            state.search.cancel();
            state.is_searching = false;
            state.search_status.clear();
            return None;
        }

        let (cancellation_token, generation) = state.search.begin();
        state.is_searching = true;
        state.error = None;
        state.search_status.clear();
        state.navigator.navigate(View::SearchResults);
        let books = state.books.clone();
        drop(state);

        Some(tokio::spawn(search_process(
            self.services.content.clone(),
            self.state.clone(),
            books,
            query.to_string(),
            cancellation_token,
            generation,
        )))
    }

    pub async fn go_to_search_page(&self, page: usize) -> bool {
        self.state.lock().await.search_page.go_to(page)
    }

    //=====================================================================================
    // Navigation
    //=====================================================================================

    /// Switches to a view that needs no loading (sources, figures, about, ...).
    pub async fn show(&self, view: View) {
        self.state.lock().await.navigator.navigate(view);
    }

    /// Goes back one step, stopping a running search first.
    pub async fn back(&self) -> View {
        let mut state = self.state.lock().await;
        if state.is_searching {
            state.search.cancel();
            state.is_searching = false;
            state.search_status = STATUS_STOPPED.to_string();
        }
        let step = state.navigator.back();
        if step.clear_selection {
            state.clear_selection();
        }
        step.view
    }

    /// Returns to a clean home view.
    pub async fn home(&self) {
        let mut state = self.state.lock().await;
        if state.search.cancel() {
            state.is_searching = false;
        }
        state.clear_selection();
        state.search_term.clear();
        state.search_status.clear();
        state.results.clear();
        state.search_page.set_total(0);
        state.search_page.reset();
        state.navigator.reset(View::Home);
    }

    //=====================================================================================
    // Detail
    //=====================================================================================

    /// Opens the detail view: the hadith itself, then its AI explanation and
    /// related hadiths side by side. Either AI part may fail on its own.
    pub async fn select_hadith(&self, book_id: &str, number: u32) {
        let generation = {
            let mut state = self.state.lock().await;
            state.detail_generation += 1;
            state.is_loading = true;
            state.selected_hadith = None;
            state.ai_explanation.clear();
            state.related_hadiths.clear();
            state.error = None;
            state.navigator.navigate(View::Detail);
            state.detail_generation
        };

        let Some(hadith) = self.services.content.get_hadith(book_id, number).await else {
            let mut state = self.state.lock().await;
            if state.detail_generation == generation {
                state.error = Some(HADITH_NOT_FOUND.to_string());
                state.is_loading = false;
                state.navigator.navigate(View::Home);
            }
            return;
        };

        {
            let mut state = self.state.lock().await;
            if state.detail_generation != generation {
                return;
            }
            state.selected_hadith = Some(hadith.clone());
        }

        let (explanation, related) = tokio::join!(
            self.services.explainer.explain_hadith(&hadith.translation),
            self.load_related(&hadith.translation),
        );

        let mut state = self.state.lock().await;
        if state.detail_generation != generation {
            info!("Discarding detail of {} after the selection changed.", hadith.id);
            return;
        }
        match explanation {
            Ok(text) => state.ai_explanation = text,
            Err(e) => {
                warn!("Explanation for {} failed: {}", hadith.id, e);
                state.error = Some(AI_EXPLANATION_FAILED.to_string());
            }
        }
        state.related_hadiths = related;
        state.is_loading = false;
    }

    /// Resolves the AI's related references through the loaded books.
    /// References to unknown books or missing numbers are dropped.
    async fn load_related(&self, text: &str) -> Vec<Hadith> {
        let refs = self.services.related.find_related_hadiths(text).await;
        if refs.is_empty() {
            return Vec::new();
        }

        let books = self.state.lock().await.books.clone();
        let content = self.services.content.as_ref();
        let lookups = refs.iter().filter_map(|r| {
            find_book_by_name(&books, &r.book_name).map(|book| (book.slug.as_str(), r.hadith_number))
        });
        join_all(lookups.map(|(slug, number)| content.get_hadith(slug, number)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    //=====================================================================================
    // Books & Figures
    //=====================================================================================

    /// Opens the listing of one book at its first page.
    pub async fn select_book(&self, slug: &str) -> bool {
        {
            let mut state = self.state.lock().await;
            let Some(book) = state.books.iter().find(|b| b.slug == slug).cloned() else {
                return false;
            };
            let mut page = Paginator::new(ITEMS_PER_PAGE);
            page.set_total(book.total_hadiths as usize);
            state.book_page = page;
            state.book_hadiths.clear();
            state.selected_book = Some(book);
            state.navigator.navigate(View::BookView);
        }
        self.load_book_page(1).await
    }

    /// Moves the book listing to `page` and fetches that page's range.
    pub async fn load_book_page(&self, page: usize) -> bool {
        let (book, range) = {
            let mut state = self.state.lock().await;
            let Some(book) = state.selected_book.clone() else {
                return false;
            };
            if page != state.book_page.current() && !state.book_page.go_to(page) {
                return false;
            }
            let Some(range) = state.book_page.item_range() else {
                state.book_hadiths.clear();
                return true;
            };
            state.book_loading = true;
            (book, range)
        };

        let fetched = self
            .services
            .content
            .get_range(&book.slug, *range.start(), *range.end())
            .await;

        let mut state = self.state.lock().await;
        let still_showing = state
            .selected_book
            .as_ref()
            .is_some_and(|b| b.slug == book.slug)
            && state.book_page.current() == page;
        if !still_showing {
            return true;
        }
        match fetched {
            Ok(hadiths) => state.book_hadiths = hadiths,
            Err(e) => {
                error!("Error fetching hadiths of {}: {}", book.slug, e);
                state.book_hadiths.clear();
            }
        }
        state.book_loading = false;
        true
    }

    pub async fn select_figure(&self, slug: &str) -> bool {
        let Some(figure) = find_figure(slug) else {
            return false;
        };
        let mut state = self.state.lock().await;
        state.selected_figure = Some(figure);
        state.navigator.navigate(View::FigureDetail);
        true
    }

    //=====================================================================================
    // Favorites
    //=====================================================================================

    /// Adds or removes a favorite. Ignored without a user, or while a toggle
    /// for the same hadith is still in flight. Returns whether the toggle went through.
    pub async fn toggle_favorite(&self, hadith: &Hadith) -> bool {
        let was_favorite = {
            let mut state = self.state.lock().await;
            let Some(was_favorite) = state
                .current_user
                .as_ref()
                .map(|user| user.favorites.contains(&hadith.id))
            else {
                return false;
            };
            if !state.toggling_favorites.insert(hadith.id.clone()) {
                return false;
            }
            was_favorite
        };

        let result = if was_favorite {
            self.services.backend.remove_favorite(&hadith.id).await
        } else {
            let favorite = FavoriteRef {
                hadith_id: hadith.id.clone(),
                book_id: hadith.book_id.clone(),
                hadith_number: hadith.number,
            };
            self.services.backend.add_favorite(&favorite).await
        };

        let mut state = self.state.lock().await;
        state.toggling_favorites.remove(&hadith.id);
        match result {
            Ok(()) => {
                if let Some(user) = state.current_user.as_mut() {
                    if was_favorite {
                        user.favorites.remove(&hadith.id);
                    } else {
                        user.favorites.add(hadith.clone());
                    }
                }
                true
            }
            Err(e) => {
                error!("Failed to toggle favorite {}: {}", hadith.id, e);
                false
            }
        }
    }
}
