//! In-memory port implementations for the controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hadith_core::ports::{
    BackendService, ContentService, ExplanationService, PortError, PortResult,
    RelatedHadithService, TokenStore,
};
use hadith_core::{
    AuthSession, BookSummary, FavoriteRef, Favorites, Hadith, NewUser, Registration,
    RelatedHadithRef, Role, User, UserUpdate,
};
use tokio::sync::Semaphore;

use crate::adapters::MemoryTokenStore;
use crate::ui::controller::Encyclopedia;
use crate::ui::state::AppState;

pub fn book_name(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => format!("HR. {}{}", first.to_uppercase(), chars.as_str()),
        None => "HR. ".to_string(),
    }
}

pub fn hadith(book: &str, number: u32) -> Hadith {
    Hadith::new(book, book_name(book), number, "نص", "Amal")
}

pub fn encyclopedia(
    content: FakeContent,
    backend: FakeBackend,
    ai: FakeAi,
    token: Option<&str>,
) -> Encyclopedia {
    let tokens: Arc<dyn TokenStore> = match token {
        Some(token) => Arc::new(MemoryTokenStore::with_token(token)),
        None => Arc::new(MemoryTokenStore::default()),
    };
    Encyclopedia::new(AppState {
        content: Arc::new(content),
        backend: Arc::new(backend),
        explainer: Arc::new(ai.clone()),
        related: Arc::new(ai),
        tokens,
    })
}

//=========================================================================================
// Content
//=========================================================================================

#[derive(Clone, Default)]
pub struct FakeContent {
    books: Arc<Vec<(String, u32)>>,
    fail_books: bool,
    sabar_every: Option<u32>,
    gate: Option<Arc<Semaphore>>,
    range_requests: Arc<AtomicUsize>,
}

impl FakeContent {
    pub fn with_books(books: &[(&str, u32)]) -> Self {
        Self {
            books: Arc::new(books.iter().map(|(s, n)| (s.to_string(), *n)).collect()),
            ..Self::default()
        }
    }

    pub fn failing_books() -> Self {
        Self {
            fail_books: true,
            ..Self::default()
        }
    }

    /// Every `n`-th hadith of each book mentions "sabar".
    pub fn with_sabar_every(mut self, n: u32) -> Self {
        self.sabar_every = Some(n);
        self
    }

    /// Range requests block until `open_gate` is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1_000);
        }
    }

    pub fn range_requests(&self) -> usize {
        self.range_requests.load(Ordering::SeqCst)
    }

    fn total(&self, slug: &str) -> Option<u32> {
        self.books.iter().find(|(s, _)| s == slug).map(|(_, n)| *n)
    }

    fn make(&self, slug: &str, number: u32) -> Hadith {
        let translation = match self.sabar_every {
            Some(n) if number % n == 0 => "Hendaklah kalian bersikap sabar",
            _ => "Amal",
        };
        Hadith::new(slug, book_name(slug), number, "نص", translation)
    }
}

#[async_trait]
impl ContentService for FakeContent {
    async fn list_books(&self) -> PortResult<Vec<BookSummary>> {
        if self.fail_books {
            return Err(PortError::Unexpected("offline".to_string()));
        }
        Ok(self
            .books
            .iter()
            .map(|(slug, total)| BookSummary {
                id: slug.clone(),
                name: book_name(slug),
                available: *total,
            })
            .collect())
    }

    async fn get_hadith(&self, book_id: &str, number: u32) -> Option<Hadith> {
        let total = self.total(book_id)?;
        (1..=total)
            .contains(&number)
            .then(|| self.make(book_id, number))
    }

    async fn get_range(&self, book_id: &str, start: u32, end: u32) -> PortResult<Vec<Hadith>> {
        self.range_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await;
        }
        let total = self.total(book_id).ok_or_else(|| PortError::NotFound(book_id.to_string()))?;
        Ok((start..=end.min(total)).map(|n| self.make(book_id, n)).collect())
    }
}

//=========================================================================================
// Backend
//=========================================================================================

struct BackendInner {
    user: User,
    users: Vec<User>,
    favorites: Vec<FavoriteRef>,
    fail_favorites: bool,
    fail_logout: bool,
    calls: Vec<String>,
    last_update: Option<UserUpdate>,
}

#[derive(Clone)]
pub struct FakeBackend {
    inner: Arc<Mutex<BackendInner>>,
}

pub fn account(id: i64, username: &str, role: Role) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@mail.id", username.to_lowercase()),
        password_hash: String::new(),
        favorites: Favorites::default(),
        role,
        created_at: None,
    }
}

impl FakeBackend {
    /// A backend whose session belongs to user 1, "Budi".
    pub fn signed_in(admin: bool) -> Self {
        let role = if admin { Role::Admin } else { Role::User };
        let user = account(1, "Budi", role);
        let users = vec![user.clone(), account(2, "Siti", Role::User)];
        Self {
            inner: Arc::new(Mutex::new(BackendInner {
                user,
                users,
                favorites: Vec::new(),
                fail_favorites: false,
                fail_logout: false,
                calls: Vec::new(),
                last_update: None,
            })),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut BackendInner) -> T) -> T {
        f(&mut *self.inner.lock().unwrap())
    }

    pub fn set_favorites(&self, rows: &[(&str, u32)]) {
        self.with(|b| {
            b.favorites = rows
                .iter()
                .map(|(book, n)| FavoriteRef {
                    hadith_id: format!("{}-{}", book, n),
                    book_id: book.to_string(),
                    hadith_number: *n,
                })
                .collect()
        });
    }

    pub fn fail_favorites(&self) {
        self.with(|b| b.fail_favorites = true);
    }

    pub fn fail_logout(&self) {
        self.with(|b| b.fail_logout = true);
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|b| b.calls.clone())
    }

    pub fn last_update(&self) -> Option<UserUpdate> {
        self.with(|b| b.last_update.clone())
    }

    fn record(&self, call: impl Into<String>) {
        self.with(|b| b.calls.push(call.into()));
    }

    fn session(&self) -> AuthSession {
        AuthSession {
            user: self.with(|b| b.user.clone()),
            token: "fresh-token".to_string(),
        }
    }
}

#[async_trait]
impl BackendService for FakeBackend {
    async fn login(&self, _email: &str, _password: &str) -> PortResult<AuthSession> {
        self.record("login");
        Ok(self.session())
    }

    async fn register(&self, _registration: &Registration) -> PortResult<AuthSession> {
        self.record("register");
        Ok(self.session())
    }

    async fn logout(&self) -> PortResult<()> {
        self.record("logout");
        if self.with(|b| b.fail_logout) {
            return Err(PortError::Unexpected("API request failed: Bad Gateway".to_string()));
        }
        Ok(())
    }

    async fn current_user(&self) -> PortResult<User> {
        self.record("current_user");
        Ok(self.with(|b| b.user.clone()))
    }

    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRef>> {
        self.record("list_favorites");
        self.with(|b| {
            if b.fail_favorites {
                Err(PortError::Unauthorized)
            } else {
                Ok(b.favorites.clone())
            }
        })
    }

    async fn add_favorite(&self, favorite: &FavoriteRef) -> PortResult<()> {
        self.record(format!("add_favorite {}", favorite.hadith_id));
        self.with(|b| b.favorites.push(favorite.clone()));
        Ok(())
    }

    async fn remove_favorite(&self, hadith_id: &str) -> PortResult<()> {
        self.record(format!("remove_favorite {}", hadith_id));
        self.with(|b| b.favorites.retain(|f| f.hadith_id != hadith_id));
        Ok(())
    }

    async fn list_users(&self) -> PortResult<Vec<User>> {
        self.record("list_users");
        Ok(self.with(|b| b.users.clone()))
    }

    async fn create_user(&self, user: &NewUser) -> PortResult<User> {
        self.record("create_user");
        let mut created = account(3, &user.username, user.role);
        created.email = user.email.clone();
        self.with(|b| b.users.push(created.clone()));
        Ok(created)
    }

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> PortResult<()> {
        self.record(format!("update_user {}", user_id));
        self.with(|b| b.last_update = Some(update.clone()));
        Ok(())
    }

    async fn delete_user(&self, user_id: i64) -> PortResult<()> {
        self.record(format!("delete_user {}", user_id));
        self.with(|b| b.users.retain(|u| u.id != user_id));
        Ok(())
    }

    async fn export_users_csv(&self) -> PortResult<String> {
        self.record("export_users_csv");
        Ok("id,name\n".to_string())
    }
}

//=========================================================================================
// AI
//=========================================================================================

#[derive(Clone)]
pub struct FakeAi {
    explanation: Option<String>,
    related: Vec<RelatedHadithRef>,
}

impl Default for FakeAi {
    fn default() -> Self {
        Self::explaining("Penjelasan")
    }
}

impl FakeAi {
    pub fn explaining(text: &str) -> Self {
        Self {
            explanation: Some(text.to_string()),
            related: Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            explanation: None,
            related: Vec::new(),
        }
    }

    pub fn with_related(mut self, refs: &[(&str, u32)]) -> Self {
        self.related = refs
            .iter()
            .map(|(book, n)| RelatedHadithRef {
                book_name: book.to_string(),
                hadith_number: *n,
            })
            .collect();
        self
    }
}

#[async_trait]
impl ExplanationService for FakeAi {
    async fn explain_hadith(&self, _hadith_text: &str) -> PortResult<String> {
        self.explanation
            .clone()
            .ok_or_else(|| PortError::Unexpected("Failed to generate explanation".to_string()))
    }
}

#[async_trait]
impl RelatedHadithService for FakeAi {
    async fn find_related_hadiths(&self, _hadith_text: &str) -> Vec<RelatedHadithRef> {
        self.related.clone()
    }
}
