//! crates/hadith_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete HTTP clients, the AI provider and the storage
//! used for the session token.

use async_trait::async_trait;

use crate::domain::{
    AuthSession, BookSummary, FavoriteRef, Hadith, NewUser, Registration, RelatedHadithRef, User,
    UserUpdate,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g. HTTP, AI API).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read-only access to the public hadith collection service.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Lists every available book with its total hadith count.
    async fn list_books(&self) -> PortResult<Vec<BookSummary>>;

    /// Fetches one hadith by book and 1-based number.
    /// Any failure, including a missing item, is reported as `None`.
    async fn get_hadith(&self, book_id: &str, number: u32) -> Option<Hadith>;

    /// Fetches the inclusive range `start..=end` of a book.
    async fn get_range(&self, book_id: &str, start: u32, end: u32) -> PortResult<Vec<Hadith>>;
}

#[async_trait]
pub trait BackendService: Send + Sync {
    // --- Auth Methods ---
    async fn login(&self, email: &str, password: &str) -> PortResult<AuthSession>;

    async fn register(&self, registration: &Registration) -> PortResult<AuthSession>;

    async fn logout(&self) -> PortResult<()>;

    async fn current_user(&self) -> PortResult<User>;

    // --- Favorites ---
    async fn list_favorites(&self) -> PortResult<Vec<FavoriteRef>>;

    async fn add_favorite(&self, favorite: &FavoriteRef) -> PortResult<()>;

    async fn remove_favorite(&self, hadith_id: &str) -> PortResult<()>;

    // --- User Administration ---
    async fn list_users(&self) -> PortResult<Vec<User>>;

    async fn create_user(&self, user: &NewUser) -> PortResult<User>;

    async fn update_user(&self, user_id: i64, update: &UserUpdate) -> PortResult<()>;

    async fn delete_user(&self, user_id: i64) -> PortResult<()>;

    /// Downloads the server-rendered CSV of all users.
    async fn export_users_csv(&self) -> PortResult<String>;
}

#[async_trait]
pub trait ExplanationService: Send + Sync {
    /// Generates an explanation (syarah) for the given translated hadith text.
    async fn explain_hadith(&self, hadith_text: &str) -> PortResult<String>;
}

#[async_trait]
pub trait RelatedHadithService: Send + Sync {
    /// Suggests hadiths with a similar theme. Best effort: failures yield an empty list.
    async fn find_related_hadiths(&self, hadith_text: &str) -> Vec<RelatedHadithRef>;
}

/// Persistent key-value storage holding the bearer token between runs.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str) -> PortResult<()>;

    fn clear_token(&self) -> PortResult<()>;
}
