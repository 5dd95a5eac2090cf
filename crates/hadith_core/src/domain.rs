//! crates/hadith_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any HTTP client or serialization format.

use chrono::{DateTime, Utc};

/// A single narration fetched from the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hadith {
    /// Stable identifier, `"{book_id}-{number}"` (e.g. `bukhari-1`).
    pub id: String,
    /// Display name of the owning book, e.g. `HR. Bukhari`.
    pub book: String,
    pub book_id: String,
    pub number: u32,
    pub arabic: String,
    pub translation: String,
}

impl Hadith {
    /// Builds a hadith, deriving its identifier from the book slug and number.
    pub fn new(
        book_id: impl Into<String>,
        book: impl Into<String>,
        number: u32,
        arabic: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        let book_id = book_id.into();
        Self {
            id: hadith_id(&book_id, number),
            book: book.into(),
            book_id,
            number,
            arabic: arabic.into(),
            translation: translation.into(),
        }
    }
}

/// The identifier used for favorites and de-duplication of sampled hadiths.
pub fn hadith_id(book_id: &str, number: u32) -> String {
    format!("{}-{}", book_id, number)
}

/// A book as the content API lists it, before catalog enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub available: u32,
}

/// A hadith collection, enriched with static catalog data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithBook {
    pub slug: String,
    pub name: String,
    pub narrator: String,
    pub total_hadiths: u32,
    pub description: String,
}

/// A bundled biography of a compiler or narrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithFigure {
    pub slug: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub birth_death: &'static str,
    pub bio: &'static str,
    pub works: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parses the backend's role string. Anything other than `admin` is a standard user.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// A user's favorites: the identifier set and the materialized hadiths.
///
/// Both collections are private and only change together, so a caller can
/// never observe an identifier without its hadith or the other way around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: Vec<String>,
    hadiths: Vec<Hadith>,
}

impl Favorites {
    /// Builds favorites from already resolved hadiths.
    pub fn from_hadiths(hadiths: Vec<Hadith>) -> Self {
        let mut favorites = Self::default();
        for hadith in hadiths {
            favorites.add(hadith);
        }
        favorites
    }

    pub fn contains(&self, hadith_id: &str) -> bool {
        self.ids.iter().any(|id| id == hadith_id)
    }

    /// Adds a hadith. Returns `false` if it was already a favorite.
    pub fn add(&mut self, hadith: Hadith) -> bool {
        if self.contains(&hadith.id) {
            return false;
        }
        self.ids.push(hadith.id.clone());
        self.hadiths.push(hadith);
        true
    }

    /// Removes a hadith by identifier. Returns `false` if it was not a favorite.
    pub fn remove(&mut self, hadith_id: &str) -> bool {
        if !self.contains(hadith_id) {
            return false;
        }
        self.ids.retain(|id| id != hadith_id);
        self.hadiths.retain(|h| h.id != hadith_id);
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn hadiths(&self) -> &[Hadith] {
        &self.hadiths
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// Represents a user - used throughout app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Opaque; never displayed.
    pub password_hash: String,
    pub favorites: Favorites,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The result of a successful login or registration.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// A favorite row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRef {
    pub hadith_id: String,
    pub book_id: String,
    pub hadith_number: u32,
}

/// A related hadith suggested by the AI, referenced by book display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedHadithRef {
    pub book_name: String,
    pub hadith_number: u32,
}

/// Payload for the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Payload for the admin "create user" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial update for the admin "edit user" form. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}
