//! services/encyclopedia/src/ui/dashboard.rs
//!
//! The admin dashboard: the user list, its filter, CRUD handlers and the two
//! CSV exports (formatted locally, or downloaded from the backend).

use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use hadith_core::navigation::View;
use hadith_core::{NewUser, User, UserUpdate};
use tracing::{error, info};

use crate::ui::controller::Encyclopedia;

pub const LOCAL_EXPORT_FILE: &str = "pengguna_export.csv";
pub const REMOTE_EXPORT_FILE: &str = "users.csv";

const CSV_HEADERS: [&str; 4] = ["Nama Pengguna", "Email", "Peran", "Tanggal Dibuat"];

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Outcome of a dashboard action, shown to the admin as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

impl Notice {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub users: Vec<User>,
    pub filter: String,
    pub loading: bool,
}

impl DashboardState {
    pub fn filtered(&self) -> Vec<&User> {
        filter_users(&self.users, &self.filter)
    }
}

//=========================================================================================
// Pure Helpers
//=========================================================================================

/// Case-insensitive match of `term` against username or email.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let term = term.to_lowercase();
    users
        .iter()
        .filter(|u| u.username.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term))
        .collect()
}

/// `15 Agustus 2024`; `N/A` when the backend sent no date.
pub fn format_long_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS_ID[date.month0() as usize],
            date.year()
        ),
        None => "N/A".to_string(),
    }
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Renders the user list as CSV with a UTF-8 BOM so spreadsheet apps pick the right encoding.
pub fn users_to_csv(users: &[User]) -> String {
    let mut rows = vec![CSV_HEADERS.join(",")];
    rows.extend(users.iter().map(|user| {
        [
            quoted(&user.username),
            quoted(&user.email),
            quoted(user.role.as_str()),
            quoted(&format_long_date(user.created_at.as_ref())),
        ]
        .join(",")
    }));
    format!("\u{FEFF}{}", rows.join("\n"))
}

/// Writes an export file. A failed write becomes a failed `Notice`.
pub async fn write_export(path: impl AsRef<Path>, csv: String) -> Notice {
    let path = path.as_ref();
    match tokio::fs::write(path, csv).await {
        Ok(()) => {
            info!("Exported users to {}", path.display());
            Notice::ok(format!("Disimpan ke {}", path.display()))
        }
        Err(e) => {
            error!("Failed to write {}: {}", path.display(), e);
            Notice::failed(format!("Gagal menyimpan {}: {}", path.display(), e))
        }
    }
}

//=========================================================================================
// Dashboard Handlers
//=========================================================================================

impl Encyclopedia {
    /// Opens the dashboard and loads the user list. Only admins get in.
    pub async fn open_dashboard(&self) -> bool {
        {
            let mut state = self.state.lock().await;
            if !state.current_user.as_ref().is_some_and(User::is_admin) {
                return false;
            }
            state.navigator.navigate(View::Dashboard);
            state.dashboard.loading = true;
        }

        let users = match self.services.backend.list_users().await {
            Ok(users) => users,
            Err(e) => {
                error!("Failed to load users: {}", e);
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        state.dashboard.users = users;
        state.dashboard.loading = false;
        true
    }

    pub async fn set_user_filter(&self, term: &str) {
        self.state.lock().await.dashboard.filter = term.to_string();
    }

    pub async fn create_user(&self, new_user: NewUser) -> Notice {
        match self.services.backend.create_user(&new_user).await {
            Ok(user) => {
                info!("Created user {}", user.email);
                self.state.lock().await.dashboard.users.push(user);
                Notice::ok("User created successfully")
            }
            Err(e) => {
                error!("Failed to create user: {}", e);
                Notice::failed("Failed to create user")
            }
        }
    }

    /// Saves an edited user. A blank password leaves the stored one untouched.
    pub async fn update_user(&self, user_id: i64, mut update: UserUpdate) -> Notice {
        if update.password.as_deref().is_some_and(|p| p.trim().is_empty()) {
            update.password = None;
        }
        if let Err(e) = self.services.backend.update_user(user_id, &update).await {
            error!("Failed to update user {}: {}", user_id, e);
            return Notice::failed("Failed to update user");
        }

        let mut state = self.state.lock().await;
        if let Some(user) = state.dashboard.users.iter_mut().find(|u| u.id == user_id) {
            if let Some(username) = update.username.filter(|v| !v.is_empty()) {
                user.username = username;
            }
            if let Some(email) = update.email.filter(|v| !v.is_empty()) {
                user.email = email;
            }
            if let Some(role) = update.role {
                user.role = role;
            }
        }
        Notice::ok("User updated successfully")
    }

    /// Deletes a user. Deleting your own account also ends the session.
    pub async fn delete_user(&self, user_id: i64) -> Notice {
        if let Err(e) = self.services.backend.delete_user(user_id).await {
            error!("Failed to delete user {}: {}", user_id, e);
            return Notice::failed("Failed to delete user");
        }

        let mut state = self.state.lock().await;
        state.dashboard.users.retain(|u| u.id != user_id);
        if state.current_user.as_ref().is_some_and(|u| u.id == user_id) {
            info!("Current account deleted; ending the session.");
            if let Err(e) = self.services.tokens.clear_token() {
                error!("Failed to clear the stored token: {}", e);
            }
            state.current_user = None;
            state.clear_selection();
            state.navigator.reset(View::Login);
        }
        Notice::ok("User deleted successfully")
    }

    /// The currently loaded users as CSV, formatted locally.
    pub async fn export_users_local(&self) -> String {
        users_to_csv(&self.state.lock().await.dashboard.users)
    }

    /// The server-rendered CSV of all users.
    pub async fn export_users_remote(&self) -> Result<String, Notice> {
        self.services.backend.export_users_csv().await.map_err(|e| {
            error!("Failed to export users: {}", e);
            Notice::failed("Failed to export users")
        })
    }
}
