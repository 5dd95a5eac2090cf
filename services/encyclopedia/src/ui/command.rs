//! services/encyclopedia/src/ui/command.rs
//!
//! Defines the line commands the terminal front end understands.

use hadith_core::{NewUser, Role, UserUpdate};

/// Represents one line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Starts a search. An empty query clears the results.
    Search(String),
    /// Opens the detail view of one hadith.
    Open { book_id: String, number: u32 },
    Book(String),
    /// Moves the search results or the book listing to a page.
    Page(usize),
    /// Toggles the selected hadith as a favorite.
    Fav,
    Favorites,
    Sources,
    Figures,
    Figure(String),
    About,
    Back,
    Home,
    Login { email: String, password: String },
    Register {
        username: String,
        email: String,
        password: String,
        confirmation: String,
    },
    Logout,
    Dashboard,
    FilterUsers(String),
    /// Creates a user from the dashboard.
    AddUser(NewUser),
    /// Edits a user. Only the fields given are sent; a blank password keeps the current one.
    EditUser { id: i64, update: UserUpdate },
    DeleteUser(i64),
    Export { remote: bool },
    Help,
    Quit,
}

pub const HELP: &str = "\
search <kata>            cari hadits
open <kitab> <nomor>     buka hadits, mis. open bukhari 1
book <kitab>             daftar hadits dalam satu kitab
page <n>                 pindah halaman hasil/daftar
fav                      tandai/hapus favorit hadits yang dibuka
favorites | sources | figures | figure <slug> | about
back | home
login <email> <password>
register <nama> <email> <password> <konfirmasi>
logout
dashboard | filter <kata> | deluser <id> | export [remote]
adduser <nama> <email> <password> <admin|user>
edituser <id> nama=<..> email=<..> password=<..> peran=<admin|user>
quit";

impl Command {
    /// Parses one input line. Returns a short usage hint on malformed input.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (word.to_lowercase().as_str(), args.as_slice()) {
            ("search" | "cari", _) => Command::Search(rest.to_string()),
            ("open", [book_id, number]) => Command::Open {
                book_id: book_id.to_string(),
                number: parse_number(number)?,
            },
            ("book", [slug]) => Command::Book(slug.to_string()),
            ("page", [page]) => Command::Page(parse_number(page)?),
            ("fav", []) => Command::Fav,
            ("favorites", []) => Command::Favorites,
            ("sources", []) => Command::Sources,
            ("figures", []) => Command::Figures,
            ("figure", [slug]) => Command::Figure(slug.to_string()),
            ("about", []) => Command::About,
            ("back", []) => Command::Back,
            ("home", []) => Command::Home,
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", [username, email, password, confirmation]) => Command::Register {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                confirmation: confirmation.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("dashboard", []) => Command::Dashboard,
            ("filter", _) => Command::FilterUsers(rest.to_string()),
            ("adduser", [username, email, password, role]) => Command::AddUser(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role: parse_role(role)?,
            }),
            ("edituser", [id, fields @ ..]) if !fields.is_empty() => Command::EditUser {
                id: parse_number(id)?,
                update: parse_user_update(fields)?,
            },
            ("deluser", [id]) => Command::DeleteUser(parse_number(id)?),
            ("export", []) => Command::Export { remote: false },
            ("export", ["remote"]) => Command::Export { remote: true },
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            ("", _) => return Err(String::new()),
            _ => return Err(format!("Perintah tidak dikenal: '{}'. Ketik 'help'.", line)),
        };
        Ok(command)
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("'{}' bukan angka yang valid.", raw))
}

fn parse_role(raw: &str) -> Result<Role, String> {
    match raw.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "user" => Ok(Role::User),
        _ => Err(format!("Peran '{}' tidak dikenal; gunakan admin atau user.", raw)),
    }
}

/// Parses `field=value` pairs. `password=` with no value leaves the password as is.
fn parse_user_update(fields: &[&str]) -> Result<UserUpdate, String> {
    let mut update = UserUpdate::default();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| format!("'{}' harus berbentuk kolom=nilai.", field))?;
        match key.to_lowercase().as_str() {
            "nama" | "username" => update.username = Some(value.to_string()),
            "email" => update.email = Some(value.to_string()),
            "password" => update.password = Some(value.to_string()),
            "peran" | "role" => update.role = Some(parse_role(value)?),
            _ => return Err(format!("Kolom '{}' tidak dikenal.", key)),
        }
    }
    Ok(update)
}
