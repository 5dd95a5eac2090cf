//! services/encyclopedia/src/bin/encyclopedia.rs

use async_openai::{config::OpenAIConfig, Client};
use encyclopedia_lib::{
    adapters::{BackendApiAdapter, ContentApiAdapter, FileTokenStore, GeminiAdapter, UnavailableAi},
    config::Config,
    error::AppError,
    ui::{
        dashboard::{write_export, LOCAL_EXPORT_FILE, REMOTE_EXPORT_FILE},
        render, AppState, Command, Encyclopedia,
    },
};
use hadith_core::navigation::View;
use hadith_core::ports::{ExplanationService, RelatedHadithService, TokenStore};
use hadith_core::Registration;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting encyclopedia...");

    // --- 2. Initialize Service Adapters ---
    let http = reqwest::Client::builder()
        .user_agent(concat!("encyclopedia/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&config.storage_path));

    let content = Arc::new(ContentApiAdapter::new(http.clone(), config.content_api_url.clone()));
    let backend = Arc::new(BackendApiAdapter::new(
        http,
        config.backend_api_url.clone(),
        tokens.clone(),
    ));

    let (explainer, related): (Arc<dyn ExplanationService>, Arc<dyn RelatedHadithService>) =
        match &config.gemini_api_key {
            Some(key) => {
                let ai_config = OpenAIConfig::new()
                    .with_api_key(key)
                    .with_api_base(&config.ai_api_base);
                let gemini = Arc::new(GeminiAdapter::new(
                    Client::with_config(ai_config),
                    config.ai_model.clone(),
                ));
                (gemini.clone(), gemini)
            }
            None => {
                warn!("GEMINI_API_KEY is not set; AI explanations are disabled.");
                (Arc::new(UnavailableAi), Arc::new(UnavailableAi))
            }
        };

    // --- 3. Build the Controller & Load Initial Data ---
    let app = Encyclopedia::new(AppState {
        content,
        backend,
        explainer,
        related,
        tokens,
    });
    app.initialize().await;
    show(&app).await;

    // --- 4. Command Loop ---
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(hint) => {
                if !hint.is_empty() {
                    println!("{}", hint);
                }
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        dispatch(&app, command).await;
    }

    info!("Goodbye.");
    Ok(())
}

/// Runs one command against the controller and prints the resulting view.
/// Failures are printed inline; nothing here ends the loop.
async fn dispatch(app: &Encyclopedia, command: Command) {
    match command {
        Command::Search(query) => {
            if let Some(handle) = app.search(&query).await {
                // Progress lands in the state; print the results once the scan ends.
                let app = app.clone();
                tokio::spawn(async move {
                    if handle.await.is_ok() {
                        show(&app).await;
                    }
                });
            }
        }
        Command::Open { book_id, number } => app.select_hadith(&book_id, number).await,
        Command::Book(slug) => {
            if !app.select_book(&slug).await {
                println!("Kitab '{}' tidak ditemukan.", slug);
                return;
            }
        }
        Command::Page(page) => {
            let view = app.state().lock().await.view();
            let moved = match view {
                View::BookView => app.load_book_page(page).await,
                _ => app.go_to_search_page(page).await,
            };
            if !moved {
                println!("Halaman {} tidak tersedia.", page);
                return;
            }
        }
        Command::Fav => {
            let selected = app.state().lock().await.selected_hadith.clone();
            match selected {
                Some(hadith) => {
                    if !app.toggle_favorite(&hadith).await {
                        println!("Favorit tidak dapat diubah saat ini.");
                    }
                }
                None => println!("Buka sebuah hadits terlebih dahulu."),
            }
        }
        Command::Favorites => app.show(View::Favorites).await,
        Command::Sources => app.show(View::Sources).await,
        Command::Figures => app.show(View::Figures).await,
        Command::Figure(slug) => {
            if !app.select_figure(&slug).await {
                println!("Tokoh '{}' tidak ditemukan.", slug);
                return;
            }
        }
        Command::About => app.show(View::About).await,
        Command::Back => {
            app.back().await;
        }
        Command::Home => app.home().await,
        Command::Login { email, password } => {
            if !app.login(&email, &password).await {
                println!("Login gagal. Periksa email dan password Anda.");
                return;
            }
        }
        Command::Register {
            username,
            email,
            password,
            confirmation,
        } => {
            let notice = app
                .register(Registration {
                    username,
                    email,
                    password,
                    password_confirmation: confirmation,
                })
                .await;
            if !notice.success {
                println!("{}", notice.message);
                return;
            }
        }
        Command::Logout => app.logout().await,
        Command::Dashboard => {
            if !app.open_dashboard().await {
                println!("Dashboard hanya untuk admin.");
                return;
            }
        }
        Command::FilterUsers(term) => app.set_user_filter(&term).await,
        Command::AddUser(new_user) => println!("{}", app.create_user(new_user).await.message),
        Command::EditUser { id, update } => println!("{}", app.update_user(id, update).await.message),
        Command::DeleteUser(id) => println!("{}", app.delete_user(id).await.message),
        Command::Export { remote: false } => {
            println!("{}", write_export(LOCAL_EXPORT_FILE, app.export_users_local().await).await.message);
            return;
        }
        Command::Export { remote: true } => {
            match app.export_users_remote().await {
                Ok(csv) => println!("{}", write_export(REMOTE_EXPORT_FILE, csv).await.message),
                Err(notice) => println!("{}", notice.message),
            }
            return;
        }
        Command::Help => {
            println!("{}", encyclopedia_lib::ui::command::HELP);
            return;
        }
        Command::Quit => return,
    }
    show(app).await;
}

async fn show(app: &Encyclopedia) {
    let state = app.state().lock().await;
    println!("{}", render(&state));
}
