//! services/encyclopedia/src/ui/render.rs
//!
//! Renders the current `UiState` as plain text for the terminal.

use std::fmt::Write;

use hadith_core::catalog::HADITH_FIGURES;
use hadith_core::highlight::mark;
use hadith_core::navigation::View;
use hadith_core::pagination::{PageItem, Paginator};
use hadith_core::Hadith;

use crate::ui::dashboard::format_long_date;
use crate::ui::state::UiState;

const MATCH_OPEN: &str = "\x1b[1;33m";
const MATCH_CLOSE: &str = "\x1b[0m";

const ABOUT: &str = "Ensiklopedia Hadits: jelajahi kitab-kitab hadits, cari berdasarkan kata kunci, \
dan baca penjelasan (syarah) yang dibuat oleh AI.";

pub fn render(state: &UiState) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "! {}", error);
    }

    match state.view() {
        View::Home => render_home(state, &mut out),
        View::SearchResults => render_search(state, &mut out),
        View::Detail => render_detail(state, &mut out),
        View::BookView => render_book(state, &mut out),
        View::Favorites => match &state.current_user {
            Some(user) if !user.favorites.is_empty() => {
                let _ = writeln!(out, "Favorit ({}):", user.favorites.len());
                for hadith in user.favorites.hadiths() {
                    render_hadith_line(hadith, "", &mut out);
                }
            }
            Some(_) => out.push_str("Belum ada hadits favorit.\n"),
            None => out.push_str("Silakan login untuk melihat favorit.\n"),
        },
        View::Sources => {
            for book in &state.books {
                let _ = writeln!(
                    out,
                    "{:<12} {} ({} hadits), {}",
                    book.slug, book.name, book.total_hadiths, book.narrator
                );
            }
        }
        View::Figures => {
            for figure in HADITH_FIGURES {
                let _ = writeln!(out, "{:<22} {} ({})", figure.slug, figure.name, figure.birth_death);
            }
        }
        View::FigureDetail => {
            if let Some(figure) = state.selected_figure {
                let _ = writeln!(out, "{}\n{}, {}\n\n{}", figure.name, figure.title, figure.birth_death, figure.bio);
                if !figure.works.is_empty() {
                    let _ = writeln!(out, "\nKarya: {}", figure.works.join(", "));
                }
            }
        }
        View::About => {
            let _ = writeln!(out, "{}", ABOUT);
        }
        View::Login => out.push_str("Masuk: login <email> <password>, atau register <nama> <email> <password> <konfirmasi>\n"),
        View::Register => out.push_str("Daftar: register <nama> <email> <password> <konfirmasi>\n"),
        View::Dashboard => render_dashboard(state, &mut out),
    }
    out
}

fn render_home(state: &UiState, out: &mut String) {
    if let Some(user) = &state.current_user {
        let _ = writeln!(out, "Assalamu'alaikum, {}.", user.username);
    }
    if state.recommendations_loading {
        out.push_str("Memuat rekomendasi...\n");
    } else if !state.recommendations.is_empty() {
        out.push_str("Rekomendasi hari ini:\n");
        for hadith in &state.recommendations {
            render_hadith_line(hadith, "", out);
        }
    }
}

fn render_search(state: &UiState, out: &mut String) {
    if !state.search_status.is_empty() {
        let _ = writeln!(out, "{}", state.search_status);
    }
    if state.results.is_empty() {
        if !state.is_searching && !state.search_status.is_empty() {
            let _ = writeln!(
                out,
                "Tidak ada hadits yang cocok dengan kata kunci \"{}\".",
                state.search_term
            );
        }
        return;
    }
    for hadith in state.search_results_page() {
        render_hadith_line(hadith, &state.search_term, out);
    }
    render_pages(&state.search_page, out);
}

fn render_detail(state: &UiState, out: &mut String) {
    let Some(hadith) = &state.selected_hadith else {
        if state.is_loading {
            out.push_str("Memuat...\n");
        }
        return;
    };
    let star = if state.is_favorite(&hadith.id) { " *" } else { "" };
    let _ = writeln!(out, "{} No. {}{}\n\n{}\n\n{}", hadith.book, hadith.number, star, hadith.arabic, hadith.translation);

    if state.is_loading {
        out.push_str("\nMemuat penjelasan...\n");
        return;
    }
    if !state.ai_explanation.is_empty() {
        let _ = writeln!(out, "\nSyarah:\n{}", state.ai_explanation);
    }
    if !state.related_hadiths.is_empty() {
        out.push_str("\nHadits terkait:\n");
        for related in &state.related_hadiths {
            render_hadith_line(related, "", out);
        }
    }
}

fn render_book(state: &UiState, out: &mut String) {
    let Some(book) = &state.selected_book else {
        return;
    };
    let _ = writeln!(out, "{} ({} hadits)\n{}\n", book.name, book.total_hadiths, book.description);
    if state.book_loading {
        out.push_str("Memuat...\n");
        return;
    }
    for hadith in &state.book_hadiths {
        render_hadith_line(hadith, "", out);
    }
    render_pages(&state.book_page, out);
}

fn render_dashboard(state: &UiState, out: &mut String) {
    if state.dashboard.loading {
        out.push_str("Memuat pengguna...\n");
        return;
    }
    let users = state.dashboard.filtered();
    if users.is_empty() {
        out.push_str("Tidak ada pengguna yang cocok dengan pencarian Anda.\n");
        return;
    }
    for user in users {
        let role = if user.is_admin() { "Admin" } else { "Pengguna" };
        let _ = writeln!(
            out,
            "{:>4}  {:<20} {:<28} {:<9} {}",
            user.id,
            user.username,
            user.email,
            role,
            format_long_date(user.created_at.as_ref())
        );
    }
}

fn render_hadith_line(hadith: &Hadith, term: &str, out: &mut String) {
    let text: String = hadith.translation.chars().take(120).collect();
    let text = if term.trim().is_empty() {
        text
    } else {
        mark(&text, term.trim(), MATCH_OPEN, MATCH_CLOSE)
    };
    let _ = writeln!(out, "[{} {}] {}", hadith.book_id, hadith.number, text);
}

fn render_pages(paginator: &Paginator, out: &mut String) {
    if paginator.total_pages() <= 1 {
        return;
    }
    let strip: Vec<String> = paginator
        .window()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(page) if page == paginator.current() => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Dots => "...".to_string(),
        })
        .collect();
    let _ = writeln!(out, "Halaman: {}", strip.join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use hadith_core::search::SearchEvent;

    #[test]
    fn search_results_highlight_the_term_and_show_pages() {
        let mut state = UiState::new();
        state.navigator.navigate(View::SearchResults);
        state.search_term = "sabar".to_string();
        let (_, generation) = state.search.begin();
        state.is_searching = true;
        let matches = (1..=25)
            .map(|n| Hadith::new("muslim", "HR. Muslim", n, "نص", "Orang yang Sabar"))
            .collect();
        state.apply_search_event(generation, SearchEvent::Matches(matches));

        let text = render(&state);

        assert!(text.contains("[muslim 1] Orang yang \x1b[1;33mSabar\x1b[0m"));
        assert!(text.contains("Halaman: [1] 2"));
    }

    #[test]
    fn empty_search_reports_no_matches() {
        let mut state = UiState::new();
        state.navigator.navigate(View::SearchResults);
        state.search_term = "zzz".to_string();
        state.search_status = "Pencarian selesai. Ditemukan 0 hasil.".to_string();

        let text = render(&state);
        assert!(text.contains("Tidak ada hadits yang cocok dengan kata kunci \"zzz\"."));
    }

    #[test]
    fn errors_are_shown_above_the_view() {
        let mut state = UiState::new();
        state.error = Some("Hadits tidak ditemukan.".to_string());
        assert!(render(&state).starts_with("! Hadits tidak ditemukan.\n"));
    }
}
