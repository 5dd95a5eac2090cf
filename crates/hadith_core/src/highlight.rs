//! crates/hadith_core/src/highlight.rs
//!
//! Splits a text into matched and unmatched segments for a search term.

use regex::RegexBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Case-insensitive, literal highlighting of `term` within `text`.
/// A blank term yields the whole text as a single unmatched segment.
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    let whole = vec![Segment { text, matched: false }];
    if term.trim().is_empty() || text.is_empty() {
        return whole;
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return whole;
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for found in pattern.find_iter(text) {
        if found.start() > last {
            segments.push(Segment {
                text: &text[last..found.start()],
                matched: false,
            });
        }
        segments.push(Segment {
            text: found.as_str(),
            matched: true,
        });
        last = found.end();
    }
    if last < text.len() {
        segments.push(Segment {
            text: &text[last..],
            matched: false,
        });
    }
    segments
}

/// Renders `text` with every match wrapped in `open`/`close` markers.
pub fn mark(text: &str, term: &str, open: &str, close: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                format!("{}{}{}", open, segment.text, close)
            } else {
                segment.text.to_string()
            }
        })
        .collect()
}
