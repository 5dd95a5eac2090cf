//! crates/hadith_core/src/recommend.rs
//!
//! Random "recommended hadith" sampling for the home view.

use std::collections::HashSet;

use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::{hadith_id, Hadith, HadithBook};
use crate::ports::ContentService;

pub const RECOMMENDATION_COUNT: usize = 6;

/// Upper bound on sampling rounds, so a flaky content API cannot loop forever.
pub const MAX_SAMPLING_ROUNDS: usize = 15;

/// Picks up to `RECOMMENDATION_COUNT` random hadiths across `books`.
///
/// Each round shuffles the books, draws one random number per missing slot and
/// fetches the draws concurrently. A book/number pair is never requested twice.
/// Failed fetches just leave the slot open for the next round.
pub async fn sample_recommendations<R>(
    content: &dyn ContentService,
    books: &[HadithBook],
    rng: &mut R,
) -> Vec<Hadith>
where
    R: Rng + Send,
{
    let candidates: Vec<&HadithBook> = books.iter().filter(|b| b.total_hadiths > 0).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::with_capacity(RECOMMENDATION_COUNT);
    let mut attempted = HashSet::new();

    for round in 0..MAX_SAMPLING_ROUNDS {
        if results.len() >= RECOMMENDATION_COUNT {
            break;
        }
        let wanted = RECOMMENDATION_COUNT - results.len();
        let mut shuffled = candidates.clone();
        shuffled.shuffle(&mut *rng);

        let mut draws = Vec::new();
        for i in 0..wanted {
            let book = shuffled[i % shuffled.len()];
            let number = rng.random_range(1..=book.total_hadiths);
            if attempted.insert(hadith_id(&book.slug, number)) {
                draws.push((book.slug.as_str(), number));
            }
        }
        debug!("Recommendation round {}: {} draws", round + 1, draws.len());

        let fetched = join_all(
            draws
                .into_iter()
                .map(|(slug, number)| content.get_hadith(slug, number)),
        )
        .await;
        results.extend(fetched.into_iter().flatten());
    }

    results
}
