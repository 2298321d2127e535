use crate::{
    error::AppResult,
    models::{Movie, SearchHit},
    services::providers::MovieProvider,
};
use futures::future::try_join_all;
use rand::{seq::SliceRandom, Rng};
use std::{collections::HashSet, sync::Arc};

/// Tunables for the recommendation pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatorSettings {
    /// Merged hits that get a detail lookup
    pub sample_size: usize,
    /// Minimum numeric rating kept in the output
    pub min_rating: f32,
    /// Maximum number of ranked movies returned
    pub max_results: usize,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            sample_size: 8,
            min_rating: 6.0,
            max_results: 8,
        }
    }
}

/// Result of a recommendation run
///
/// An empty ranked set is a normal outcome and is reported explicitly so
/// callers can show a "no matches" state instead of an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    Matches(Vec<Movie>),
    NoMatches,
}

/// Turns a keyword list into a ranked list of movies
#[derive(Clone)]
pub struct Aggregator {
    provider: Arc<dyn MovieProvider>,
    settings: AggregatorSettings,
}

impl Aggregator {
    pub fn new(provider: Arc<dyn MovieProvider>, settings: AggregatorSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> AggregatorSettings {
        self.settings
    }

    /// Runs the full search → merge → sample → detail → rank pipeline
    ///
    /// Network failures are not retried. The first one fails the whole run and
    /// drops the calls still in flight, as does dropping the returned future.
    pub async fn recommend(&self, keywords: &[String]) -> AppResult<Recommendations> {
        let hit_lists = self.search_all(keywords).await?;
        let merged = merge_unique(hit_lists);

        let sampled = {
            let mut rng = rand::thread_rng();
            sample_hits(merged, self.settings.sample_size, &mut rng)
        };

        let details = self.fetch_all_details(&sampled).await?;
        let ranked = rank_movies(details, self.settings.min_rating, self.settings.max_results);

        tracing::info!(
            keywords = keywords.len(),
            sampled = sampled.len(),
            ranked = ranked.len(),
            provider = self.provider.name(),
            "Recommendation run completed"
        );

        if ranked.is_empty() {
            Ok(Recommendations::NoMatches)
        } else {
            Ok(Recommendations::Matches(ranked))
        }
    }

    /// One search per keyword, run concurrently
    async fn search_all(&self, keywords: &[String]) -> AppResult<Vec<Vec<SearchHit>>> {
        let searches = keywords.iter().map(|keyword| async move {
            self.provider.search(keyword).await.inspect_err(|e| {
                tracing::error!(error = %e, keyword = %keyword, "Search failed");
            })
        });

        try_join_all(searches).await
    }

    /// One detail lookup per sampled hit, run concurrently
    async fn fetch_all_details(&self, hits: &[SearchHit]) -> AppResult<Vec<Movie>> {
        let lookups = hits.iter().map(|hit| async move {
            self.provider.fetch_details(&hit.imdb_id).await.inspect_err(|e| {
                tracing::error!(error = %e, imdb_id = %hit.imdb_id, "Detail lookup failed");
            })
        });

        let details = try_join_all(lookups).await?;
        Ok(details.into_iter().flatten().collect())
    }
}

/// Flattens per-keyword hit lists, keeping the first hit for each external ID
pub fn merge_unique(hit_lists: Vec<Vec<SearchHit>>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hit_lists
        .into_iter()
        .flatten()
        .filter(|hit| seen.insert(hit.imdb_id.clone()))
        .collect()
}

/// Picks up to `limit` hits uniformly at random
pub fn sample_hits<R: Rng + ?Sized>(
    mut hits: Vec<SearchHit>,
    limit: usize,
    rng: &mut R,
) -> Vec<SearchHit> {
    hits.shuffle(rng);
    hits.truncate(limit);
    hits
}

/// Keeps movies rated at least `min_rating`, best first, capped at `max_results`
///
/// Movies whose rating does not parse as a number are dropped. The sort is
/// stable, so equal ratings keep their input order.
pub fn rank_movies(movies: Vec<Movie>, min_rating: f32, max_results: usize) -> Vec<Movie> {
    let mut rated: Vec<(f32, Movie)> = movies
        .into_iter()
        .filter_map(|movie| movie.numeric_rating().map(|rating| (rating, movie)))
        .filter(|(rating, _)| *rating >= min_rating)
        .collect();

    rated.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    rated.truncate(max_results);
    rated.into_iter().map(|(_, movie)| movie).collect()
}
