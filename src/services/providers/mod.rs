/// Movie database provider abstraction
///
/// The aggregator and autocomplete only need two operations from a movie
/// database: keyword search and detail lookup by external ID. Keeping them
/// behind a trait lets tests substitute an in-process fake.
use crate::{
    error::AppResult,
    models::{Movie, SearchHit},
};

pub mod omdb;

pub use omdb::OmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search movies matching a free-text keyword
    ///
    /// A query the database has no results for is an empty list, not an error.
    async fn search(&self, keyword: &str) -> AppResult<Vec<SearchHit>>;

    /// Fetch full details for one movie by external ID
    ///
    /// Returns `None` when the database reports the lookup as unsuccessful.
    async fn fetch_details(&self, imdb_id: &str) -> AppResult<Option<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
