pub mod aggregator;
pub mod ambiance;
pub mod autocomplete;
pub mod freesound;
pub mod providers;
pub mod query_builder;
pub mod weather;
