//! Basketball statistics retrieval
//!
//! Maps an [`Intent`](crate::llm::Intent) onto exactly one provider
//! endpoint, resolves team and player names to provider ids, and reshapes
//! the raw payload into a [`StatRecord`].

mod endpoint;
mod fetcher;
pub mod normalize;
mod provider;
mod record;
pub mod season;
pub mod teams;

pub use endpoint::Endpoint;
pub use fetcher::{ResolvedPlayer, ResolvedTeam, StatsFetcher};
pub use provider::{is_empty_payload, unwrap_envelope, HttpStatsProvider, Params, StatsProvider};
pub use record::StatRecord;
