//! Stats command

use crate::app::{OutputFormat, StatsArgs};
use crate::output;
use anyhow::Result;
use courtside_core::{Category, Config, CourtsideError, Endpoint, Entities, StatsFetcher};

pub async fn run(args: StatsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let category: Category = args.category.parse().map_err(CourtsideError::InvalidInput)?;
    let endpoint = Endpoint::for_category(category).ok_or_else(|| {
        CourtsideError::InvalidInput(format!("'{}' has no stats lookup", category))
    })?;

    let entities = Entities {
        player: args.player,
        team: args.team,
        team1: args.team1,
        team2: args.team2,
        season: args.season,
    };

    let fetcher = StatsFetcher::from_config(&config.stats_provider)?;
    let record = fetcher.fetch_endpoint(endpoint, &entities).await?;
    print!("{}", output::format_record(&record, format));
    Ok(())
}
