// src/pipeline/hypergen.rs

//! Hypergen: write a preferences file ranked by eligibility, industry and
//! stipend, with the user's favorites on top.

use crate::error::Result;
use crate::models::Config;
use crate::services::{ProblemBankEnricher, RankingHeuristic, StationCatalogFetcher};
use crate::session::AuthenticatedSession;
use crate::storage::LocalStorage;

/// Build and write the ranked preferences file.
pub async fn run_hypergen(
    config: &Config,
    storage: &LocalStorage,
    session: &AuthenticatedSession,
) -> Result<()> {
    log::info!("Executing HyperGen...");
    let catalog = StationCatalogFetcher::new(&config.endpoints)
        .fetch_catalog(session)
        .await?;

    log::info!("Fetching and adding detailed data to the stations list...");
    let records = ProblemBankEnricher::new(&config.endpoints)
        .enrich(session, &catalog)
        .await?;

    let favorites = storage.load_favorites().await?;
    let entries = RankingHeuristic::new(&config.ranking).generate_entries(records, &favorites);

    let path = storage.stations_path();
    storage.write_lines(&path, &entries).await?;

    log::info!(
        "HyperGen wrote {} entries to {}",
        entries.len(),
        path.display()
    );
    Ok(())
}
