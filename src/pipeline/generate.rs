// src/pipeline/generate.rs

//! List generation: dump the portal's station list as a preferences file.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::services::StationCatalogFetcher;
use crate::session::AuthenticatedSession;
use crate::storage::LocalStorage;

/// Write every station name, in portal order, to `output`.
///
/// Overwrite confirmation is the caller's job.
pub async fn run_generate(
    config: &Config,
    storage: &LocalStorage,
    session: &AuthenticatedSession,
    output: &Path,
) -> Result<()> {
    log::info!("Generating the updated station list...");
    let catalog = StationCatalogFetcher::new(&config.endpoints)
        .fetch_catalog(session)
        .await?;

    let names: Vec<String> = catalog.station_names().map(String::from).collect();
    storage.write_lines(output, &names).await?;

    log::info!("Wrote {} stations to {}", names.len(), output.display());
    Ok(())
}
