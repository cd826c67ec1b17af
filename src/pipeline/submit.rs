// src/pipeline/submit.rs

//! Default mode: validate the preferences file and submit it.

use crate::error::Result;
use crate::models::{Config, Credentials};
use crate::services::{PreferenceSubmitter, PreferenceValidator, StationCatalogFetcher};
use crate::session::AuthenticatedSession;
use crate::storage::LocalStorage;

/// Fetch the catalog, validate the local ranking against it and submit.
pub async fn run_submit(
    config: &Config,
    storage: &LocalStorage,
    session: &AuthenticatedSession,
    credentials: &Credentials,
) -> Result<()> {
    log::info!("Loading the currently available stations...");
    let catalog = StationCatalogFetcher::new(&config.endpoints)
        .fetch_catalog(session)
        .await?;

    let preferences =
        PreferenceValidator::new(&catalog).load_and_validate(&storage.stations_path())?;

    log::info!("Sending station preferences...");
    PreferenceSubmitter::new(&config.endpoints)
        .submit(session, &catalog, &preferences, &credentials.accommodation)
        .await
}
