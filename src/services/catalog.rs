// src/services/catalog.rs

//! Station list fetching.

use serde_json::json;

use crate::error::Result;
use crate::models::wire::{Envelope, StationRow};
use crate::models::{Catalog, EndpointConfig, StationRecord};
use crate::session::AuthenticatedSession;

/// Service for retrieving the stations open for preference.
pub struct StationCatalogFetcher<'a> {
    endpoints: &'a EndpointConfig,
}

impl<'a> StationCatalogFetcher<'a> {
    pub fn new(endpoints: &'a EndpointConfig) -> Self {
        Self { endpoints }
    }

    /// Raw rows in portal order. The endpoint only answers POST.
    pub async fn fetch_rows(&self, session: &AuthenticatedSession) -> Result<Vec<StationRow>> {
        let body = session
            .post_page_method(&self.endpoints.station_list, &json!({ "CompanyId": "0" }))
            .await?;
        Envelope::decode(&body)
    }

    /// Fetch the catalog keyed by trimmed company name.
    pub async fn fetch_catalog(&self, session: &AuthenticatedSession) -> Result<Catalog> {
        let rows = self.fetch_rows(session).await?;
        let catalog = build_catalog(rows);
        log::info!("Loaded {} stations", catalog.len());
        Ok(catalog)
    }
}

/// Build a catalog from rows; a repeated name replaces the earlier row.
pub fn build_catalog(rows: Vec<StationRow>) -> Catalog {
    let mut catalog = Catalog::new();
    for row in rows {
        if let Some(previous) = catalog.insert(StationRecord::from(row)) {
            log::warn!(
                "Station \"{}\" is listed more than once; dropping the row with station id {}",
                previous.company_name,
                previous.station_id
            );
        }
    }
    catalog
}
