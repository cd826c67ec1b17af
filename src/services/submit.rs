// src/services/submit.rs

//! Preference submission.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::wire::{Envelope, SubmitAck};
use crate::models::{Catalog, EndpointConfig};
use crate::session::AuthenticatedSession;

/// Acknowledgment text the portal sends for an accepted submission.
pub const SUCCESS_MESSAGE: &str = "Station Preference Submitted Successfully.";

/// One ranked station as the portal expects it. Every value is a string
/// except the station id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceEntry {
    #[serde(rename = "isActive")]
    pub is_active: &'static str,
    #[serde(rename = "PreferenceNo")]
    pub preference_no: String,
    #[serde(rename = "StationId")]
    pub station_id: i64,
    #[serde(rename = "Accommodation")]
    pub accommodation: &'static str,
}

/// Request body of the save endpoint; `jsondata` holds the entries as a JSON
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPayload {
    pub jsondata: String,
    pub jsonvalue: &'static str,
    pub contistation: &'static str,
}

/// Encode ordered preferences into the save endpoint's payload.
pub fn build_entries(
    catalog: &Catalog,
    preferences: &[String],
    accommodation: &BTreeSet<String>,
) -> Result<Vec<PreferenceEntry>> {
    preferences
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let station = catalog.get(name).ok_or_else(|| {
                AppError::submit(format!("station \"{name}\" is not in the catalog"))
            })?;
            Ok(PreferenceEntry {
                is_active: "1",
                preference_no: (i + 1).to_string(),
                station_id: station.station_id,
                accommodation: if accommodation.contains(&station.city) {
                    "true"
                } else {
                    "false"
                },
            })
        })
        .collect()
}

/// Build the full request body.
pub fn build_payload(
    catalog: &Catalog,
    preferences: &[String],
    accommodation: &BTreeSet<String>,
) -> Result<SubmitPayload> {
    let entries = build_entries(catalog, preferences, accommodation)?;
    Ok(SubmitPayload {
        jsondata: serde_json::to_string(&entries)?,
        jsonvalue: "",
        contistation: "0",
    })
}

/// Read the acknowledgment message out of a save response body.
pub fn check_acknowledgment(body: &str) -> Result<()> {
    let acks: Vec<SubmitAck> = Envelope::decode(body)
        .map_err(|e| AppError::submit(format!("malformed acknowledgment: {e}")))?;
    let message = acks
        .into_iter()
        .next()
        .and_then(|ack| ack.message)
        .ok_or_else(|| AppError::submit("acknowledgment has no message"))?;
    if message == SUCCESS_MESSAGE {
        Ok(())
    } else {
        Err(AppError::submit(message))
    }
}

/// Service posting a validated ranking back to the portal.
pub struct PreferenceSubmitter<'a> {
    endpoints: &'a EndpointConfig,
}

impl<'a> PreferenceSubmitter<'a> {
    pub fn new(endpoints: &'a EndpointConfig) -> Self {
        Self { endpoints }
    }

    /// Submit the full ranking in one request.
    pub async fn submit(
        &self,
        session: &AuthenticatedSession,
        catalog: &Catalog,
        preferences: &[String],
        accommodation: &BTreeSet<String>,
    ) -> Result<()> {
        let payload = build_payload(catalog, preferences, accommodation)?;
        let endpoint = &self.endpoints.submit;

        let response = session.post_json(endpoint, &payload).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::submit(format!(
                "{endpoint} returned status {status}"
            )));
        }
        let body = response.text().await?;
        check_acknowledgment(&body)?;

        log::info!("Submitted {} station preferences", preferences.len());
        Ok(())
    }
}
