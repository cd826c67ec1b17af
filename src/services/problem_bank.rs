// src/services/problem_bank.rs

//! Problem bank enrichment.
//!
//! The problem bank only covers part of the catalog. Stations it knows about
//! get their industry, tags, stipend and city from it; the rest are rebuilt
//! from the company name, which the portal formats as
//! `"{Industry}-{Name}, {City}"`.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::models::wire::{Envelope, ProblemBankRow};
use crate::models::{Catalog, EndpointConfig, EnrichedStationRecord, RecordSource};
use crate::session::AuthenticatedSession;

/// .NET ticks (100ns since 0001-01-01) at the Unix epoch.
const EPOCH_TICKS: i64 = 621_355_968_000_000_000;
const TICKS_PER_MILLISECOND: i64 = 10_000;

/// Tags given to stations missing from the problem bank.
pub const FALLBACK_TAGS: &str = "-";

/// Token the problem bank page computes in the browser: the current time in
/// .NET ticks.
pub fn pb_token(epoch_millis: i64) -> i64 {
    EPOCH_TICKS + TICKS_PER_MILLISECOND * epoch_millis
}

#[derive(Debug, Serialize)]
struct ProblemBankRequest {
    batchid: &'static str,
    token: String,
}

/// Service merging problem bank detail into the catalog.
pub struct ProblemBankEnricher<'a> {
    endpoints: &'a EndpointConfig,
}

impl<'a> ProblemBankEnricher<'a> {
    pub fn new(endpoints: &'a EndpointConfig) -> Self {
        Self { endpoints }
    }

    /// Problem bank rows indexed by station id.
    pub async fn fetch_problem_bank(
        &self,
        session: &AuthenticatedSession,
    ) -> Result<HashMap<i64, ProblemBankRow>> {
        let request = ProblemBankRequest {
            batchid: "undefined",
            token: pb_token(Utc::now().timestamp_millis()).to_string(),
        };
        let body = session
            .post_page_method(&self.endpoints.problem_bank, &request)
            .await?;
        let rows: Vec<ProblemBankRow> = Envelope::decode(&body)?;
        Ok(rows.into_iter().map(|r| (r.station_id, r)).collect())
    }

    /// Fetch the problem bank and merge it with the catalog.
    pub async fn enrich(
        &self,
        session: &AuthenticatedSession,
        catalog: &Catalog,
    ) -> Result<Vec<EnrichedStationRecord>> {
        let problem_bank = self.fetch_problem_bank(session).await?;
        let records = merge(catalog, &problem_bank);
        let heuristic = records
            .iter()
            .filter(|r| r.source == RecordSource::NameHeuristic)
            .count();
        log::info!(
            "Enriched {} stations ({} from the problem bank, {} parsed from names)",
            records.len(),
            records.len() - heuristic,
            heuristic
        );
        Ok(records)
    }
}

/// Merge in catalog order.
pub fn merge(
    catalog: &Catalog,
    problem_bank: &HashMap<i64, ProblemBankRow>,
) -> Vec<EnrichedStationRecord> {
    catalog
        .iter()
        .map(|station| match problem_bank.get(&station.station_id) {
            Some(detail) => EnrichedStationRecord {
                company_name: detail.company_name.clone(),
                tags: detail.tags.clone(),
                stipend: detail.stipend,
                industry_domain: detail.industry_domain.clone(),
                city: detail.city.clone(),
                source: RecordSource::ProblemBank,
            },
            None => from_company_name(&station.raw_name),
        })
        .collect()
}

/// Rebuild a record from a raw `"{Industry}-{Name}, {City}"` company name.
///
/// Splits on the first `-` and then on the last `,`. The industry keeps its
/// surrounding whitespace so that [`EnrichedStationRecord::preference_entry`]
/// reproduces the portal's text; name and city are trimmed. Names holding an
/// extra `-` before the industry separator or a `,` inside the city are
/// misparsed.
pub fn from_company_name(raw_name: &str) -> EnrichedStationRecord {
    let (industry, rest) = raw_name.split_once('-').unwrap_or((raw_name, ""));
    let (company, city) = rest.rsplit_once(',').unwrap_or(("", rest));
    EnrichedStationRecord {
        company_name: company.trim().to_string(),
        tags: FALLBACK_TAGS.to_string(),
        stipend: 0,
        industry_domain: industry.to_string(),
        city: city.trim().to_string(),
        source: RecordSource::NameHeuristic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationRecord;

    fn station(raw: &str, id: i64) -> StationRecord {
        StationRecord {
            company_name: raw.trim().to_string(),
            raw_name: raw.to_string(),
            sequence_number: id,
            city: String::new(),
            station_id: id,
            company_id: id,
        }
    }

    #[test]
    fn token_uses_dotnet_tick_epoch() {
        assert_eq!(pb_token(0), 621_355_968_000_000_000);
        // 2024-01-01T00:00:00Z
        assert_eq!(pb_token(1_704_067_200_000), 638_396_640_000_000_000);
    }

    #[test]
    fn heuristic_fallback_splits_industry_name_and_city() {
        let rec = from_company_name("IT-Acme, Pune");
        assert_eq!(rec.industry_domain, "IT");
        assert_eq!(rec.company_name, "Acme");
        assert_eq!(rec.city, "Pune");
        assert_eq!(rec.tags, "-");
        assert_eq!(rec.stipend, 0);
        assert_eq!(rec.source, RecordSource::NameHeuristic);
    }

    #[test]
    fn heuristic_fallback_keeps_industry_whitespace() {
        let rec = from_company_name("Finance and Mgmt -Globex Ltd,  Mumbai ");
        assert_eq!(rec.industry_domain, "Finance and Mgmt ");
        assert_eq!(rec.company_name, "Globex Ltd");
        assert_eq!(rec.city, "Mumbai");
        assert_eq!(rec.preference_entry(), "Finance and Mgmt -Globex Ltd, Mumbai");
    }

    #[test]
    fn heuristic_fallback_is_best_effort_with_extra_separators() {
        // Only the first '-' separates the industry and only the last ',' the city.
        let rec = from_company_name("IT-Hewlett-Packard, R&D, Bengaluru");
        assert_eq!(rec.industry_domain, "IT");
        assert_eq!(rec.company_name, "Hewlett-Packard, R&D");
        assert_eq!(rec.city, "Bengaluru");

        // A hyphenated industry is cut short.
        let rec = from_company_name("Govt-Research Lab-CSIR, Delhi");
        assert_eq!(rec.industry_domain, "Govt");
        assert_eq!(rec.company_name, "Research Lab-CSIR");
    }

    #[test]
    fn heuristic_fallback_without_separators() {
        let rec = from_company_name("Acme Pune");
        assert_eq!(rec.industry_domain, "Acme Pune");
        assert_eq!(rec.company_name, "");
        assert_eq!(rec.city, "");

        let rec = from_company_name("IT-Acme");
        assert_eq!(rec.company_name, "");
        assert_eq!(rec.city, "Acme");
    }

    #[test]
    fn merge_prefers_problem_bank_and_keeps_catalog_order() {
        let catalog: Catalog = [station("IT-Acme, Pune", 1), station("Core-Beta, Goa", 2)]
            .into_iter()
            .collect();
        let mut bank = HashMap::new();
        bank.insert(
            2,
            ProblemBankRow {
                station_id: 2,
                company_name: "Beta Industries".to_string(),
                tags: "A7, B4".to_string(),
                stipend: 40000,
                industry_domain: "Mechanical".to_string(),
                city: "Goa".to_string(),
            },
        );
        bank.insert(
            99,
            ProblemBankRow {
                station_id: 99,
                company_name: "Not in catalog".to_string(),
                tags: String::new(),
                stipend: 1,
                industry_domain: String::new(),
                city: String::new(),
            },
        );

        let records = merge(&catalog, &bank);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_name, "Acme");
        assert_eq!(records[0].source, RecordSource::NameHeuristic);
        assert_eq!(records[1].company_name, "Beta Industries");
        assert_eq!(records[1].stipend, 40000);
        assert_eq!(records[1].source, RecordSource::ProblemBank);
    }
}
