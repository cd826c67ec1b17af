// src/models/station.rs

//! Station catalog and enriched station records.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::wire::StationRow;

/// A station as listed by the preference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    /// Trimmed company name; the catalog key
    pub company_name: String,

    /// Company name exactly as the portal sent it
    pub raw_name: String,

    pub sequence_number: i64,
    pub city: String,
    pub station_id: i64,
    pub company_id: i64,
}

impl From<StationRow> for StationRecord {
    fn from(row: StationRow) -> Self {
        Self {
            company_name: row.company_name.trim().to_string(),
            raw_name: row.company_name,
            sequence_number: row.sno,
            city: row.city,
            station_id: row.station_id,
            company_id: row.company_id,
        }
    }
}

/// Stations keyed by trimmed company name, in the order the portal listed them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stations: Vec<StationRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A record with the same key replaces the earlier one in
    /// place and the replaced record is returned.
    pub fn insert(&mut self, record: StationRecord) -> Option<StationRecord> {
        match self.index.get(&record.company_name) {
            Some(&pos) => Some(std::mem::replace(&mut self.stations[pos], record)),
            None => {
                self.index
                    .insert(record.company_name.clone(), self.stations.len());
                self.stations.push(record);
                None
            }
        }
    }

    pub fn get(&self, company_name: &str) -> Option<&StationRecord> {
        self.index.get(company_name).map(|&pos| &self.stations[pos])
    }

    pub fn contains(&self, company_name: &str) -> bool {
        self.index.contains_key(company_name)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Records in portal order.
    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations.iter()
    }

    /// Catalog keys in portal order.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.company_name.as_str())
    }
}

impl FromIterator<StationRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = StationRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

/// Where the details of an [`EnrichedStationRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordSource {
    /// Copied from the problem bank
    ProblemBank,
    /// Reconstructed from the free-text company name; best effort only
    NameHeuristic,
}

/// A station with the details hypergen ranks on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedStationRecord {
    pub company_name: String,
    /// Comma-joined eligibility tags
    pub tags: String,
    pub stipend: i64,
    pub industry_domain: String,
    pub city: String,
    pub source: RecordSource,
}

impl EnrichedStationRecord {
    /// Individual tags, trimmed.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim)
    }

    /// Render the record as a line of the preferences file.
    pub fn preference_entry(&self) -> String {
        if self.industry_domain.is_empty() {
            format!("{}, {}", self.company_name, self.city)
        } else {
            format!(
                "{}-{}, {}",
                self.industry_domain, self.company_name, self.city
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, id: i64) -> StationRecord {
        StationRecord {
            company_name: name.trim().to_string(),
            raw_name: name.to_string(),
            sequence_number: id,
            city: "Pune".to_string(),
            station_id: id,
            company_id: id,
        }
    }

    #[test]
    fn catalog_keeps_portal_order() {
        let catalog: Catalog = [record("B", 1), record("A", 2), record("C", 3)]
            .into_iter()
            .collect();
        let names: Vec<_> = catalog.station_names().collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn catalog_last_write_wins() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(record("A", 1)).is_none());
        let replaced = catalog.insert(record(" A ", 2)).unwrap();
        assert_eq!(replaced.station_id, 1);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("A").unwrap().station_id, 2);
    }

    #[test]
    fn row_conversion_trims_key_and_keeps_raw_name() {
        let row = StationRow {
            company_name: "IT -Acme, Pune ".to_string(),
            sno: 3,
            city: "Pune".to_string(),
            station_id: 9,
            company_id: 4,
        };
        let rec = StationRecord::from(row);
        assert_eq!(rec.company_name, "IT -Acme, Pune");
        assert_eq!(rec.raw_name, "IT -Acme, Pune ");
    }

    #[test]
    fn preference_entry_formats() {
        let mut rec = EnrichedStationRecord {
            company_name: "Acme".to_string(),
            tags: "A7, Any".to_string(),
            stipend: 100,
            industry_domain: "IT".to_string(),
            city: "Pune".to_string(),
            source: RecordSource::ProblemBank,
        };
        assert_eq!(rec.preference_entry(), "IT-Acme, Pune");
        rec.industry_domain.clear();
        assert_eq!(rec.preference_entry(), "Acme, Pune");
        assert_eq!(rec.tag_list().collect::<Vec<_>>(), vec!["A7", "Any"]);
    }
}
