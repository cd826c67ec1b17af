// src/services/ranking.rs

//! Hypergen: a suggested ranking built from enriched station data.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{EnrichedStationRecord, RankingConfig};
use crate::services::problem_bank::FALLBACK_TAGS;

/// Tag the portal uses for stations open to every cohort.
const ANY_TAG: &str = "Any";

/// Orders stations by eligibility, then industry domain, then stipend.
pub struct RankingHeuristic<'a> {
    config: &'a RankingConfig,
}

impl<'a> RankingHeuristic<'a> {
    pub fn new(config: &'a RankingConfig) -> Self {
        Self { config }
    }

    /// Stations tagged for the cohort, for anyone, or not tagged at all
    /// (parsed from the name) count as eligible.
    pub fn is_eligible(&self, record: &EnrichedStationRecord) -> bool {
        record
            .tag_list()
            .any(|t| t == self.config.cohort_tag || t == ANY_TAG || t == FALLBACK_TAGS)
    }

    /// Position in the domain table; unlisted domains sort after every listed one.
    pub fn domain_rank(&self, record: &EnrichedStationRecord) -> usize {
        let domain = record.industry_domain.trim();
        self.config
            .domain_priority
            .iter()
            .position(|d| d == domain)
            .unwrap_or(self.config.domain_priority.len())
    }

    pub fn compare(&self, a: &EnrichedStationRecord, b: &EnrichedStationRecord) -> Ordering {
        self.is_eligible(b)
            .cmp(&self.is_eligible(a))
            .then_with(|| self.domain_rank(a).cmp(&self.domain_rank(b)))
            .then_with(|| b.stipend.cmp(&a.stipend))
    }

    /// Sort records best first; equal records keep their input order.
    pub fn sort(&self, records: &mut [EnrichedStationRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    /// Lines of the generated preferences file: favorites first, then every
    /// record in ranked order, without repeats.
    pub fn generate_entries(
        &self,
        mut records: Vec<EnrichedStationRecord>,
        favorites: &[String],
    ) -> Vec<String> {
        self.sort(&mut records);

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let ranked = records.iter().map(EnrichedStationRecord::preference_entry);
        for entry in favorites.iter().cloned().chain(ranked) {
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordSource;

    fn record(name: &str, tags: &str, domain: &str, stipend: i64) -> EnrichedStationRecord {
        EnrichedStationRecord {
            company_name: name.to_string(),
            tags: tags.to_string(),
            stipend,
            industry_domain: domain.to_string(),
            city: "Pune".to_string(),
            source: RecordSource::ProblemBank,
        }
    }

    fn names(records: &[EnrichedStationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.company_name.as_str()).collect()
    }

    #[test]
    fn eligibility_outranks_stipend() {
        let config = RankingConfig::default();
        let ranking = RankingHeuristic::new(&config);
        let mut records = vec![
            record("A", "B4, C6", "IT", 100),
            record("B", "Any", "IT", 50),
        ];
        ranking.sort(&mut records);
        assert_eq!(names(&records), vec!["B", "A"]);
    }

    #[test]
    fn eligibility_accepts_cohort_any_and_fallback() {
        let config = RankingConfig::default();
        let ranking = RankingHeuristic::new(&config);
        assert!(ranking.is_eligible(&record("x", "B4 , A7", "", 0)));
        assert!(ranking.is_eligible(&record("x", "Any", "", 0)));
        assert!(ranking.is_eligible(&record("x", "-", "", 0)));
        assert!(!ranking.is_eligible(&record("x", "B4", "", 0)));
        assert!(!ranking.is_eligible(&record("x", "", "", 0)));
    }

    #[test]
    fn domain_then_stipend() {
        let config = RankingConfig::default();
        let ranking = RankingHeuristic::new(&config);
        let mut records = vec![
            record("Mech", "Any", "Mechanical", 90000),
            record("Unlisted", "Any", "Aerospace", 99000),
            record("ITlow", "Any", " IT ", 10000),
            record("IThigh", "Any", "IT", 20000),
        ];
        ranking.sort(&mut records);
        assert_eq!(names(&records), vec!["IThigh", "ITlow", "Mech", "Unlisted"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let config = RankingConfig::default();
        let ranking = RankingHeuristic::new(&config);
        let mut records = vec![
            record("first", "Any", "IT", 0),
            record("second", "Any", "IT", 0),
        ];
        ranking.sort(&mut records);
        assert_eq!(names(&records), vec!["first", "second"]);
    }

    #[test]
    fn custom_cohort_tag() {
        let config = RankingConfig {
            cohort_tag: "B4".to_string(),
            ..RankingConfig::default()
        };
        let ranking = RankingHeuristic::new(&config);
        assert!(ranking.is_eligible(&record("x", "B4", "", 0)));
        assert!(!ranking.is_eligible(&record("x", "A7", "", 0)));
    }

    #[test]
    fn entries_start_with_deduplicated_favorites() {
        let config = RankingConfig::default();
        let ranking = RankingHeuristic::new(&config);
        let records = vec![
            record("Low", "Any", "IT", 1),
            record("High", "Any", "IT", 2),
            record("Plain", "Any", "", 3),
        ];
        let favorites = vec![
            "IT-Low, Pune".to_string(),
            "Dream Co, Goa".to_string(),
            "IT-Low, Pune".to_string(),
        ];
        let entries = ranking.generate_entries(records, &favorites);
        assert_eq!(
            entries,
            vec!["IT-Low, Pune", "Dream Co, Goa", "IT-High, Pune", "Plain, Pune"]
        );
    }
}
