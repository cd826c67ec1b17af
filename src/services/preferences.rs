// src/services/preferences.rs

//! Preferences file validation.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result, ValidationError};
use crate::models::Catalog;

/// Checks that a preferences file ranks every catalog station exactly once.
pub struct PreferenceValidator<'a> {
    catalog: &'a Catalog,
}

impl<'a> PreferenceValidator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Read and validate a preferences file.
    pub fn load_and_validate(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(AppError::missing_file("Station preferences", path));
        }
        let content = fs::read_to_string(path)?;
        let preferences = self.validate(&content, path)?;
        log::info!(
            "Validated {} station preferences from {}",
            preferences.len(),
            path.display()
        );
        Ok(preferences)
    }

    /// Validate preferences text, one station per line.
    ///
    /// Blank lines are skipped but still count towards line numbers. `path` is
    /// only used in error messages.
    pub fn validate(
        &self,
        content: &str,
        path: &Path,
    ) -> std::result::Result<Vec<String>, ValidationError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut ordered = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let station = line.trim();
            if station.is_empty() {
                continue;
            }
            if !self.catalog.contains(station) {
                return Err(ValidationError::UnknownStation {
                    station: station.to_string(),
                    line: line_no,
                    path: path.to_path_buf(),
                });
            }
            if let Some(&first_line) = seen.get(station) {
                return Err(ValidationError::DuplicateStation {
                    station: station.to_string(),
                    first_line,
                    repeat_line: line_no,
                    path: path.to_path_buf(),
                });
            }
            seen.insert(station, line_no);
            ordered.push(station.to_string());
        }

        if ordered.len() != self.catalog.len() {
            let missing: BTreeSet<String> = self
                .catalog
                .station_names()
                .filter(|name| !seen.contains_key(name))
                .map(String::from)
                .collect();
            return Err(ValidationError::Incomplete {
                missing,
                path: PathBuf::from(path),
            });
        }

        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StationRecord;

    fn catalog(names: &[&str]) -> Catalog {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| StationRecord {
                company_name: n.to_string(),
                raw_name: n.to_string(),
                sequence_number: i as i64,
                city: "Pune".to_string(),
                station_id: i as i64,
                company_id: i as i64,
            })
            .collect()
    }

    fn path() -> &'static Path {
        Path::new("stations.txt")
    }

    #[test]
    fn blank_lines_are_skipped() {
        let catalog = catalog(&["A", "B", "C"]);
        let validator = PreferenceValidator::new(&catalog);
        let prefs = validator.validate("\n  C \n\n\t\nA\nB\n   \n", path()).unwrap();
        assert_eq!(prefs, vec!["C", "A", "B"]);
    }

    #[test]
    fn unknown_station_names_its_line() {
        let catalog = catalog(&["A", "B"]);
        let validator = PreferenceValidator::new(&catalog);
        let err = validator.validate("A\n\nZ\nB\n", path()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownStation {
                station: "Z".to_string(),
                line: 3,
                path: path().to_path_buf(),
            }
        );
    }

    #[test]
    fn duplicate_station_names_both_lines() {
        let catalog = catalog(&["A", "B", "C"]);
        let validator = PreferenceValidator::new(&catalog);
        let err = validator.validate("B\nA\n\n B\nC\n", path()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateStation {
                station: "B".to_string(),
                first_line: 1,
                repeat_line: 4,
                path: path().to_path_buf(),
            }
        );
    }

    #[test]
    fn incomplete_lists_exactly_the_missing_names() {
        let catalog = catalog(&["A", "B", "C", "D"]);
        let validator = PreferenceValidator::new(&catalog);
        let err = validator.validate("D\nB\n", path()).unwrap_err();
        let ValidationError::Incomplete { missing, .. } = err else {
            panic!("expected Incomplete, got {err:?}");
        };
        assert_eq!(
            missing,
            ["A", "C"].into_iter().map(String::from).collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let catalog = catalog(&["A"]);
        let err = PreferenceValidator::new(&catalog)
            .load_and_validate(&tmp.path().join("stations.txt"))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_reads_and_validates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("stations.txt");
        fs::write(&file, "B\r\nA\r\n").unwrap();
        let catalog = catalog(&["A", "B"]);
        let prefs = PreferenceValidator::new(&catalog)
            .load_and_validate(&file)
            .unwrap();
        assert_eq!(prefs, vec!["B", "A"]);
    }
}
