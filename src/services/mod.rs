//! Service layer for the portal client.
//!
//! This module contains the business logic for:
//! - Login (`SessionAuthenticator`)
//! - Station list retrieval (`StationCatalogFetcher`)
//! - Problem bank merging (`ProblemBankEnricher`)
//! - Preferences file checks (`PreferenceValidator`)
//! - Preference submission (`PreferenceSubmitter`)
//! - Suggested rankings (`RankingHeuristic`)

pub mod auth;
pub mod catalog;
pub mod preferences;
pub mod problem_bank;
pub mod ranking;
pub mod submit;

pub use auth::SessionAuthenticator;
pub use catalog::StationCatalogFetcher;
pub use preferences::PreferenceValidator;
pub use problem_bank::ProblemBankEnricher;
pub use ranking::RankingHeuristic;
pub use submit::PreferenceSubmitter;
