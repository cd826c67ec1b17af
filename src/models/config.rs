//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Portal location and HTTP behavior
    #[serde(default)]
    pub portal: PortalConfig,

    /// Endpoint paths relative to the portal root
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Local flat files
    #[serde(default)]
    pub paths: PathsConfig,

    /// Hypergen ranking rules
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, or the defaults if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Config file {:?} not found. Using defaults.", path);
                Ok(Self::default())
            }
            Err(AppError::Toml(e)) => Err(AppError::config(format!(
                "{} is not valid settings TOML: {e}",
                path.display()
            ))),
            other => other,
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if url::Url::parse(&self.portal.root_url).is_err() {
            return Err(AppError::config(format!(
                "portal.root_url is not a valid URL: {}",
                self.portal.root_url
            )));
        }
        if self.portal.user_agent.trim().is_empty() {
            return Err(AppError::config("portal.user_agent is empty"));
        }
        if self.portal.timeout_secs == 0 {
            return Err(AppError::config("portal.timeout_secs must be > 0"));
        }
        for (name, path) in self.endpoints.iter() {
            if !path.starts_with('/') {
                return Err(AppError::config(format!(
                    "endpoints.{name} must start with '/'"
                )));
            }
        }
        if self.ranking.cohort_tag.trim().is_empty() {
            return Err(AppError::config("ranking.cohort_tag is empty"));
        }
        Ok(())
    }
}

/// Portal location and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Scheme and host of the portal, without a trailing path
    #[serde(default = "defaults::root_url")]
    pub root_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            root_url: defaults::root_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Portal endpoint paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "defaults::login")]
    pub login: String,

    #[serde(default = "defaults::station_list")]
    pub station_list: String,

    #[serde(default = "defaults::problem_bank")]
    pub problem_bank: String,

    #[serde(default = "defaults::submit")]
    pub submit: String,
}

impl EndpointConfig {
    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("login", self.login.as_str()),
            ("station_list", self.station_list.as_str()),
            ("problem_bank", self.problem_bank.as_str()),
            ("submit", self.submit.as_str()),
        ]
        .into_iter()
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            login: defaults::login(),
            station_list: defaults::station_list(),
            problem_bank: defaults::problem_bank(),
            submit: defaults::submit(),
        }
    }
}

/// Locations of the credentials, preferences and favorites files.
///
/// Relative file names are resolved against `config_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::config_dir")]
    pub config_dir: PathBuf,

    #[serde(default = "defaults::credentials_file")]
    pub credentials_file: PathBuf,

    #[serde(default = "defaults::stations_file")]
    pub stations_file: PathBuf,

    #[serde(default = "defaults::favorites_file")]
    pub favorites_file: PathBuf,
}

impl PathsConfig {
    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join(&self.credentials_file)
    }

    pub fn stations_path(&self) -> PathBuf {
        self.config_dir.join(&self.stations_file)
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.config_dir.join(&self.favorites_file)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            config_dir: defaults::config_dir(),
            credentials_file: defaults::credentials_file(),
            stations_file: defaults::stations_file(),
            favorites_file: defaults::favorites_file(),
        }
    }
}

/// Eligibility and industry ordering used by hypergen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Tag marking stations open to the caller's cohort (e.g. "A7" for CS)
    #[serde(default = "defaults::cohort_tag")]
    pub cohort_tag: String,

    /// Industry domains from most to least preferred
    #[serde(default = "defaults::domain_priority")]
    pub domain_priority: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            cohort_tag: defaults::cohort_tag(),
            domain_priority: defaults::domain_priority(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Portal defaults
    pub fn root_url() -> String {
        "http://psd.bits-pilani.ac.in".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; stationpref/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Endpoint defaults
    pub fn login() -> String {
        "/Login.aspx".into()
    }
    pub fn station_list() -> String {
        "/Student/StudentStationPreference.aspx/getinfoStation".into()
    }
    pub fn problem_bank() -> String {
        "/Student/ViewActiveStationProblemBankData.aspx/getPBdetail".into()
    }
    pub fn submit() -> String {
        "/Student/StudentStationPreference.aspx/saveStudentStationPref".into()
    }

    // Path defaults
    pub fn config_dir() -> PathBuf {
        PathBuf::from(".config")
    }
    pub fn credentials_file() -> PathBuf {
        PathBuf::from("credentials.txt")
    }
    pub fn stations_file() -> PathBuf {
        PathBuf::from("stations.txt")
    }
    pub fn favorites_file() -> PathBuf {
        PathBuf::from("favorites.txt")
    }

    // Ranking defaults
    pub fn cohort_tag() -> String {
        "A7".into()
    }
    pub fn domain_priority() -> Vec<String> {
        [
            "IT",
            "Finance and Mgmt",
            "Electronics",
            "Others",
            "Health Care",
            "Mechanical",
            "Infrastructure",
            "Chemical",
            "Govt Research Lab",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}
