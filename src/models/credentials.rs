//! Portal credentials loaded from a `key: value` text file.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};

/// Login details plus the cities the user wants accommodation in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub accommodation: BTreeSet<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("accommodation", &self.accommodation)
            .finish()
    }
}

impl Credentials {
    /// Load credentials from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::missing_file("Credentials", path));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            AppError::Config(msg) => AppError::config(format!("{} ({})", msg, path.display())),
            other => other,
        })
    }

    /// Parse the `key: value` format.
    ///
    /// Recognized keys are `username`, `password` and `acco` (comma-separated
    /// cities). Blank lines are ignored; later keys override earlier ones.
    pub fn parse(content: &str) -> Result<Self> {
        let mut username = String::new();
        let mut password = String::new();
        let mut accommodation = BTreeSet::new();

        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let Some((key, value)) = line.split_once(':') else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(AppError::config(format!(
                    "line number {line_no} is invalid: {}",
                    line.trim()
                )));
            };

            let value = value.trim();
            match key.trim() {
                "username" => username = value.to_string(),
                "password" => password = value.to_string(),
                "acco" => {
                    accommodation = value
                        .split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect();
                }
                other => {
                    return Err(AppError::config(format!(
                        "\"{other}\" is an unrecognized key"
                    )));
                }
            }
        }

        if username.is_empty() {
            return Err(AppError::config("username was not provided"));
        }
        if password.is_empty() {
            return Err(AppError::config("password was not provided"));
        }

        Ok(Self {
            username,
            password,
            accommodation,
        })
    }
}
