//! Local filesystem storage for the line-oriented files.
//!
//! ## Layout
//!
//! ```text
//! {config_dir}/
//! ├── credentials.txt   # username / password / acco
//! ├── stations.txt      # Ranked station names, one per line
//! └── favorites.txt     # Hypergen: entries always placed first
//! ```

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::PathsConfig;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    paths: PathsConfig,
}

impl LocalStorage {
    pub fn new(paths: PathsConfig) -> Self {
        Self { paths }
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.paths.credentials_path()
    }

    pub fn stations_path(&self) -> PathBuf {
        self.paths.stations_path()
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.paths.favorites_path()
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write one entry per line, atomically (write to temp, then rename).
    pub async fn write_lines(&self, path: &Path, entries: &[String]) -> Result<()> {
        Self::ensure_dir(path).await?;

        let mut content = String::new();
        for entry in entries {
            content.push_str(entry);
            content.push('\n');
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        log::debug!("Wrote {} lines to {}", entries.len(), path.display());
        Ok(())
    }

    /// Read non-blank lines, trimmed. Returns `None` if the file doesn't exist.
    pub async fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Hypergen favorites; a missing file means no favorites.
    pub async fn load_favorites(&self) -> Result<Vec<String>> {
        let path = self.favorites_path();
        match self.read_lines(&path).await? {
            Some(favorites) => {
                log::info!(
                    "Loaded {} favorite stations from {}",
                    favorites.len(),
                    path.display()
                );
                Ok(favorites)
            }
            None => {
                log::info!("No favorites file at {}", path.display());
                Ok(Vec::new())
            }
        }
    }
}
