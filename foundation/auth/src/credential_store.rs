use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::io::AsyncWriteExt;

use crate::error::Error;
use crate::token::Token;

const DEFAULT_CREDENTIALS_FILE: &str = ".bqsample.token";
/// Owner read/write only: the file holds a long-lived refresh token.
#[cfg(unix)]
const CREDENTIALS_FILE_MODE: u32 = 0o600;

/// Token material persisted between runs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoredCredential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expiry: Option<OffsetDateTime>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredCredential {
    pub fn token(&self) -> Token {
        Token {
            access_token: self.access_token.clone(),
            token_type: "Bearer".to_string(),
            expiry: self.expiry,
        }
    }

    /// Whether the credential was granted for every requested scope.
    pub fn covers(&self, scopes: &[String]) -> bool {
        scopes.iter().all(|s| self.scopes.contains(s))
    }
}

/// Single-user credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.bqsample.token`
    pub fn default_path() -> Result<PathBuf, Error> {
        let home = home::home_dir().ok_or(Error::NoHomeDirectoryFound)?;
        Ok(home.join(DEFAULT_CREDENTIALS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when nothing was stored yet.
    pub async fn load(&self) -> Result<Option<StoredCredential>, Error> {
        let json = match tokio::fs::read(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&json)?))
    }

    pub async fn save(&self, credential: &StoredCredential) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(credential)?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(CREDENTIALS_FILE_MODE);
        let mut file = options.open(&self.path).await?;
        // `mode` only applies on creation.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(CREDENTIALS_FILE_MODE))
                .await?;
        }
        file.write_all(&json).await?;
        file.flush().await?;
        tracing::debug!("credential stored in {}", self.path.display());
        Ok(())
    }
}
