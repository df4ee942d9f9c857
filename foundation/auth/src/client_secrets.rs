use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::token::{AUTH_URL, TOKEN_URL};

const CLIENT_ID_PLACEHOLDER: &str = "Enter";
const CLIENT_SECRET_PLACEHOLDER: &str = "Enter ";

/// Contents of a `client_secrets.json` file downloaded from the API console.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientSecrets {
    pub installed: Option<ClientDetails>,
    pub web: Option<ClientDetails>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct ClientDetails {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: Option<String>,
    pub token_uri: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl ClientDetails {
    pub fn auth_uri(&self) -> &str {
        self.auth_uri.as_deref().unwrap_or(AUTH_URL)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(TOKEN_URL)
    }

    /// The sample file shipped with the programs says "Enter Client ID" and "Enter Client Secret".
    pub fn is_placeholder(&self) -> bool {
        self.client_id.starts_with(CLIENT_ID_PLACEHOLDER) || self.client_secret.starts_with(CLIENT_SECRET_PLACEHOLDER)
    }
}

impl ClientSecrets {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the file and returns the client details it carries.
    /// Installed-application details win over web details.
    pub async fn details_from_file(path: &Path) -> Result<ClientDetails, Error> {
        let json = match tokio::fs::read_to_string(path).await {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ClientSecretsNotFound(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };
        let details = Self::from_json(&json)?
            .into_details()
            .ok_or_else(|| Error::MissingClientDetails(path.to_path_buf()))?;
        if details.is_placeholder() {
            return Err(Error::PlaceholderClientSecrets(path.to_path_buf()));
        }
        Ok(details)
    }

    pub fn into_details(self) -> Option<ClientDetails> {
        self.installed.or(self.web)
    }
}
