use async_trait::async_trait;

use crate::client_secrets::ClientDetails;
use crate::credential_store::{FileCredentialStore, StoredCredential};
use crate::error::Error;
use crate::token::Token;
use crate::token_source::TokenSource;
use crate::token_source::{default_http_client, request_token};

/// Exchanges the stored refresh token for fresh access tokens.
#[derive(Debug)]
pub struct UserAccountTokenSource {
    client_id: String,
    client_secret: String,
    token_url: String,
    refresh_token: String,
    store: Option<(FileCredentialStore, Vec<String>)>,

    client: reqwest::Client,
}

impl UserAccountTokenSource {
    pub(crate) fn new(details: &ClientDetails, refresh_token: String) -> Result<UserAccountTokenSource, Error> {
        if refresh_token.is_empty() {
            return Err(Error::RefreshTokenIsRequired);
        }
        Ok(UserAccountTokenSource {
            client_id: details.client_id.clone(),
            client_secret: details.client_secret.clone(),
            token_url: details.token_uri().to_string(),
            refresh_token,
            store: None,
            client: default_http_client()?,
        })
    }

    /// Persists every refreshed token for the next run.
    pub(crate) fn with_store(mut self, store: FileCredentialStore, scopes: Vec<String>) -> Self {
        self.store = Some((store, scopes));
        self
    }
}

#[derive(serde::Serialize)]
struct RequestBody<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'a str,
    pub refresh_token: &'a str,
}

#[async_trait]
impl TokenSource for UserAccountTokenSource {
    async fn token(&self) -> Result<Token, Error> {
        let data = RequestBody {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: "refresh_token",
            refresh_token: &self.refresh_token,
        };

        let it = request_token(&self.client, &self.token_url, &data).await?;
        let token = it.to_token(time::OffsetDateTime::now_utc());

        if let Some((store, scopes)) = &self.store {
            let credential = StoredCredential {
                access_token: token.access_token.clone(),
                refresh_token: Some(it.refresh_token.unwrap_or_else(|| self.refresh_token.clone())),
                expiry: token.expiry,
                scopes: scopes.clone(),
            };
            if let Err(e) = store.save(&credential).await {
                tracing::warn!("failed to store refreshed credential in {}: {}", store.path().display(), e);
            }
        }
        Ok(token)
    }
}
