//! # bqsample-auth
//!
//! OAuth2 authorization for installed applications.
//!
//! The client id and secret come from a `client_secrets.json` file downloaded from the API console.
//! On first use the user is sent to the authorization page and pastes the returned code back;
//! the resulting refresh token is kept in a single-user credential file so later runs skip the prompt.
//!
//! ```ignore
//! use std::path::Path;
//! use bqsample_auth::{Config, flow::ConsolePrompt, token::DefaultTokenSourceProvider};
//!
//! async fn run() {
//!     let config = Config {
//!         scopes: &["https://www.googleapis.com/auth/bigquery"],
//!         client_secrets_file: Path::new("client_secrets.json"),
//!         credentials_file: Path::new("/home/me/.bqsample.token"),
//!     };
//!     let provider = DefaultTokenSourceProvider::new(config, &ConsolePrompt).await.unwrap();
//! }
//! ```
pub mod client_secrets;
pub mod credential_store;
pub mod error;
pub mod flow;
pub mod token;
pub mod token_source;

use std::path::Path;

use crate::client_secrets::ClientSecrets;
use crate::credential_store::FileCredentialStore;
use crate::flow::{CodePrompt, InstalledAppFlow};
use crate::token_source::authorized_user_token_source::UserAccountTokenSource;
use crate::token_source::reuse_token_source::ReuseTokenSource;
use crate::token_source::TokenSource;

pub struct Config<'a> {
    pub scopes: &'a [&'a str],
    pub client_secrets_file: &'a Path,
    pub credentials_file: &'a Path,
}

impl Config<'_> {
    pub fn scopes_to_vec(&self) -> Vec<String> {
        self.scopes.iter().map(|x| x.to_string()).collect()
    }
}

/// Builds a refreshing token source, running the authorization flow when no usable
/// credential is stored yet.
pub async fn create_token_source(config: Config<'_>, prompt: &dyn CodePrompt) -> Result<Box<dyn TokenSource>, error::Error> {
    let details = ClientSecrets::details_from_file(config.client_secrets_file).await?;
    let store = FileCredentialStore::new(config.credentials_file);
    let scopes = config.scopes_to_vec();

    let stored = match store.load().await? {
        Some(credential) if credential.refresh_token.is_some() && credential.covers(&scopes) => credential,
        _ => {
            tracing::debug!("no usable credential in {}, authorizing", store.path().display());
            let flow = InstalledAppFlow::new(details.clone(), scopes.clone())?;
            let credential = flow.authorize(prompt).await?;
            store.save(&credential).await?;
            credential
        }
    };

    let refresh_token = stored.refresh_token.clone().ok_or(error::Error::RefreshTokenIsRequired)?;
    let ts = UserAccountTokenSource::new(&details, refresh_token)?.with_store(store, scopes);
    Ok(Box::new(ReuseTokenSource::new(Box::new(ts), Some(stored.token()))))
}
