pub mod authorized_user_token_source;
pub mod reuse_token_source;

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::token::Token;

#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<Token, Error>;
}

impl Debug for dyn TokenSource {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("TokenSource")
    }
}

pub(crate) fn default_http_client() -> Result<reqwest::Client, Error> {
    Ok(reqwest::Client::builder().timeout(Duration::from_secs(10)).build()?)
}

/// Response of the token endpoint for both the code exchange and the refresh grant.
#[derive(Clone, Deserialize)]
pub(crate) struct InternalToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl InternalToken {
    pub(crate) fn to_token(&self, now: time::OffsetDateTime) -> Token {
        Token {
            access_token: self.access_token.clone(),
            token_type: self.token_type.clone(),
            expiry: self.expires_in.map(|s| now + time::Duration::seconds(s)),
        }
    }
}

/// Posts a form to the token endpoint and decodes the granted token.
pub(crate) async fn request_token<T: serde::Serialize + ?Sized>(
    client: &reqwest::Client,
    token_url: &str,
    form: &T,
) -> Result<InternalToken, Error> {
    let response = client.post(token_url).form(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(Error::TokenEndpoint {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<InternalToken>().await?)
}
