use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;

use token_source::{TokenSource, TokenSourceProvider};

use crate::error::Error;
use crate::flow::CodePrompt;
use crate::token_source::TokenSource as InternalTokenSource;
use crate::{create_token_source, Config};

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expiry: Option<time::OffsetDateTime>,
}

impl Token {
    pub fn value(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn valid(&self) -> bool {
        !self.access_token.is_empty() && !self.expired()
    }

    fn expired(&self) -> bool {
        match self.expiry {
            None => false,
            Some(s) => {
                let now = time::OffsetDateTime::now_utc();
                let exp = s + time::Duration::seconds(-10);
                now > exp
            }
        }
    }
}

/// Hands out the installed-application credential to the transport layer.
pub struct DefaultTokenSourceProvider {
    ts: Arc<DefaultTokenSource>,
}

impl Debug for DefaultTokenSourceProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultTokenSourceProvider").finish_non_exhaustive()
    }
}

impl DefaultTokenSourceProvider {
    pub async fn new(config: Config<'_>, prompt: &dyn CodePrompt) -> Result<Self, Error> {
        let inner = create_token_source(config, prompt).await?;
        Ok(Self {
            ts: Arc::new(DefaultTokenSource { inner: inner.into() }),
        })
    }
}

impl TokenSourceProvider for DefaultTokenSourceProvider {
    fn token_source(&self) -> Arc<dyn TokenSource> {
        self.ts.clone()
    }
}

#[derive(Debug, Clone)]
pub struct DefaultTokenSource {
    inner: Arc<dyn InternalTokenSource>,
}

#[async_trait]
impl TokenSource for DefaultTokenSource {
    async fn token(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let token = self.inner.token().await?;
        Ok(token.value())
    }
}
