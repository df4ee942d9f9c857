use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait TokenSource: Send + Sync + Debug {
    /// token returns the value of the `Authorization` header, e.g. `Bearer ya29...`.
    async fn token(&self) -> Result<String, Box<dyn Error + Send + Sync>>;
}

pub trait TokenSourceProvider: Send + Sync + Debug {
    /// token_source returns the token source implementation
    fn token_source(&self) -> Arc<dyn TokenSource>;
}

/// Provider used when no credentials were configured. Every token request fails.
#[derive(Debug)]
pub struct NopeTokenSourceProvider {}

impl TokenSourceProvider for NopeTokenSourceProvider {
    fn token_source(&self) -> Arc<dyn TokenSource> {
        Arc::new(NopeTokenSource {})
    }
}

#[derive(Debug)]
struct NopeTokenSource {}

#[async_trait]
impl TokenSource for NopeTokenSource {
    async fn token(&self) -> Result<String, Box<dyn Error + Send + Sync>> {
        Err("no token source provider is configured".into())
    }
}
