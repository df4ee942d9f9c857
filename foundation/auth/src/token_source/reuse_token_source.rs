use async_trait::async_trait;

use crate::error::Error;
use crate::token::Token;
use crate::token_source::TokenSource;

/// Serves the cached token until it expires, then refreshes it through `target`.
#[derive(Debug)]
pub struct ReuseTokenSource {
    target: Box<dyn TokenSource>,
    current_token: std::sync::RwLock<Option<Token>>,
    guard: tokio::sync::Mutex<()>,
}

impl ReuseTokenSource {
    pub(crate) fn new(target: Box<dyn TokenSource>, token: Option<Token>) -> ReuseTokenSource {
        ReuseTokenSource {
            target,
            current_token: std::sync::RwLock::new(token),
            guard: tokio::sync::Mutex::new(()),
        }
    }
}

#[async_trait]
impl TokenSource for ReuseTokenSource {
    async fn token(&self) -> Result<Token, Error> {
        if let Some(token) = self.cached()? {
            return Ok(token);
        }

        // Only single task can refresh token
        let _locking = self.guard.lock().await;

        if let Some(token) = self.cached()? {
            return Ok(token);
        }

        let token = self.target.token().await?;
        tracing::debug!("token refresh success : expiry={:?}", token.expiry);
        *self.current_token.write()? = Some(token.clone());
        Ok(token)
    }
}

impl ReuseTokenSource {
    fn cached(&self) -> Result<Option<Token>, Error> {
        let token = self.current_token.read()?;
        Ok(token.as_ref().filter(|t| t.valid()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::error::Error;
    use crate::token::Token;
    use crate::token_source::reuse_token_source::ReuseTokenSource;
    use crate::token_source::TokenSource;

    struct CountingTokenSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TokenSource for CountingTokenSource {
        async fn token(&self) -> Result<Token, Error> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Token {
                access_token: format!("refreshed-{n}"),
                token_type: "Bearer".to_string(),
                expiry: Some(time::OffsetDateTime::now_utc() + time::Duration::hours(1)),
            })
        }
    }

    fn token(expiry: time::OffsetDateTime) -> Token {
        Token {
            access_token: "stored".to_string(),
            token_type: "Bearer".to_string(),
            expiry: Some(expiry),
        }
    }

    #[tokio::test]
    async fn test_reuse_valid_token() -> Result<(), Error> {
        let calls = Arc::new(AtomicUsize::new(0));
        let expiry = time::OffsetDateTime::now_utc() + time::Duration::hours(1);
        let ts = ReuseTokenSource::new(Box::new(CountingTokenSource { calls: calls.clone() }), Some(token(expiry)));
        assert_eq!(ts.token().await?.access_token, "stored");
        assert_eq!(ts.token().await?.access_token, "stored");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_expired_token() -> Result<(), Error> {
        let calls = Arc::new(AtomicUsize::new(0));
        let expiry = time::OffsetDateTime::now_utc() - time::Duration::hours(1);
        let ts = ReuseTokenSource::new(Box::new(CountingTokenSource { calls: calls.clone() }), Some(token(expiry)));
        assert_eq!(ts.token().await?.access_token, "refreshed-1");
        assert_eq!(ts.token().await?.access_token, "refreshed-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_without_initial_token() -> Result<(), Error> {
        let calls = Arc::new(AtomicUsize::new(0));
        let ts = ReuseTokenSource::new(Box::new(CountingTokenSource { calls: calls.clone() }), None);
        assert_eq!(ts.token().await?.access_token, "refreshed-1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        Ok(())
    }
}
