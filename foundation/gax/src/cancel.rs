use tokio_util::sync::CancellationToken as InternalCancellationToken;

/// CancellationToken wrapper for tokio_util::sync::CancellationToken for avoiding Dependency Hell
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: InternalCancellationToken,
}

impl CancellationToken {
    /// Creates a new CancellationToken in the non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: InternalCancellationToken::new(),
        }
    }

    /// Creates a CancellationToken which will get cancelled whenever the current token gets cancelled.
    pub fn child_token(&self) -> CancellationToken {
        Self {
            inner: self.inner.child_token(),
        }
    }

    /// Cancel the token and every child token derived from it.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Returns a `Future` that gets fulfilled when cancellation is requested.
    pub async fn cancelled(&self) {
        self.inner.cancelled().await
    }
}
