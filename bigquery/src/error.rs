use std::time::Duration;

use bqsample_gax::poll::Interrupted;

use crate::http;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] http::error::Error),

    /// The service answered in a way that breaks an assumption the client relies on.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("job {job_id} failed: {reason}: {message}")]
    JobFailed {
        job_id: String,
        reason: String,
        message: String,
    },

    #[error("gave up waiting after {attempts} attempts ({elapsed:?})")]
    Timeout { attempts: usize, elapsed: Duration },

    #[error("cancelled")]
    Cancelled,
}

impl From<Interrupted> for Error {
    fn from(value: Interrupted) -> Self {
        match value {
            Interrupted::Cancelled => Error::Cancelled,
            Interrupted::Exhausted { attempts, elapsed } => Error::Timeout { attempts, elapsed },
        }
    }
}
