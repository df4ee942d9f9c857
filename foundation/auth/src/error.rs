use std::path::PathBuf;
use std::sync::PoisonError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("client secrets file {0} not found")]
    ClientSecretsNotFound(PathBuf),

    #[error("client secrets file {0} still holds placeholder values, download the real file from the API console")]
    PlaceholderClientSecrets(PathBuf),

    #[error("client secrets file {0} has neither an installed nor a web section")]
    MissingClientDetails(PathBuf),

    #[error("refresh token is required for user account credentials")]
    RefreshTokenIsRequired,

    #[error("authorization code is empty")]
    EmptyAuthorizationCode,

    #[error("authorization prompt failed: {0}")]
    PromptFailed(#[from] tokio::task::JoinError),

    #[error("token endpoint responded with status {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("invalid token")]
    InvalidToken,

    #[error("token lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    HttpError(#[from] reqwest::Error),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error("user home directory not found")]
    NoHomeDirectoryFound,
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Self {
        Error::LockPoisoned
    }
}
