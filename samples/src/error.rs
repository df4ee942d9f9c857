use std::path::PathBuf;

use bqsample_bigquery::http::error::Error as HttpError;

/// Exit code for usage errors and authorization setup failures.
pub const EXIT_USAGE: u8 = 1;
/// Exit code for a command that started and failed.
pub const EXIT_FAILURE: u8 = 2;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No command, an unknown command, invalid flags, or `help`. Holds the text to print.
    #[error("{0}")]
    Usage(String),

    /// `--help` or `--version` output.
    #[error("{0}")]
    HelpDisplayed(String),

    #[error("authorization failed: {0}")]
    Auth(#[from] bqsample_auth::error::Error),

    #[error(transparent)]
    Core(#[from] bqsample_bigquery::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("invalid schema file {path}: {source}")]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("query job {0} has no destination table")]
    MissingDestination(String),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::HelpDisplayed(_) => 0,
            Error::Usage(_) | Error::Auth(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }
}
