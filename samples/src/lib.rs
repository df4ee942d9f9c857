//! # bqsample-cli
//!
//! Command-line samples built on `bqsample-bigquery`.
//!
//! The `bqsample` binary runs exactly one command per invocation:
//!
//! ```text
//! bqsample lsp
//! bqsample lsd --projectId my-project
//! bqsample lst --projectId my-project --datasetId samples
//! bqsample load --projectId my-project --datasetId samples --tableId words \
//!     --csvFile gs://bucket/words.csv --schemaFile schema.json
//! bqsample query --projectId my-project --datasetId samples --query "SELECT ..."
//! bqsample squery --projectId my-project --datasetId samples --query "SELECT ..."
//! bqsample head --projectId my-project --datasetId samples --tableId words
//! bqsample wait --projectId my-project --jobId bqsample_0123
//! ```
//!
//! `bqsample-getting-started` lists the public datasets, runs one query job and prints its rows.
//!
//! Exit codes: `0` on success, `1` for usage and authorization errors, `2` when a command fails.
pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod setup;
pub mod validate;

#[cfg(test)]
mod testing;
