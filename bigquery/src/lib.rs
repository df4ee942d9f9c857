#![allow(clippy::large_enum_variant)]
#![allow(clippy::result_large_err)]
//! # bqsample-bigquery
//!
//! BigQuery v2 REST client used by the command-line samples, together with the
//! job poller, the result paginator and the synchronous query coordinator.
//!
//! ## Quick Start
//!
//! ### CreateClient
//!
//! `ClientConfig::new_with_auth()` runs the installed-application flow. A stored credential is
//! reused when it covers the requested scopes, otherwise the user is asked for an authorization code.
//!
//! ```rust
//! use std::path::Path;
//! use bqsample_bigquery::client::{ClientConfig, Client};
//! use bqsample_bigquery::client::bqsample_auth::{Config, flow::ConsolePrompt};
//! use bqsample_bigquery::http::bigquery_client::SCOPES;
//!
//! async fn run() {
//!     let config = Config {
//!         scopes: &SCOPES,
//!         client_secrets_file: Path::new("client_secrets.json"),
//!         credentials_file: Path::new("/home/me/.bqsample.token"),
//!     };
//!     let config = ClientConfig::new_with_auth(config, &ConsolePrompt).await.unwrap();
//!     let client = Client::new(config);
//! }
//! ```
//!
//! ### Wait for a job
//!
//! ```rust
//! use bqsample_bigquery::client::Client;
//! use bqsample_bigquery::http::job::Job;
//! use bqsample_bigquery::waiter::{check_job_error, wait_for_job};
//! use bqsample_gax::poll::PollSetting;
//!
//! async fn run(client: &Client, job: &Job) {
//!     let created = client.job().create(job).await.unwrap();
//!     let done = wait_for_job(client, &created.job_reference, &PollSetting::default(), None, |p| {
//!         println!("{}: {}", p.job_id, p.state);
//!     })
//!     .await
//!     .unwrap();
//!     let done = check_job_error(done).unwrap();
//! }
//! ```
//!
//! ### Read Data
//!
//! #### Query
//! ```rust
//! use bqsample_bigquery::client::Client;
//! use bqsample_bigquery::http::job::query::QueryRequest;
//! use bqsample_bigquery::query::{run_query, QuerySetting};
//!
//! async fn run(client: &Client, project_id: &str) {
//!     let request = QueryRequest {
//!         query: "SELECT * FROM dataset.table".to_string(),
//!         ..Default::default()
//!     };
//!     let mut result = run_query(client, project_id, &request, &QuerySetting::default(), None).await.unwrap();
//!     while let Some(row) = result.rows.next().await.unwrap() {
//!         println!("{:?}", row.f);
//!     }
//! }
//! ```
//!
//! #### Read Table
//! ```rust
//! use bqsample_bigquery::client::Client;
//! use bqsample_bigquery::http::table::TableReference;
//! use bqsample_bigquery::paginator::{RowPaginator, RowSource};
//!
//! async fn run(client: &Client, table: TableReference) {
//!     let mut rows = RowPaginator::new(client, RowSource::TableData(table), 100).with_limit(1000);
//!     while let Some(page) = rows.next_page().await.unwrap() {
//!         println!("{} rows", page.len());
//!     }
//! }
//! ```
pub mod client;
pub mod error;
pub mod http;
pub mod paginator;
pub mod query;
pub mod transport;
pub mod waiter;

pub use error::Error;
