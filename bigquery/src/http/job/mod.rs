use std::collections::HashMap;
use std::fmt;

use crate::http::dataset::DatasetReference;
use crate::http::table::{SourceFormat, TableReference, TableSchema};
use crate::http::types::ErrorProto;

pub mod get;
pub mod get_query_results;
pub mod insert;
pub mod query;

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateDisposition {
    /// If the table does not exist, BigQuery creates the table.
    #[default]
    CreateIfNeeded,
    /// The table must already exist. If it does not, a 'notFound' error is returned in the job result.
    CreateNever,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteDisposition {
    /// If the table already exists, BigQuery overwrites the table data and uses the schema from the query result.
    WriteTruncate,
    /// If the table already exists, BigQuery appends the data to the table.
    WriteAppend,
    /// If the table already exists and contains data, a 'duplicate' error is returned in the job result.
    #[default]
    WriteEmpty,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Interactive,
    Batch,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationQuery {
    /// [Required] SQL query text to execute.
    /// The useLegacySql field can be used to indicate whether the query uses legacy SQL or GoogleSQL.
    pub query: String,
    /// Optional. Describes the table where the query results should be stored.
    /// For queries that produce anonymous (cached) results, this field will be populated by BigQuery.
    pub destination_table: Option<TableReference>,
    /// Optional. Specifies whether the job is allowed to create new tables.
    pub create_disposition: Option<CreateDisposition>,
    /// Optional. Specifies the action that occurs if the destination table already exists.
    pub write_disposition: Option<WriteDisposition>,
    /// Optional. Specifies the default dataset to use for unqualified table names in the query.
    pub default_dataset: Option<DatasetReference>,
    /// Optional. Specifies a priority for the query.
    pub priority: Option<Priority>,
    /// Optional. If true and query uses legacy SQL dialect,
    /// allows the query to produce arbitrarily large result tables at a slight cost in performance.
    pub allow_large_results: Option<bool>,
    /// Optional. Whether to look for the result in the query cache.
    pub use_query_cache: Option<bool>,
    /// Limits the bytes billed for this job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub maximum_bytes_billed: Option<i64>,
    /// Optional. Specifies whether to use BigQuery's legacy SQL dialect for this query.
    /// The default value is true.
    pub use_legacy_sql: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfigurationLoad {
    /// [Required] The fully-qualified URIs that point to your data in Google Cloud.
    pub source_uris: Vec<String>,
    /// Optional. The schema for the destination table.
    pub schema: Option<TableSchema>,
    /// [Required] The destination table to load the data into.
    pub destination_table: TableReference,
    /// Optional. Specifies whether the job is allowed to create new tables.
    pub create_disposition: Option<CreateDisposition>,
    /// Optional. Specifies the action that occurs if the destination table already exists.
    pub write_disposition: Option<WriteDisposition>,
    /// Optional. The separator character for fields in a CSV file.
    pub field_delimiter: Option<String>,
    /// Optional. The number of rows at the top of a CSV file that BigQuery will skip when loading the data.
    pub skip_leading_rows: Option<i64>,
    /// Optional. The character encoding of the data. The supported values are UTF-8, ISO-8859-1, UTF-16BE,
    /// UTF-16LE, UTF-32BE, and UTF-32LE. The default value is UTF-8.
    pub encoding: Option<String>,
    /// Optional. The maximum number of bad records that BigQuery can ignore when running the job.
    pub max_bad_records: Option<i64>,
    /// Optional. Accept rows that are missing trailing optional columns.
    pub allow_jagged_rows: Option<bool>,
    /// Optional. Indicates if BigQuery should allow extra values that are not represented in the table schema.
    pub ignore_unknown_values: Option<bool>,
    /// Optional. The format of the data files.
    pub source_format: Option<SourceFormat>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobConfiguration {
    /// Output only. The type of the job. Can be QUERY, LOAD, EXTRACT, COPY or UNKNOWN.
    pub job_type: Option<String>,
    /// [Pick one] Configures a query job.
    pub query: Option<JobConfigurationQuery>,
    /// [Pick one] Configures a load job.
    pub load: Option<JobConfigurationLoad>,
    /// Optional. If set, don't actually run this job.
    pub dry_run: Option<bool>,
    /// The labels associated with this job.
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    /// Required. The ID of the project containing this job.
    pub project_id: String,
    /// Required. The ID of the job. The ID must contain only letters (a-z, A-Z), numbers (0-9), underscores (_), or dashes (-).
    /// The maximum length is 1,024 characters.
    pub job_id: String,
    /// Optional. The geographic location of the job. The default value is US.
    pub location: Option<String>,
}

/// Lifecycle state of a job. Values the client does not know are kept as `Unknown`.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    #[default]
    Pending,
    Running,
    Done,
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// `PENDING` and `RUNNING` jobs are still worth polling.
    pub fn is_pending(&self) -> bool {
        matches!(self, JobState::Pending | JobState::Running)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self {
            JobState::Pending => "PENDING",
            JobState::Running => "RUNNING",
            JobState::Done => "DONE",
            JobState::Unknown => "UNKNOWN",
        };
        f.write_str(v)
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Output only. Final error result of the job.
    /// If present, indicates that the job has completed and was unsuccessful.
    pub error_result: Option<ErrorProto>,
    /// Output only. The first errors encountered during the running of the job.
    /// Errors here do not necessarily mean that the job has not completed or was unsuccessful.
    pub errors: Option<Vec<ErrorProto>>,
    /// Output only. Running state of the job. Valid states include 'PENDING', 'RUNNING', and 'DONE'.
    #[serde(default)]
    pub state: JobState,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobStatisticsQuery {
    /// Output only. Total bytes processed for the job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    /// Output only. Total bytes billed for the job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub total_bytes_billed: Option<i64>,
    /// Output only. Whether the query result was fetched from the query cache.
    pub cache_hit: Option<bool>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobStatisticsLoad {
    /// Output only. Number of source files in a load job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub input_files: Option<i64>,
    /// Output only. Number of bytes of source data in a load job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub input_file_bytes: Option<i64>,
    /// Output only. Number of rows imported in a load job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub output_rows: Option<i64>,
    /// Output only. Size of the loaded data in bytes.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub output_bytes: Option<i64>,
    /// Output only. The number of bad records encountered.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub bad_records: Option<i64>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    /// Output only. Creation time of this job, in milliseconds since the epoch.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub creation_time: Option<i64>,
    /// Output only. Start time of this job, in milliseconds since the epoch.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub start_time: Option<i64>,
    /// Output only. End time of this job, in milliseconds since the epoch.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub end_time: Option<i64>,
    /// Output only. Total bytes processed for the job.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    /// Output only. Statistics for a query job.
    pub query: Option<JobStatisticsQuery>,
    /// Output only. Statistics for a load job.
    pub load: Option<JobStatisticsLoad>,
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Output only. The type of the resource.
    #[serde(default)]
    pub kind: String,
    /// Output only. A hash of this resource.
    #[serde(default)]
    pub etag: String,
    /// Output only. Opaque ID field of the job.
    #[serde(default)]
    pub id: String,
    /// Output only. Email address of the user who ran the job.
    #[serde(default)]
    pub user_email: String,
    /// Required. Describes the job configuration.
    pub configuration: JobConfiguration,
    /// Optional. Reference describing the unique-per-user name of the job.
    #[serde(default)]
    pub job_reference: JobReference,
    /// Output only. Information about the job, including starting time and ending time of the job.
    pub statistics: Option<JobStatistics>,
    /// Output only. The status of this job.
    /// Examine this value when polling an asynchronous job to see if the job is complete.
    #[serde(default)]
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use crate::http::job::{Job, JobState};

    #[test]
    fn test_job_state() {
        let job: Job = serde_json::from_str(
            r#"{
                "id": "my-project:US.job_1",
                "jobReference": {"projectId": "my-project", "jobId": "job_1", "location": "US"},
                "configuration": {"jobType": "QUERY", "query": {"query": "SELECT 1", "useLegacySql": false}},
                "statistics": {"creationTime": "1700000000000", "query": {"totalBytesProcessed": "1024"}},
                "status": {"state": "RUNNING"}
            }"#,
        )
        .unwrap();
        assert_eq!(job.status.state, JobState::Running);
        assert!(job.status.state.is_pending());
        assert_eq!(job.job_reference.location.as_deref(), Some("US"));
        let statistics = job.statistics.unwrap();
        assert_eq!(statistics.creation_time, Some(1700000000000));
        assert_eq!(statistics.query.unwrap().total_bytes_processed, Some(1024));
    }

    #[test]
    fn test_unknown_state_is_terminal() {
        let job: Job = serde_json::from_str(r#"{"configuration": {}, "status": {"state": "SUSPENDED"}}"#).unwrap();
        assert_eq!(job.status.state, JobState::Unknown);
        assert!(!job.status.state.is_pending());
        assert_eq!(job.status.state.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_failed_job() {
        let job: Job = serde_json::from_str(
            r#"{"configuration": {}, "status": {"state": "DONE", "errorResult": {"reason": "invalidQuery", "location": "query", "message": "Syntax error"}}}"#,
        )
        .unwrap();
        assert_eq!(job.status.state, JobState::Done);
        assert_eq!(job.status.error_result.unwrap().reason.as_deref(), Some("invalidQuery"));
    }
}
