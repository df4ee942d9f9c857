use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::job::JobReference;
use crate::http::table::TableSchema;
use crate::http::tabledata::list::Tuple;
use crate::http::types::ErrorProto;

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetQueryResultsRequest {
    /// Zero-based index of the starting row.
    pub start_index: Option<u64>,
    /// Page token, returned by a previous call, to request the next page of results.
    pub page_token: Option<String>,
    /// Maximum number of results to read.
    pub max_results: Option<u32>,
    /// Optional. Specifies the maximum amount of time, in milliseconds,
    /// that the client is willing to wait for the query to complete.
    /// If the query is complete, the jobComplete field in the response is true.
    /// If the query has not yet completed, jobComplete is false.
    /// The call is not guaranteed to wait for the specified timeout.
    pub timeout_ms: Option<i64>,
    /// The geographic location of the job.
    pub location: Option<String>,
}

#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetQueryResultsResponse {
    /// The resource type.
    #[serde(default)]
    pub kind: String,
    /// A hash of this response.
    #[serde(default)]
    pub etag: String,
    /// The schema of the results. Present only when the query completes successfully.
    pub schema: Option<TableSchema>,
    /// Reference to the Job that was created to run the query.
    pub job_reference: JobReference,
    /// The total number of rows in the complete query result set,
    /// which can be more than the number of rows in this single page of results.
    /// Present only when the query completes successfully.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub total_rows: Option<u64>,
    /// A token used for paging results.
    pub page_token: Option<String>,
    /// An object with as many results as can be contained within the maximum permitted reply size.
    pub rows: Option<Vec<Tuple>>,
    /// The total number of bytes processed for this query.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub total_bytes_processed: Option<i64>,
    /// Whether the query has completed or not.
    /// If rows or totalRows are present, this will always be true.
    /// If this is false, totalRows will not be available.
    #[serde(default)]
    pub job_complete: bool,
    /// Output only. The first errors or warnings encountered during the running of the job.
    pub errors: Option<Vec<ErrorProto>>,
    /// Whether the query result was fetched from the query cache.
    pub cache_hit: Option<bool>,
    /// Output only. The number of rows affected by a DML statement.
    #[serde(default, deserialize_with = "crate::http::from_str_option")]
    pub num_dml_affected_rows: Option<i64>,
}

pub fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    job_id: &str,
    data: &GetQueryResultsRequest,
) -> RequestBuilder {
    let url = format!("{}/projects/{}/queries/{}", base_url, project_id, job_id);
    client.get(url).query(data)
}
