use std::time::Duration;

use bqsample_gax::cancel::CancellationToken;
use bqsample_gax::poll::{invoke_until, PollSetting};

use crate::error::Error;
use crate::http::job::get_query_results::GetQueryResultsRequest;
use crate::http::job::query::QueryRequest;
use crate::http::job::JobReference;
use crate::http::table::TableSchema;
use crate::paginator::{RowPaginator, RowSource};
use crate::transport::Transport;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySetting {
    /// Pacing of the `getQueryResults` completion checks when the query did not finish inline.
    pub poll: PollSetting,
    /// Server-side wait hint sent with every completion check.
    pub results_timeout: Duration,
}

impl Default for QuerySetting {
    fn default() -> Self {
        Self {
            poll: PollSetting::default(),
            results_timeout: Duration::from_millis(5000),
        }
    }
}

pub struct QueryResult<'a> {
    pub job_reference: JobReference,
    pub schema: Option<TableSchema>,
    pub rows: RowPaginator<'a>,
}

impl QueryResult<'_> {
    pub fn total_rows(&self) -> Option<u64> {
        self.rows.total_rows()
    }
}

/// Runs a query through `jobs.query` and returns its full result set.
///
/// The query is submitted without a server-side wait. When it finishes inline, its first page
/// seeds the paginator directly. Otherwise `jobs.getQueryResults` is checked at
/// `setting.poll.interval` until the job reports completion, and that response seeds the
/// paginator instead. Remaining rows are read on demand from the returned [`QueryResult`].
pub async fn run_query<'a>(
    transport: &'a dyn Transport,
    project_id: &str,
    request: &QueryRequest,
    setting: &QuerySetting,
    cancel: Option<CancellationToken>,
) -> Result<QueryResult<'a>, Error> {
    let mut request = request.clone();
    request.timeout_ms = Some(0);
    let page_size = request.max_results.unwrap_or(DEFAULT_PAGE_SIZE);

    let response = transport.query(project_id, &request).await?;
    let job_reference = response.job_reference;
    tracing::debug!("query job {} complete={}", job_reference.job_id, response.job_complete);

    let (rows, total_rows, page_token, schema) = if response.job_complete {
        (
            response.rows.unwrap_or_default(),
            response.total_rows,
            response.page_token,
            response.schema,
        )
    } else {
        let results_request = GetQueryResultsRequest {
            start_index: Some(0),
            max_results: Some(page_size),
            timeout_ms: Some(setting.results_timeout.as_millis() as i64),
            location: job_reference.location.clone(),
            ..Default::default()
        };
        let poll = setting.poll.clone().with_delay_first(false);
        let results_request = &results_request;
        let job = &job_reference;
        let results = invoke_until(
            cancel,
            &poll,
            || async move {
                let results = transport
                    .get_query_results(&job.project_id, &job.job_id, results_request)
                    .await?;
                Ok::<_, Error>(results)
            },
            |results, attempt| {
                tracing::debug!(
                    "query job {} complete={} (attempt {})",
                    job.job_id,
                    results.job_complete,
                    attempt.number
                );
                results.job_complete
            },
        )
        .await?;
        (
            results.rows.unwrap_or_default(),
            results.total_rows,
            results.page_token,
            results.schema,
        )
    };

    // Statements without a result set report neither rows nor a total.
    let total_rows = match total_rows {
        None if page_token.is_none() => Some(rows.len() as u64),
        total => total,
    };
    let paginator = RowPaginator::new(transport, RowSource::QueryResults(job_reference.clone()), page_size)
        .with_first_page(rows, total_rows, schema.clone());
    Ok(QueryResult {
        job_reference,
        schema,
        rows: paginator,
    })
}
