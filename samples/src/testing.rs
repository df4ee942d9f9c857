use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use bqsample_bigquery::http::dataset::list::{DatasetOverview, ListDatasetsRequest, ListDatasetsResponse};
use bqsample_bigquery::http::error::{Error, ErrorResponse};
use bqsample_bigquery::http::job::get::GetJobRequest;
use bqsample_bigquery::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use bqsample_bigquery::http::job::query::{QueryRequest, QueryResponse};
use bqsample_bigquery::http::job::{Job, JobReference, JobState};
use bqsample_bigquery::http::project::list::{ListProjectsRequest, ListProjectsResponse, ProjectOverview};
use bqsample_bigquery::http::table::list::{ListTablesRequest, ListTablesResponse, TableOverview};
use bqsample_bigquery::http::table::{Table, TableReference};
use bqsample_bigquery::http::types::ErrorProto;
use bqsample_bigquery::http::tabledata::list::{Cell, FetchDataRequest, FetchDataResponse, Tuple, Value};
use bqsample_bigquery::transport::Transport;

#[ctor::ctor]
fn init() {
    let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
        .add_directive("bqsample_bigquery=trace".parse().unwrap())
        .add_directive("bqsample_cli=trace".parse().unwrap());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// In-memory service: listings are fixed, job states and result pages are replayed in order.
#[derive(Default)]
pub struct FakeTransport {
    pub projects: Vec<ProjectOverview>,
    pub datasets: Vec<DatasetOverview>,
    pub tables: Vec<TableOverview>,
    pub table: Option<Table>,
    /// State of a job right after it is inserted.
    pub insert_state: JobState,
    pub inserted: Mutex<Vec<Job>>,
    /// States reported by successive job status checks.
    pub job_states: Mutex<VecDeque<JobState>>,
    /// Error result attached to a `DONE` job.
    pub job_error: Option<ErrorProto>,
    /// Destination table reported by a finished query job.
    pub destination: Option<TableReference>,
    pub queries: Mutex<VecDeque<QueryResponse>>,
    pub query_results: Mutex<VecDeque<GetQueryResultsResponse>>,
    pub tabledata: Mutex<VecDeque<FetchDataResponse>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn with_job_states(self, states: &[JobState]) -> Self {
        self.job_states.lock().unwrap().extend(states.iter().cloned());
        self
    }

    /// Reference of the first inserted job.
    pub fn inserted_reference(&self) -> JobReference {
        self.inserted.lock().unwrap()[0].job_reference.clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn not_found(op: &str) -> Error {
    Error::Response(ErrorResponse {
        code: 404,
        message: format!("nothing scripted for {op}"),
        status: Some("NOT_FOUND".to_string()),
        errors: vec![],
    })
}

/// Single-column rows holding `from..from + count`.
pub fn rows(from: usize, count: usize) -> Vec<Tuple> {
    (from..from + count)
        .map(|i| Tuple {
            f: vec![Cell {
                v: Value::String(i.to_string()),
            }],
        })
        .collect()
}

#[async_trait]
impl Transport for FakeTransport {
    async fn list_projects(&self, _req: &ListProjectsRequest) -> Result<ListProjectsResponse, Error> {
        self.record("list_projects".to_string());
        Ok(ListProjectsResponse {
            projects: self.projects.clone(),
            ..Default::default()
        })
    }

    async fn list_datasets(&self, project_id: &str, req: &ListDatasetsRequest) -> Result<ListDatasetsResponse, Error> {
        self.record(format!("list_datasets {project_id} max={:?}", req.max_results));
        Ok(ListDatasetsResponse {
            datasets: self.datasets.clone(),
            ..Default::default()
        })
    }

    async fn list_tables(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        self.record(format!("list_tables {project_id}.{dataset_id} max={:?}", req.max_results));
        Ok(ListTablesResponse {
            tables: self.tables.clone(),
            ..Default::default()
        })
    }

    async fn get_table(&self, project_id: &str, dataset_id: &str, table_id: &str) -> Result<Table, Error> {
        self.record(format!("get_table {project_id}.{dataset_id}.{table_id}"));
        self.table.clone().ok_or_else(|| not_found("get_table"))
    }

    async fn insert_job(&self, job: &Job) -> Result<Job, Error> {
        self.record("insert_job".to_string());
        self.inserted.lock().unwrap().push(job.clone());
        let mut created = job.clone();
        created.status.state = self.insert_state.clone();
        Ok(created)
    }

    async fn get_job(&self, project_id: &str, job_id: &str, req: &GetJobRequest) -> Result<Job, Error> {
        self.record(format!("get_job {job_id}"));
        let state = self
            .job_states
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| not_found("get_job"))?;
        let mut job = self
            .inserted
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.job_reference.job_id == job_id)
            .cloned()
            .unwrap_or_default();
        job.job_reference = JobReference {
            project_id: project_id.to_string(),
            job_id: job_id.to_string(),
            location: req.location.clone(),
        };
        if state == JobState::Done {
            job.status.error_result = self.job_error.clone();
            if let Some(query) = job.configuration.query.as_mut() {
                query.destination_table = self.destination.clone();
            }
        }
        job.status.state = state;
        Ok(job)
    }

    async fn query(&self, project_id: &str, req: &QueryRequest) -> Result<QueryResponse, Error> {
        self.record(format!("query {project_id} timeout={:?}", req.timeout_ms));
        self.queries.lock().unwrap().pop_front().ok_or_else(|| not_found("query"))
    }

    async fn get_query_results(
        &self,
        _project_id: &str,
        job_id: &str,
        req: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        self.record(format!(
            "get_query_results {job_id} start={:?} max={:?}",
            req.start_index, req.max_results
        ));
        self.query_results
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| not_found("get_query_results"))
    }

    async fn list_tabledata(
        &self,
        _project_id: &str,
        _dataset_id: &str,
        table_id: &str,
        req: &FetchDataRequest,
    ) -> Result<FetchDataResponse, Error> {
        self.record(format!(
            "list_tabledata {table_id} start={:?} max={:?}",
            req.start_index, req.max_results
        ));
        self.tabledata
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| not_found("list_tabledata"))
    }
}
