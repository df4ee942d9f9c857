use async_trait::async_trait;

use crate::http::dataset::list::{ListDatasetsRequest, ListDatasetsResponse};
use crate::http::error::Error;
use crate::http::job::get::GetJobRequest;
use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
use crate::http::job::query::{QueryRequest, QueryResponse};
use crate::http::job::Job;
use crate::http::project::list::{ListProjectsRequest, ListProjectsResponse};
use crate::http::table::list::{ListTablesRequest, ListTablesResponse};
use crate::http::table::Table;
use crate::http::tabledata::list::{FetchDataRequest, FetchDataResponse};

/// The remote operations the poller, the paginator and the commands are written against.
///
/// Each call is a single HTTP round trip. [`crate::client::Client`] is the production implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn list_projects(&self, req: &ListProjectsRequest) -> Result<ListProjectsResponse, Error>;

    async fn list_datasets(&self, project_id: &str, req: &ListDatasetsRequest) -> Result<ListDatasetsResponse, Error>;

    async fn list_tables(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error>;

    async fn get_table(&self, project_id: &str, dataset_id: &str, table_id: &str) -> Result<Table, Error>;

    async fn insert_job(&self, job: &Job) -> Result<Job, Error>;

    async fn get_job(&self, project_id: &str, job_id: &str, req: &GetJobRequest) -> Result<Job, Error>;

    async fn query(&self, project_id: &str, req: &QueryRequest) -> Result<QueryResponse, Error>;

    async fn get_query_results(
        &self,
        project_id: &str,
        job_id: &str,
        req: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error>;

    async fn list_tabledata(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        req: &FetchDataRequest,
    ) -> Result<FetchDataResponse, Error>;
}

#[cfg(test)]
pub(crate) mod test {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::http::dataset::list::{ListDatasetsRequest, ListDatasetsResponse};
    use crate::http::error::{Error, ErrorResponse};
    use crate::http::job::get::GetJobRequest;
    use crate::http::job::get_query_results::{GetQueryResultsRequest, GetQueryResultsResponse};
    use crate::http::job::query::{QueryRequest, QueryResponse};
    use crate::http::job::{Job, JobReference, JobState, JobStatus};
    use crate::http::project::list::{ListProjectsRequest, ListProjectsResponse};
    use crate::http::table::list::{ListTablesRequest, ListTablesResponse};
    use crate::http::table::Table;
    use crate::http::tabledata::list::{Cell, FetchDataRequest, FetchDataResponse, Tuple, Value};
    use crate::transport::Transport;

    #[ctor::ctor]
    fn init() {
        let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
            .add_directive("bqsample_bigquery=trace".parse().unwrap());
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// A recorded remote call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        GetJob { job_id: String },
        Query { timeout_ms: Option<i64> },
        GetQueryResults { start_index: Option<u64>, max_results: Option<u32>, timeout_ms: Option<i64> },
        ListTabledata { start_index: Option<u64>, max_results: Option<u32> },
        Other(&'static str),
    }

    /// Replays scripted responses in order and records every call it receives.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub jobs: Mutex<VecDeque<Result<Job, Error>>>,
        pub queries: Mutex<VecDeque<QueryResponse>>,
        pub query_results: Mutex<VecDeque<GetQueryResultsResponse>>,
        pub tabledata: Mutex<VecDeque<FetchDataResponse>>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl ScriptedTransport {
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn unscripted(op: &str) -> Error {
        Error::Response(ErrorResponse {
            code: 500,
            message: format!("unscripted call to {op}"),
            status: None,
            errors: vec![],
        })
    }

    fn pop<T>(queue: &Mutex<VecDeque<T>>, op: &str) -> Result<T, Error> {
        queue.lock().unwrap().pop_front().ok_or_else(|| unscripted(op))
    }

    pub fn job(job_id: &str, state: JobState) -> Job {
        Job {
            job_reference: JobReference {
                project_id: "my-project".to_string(),
                job_id: job_id.to_string(),
                location: None,
            },
            status: JobStatus {
                state,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Rows whose single column holds the row number, starting at `from`.
    pub fn rows(from: usize, count: usize) -> Vec<Tuple> {
        (from..from + count)
            .map(|i| Tuple {
                f: vec![Cell {
                    v: Value::String(i.to_string()),
                }],
            })
            .collect()
    }

    pub fn row_numbers(rows: &[Tuple]) -> Vec<usize> {
        rows.iter()
            .map(|row| match &row.f[0].v {
                Value::String(v) => v.parse().unwrap(),
                other => panic!("unexpected cell {:?}", other),
            })
            .collect()
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn list_projects(&self, _req: &ListProjectsRequest) -> Result<ListProjectsResponse, Error> {
            self.record(Call::Other("list_projects"));
            Err(unscripted("list_projects"))
        }

        async fn list_datasets(
            &self,
            _project_id: &str,
            _req: &ListDatasetsRequest,
        ) -> Result<ListDatasetsResponse, Error> {
            self.record(Call::Other("list_datasets"));
            Err(unscripted("list_datasets"))
        }

        async fn list_tables(
            &self,
            _project_id: &str,
            _dataset_id: &str,
            _req: &ListTablesRequest,
        ) -> Result<ListTablesResponse, Error> {
            self.record(Call::Other("list_tables"));
            Err(unscripted("list_tables"))
        }

        async fn get_table(&self, _project_id: &str, _dataset_id: &str, _table_id: &str) -> Result<Table, Error> {
            self.record(Call::Other("get_table"));
            Err(unscripted("get_table"))
        }

        async fn insert_job(&self, _job: &Job) -> Result<Job, Error> {
            self.record(Call::Other("insert_job"));
            Err(unscripted("insert_job"))
        }

        async fn get_job(&self, _project_id: &str, job_id: &str, _req: &GetJobRequest) -> Result<Job, Error> {
            self.record(Call::GetJob {
                job_id: job_id.to_string(),
            });
            pop(&self.jobs, "get_job")?
        }

        async fn query(&self, _project_id: &str, req: &QueryRequest) -> Result<QueryResponse, Error> {
            self.record(Call::Query {
                timeout_ms: req.timeout_ms,
            });
            pop(&self.queries, "query")
        }

        async fn get_query_results(
            &self,
            _project_id: &str,
            _job_id: &str,
            req: &GetQueryResultsRequest,
        ) -> Result<GetQueryResultsResponse, Error> {
            self.record(Call::GetQueryResults {
                start_index: req.start_index,
                max_results: req.max_results,
                timeout_ms: req.timeout_ms,
            });
            pop(&self.query_results, "get_query_results")
        }

        async fn list_tabledata(
            &self,
            _project_id: &str,
            _dataset_id: &str,
            _table_id: &str,
            req: &FetchDataRequest,
        ) -> Result<FetchDataResponse, Error> {
            self.record(Call::ListTabledata {
                start_index: req.start_index,
                max_results: req.max_results,
            });
            pop(&self.tabledata, "list_tabledata")
        }
    }
}
