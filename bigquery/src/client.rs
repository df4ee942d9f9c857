use std::sync::Arc;

use async_trait::async_trait;

use token_source::{NopeTokenSourceProvider, TokenSourceProvider};

use crate::http::bigquery_client::BigqueryClient;
use crate::http::bigquery_dataset_client::BigqueryDatasetClient;
use crate::http::bigquery_job_client::BigqueryJobClient;
use crate::http::bigquery_project_client::BigqueryProjectClient;
use crate::http::bigquery_table_client::BigqueryTableClient;
use crate::http::bigquery_tabledata_client::BigqueryTabledataClient;
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
use crate::transport::Transport;

pub const DEFAULT_ENDPOINT: &str = "https://bigquery.googleapis.com";

#[derive(Debug)]
pub struct ClientConfig {
    pub http: reqwest_middleware::ClientWithMiddleware,
    pub bigquery_endpoint: String,
    pub token_source_provider: Box<dyn TokenSourceProvider>,
    /// Logs every response body through `tracing`.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http: reqwest_middleware::ClientBuilder::new(reqwest::Client::default()).build(),
            bigquery_endpoint: DEFAULT_ENDPOINT.to_string(),
            token_source_provider: Box::new(NopeTokenSourceProvider {}),
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn new(token_source_provider: Box<dyn TokenSourceProvider>) -> Self {
        Self {
            token_source_provider,
            ..Default::default()
        }
    }

    pub fn with_endpoint(mut self, value: impl Into<String>) -> Self {
        self.bigquery_endpoint = value.into();
        self
    }

    pub fn with_http_client(mut self, value: reqwest_middleware::ClientWithMiddleware) -> Self {
        self.http = value;
        self
    }

    pub fn with_debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }
}

#[cfg(feature = "auth")]
pub use bqsample_auth;

#[cfg(feature = "auth")]
impl ClientConfig {
    /// Authorizes through the installed-application flow, prompting only when no stored
    /// credential can be reused.
    pub async fn new_with_auth(
        config: bqsample_auth::Config<'_>,
        prompt: &dyn bqsample_auth::flow::CodePrompt,
    ) -> Result<Self, bqsample_auth::error::Error> {
        let ts = bqsample_auth::token::DefaultTokenSourceProvider::new(config, prompt).await?;
        Ok(Self::new(Box::new(ts)))
    }
}

#[derive(Clone)]
pub struct Client {
    project_client: BigqueryProjectClient,
    dataset_client: BigqueryDatasetClient,
    table_client: BigqueryTableClient,
    tabledata_client: BigqueryTabledataClient,
    job_client: BigqueryJobClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    /// New client
    pub fn new(config: ClientConfig) -> Self {
        let ts = config.token_source_provider.token_source();
        let client = Arc::new(BigqueryClient::new(
            ts,
            config.bigquery_endpoint.as_str(),
            config.http,
            config.debug,
        ));
        Self {
            project_client: BigqueryProjectClient::new(client.clone()),
            dataset_client: BigqueryDatasetClient::new(client.clone()),
            table_client: BigqueryTableClient::new(client.clone()),
            tabledata_client: BigqueryTabledataClient::new(client.clone()),
            job_client: BigqueryJobClient::new(client),
        }
    }

    pub fn project(&self) -> &BigqueryProjectClient {
        &self.project_client
    }

    pub fn dataset(&self) -> &BigqueryDatasetClient {
        &self.dataset_client
    }

    pub fn table(&self) -> &BigqueryTableClient {
        &self.table_client
    }

    pub fn tabledata(&self) -> &BigqueryTabledataClient {
        &self.tabledata_client
    }

    pub fn job(&self) -> &BigqueryJobClient {
        &self.job_client
    }
}

#[async_trait]
impl Transport for Client {
    async fn list_projects(&self, req: &ListProjectsRequest) -> Result<ListProjectsResponse, Error> {
        self.project_client.list(req).await
    }

    async fn list_datasets(&self, project_id: &str, req: &ListDatasetsRequest) -> Result<ListDatasetsResponse, Error> {
        self.dataset_client.list(project_id, req).await
    }

    async fn list_tables(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        self.table_client.list(project_id, dataset_id, req).await
    }

    async fn get_table(&self, project_id: &str, dataset_id: &str, table_id: &str) -> Result<Table, Error> {
        self.table_client.get(project_id, dataset_id, table_id).await
    }

    async fn insert_job(&self, job: &Job) -> Result<Job, Error> {
        self.job_client.create(job).await
    }

    async fn get_job(&self, project_id: &str, job_id: &str, req: &GetJobRequest) -> Result<Job, Error> {
        self.job_client.get(project_id, job_id, req).await
    }

    async fn query(&self, project_id: &str, req: &QueryRequest) -> Result<QueryResponse, Error> {
        self.job_client.query(project_id, req).await
    }

    async fn get_query_results(
        &self,
        project_id: &str,
        job_id: &str,
        req: &GetQueryResultsRequest,
    ) -> Result<GetQueryResultsResponse, Error> {
        self.job_client.get_query_results(project_id, job_id, req).await
    }

    async fn list_tabledata(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
        req: &FetchDataRequest,
    ) -> Result<FetchDataResponse, Error> {
        self.tabledata_client.read(project_id, dataset_id, table_id, req).await
    }
}
