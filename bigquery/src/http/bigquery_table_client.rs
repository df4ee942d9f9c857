use std::sync::Arc;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::error::Error;
use crate::http::table;
use crate::http::table::list::{ListTablesRequest, ListTablesResponse};
use crate::http::table::Table;

#[derive(Clone)]
pub struct BigqueryTableClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryTableClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    pub async fn get(&self, project_id: &str, dataset_id: &str, table_id: &str) -> Result<Table, Error> {
        let builder = table::get::build(self.inner.endpoint(), self.inner.http(), project_id, dataset_id, table_id);
        self.inner.send(builder).await
    }

    /// Lists one page of tables. Follow `next_page_token` for the rest.
    pub async fn list(
        &self,
        project_id: &str,
        dataset_id: &str,
        req: &ListTablesRequest,
    ) -> Result<ListTablesResponse, Error> {
        let builder = table::list::build(self.inner.endpoint(), self.inner.http(), project_id, dataset_id, req);
        self.inner.send(builder).await
    }
}
