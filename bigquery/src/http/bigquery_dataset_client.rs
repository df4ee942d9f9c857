use std::sync::Arc;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::dataset;
use crate::http::dataset::list::{ListDatasetsRequest, ListDatasetsResponse};
use crate::http::error::Error;

#[derive(Clone)]
pub struct BigqueryDatasetClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryDatasetClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Lists one page of datasets. Follow `next_page_token` for the rest.
    pub async fn list(&self, project_id: &str, req: &ListDatasetsRequest) -> Result<ListDatasetsResponse, Error> {
        let builder = dataset::list::build(self.inner.endpoint(), self.inner.http(), project_id, req);
        self.inner.send(builder).await
    }
}
