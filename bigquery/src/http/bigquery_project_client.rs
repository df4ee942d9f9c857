use std::sync::Arc;

use crate::http::bigquery_client::BigqueryClient;
use crate::http::error::Error;
use crate::http::project;
use crate::http::project::list::{ListProjectsRequest, ListProjectsResponse};

#[derive(Clone)]
pub struct BigqueryProjectClient {
    inner: Arc<BigqueryClient>,
}

impl BigqueryProjectClient {
    pub fn new(inner: Arc<BigqueryClient>) -> Self {
        Self { inner }
    }

    /// Lists one page of the projects the caller can read.
    pub async fn list(&self, req: &ListProjectsRequest) -> Result<ListProjectsResponse, Error> {
        let builder = project::list::build(self.inner.endpoint(), self.inner.http(), req);
        self.inner.send(builder).await
    }
}
