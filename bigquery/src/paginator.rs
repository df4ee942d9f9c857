use std::collections::VecDeque;

use crate::error::Error;
use crate::http::job::get_query_results::GetQueryResultsRequest;
use crate::http::job::JobReference;
use crate::http::table::{TableReference, TableSchema};
use crate::http::tabledata::list::{FetchDataRequest, Tuple};
use crate::transport::Transport;

/// Where the rows are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSource {
    /// `tabledata.list` on a table.
    TableData(TableReference),
    /// `jobs.getQueryResults` on a finished query job.
    QueryResults(JobReference),
}

struct Page {
    rows: Vec<Tuple>,
    total_rows: Option<u64>,
    schema: Option<TableSchema>,
}

/// Reads a result set in bounded pages, advancing the start offset by the rows received.
///
/// The sequence is lazy and finite: it ends once the offset reaches the total row count
/// reported by the first response, or the optional row limit. A page without rows before
/// that point is reported as [`Error::InvariantViolation`] instead of being requested again.
pub struct RowPaginator<'a> {
    transport: &'a dyn Transport,
    source: RowSource,
    page_size: u32,
    limit: Option<u64>,
    rows_fetched: u64,
    total_rows: Option<u64>,
    schema: Option<TableSchema>,
    first_page: Option<Vec<Tuple>>,
    chunk: VecDeque<Tuple>,
}

impl<'a> RowPaginator<'a> {
    pub fn new(transport: &'a dyn Transport, source: RowSource, page_size: u32) -> Self {
        Self {
            transport,
            source,
            page_size: page_size.max(1),
            limit: None,
            rows_fetched: 0,
            total_rows: None,
            schema: None,
            first_page: None,
            chunk: VecDeque::new(),
        }
    }

    /// Stops after `limit` rows. Page requests never ask for more than the rows still wanted.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        if let Some(page) = self.first_page.as_mut() {
            page.truncate(limit.try_into().unwrap_or(usize::MAX));
            self.rows_fetched = page.len() as u64;
        }
        self
    }

    /// Seeds the rows that came with the initial response, so they are yielded first
    /// and the next request starts right after them.
    pub fn with_first_page(mut self, mut rows: Vec<Tuple>, total_rows: Option<u64>, schema: Option<TableSchema>) -> Self {
        if let Some(limit) = self.limit {
            rows.truncate(limit.try_into().unwrap_or(usize::MAX));
        }
        self.rows_fetched = rows.len() as u64;
        self.total_rows = total_rows;
        if schema.is_some() {
            self.schema = schema;
        }
        self.first_page = Some(rows);
        self
    }

    pub fn schema(&self) -> Option<&TableSchema> {
        self.schema.as_ref()
    }

    /// Total row count of the result set, once a response reported it.
    pub fn total_rows(&self) -> Option<u64> {
        self.total_rows
    }

    fn remaining(&self) -> Option<u64> {
        let by_total = self.total_rows.map(|total| total.saturating_sub(self.rows_fetched));
        let by_limit = self.limit.map(|limit| limit.saturating_sub(self.rows_fetched));
        match (by_total, by_limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns the next page of rows, or `None` once every row was yielded.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Tuple>>, Error> {
        if let Some(rows) = self.first_page.take() {
            if !rows.is_empty() {
                return Ok(Some(rows));
            }
        }
        let remaining = self.remaining();
        if remaining == Some(0) {
            return Ok(None);
        }
        let max_results = match remaining {
            Some(remaining) => remaining.min(self.page_size as u64) as u32,
            None => self.page_size,
        };

        let start_index = self.rows_fetched;
        tracing::trace!("fetching up to {} rows at offset {}", max_results, start_index);
        let page = self.fetch(start_index, max_results).await?;

        if self.total_rows.is_none() {
            self.total_rows = page.total_rows;
        }
        if self.schema.is_none() {
            self.schema = page.schema;
        }

        let mut rows = page.rows;
        if rows.is_empty() {
            return match self.total_rows {
                Some(total) if start_index < total => Err(Error::InvariantViolation(format!(
                    "page at offset {start_index} returned no rows although {total} rows were reported"
                ))),
                _ => Ok(None),
            };
        }
        if let Some(remaining) = self.remaining() {
            rows.truncate(remaining.try_into().unwrap_or(usize::MAX));
        }
        self.rows_fetched += rows.len() as u64;
        Ok(Some(rows))
    }

    /// Returns the next row, fetching another page when the current one is used up.
    pub async fn next(&mut self) -> Result<Option<Tuple>, Error> {
        loop {
            if let Some(row) = self.chunk.pop_front() {
                return Ok(Some(row));
            }
            match self.next_page().await? {
                Some(rows) => self.chunk.extend(rows),
                None => return Ok(None),
            }
        }
    }

    /// Drains every remaining row.
    pub async fn collect_all(&mut self) -> Result<Vec<Tuple>, Error> {
        let mut rows: Vec<Tuple> = self.chunk.drain(..).collect();
        while let Some(page) = self.next_page().await? {
            rows.extend(page);
        }
        Ok(rows)
    }

    async fn fetch(&self, start_index: u64, max_results: u32) -> Result<Page, Error> {
        match &self.source {
            RowSource::TableData(table) => {
                let request = FetchDataRequest {
                    start_index: Some(start_index),
                    max_results: Some(max_results),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .list_tabledata(&table.project_id, &table.dataset_id, &table.table_id, &request)
                    .await?;
                Ok(Page {
                    rows: response.rows.unwrap_or_default(),
                    total_rows: response.total_rows,
                    schema: None,
                })
            }
            RowSource::QueryResults(job) => {
                let request = GetQueryResultsRequest {
                    start_index: Some(start_index),
                    max_results: Some(max_results),
                    location: job.location.clone(),
                    ..Default::default()
                };
                let response = self
                    .transport
                    .get_query_results(&job.project_id, &job.job_id, &request)
                    .await?;
                if !response.job_complete {
                    return Err(Error::InvariantViolation(format!(
                        "results of job {} at offset {start_index} were requested after completion but the job reports it is not complete",
                        job.job_id
                    )));
                }
                Ok(Page {
                    rows: response.rows.unwrap_or_default(),
                    total_rows: response.total_rows,
                    schema: response.schema,
                })
            }
        }
    }
}
