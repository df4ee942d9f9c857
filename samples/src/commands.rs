use std::io::Write;
use std::time::Duration;

use uuid::Uuid;

use bqsample_bigquery::http::dataset::list::ListDatasetsRequest;
use bqsample_bigquery::http::dataset::DatasetReference;
use bqsample_bigquery::http::job::query::QueryRequest;
use bqsample_bigquery::http::job::{
    CreateDisposition, Job, JobConfiguration, JobConfigurationLoad, JobConfigurationQuery, JobReference,
};
use bqsample_bigquery::http::project::list::ListProjectsRequest;
use bqsample_bigquery::http::table::list::ListTablesRequest;
use bqsample_bigquery::http::table::{TableFieldSchema, TableReference, TableSchema};
use bqsample_bigquery::paginator::{RowPaginator, RowSource};
use bqsample_bigquery::query::{run_query, QuerySetting};
use bqsample_bigquery::transport::Transport;
use bqsample_bigquery::waiter::{check_job_error, wait_for_job, JobProgress};
use bqsample_gax::cancel::CancellationToken;
use bqsample_gax::poll::PollSetting;

use crate::cli::{self, Command, HeadArgs, ListDatasetsArgs, ListTablesArgs, LoadArgs, QueryArgs, WaitArgs};
use crate::error::Error;
use crate::render;

const HEAD_PAGE_SIZE: u64 = 1000;
const GETTING_STARTED_PAGE_SIZE: u32 = 1000;

/// Everything a command needs besides its own arguments.
pub struct Session<'a> {
    pub transport: &'a dyn Transport,
    pub poll: PollSetting,
    pub query: QuerySetting,
    pub cancel: Option<CancellationToken>,
}

impl<'a> Session<'a> {
    pub fn new(transport: &'a dyn Transport, poll: PollSetting) -> Self {
        Self {
            transport,
            query: QuerySetting {
                poll: poll.clone(),
                ..Default::default()
            },
            poll,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Runs exactly one command, writing its output to `out`.
pub async fn dispatch(session: &Session<'_>, command: &Command, out: &mut dyn Write) -> Result<(), Error> {
    tracing::debug!("running {:?}", command);
    match command {
        Command::Lsp => list_projects(session, out).await,
        Command::Lsd(args) => list_datasets(session, args, out).await,
        Command::Lst(args) => list_tables(session, args, out).await,
        Command::Load(args) => load(session, args, out).await,
        Command::Query(args) => query(session, args, out).await,
        Command::Squery(args) => sync_query(session, args, out).await,
        Command::Head(args) => head(session, args, out).await,
        Command::Wait(args) => wait(session, args, out).await,
        Command::Help => Err(Error::Usage(cli::usage())),
    }
}

/// Client-side job ids make an insert safe to resend.
fn new_job_reference(project_id: &str) -> JobReference {
    JobReference {
        project_id: project_id.to_string(),
        job_id: format!("bqsample_{}", Uuid::new_v4().simple()),
        location: None,
    }
}

async fn list_projects(session: &Session<'_>, out: &mut dyn Write) -> Result<(), Error> {
    let response = session.transport.list_projects(&ListProjectsRequest::default()).await?;
    if !response.projects.is_empty() {
        writeln!(out, "Project list:")?;
        for project in &response.projects {
            writeln!(out, "{}", project.friendly_name.as_deref().unwrap_or(&project.id))?;
        }
    }
    Ok(())
}

async fn write_datasets(session: &Session<'_>, project_id: &str, max_results: Option<i64>, out: &mut dyn Write) -> Result<(), Error> {
    let request = ListDatasetsRequest {
        max_results,
        ..Default::default()
    };
    let response = session.transport.list_datasets(project_id, &request).await?;
    if !response.datasets.is_empty() {
        writeln!(out, "Available datasets\n----------------")?;
        for dataset in &response.datasets {
            writeln!(out, "{}", dataset.dataset_reference.dataset_id)?;
        }
    }
    Ok(())
}

async fn list_datasets(session: &Session<'_>, args: &ListDatasetsArgs, out: &mut dyn Write) -> Result<(), Error> {
    write_datasets(session, &args.project_id, Some(args.max_results), out).await
}

async fn list_tables(session: &Session<'_>, args: &ListTablesArgs, out: &mut dyn Write) -> Result<(), Error> {
    let request = ListTablesRequest {
        max_results: Some(args.max_results),
        ..Default::default()
    };
    let response = session
        .transport
        .list_tables(&args.project_id, &args.dataset_id, &request)
        .await?;
    if !response.tables.is_empty() {
        writeln!(out, "Tables list:")?;
        for table in &response.tables {
            writeln!(out, "{}", table.id)?;
        }
    }
    Ok(())
}

/// Polls a job, printing one progress line per status check.
async fn poll_job(
    session: &Session<'_>,
    job_reference: &JobReference,
    setting: &PollSetting,
    out: &mut dyn Write,
    line: impl Fn(&JobProgress) -> String,
) -> Result<Job, Error> {
    let mut write_error = None;
    let job = wait_for_job(session.transport, job_reference, setting, session.cancel.clone(), |progress| {
        if let Err(e) = writeln!(out, "{}", line(progress)) {
            write_error.get_or_insert(e);
        }
    })
    .await?;
    match write_error {
        Some(e) => Err(e.into()),
        None => Ok(job),
    }
}

/// Waits for a freshly inserted job unless it already left the pending states.
/// The job status is echoed after every check.
async fn wait_while_running(session: &Session<'_>, job: Job, out: &mut dyn Write) -> Result<Job, Error> {
    writeln!(out, "job status: {}", job.status.state)?;
    let job = if job.status.state.is_pending() {
        poll_job(session, &job.job_reference, &session.poll, out, |p| {
            format!("Waiting on job {} ... Current status: {}\njob status: {}", p.job_id, p.state, p.state)
        })
        .await?
    } else {
        job
    };
    Ok(check_job_error(job)?)
}

async fn load(session: &Session<'_>, args: &LoadArgs, out: &mut dyn Write) -> Result<(), Error> {
    let text = tokio::fs::read_to_string(&args.schema_file).await?;
    let fields: Vec<TableFieldSchema> = serde_json::from_str(&text).map_err(|source| Error::SchemaFile {
        path: args.schema_file.clone(),
        source,
    })?;

    let job = Job {
        job_reference: new_job_reference(&args.project_id),
        configuration: JobConfiguration {
            load: Some(JobConfigurationLoad {
                source_uris: vec![args.csv_file.clone()],
                schema: Some(TableSchema { fields }),
                destination_table: TableReference {
                    project_id: args.project_id.clone(),
                    dataset_id: args.dataset_id.clone(),
                    table_id: args.table_id.clone(),
                },
                create_disposition: Some(CreateDisposition::CreateIfNeeded),
                skip_leading_rows: args.skip_leading_rows,
                max_bad_records: Some(args.max_bad_records),
                encoding: args.encoding.clone(),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    writeln!(out, "Starting load job.")?;
    let job = session.transport.insert_job(&job).await?;
    let job = wait_while_running(session, job, out).await?;
    let done = serde_json::to_string_pretty(&job).map_err(std::io::Error::from)?;
    writeln!(out, "Done: {done}")?;
    Ok(())
}

async fn query(session: &Session<'_>, args: &QueryArgs, out: &mut dyn Write) -> Result<(), Error> {
    let job = Job {
        job_reference: new_job_reference(&args.project_id),
        configuration: JobConfiguration {
            query: Some(JobConfigurationQuery {
                query: args.query.clone(),
                default_dataset: Some(DatasetReference {
                    dataset_id: args.dataset_id.clone(),
                    project_id: args.project_id.clone(),
                }),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };
    let job = session.transport.insert_job(&job).await?;
    let job = wait_while_running(session, job, out).await?;

    let job_id = job.job_reference.job_id;
    let destination = job
        .configuration
        .query
        .and_then(|q| q.destination_table)
        .ok_or(Error::MissingDestination(job_id))?;

    let mut rows = RowPaginator::new(session.transport, RowSource::TableData(destination), args.max_results);
    while let Some(page) = rows.next_page().await? {
        render::write_rows(out, &page)?;
    }
    Ok(())
}

async fn sync_query(session: &Session<'_>, args: &QueryArgs, out: &mut dyn Write) -> Result<(), Error> {
    let request = QueryRequest {
        query: args.query.clone(),
        max_results: Some(args.max_results),
        default_dataset: Some(DatasetReference {
            dataset_id: args.dataset_id.clone(),
            project_id: args.project_id.clone(),
        }),
        ..Default::default()
    };
    let mut result = run_query(
        session.transport,
        &args.project_id,
        &request,
        &session.query,
        session.cancel.clone(),
    )
    .await?;
    if let Some(schema) = &result.schema {
        render::write_header(out, schema)?;
    }
    while let Some(page) = result.rows.next_page().await? {
        render::write_rows(out, &page)?;
    }
    Ok(())
}

async fn head(session: &Session<'_>, args: &HeadArgs, out: &mut dyn Write) -> Result<(), Error> {
    let table = session
        .transport
        .get_table(&args.project_id, &args.dataset_id, &args.table_id)
        .await?;
    if let Some(schema) = &table.schema {
        render::write_header(out, schema)?;
    }
    let reference = TableReference {
        project_id: args.project_id.clone(),
        dataset_id: args.dataset_id.clone(),
        table_id: args.table_id.clone(),
    };
    let page_size = args.max_rows.clamp(1, HEAD_PAGE_SIZE) as u32;
    let mut rows = RowPaginator::new(session.transport, RowSource::TableData(reference), page_size).with_limit(args.max_rows);
    while let Some(page) = rows.next_page().await? {
        render::write_rows(out, &page)?;
    }
    Ok(())
}

async fn wait(session: &Session<'_>, args: &WaitArgs, out: &mut dyn Write) -> Result<(), Error> {
    let reference = JobReference {
        project_id: args.project_id.clone(),
        job_id: args.job_id.clone(),
        location: args.location.clone(),
    };
    let mut setting = session.poll.clone().with_delay_first(false);
    if let Some(seconds) = args.seconds {
        setting = setting.with_timeout(Duration::from_secs(seconds));
    }
    let job = poll_job(session, &reference, &setting, out, |p| {
        format!("Waiting on job {} ... Current status: {} ({}s)", p.job_id, p.state, p.elapsed.as_secs())
    })
    .await?;
    let job = check_job_error(job)?;
    writeln!(out, "Job {} is {}", job.job_reference.job_id, job.status.state)?;
    Ok(())
}

/// Lists the public datasets, runs one query job and prints every row of its result.
/// Job status is checked every second, starting right after the insert.
pub async fn getting_started(session: &Session<'_>, project_id: &str, query: &str, out: &mut dyn Write) -> Result<(), Error> {
    write_datasets(session, "publicdata", None, out).await?;

    writeln!(out, "\nInserting Query Job: {query}")?;
    let job = Job {
        job_reference: new_job_reference(project_id),
        configuration: JobConfiguration {
            query: Some(JobConfigurationQuery {
                query: query.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };
    let job = session.transport.insert_job(&job).await?;
    writeln!(out, "\nJob ID of Query Job is: {}", job.job_reference.job_id)?;

    let setting = PollSetting {
        interval: Duration::from_secs(1),
        delay_first: false,
        ..session.poll.clone()
    };
    let job = poll_job(session, &job.job_reference, &setting, out, |p| {
        format!("Job status ({}ms) {}: {}", p.elapsed.as_millis(), p.job_id, p.state)
    })
    .await?;
    let job = check_job_error(job)?;

    write!(out, "\nQuery Results:\n------------\n")?;
    let mut rows = RowPaginator::new(
        session.transport,
        RowSource::QueryResults(job.job_reference),
        GETTING_STARTED_PAGE_SIZE,
    );
    while let Some(page) = rows.next_page().await? {
        render::write_rows(out, &page)?;
    }
    Ok(())
}
