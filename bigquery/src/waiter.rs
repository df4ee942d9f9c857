use std::time::Duration;

use bqsample_gax::cancel::CancellationToken;
use bqsample_gax::poll::{invoke_until, PollSetting};

use crate::error::Error;
use crate::http::job::get::GetJobRequest;
use crate::http::job::{Job, JobReference, JobState};
use crate::transport::Transport;

/// Snapshot handed to the progress observer after every poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: String,
    pub state: JobState,
    pub attempt: usize,
    pub elapsed: Duration,
}

/// Polls the job at a fixed interval until it leaves `PENDING` and `RUNNING`.
///
/// The job is returned as soon as its state is anything else, including a state this client
/// does not know. A `DONE` job carrying an error result is still returned as-is; use
/// [`check_job_error`] to turn it into [`Error::JobFailed`].
/// Transport errors abort the wait immediately. Running out of attempts or time yields
/// [`Error::Timeout`] and a cancelled token yields [`Error::Cancelled`].
pub async fn wait_for_job(
    transport: &dyn Transport,
    job_reference: &JobReference,
    setting: &PollSetting,
    cancel: Option<CancellationToken>,
    mut observe: impl FnMut(&JobProgress),
) -> Result<Job, Error> {
    let request = GetJobRequest {
        location: job_reference.location.clone(),
    };
    let request = &request;
    invoke_until(
        cancel,
        setting,
        || async move {
            let job = transport
                .get_job(&job_reference.project_id, &job_reference.job_id, request)
                .await?;
            Ok::<_, Error>(job)
        },
        |job, attempt| {
            let progress = JobProgress {
                job_id: job_reference.job_id.clone(),
                state: job.status.state.clone(),
                attempt: attempt.number,
                elapsed: attempt.elapsed,
            };
            tracing::debug!(
                "job {} is {} (attempt {}, {:?})",
                progress.job_id,
                progress.state,
                progress.attempt,
                progress.elapsed
            );
            observe(&progress);
            !job.status.state.is_pending()
        },
    )
    .await
}

/// Turns a finished job that carries an error result into [`Error::JobFailed`].
pub fn check_job_error(job: Job) -> Result<Job, Error> {
    match &job.status.error_result {
        None => Ok(job),
        Some(error) => Err(Error::JobFailed {
            job_id: job.job_reference.job_id.clone(),
            reason: error.reason.clone().unwrap_or_else(|| "unknown".to_string()),
            message: error.message.clone().unwrap_or_default(),
        }),
    }
}
