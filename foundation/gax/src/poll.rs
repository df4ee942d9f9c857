use std::future::Future;
use std::time::Duration;

use tokio::select;
use tokio::time::Instant;

use crate::cancel::CancellationToken;

/// Pacing and bounds of a polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSetting {
    /// Delay between two consecutive attempts.
    pub interval: Duration,
    /// Sleep one interval before the first attempt too.
    pub delay_first: bool,
    /// Maximum number of attempts. `None` polls until the operation settles.
    pub max_attempts: Option<usize>,
    /// Maximum time spent polling. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for PollSetting {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            delay_first: true,
            max_attempts: None,
            timeout: None,
        }
    }
}

impl PollSetting {
    pub fn with_interval(mut self, value: Duration) -> Self {
        self.interval = value;
        self
    }

    pub fn with_delay_first(mut self, value: bool) -> Self {
        self.delay_first = value;
        self
    }

    pub fn with_max_attempts(mut self, value: usize) -> Self {
        self.max_attempts = Some(value);
        self
    }

    pub fn with_timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }
}

/// Bookkeeping of a single attempt, handed to the completion predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based attempt number.
    pub number: usize,
    /// Time since the loop started.
    pub elapsed: Duration,
}

/// Reasons a polling loop stops without the operation having settled.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Interrupted {
    #[error("client cancel")]
    Cancelled,
    #[error("operation still pending after {attempts} attempts ({elapsed:?})")]
    Exhausted { attempts: usize, elapsed: Duration },
}

/// Repeats `f` at a fixed interval until `done` accepts its output.
///
/// Errors returned by `f` are not retried: the loop only repeats while the operation is pending.
/// When the loop runs out of attempts or time, or the token is cancelled, the matching
/// [`Interrupted`] is converted into the caller's error type.
pub async fn invoke_until<R, E, A>(
    cancel: Option<CancellationToken>,
    setting: &PollSetting,
    mut f: impl FnMut() -> A,
    mut done: impl FnMut(&R, Attempt) -> bool,
) -> Result<R, E>
where
    E: From<Interrupted>,
    A: Future<Output = Result<R, E>>,
{
    let fn_loop = poll_loop(setting, &mut f, &mut done);
    match cancel {
        Some(cancel) => {
            select! {
                biased;
                _ = cancel.cancelled() => Err(Interrupted::Cancelled.into()),
                v = fn_loop => v
            }
        }
        None => fn_loop.await,
    }
}

async fn poll_loop<R, E, A>(
    setting: &PollSetting,
    f: &mut impl FnMut() -> A,
    done: &mut impl FnMut(&R, Attempt) -> bool,
) -> Result<R, E>
where
    E: From<Interrupted>,
    A: Future<Output = Result<R, E>>,
{
    let start = Instant::now();
    let mut number = 0;
    loop {
        if number > 0 || setting.delay_first {
            tokio::time::sleep(setting.interval).await;
        }
        number += 1;
        let result = f().await?;
        let attempt = Attempt {
            number,
            elapsed: start.elapsed(),
        };
        if done(&result, attempt) {
            return Ok(result);
        }
        let out_of_attempts = setting.max_attempts.is_some_and(|max| number >= max);
        let out_of_time = setting
            .timeout
            .is_some_and(|timeout| attempt.elapsed + setting.interval > timeout);
        if out_of_attempts || out_of_time {
            tracing::debug!("polling gave up after {} attempts ({:?})", number, attempt.elapsed);
            return Err(E::from(Interrupted::Exhausted {
                attempts: number,
                elapsed: attempt.elapsed,
            }));
        }
    }
}
