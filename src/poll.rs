//! Poll-until-ready loop shared by message search and preview downloads.
//!
//! Both operations are asynchronous on the server side: a freshly delivered
//! message has to be indexed before search can find it, and a preview has to be
//! rendered before it can be downloaded. The server tells the client how long to
//! wait between attempts through the `x-ms-delay` header, a comma-separated list
//! of millisecond durations. [`poll_until_ready`] walks that schedule until the
//! attempt reports a ready value or the caller's timeout would be exceeded.
//!
//! Waiting uses [`tokio::time::sleep`], so dropping the returned future (for
//! example through [`tokio::time::timeout`] or `select!`) cancels the loop
//! without issuing the next request.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Delay used when the server sends no usable schedule.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Server-supplied sequence of waits between poll attempts.
///
/// Never empty and never zero: a missing or blank header yields a single
/// [`DEFAULT_DELAY_MS`] entry, and entries that are not positive integers are
/// replaced by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelaySchedule {
    delays_ms: Vec<u64>,
}

impl DelaySchedule {
    /// Parse a header value such as `"1000,2000,5000"`.
    ///
    /// # Examples
    /// ```
    /// use mailosaur_client::poll::DelaySchedule;
    ///
    /// let schedule = DelaySchedule::parse(Some("500, 1000"));
    /// assert_eq!(schedule.as_millis(), &[500, 1000]);
    /// assert_eq!(DelaySchedule::parse(None).as_millis(), &[1000]);
    /// ```
    pub fn parse(header: Option<&str>) -> Self {
        let raw = header.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Self::default();
        }

        let delays_ms = raw
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|ms| *ms > 0)
                    .unwrap_or(DEFAULT_DELAY_MS)
            })
            .collect();

        Self { delays_ms }
    }

    /// The schedule entries in milliseconds.
    pub fn as_millis(&self) -> &[u64] {
        &self.delays_ms
    }

    /// Delay to wait after the `attempt`-th unsuccessful poll (zero based).
    ///
    /// Attempts past the end of the schedule reuse its last entry.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let index = attempt.min(self.delays_ms.len().saturating_sub(1));
        let millis = self
            .delays_ms
            .get(index)
            .copied()
            .unwrap_or(DEFAULT_DELAY_MS);
        Duration::from_millis(millis)
    }
}

impl Default for DelaySchedule {
    fn default() -> Self {
        Self {
            delays_ms: vec![DEFAULT_DELAY_MS],
        }
    }
}

/// Outcome of a single poll attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    /// The operation finished; polling stops and the value is returned.
    Ready(T),
    /// Not finished yet. `partial` is what this attempt produced (for a search,
    /// the empty result page) and `delays` is the schedule the server sent with it.
    Pending { partial: T, delays: DelaySchedule },
}

/// How long to keep polling and what to do when time runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Total time budget. Zero disables polling: one attempt is made and its
    /// value returned whether or not it was ready.
    pub timeout: Duration,
    /// When `true`, running out of time is an error. When `false`, the last
    /// pending value is returned instead.
    pub error_on_timeout: bool,
}

impl PollPolicy {
    /// Policy with the given timeout in milliseconds that errors on timeout.
    pub fn from_millis(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            error_on_timeout: true,
        }
    }

    /// Return the last pending value instead of failing when time runs out.
    pub fn suppress_timeout_error(mut self) -> Self {
        self.error_on_timeout = false;
        self
    }
}

/// Repeatedly run `attempt` until it is ready or `policy.timeout` would be exceeded.
///
/// Errors returned by `attempt` end the loop immediately and are never retried.
/// Before each wait the loop checks whether `elapsed + next delay` exceeds the
/// timeout; if so it stops, returning `timed_out()` as the error or the last
/// pending value depending on [`PollPolicy::error_on_timeout`]. Because the check
/// is made before sleeping, a slow server can push the total past the nominal
/// timeout by up to one request round-trip.
///
/// # Examples
/// ```
/// use mailosaur_client::poll::{poll_until_ready, Attempt, DelaySchedule, PollPolicy};
/// use mailosaur_client::Error;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Error> {
/// let value = poll_until_ready(
///     PollPolicy::from_millis(0),
///     || async { Ok(Attempt::Pending { partial: 7, delays: DelaySchedule::default() }) },
///     || Error::Generic("not ready in time".into()),
/// )
/// .await?;
/// assert_eq!(value, 7);
/// # Ok(())
/// # }
/// ```
pub async fn poll_until_ready<T, F, Fut, E>(
    policy: PollPolicy,
    mut attempt: F,
    timed_out: E,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt<T>>>,
    E: FnOnce() -> Error,
{
    let started = Instant::now();
    let mut polls = 0usize;

    loop {
        let (partial, delays) = match attempt().await? {
            Attempt::Ready(value) => return Ok(value),
            Attempt::Pending { partial, delays } => (partial, delays),
        };

        if policy.timeout.is_zero() {
            return Ok(partial);
        }

        let delay = delays.delay_for(polls);
        polls += 1;

        if started.elapsed() + delay > policy.timeout {
            debug!(
                polls,
                timeout_ms = policy.timeout.as_millis() as u64,
                "poll budget exhausted"
            );
            if policy.error_on_timeout {
                return Err(timed_out());
            }
            return Ok(partial);
        }

        debug!(polls, delay_ms = delay.as_millis() as u64, "not ready, waiting");
        tokio::time::sleep(delay).await;
    }
}
