// Serial worker queue for asynchronous scoring.
//
// One Tokio task per ScoringClient drains an unbounded channel, running
// each job to completion before taking the next. That gives two guarantees:
// at most one queued request is in flight, and verdicts are delivered in
// submission order. There is no cancellation; a submitted job always runs.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use super::error::ScoringError;
use super::traits::{ApiConfig, Score, SeverityScorer};
use super::verdict::FilterVerdict;
use crate::output::record::CheckRecord;
use crate::preferences::PreferenceSource;

/// Callback form of a queued submission: `(should_filter, score)`.
pub type VerdictCallback = Box<dyn FnOnce(bool, f32) + Send + 'static>;

/// How a finished job hands its verdict back.
pub(crate) enum Reply {
    Handle(oneshot::Sender<FilterVerdict>),
    Callback(VerdictCallback),
}

pub(crate) struct Job {
    pub title: Option<String>,
    pub content: Option<String>,
    pub reply: Reply,
}

/// Resolves to the verdict of one queued submission, exactly once.
#[must_use = "a VerdictHandle does nothing unless awaited"]
pub struct VerdictHandle {
    rx: oneshot::Receiver<FilterVerdict>,
}

impl VerdictHandle {
    pub(crate) fn new(rx: oneshot::Receiver<FilterVerdict>) -> Self {
        Self { rx }
    }
}

impl Future for VerdictHandle {
    type Output = Result<FilterVerdict, ScoringError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map_err(|_| ScoringError::WorkerStopped)
    }
}

/// Spawn the worker and return the sending half of its queue.
///
/// Must be called from within a Tokio runtime. The worker exits once every
/// sender has been dropped and the queue is drained.
pub(crate) fn spawn_worker(
    scorer: Arc<dyn SeverityScorer>,
    preferences: Arc<dyn PreferenceSource>,
) -> mpsc::UnboundedSender<Job> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run_worker(rx, scorer, preferences));
    tx
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<Job>,
    scorer: Arc<dyn SeverityScorer>,
    preferences: Arc<dyn PreferenceSource>,
) {
    debug!("Scoring worker started");

    while let Some(job) = rx.recv().await {
        // Settings are read when the job runs, not when it was queued
        let config = preferences.api_config();
        let result =
            score_guarded(scorer.as_ref(), job.title.as_deref(), job.content.as_deref(), &config)
                .await;
        let score = Score::or_sentinel(result);

        // Threshold is read at delivery time
        let threshold = preferences.filtering_degree();
        let verdict = FilterVerdict::new(score, threshold);

        let record = CheckRecord::new(job.title.as_deref(), &verdict, threshold);
        info!(
            score = %record.score,
            threshold = record.threshold,
            result = record.result.as_str(),
            title_preview = %record.title_preview,
            "Model check"
        );

        deliver(job.reply, verdict).await;
    }

    debug!("Scoring worker stopped");
}

/// Run one scorer call, turning a panic into `ScoringError::Panicked`.
pub(crate) async fn score_guarded(
    scorer: &dyn SeverityScorer,
    title: Option<&str>,
    content: Option<&str>,
    config: &ApiConfig,
) -> Result<Score, ScoringError> {
    AssertUnwindSafe(scorer.score(title, content, config))
        .catch_unwind()
        .await
        .unwrap_or(Err(ScoringError::Panicked))
}

async fn deliver(reply: Reply, verdict: FilterVerdict) {
    match reply {
        Reply::Handle(tx) => {
            // Receiver dropped means nobody is waiting any more
            if tx.send(verdict).is_err() {
                debug!("Verdict handle dropped before delivery");
            }
        }
        Reply::Callback(callback) => {
            // Off the runtime threads, but awaited so delivery stays in order
            let outcome = tokio::task::spawn_blocking(move || {
                callback(verdict.should_filter, verdict.score.value())
            })
            .await;
            if let Err(e) = outcome {
                warn!(error = %e, "Verdict callback failed; worker continues");
            }
        }
    }
}
