// ScoringClient: the public entry point for notification scoring.
//
// Queued submissions go through the serial worker. Direct scoring and
// connection tests run on the caller's own task and are not serialized
// against the queue, so a user-initiated probe never waits behind a backlog.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::error::ScoringError;
use super::queue::{score_guarded, spawn_worker, Job, Reply, VerdictCallback, VerdictHandle};
use super::traits::{ApiConfig, Score, SeverityScorer};
use crate::preferences::PreferenceSource;

/// Scores notifications and decides whether to filter them.
///
/// Construct one per process at the composition root and pass it by
/// reference. Each instance owns one worker task.
pub struct ScoringClient {
    scorer: Arc<dyn SeverityScorer>,
    preferences: Arc<dyn PreferenceSource>,
    queue: mpsc::UnboundedSender<Job>,
}

impl ScoringClient {
    /// Create a client and spawn its worker. Must be called inside a Tokio runtime.
    pub fn new(scorer: Arc<dyn SeverityScorer>, preferences: Arc<dyn PreferenceSource>) -> Self {
        let queue = spawn_worker(scorer.clone(), preferences.clone());
        Self {
            scorer,
            preferences,
            queue,
        }
    }

    /// Queue a notification for scoring and return immediately.
    ///
    /// The handle resolves once the worker has scored this job and every
    /// job submitted before it. Failed calls resolve with the sentinel score.
    pub fn submit(&self, title: Option<&str>, content: Option<&str>) -> VerdictHandle {
        let (tx, rx) = oneshot::channel();
        self.enqueue(title, content, Reply::Handle(tx));
        VerdictHandle::new(rx)
    }

    /// Queue a notification and invoke `on_result(should_filter, score)` once
    /// it has been scored.
    ///
    /// The callback runs on Tokio's blocking pool, and the worker waits for
    /// it before starting the next job. A slow callback delays later jobs
    /// but never stalls a runtime thread.
    ///
    /// Returns `Err` only if the worker has stopped, in which case the
    /// callback will never run.
    pub fn submit_with_callback<F>(
        &self,
        title: Option<&str>,
        content: Option<&str>,
        on_result: F,
    ) -> Result<(), ScoringError>
    where
        F: FnOnce(bool, f32) + Send + 'static,
    {
        let callback: VerdictCallback = Box::new(on_result);
        if self.enqueue(title, content, Reply::Callback(callback)) {
            Ok(())
        } else {
            Err(ScoringError::WorkerStopped)
        }
    }

    fn enqueue(&self, title: Option<&str>, content: Option<&str>, reply: Reply) -> bool {
        let job = Job {
            title: title.map(str::to_owned),
            content: content.map(str::to_owned),
            reply,
        };
        match self.queue.send(job) {
            Ok(()) => true,
            Err(_) => {
                warn!("Scoring worker has stopped; dropping submission");
                false
            }
        }
    }

    /// Score on the caller's task, bypassing the queue.
    ///
    /// Returns the clamped score, or 10.0 if anything failed.
    pub async fn score(&self, title: Option<&str>, content: Option<&str>) -> f32 {
        Score::or_sentinel(self.try_score(title, content).await).value()
    }

    /// Like [`score`](Self::score) but keeps the failure reason.
    pub async fn try_score(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Score, ScoringError> {
        let config = self.preferences.api_config();
        score_guarded(self.scorer.as_ref(), title, content, &config).await
    }

    /// Probe explicit, not-yet-saved settings with fixed test text.
    ///
    /// True when the call succeeded and produced a score in `[0, 10]`.
    /// Never touches the preferences store.
    pub async fn test_connection(
        &self,
        api_url: &str,
        api_key: &str,
        model_name: &str,
        system_prompt: &str,
        temperature: f32,
    ) -> bool {
        let config = ApiConfig::new(api_url, api_key, model_name)
            .with_system_prompt(system_prompt)
            .with_temperature(temperature)
            .with_locale(self.preferences.locale());
        self.test_config(&config).await
    }

    /// [`test_connection`](Self::test_connection) for an already-built config.
    pub async fn test_config(&self, config: &ApiConfig) -> bool {
        let (title, content) = config.locale.probe_text();
        match score_guarded(self.scorer.as_ref(), Some(title), Some(content), config).await {
            Ok(score) => {
                debug!(score = score.value(), "Connection test succeeded");
                score.is_in_range()
            }
            Err(e) => {
                warn!(error = %e, "Connection test failed");
                false
            }
        }
    }
}
