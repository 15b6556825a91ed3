//! Advisory collaborator: best-effort workload commentary
//!
//! After every board mutation a snapshot is handed to an
//! [`AdvisoryService`] on a background task. The result only updates a
//! display value and never gates a mutation:
//! - each dispatch takes a sequence number; the previous in-flight task is aborted
//! - a response older than the published one is discarded
//! - failures and empty answers fall back to a fixed message

use crate::board::BoardSnapshot;
use crate::error::AdvisoryError;
use crate::types::RequestStatus;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// External summarization service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Produce a short human-readable summary of the board
    async fn summarize(&self, snapshot: &BoardSnapshot) -> Result<String, AdvisoryError>;
}

/// Data digest an advisory service reasons over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDigest {
    pub total_requests: usize,
    pub pending: usize,
    pub specialists: usize,
    /// `(name, active_tasks)` in roster order
    pub distribution: Vec<(String, u32)>,
}

impl WorkloadDigest {
    /// Build digest from a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            total_requests: snapshot.requests.len(),
            pending: snapshot
                .requests
                .iter()
                .filter(|r| r.status == RequestStatus::Pending)
                .count(),
            specialists: snapshot.specialists.len(),
            distribution: snapshot
                .specialists
                .iter()
                .map(|s| (s.name.clone(), s.active_tasks))
                .collect(),
        }
    }
}

impl fmt::Display for WorkloadDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Requests: {}", self.total_requests)?;
        writeln!(f, "Pending: {}", self.pending)?;
        writeln!(f, "Specialists: {}", self.specialists)?;
        let distribution: Vec<String> = self
            .distribution
            .iter()
            .map(|(name, tasks)| format!("{name}: {tasks}"))
            .collect();
        write!(f, "Distribution: {}", distribution.join(", "))
    }
}

/// Local advisory service deriving advice from the digest alone
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestAdvisor;

#[async_trait]
impl AdvisoryService for DigestAdvisor {
    async fn summarize(&self, snapshot: &BoardSnapshot) -> Result<String, AdvisoryError> {
        let digest = WorkloadDigest::from_snapshot(snapshot);
        let busiest = digest.distribution.iter().max_by_key(|(_, tasks)| *tasks);
        let idlest = digest.distribution.iter().min_by_key(|(_, tasks)| *tasks);
        let (Some((busy_name, busy)), Some((idle_name, idle))) = (busiest, idlest) else {
            return Err(AdvisoryError::Unavailable("no specialists on roster".to_string()));
        };

        let mut advice = format!(
            "{} of {} requests are waiting for a specialist.",
            digest.pending, digest.total_requests
        );
        if busy > idle {
            advice.push_str(&format!(
                " {busy_name} carries the most work ({busy} active); \
                 consider routing new requests to {idle_name} ({idle} active)."
            ));
        } else {
            advice.push_str(" Workload is evenly spread across the roster.");
        }
        Ok(advice)
    }
}

/// Published advisory value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    /// Dispatch sequence that produced this text (0 = initial)
    pub sequence: u64,
    /// Board revision the text was computed from
    pub revision: u64,
    /// Display text
    pub text: String,
    /// Whether the text is the fallback message
    pub is_fallback: bool,
}

/// Dispatches advisory calls and publishes the newest answer
pub struct AdvisoryRefresher {
    service: Arc<dyn AdvisoryService>,
    fallback: String,
    sequence: AtomicU64,
    state: Arc<watch::Sender<Advice>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for AdvisoryRefresher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryRefresher")
            .field("fallback", &self.fallback)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl AdvisoryRefresher {
    /// Create refresher showing `initial` until the first answer arrives
    pub fn new(
        service: Arc<dyn AdvisoryService>,
        initial: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(Advice {
            sequence: 0,
            revision: 0,
            text: initial.into(),
            is_fallback: false,
        });
        Self {
            service,
            fallback: fallback.into(),
            sequence: AtomicU64::new(0),
            state: Arc::new(state),
            in_flight: Mutex::new(None),
        }
    }

    /// Dispatch a refresh for `snapshot`, superseding any in-flight one
    ///
    /// Returns the dispatch sequence number. Outside a tokio runtime the
    /// refresh is skipped and the current advice stays in place.
    ///
    /// Sequence allocation and handle replacement happen under one lock, so
    /// the task left in flight is always the newest dispatch.
    pub fn refresh(&self, snapshot: BoardSnapshot) -> u64 {
        let mut in_flight = self.in_flight.lock();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(sequence, "no async runtime; advisory refresh skipped");
            return sequence;
        };

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let fallback = self.fallback.clone();
        let handle = runtime.spawn(async move {
            let revision = snapshot.revision;
            let (text, is_fallback) = match service.summarize(&snapshot).await {
                Ok(text) if !text.trim().is_empty() => (text, false),
                Ok(_) => {
                    tracing::warn!(
                        sequence,
                        error = %AdvisoryError::Empty,
                        "advisory failed; using fallback"
                    );
                    (fallback, true)
                }
                Err(e) => {
                    tracing::warn!(sequence, error = %e, "advisory failed; using fallback");
                    (fallback, true)
                }
            };
            publish(
                &state,
                Advice {
                    sequence,
                    revision,
                    text,
                    is_fallback,
                },
            );
        });

        if let Some(previous) = in_flight.replace(handle) {
            previous.abort();
        }
        sequence
    }

    /// Latest published advice
    #[must_use]
    pub fn current(&self) -> Advice {
        self.state.borrow().clone()
    }

    /// Watch published advice
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Advice> {
        self.state.subscribe()
    }

    /// Sequence number of the latest dispatch
    #[must_use]
    pub fn latest_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }
}

impl Drop for AdvisoryRefresher {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.get_mut().take() {
            handle.abort();
        }
    }
}

/// Store `advice` unless something newer is already published.
fn publish(state: &watch::Sender<Advice>, advice: Advice) {
    let sequence = advice.sequence;
    let published = state.send_if_modified(|current| {
        if current.sequence < advice.sequence {
            *current = advice;
            true
        } else {
            false
        }
    });
    if !published {
        tracing::debug!(sequence, "stale advisory response discarded");
    }
}
