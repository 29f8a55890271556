//! The scoring queue: admission, dedup, bounded dispatch, retries.
//!
//! Rows are admitted at most once while active, queued FIFO, and
//! dispatched by a pump that keeps up to `max_concurrent` attempt
//! loops in flight. Completions immediately backfill free slots, so
//! the queue never idles a slot while work is pending and never
//! exceeds the cap. Completion order across rows is unordered.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::reconcile::{Presenter, Reconciler};
use crate::record::{FlowRecord, RecordExtractor};
use crate::retry::RetryPolicy;
use crate::row::RowLedger;
use crate::transport::ScoreSend;

/// Default cap on simultaneously in-flight scoring requests.
pub const MAX_CONCURRENT: usize = 3;

/// One admitted row on its way to a verdict.
#[derive(Debug, Clone)]
struct WorkItem {
    record: FlowRecord,
    attempts: u32,
    enqueued_at: DateTime<Utc>,
}

impl WorkItem {
    fn new(record: FlowRecord) -> Self {
        Self {
            record,
            attempts: 0,
            enqueued_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct DispatchState {
    pending: VecDeque<WorkItem>,
    active: usize,
}

/// Bounded-concurrency admission/dispatch engine over per-row work
/// items.
///
/// Owns the row ledger, the pending list and the concurrency
/// accounting. Generic over the extraction seam and the transport
/// seam; tests drive it with doubles, the binary with
/// [`Transport`](crate::transport::Transport).
///
/// `admit` must run inside a tokio runtime: attempt loops are spawned
/// tasks.
pub struct ScoreQueue<E, S> {
    extractor: E,
    inner: Arc<QueueInner<S>>,
}

struct QueueInner<S> {
    transport: S,
    policy: RetryPolicy,
    max_concurrent: usize,
    ledger: Arc<RowLedger>,
    reconciler: Reconciler,
    state: Mutex<DispatchState>,
}

impl<E, S> ScoreQueue<E, S>
where
    E: RecordExtractor,
    S: ScoreSend,
{
    pub fn new(
        extractor: E,
        transport: S,
        presenter: Arc<dyn Presenter>,
        policy: RetryPolicy,
        max_concurrent: usize,
    ) -> Self {
        let ledger = Arc::new(RowLedger::new());
        let reconciler = Reconciler::new(Arc::clone(&ledger), presenter);
        Self {
            extractor,
            inner: Arc::new(QueueInner {
                transport,
                policy,
                max_concurrent,
                ledger,
                reconciler,
                state: Mutex::new(DispatchState::default()),
            }),
        }
    }

    /// Admission: extract, dedup, enqueue, pump.
    ///
    /// No-op when the row yields no record, or already has an item
    /// queued or in flight, or carries a rendered badge. Safe to call
    /// redundantly; the dedup check and the in-flight mark are one
    /// uninterrupted synchronous step, before any suspension point in
    /// the item's lifecycle.
    pub fn admit(&self, row: &E::Row) {
        let Some(record) = self.extractor.extract(row) else {
            return;
        };
        if !self.inner.ledger.try_begin(&record.id) {
            return;
        }
        debug!(row = %record.id, "row admitted");
        self.inner
            .state
            .lock()
            .expect("queue state poisoned")
            .pending
            .push_back(WorkItem::new(record));
        self.inner.pump();
    }

    /// Re-attempts presentation of a stashed result for `row`. Call on
    /// any event suggesting the row's mount point is back; redundant
    /// calls are no-ops.
    pub fn try_replay(&self, row: &str) {
        self.inner.reconciler.try_replay(row);
    }

    /// The row ledger backing this queue.
    pub fn ledger(&self) -> &Arc<RowLedger> {
        &self.inner.ledger
    }

    /// Resolves once the queue is quiescent: nothing pending, nothing
    /// in flight.
    pub async fn drain(&self) {
        loop {
            {
                let state = self.inner.state.lock().expect("queue state poisoned");
                if state.pending.is_empty() && state.active == 0 {
                    return;
                }
            }
            sleep(std::time::Duration::from_millis(20)).await;
        }
    }
}

impl<S: ScoreSend> QueueInner<S> {
    /// Fills free concurrency slots from the head of the pending list.
    /// Runs after every admission and every completion, so `active`
    /// tracks the cap exactly and admission order is preserved for
    /// waiting items.
    fn pump(self: &Arc<Self>) {
        loop {
            let item = {
                let mut state = self.state.lock().expect("queue state poisoned");
                if state.active >= self.max_concurrent {
                    return;
                }
                let Some(item) = state.pending.pop_front() else {
                    return;
                };
                state.active += 1;
                item
            };
            let inner = Arc::clone(self);
            tokio::spawn(async move {
                inner.run_item(item).await;
                inner.state.lock().expect("queue state poisoned").active -= 1;
                inner.pump();
            });
        }
    }

    /// Attempt loop for one work item. Runs to success or exhaustion;
    /// row removal is not detected here, a dead mount point is the
    /// reconciler's concern.
    async fn run_item(&self, mut item: WorkItem) {
        let row = item.record.id.clone();
        while item.attempts < self.policy.max_attempts {
            debug!(
                %row,
                attempt = item.attempts + 1,
                max = self.policy.max_attempts,
                "sending record"
            );
            match self.transport.send(&item.record, item.attempts).await {
                Ok(result) => {
                    info!(
                        %row,
                        score = result.score,
                        elapsed_ms = (Utc::now() - item.enqueued_at).num_milliseconds(),
                        "row scored"
                    );
                    self.reconciler.apply(&row, result);
                    self.ledger.finish(&row);
                    return;
                }
                Err(err) => {
                    let attempt = item.attempts;
                    item.attempts += 1;
                    if item.attempts >= self.policy.max_attempts {
                        break;
                    }
                    let wait = self.policy.delay_for(attempt);
                    warn!(
                        %row,
                        attempt = attempt + 1,
                        %err,
                        backoff_ms = wait.as_millis() as u64,
                        "scoring attempt failed, backing off"
                    );
                    sleep(wait).await;
                }
            }
        }

        warn!(%row, attempts = item.attempts, "scoring failed after retries");
        self.reconciler.apply_terminal(&row, "Scoring failed after retries");
        self.ledger.finish(&row);
    }
}
