//! flowscore: a bounded-concurrency scoring pipeline.
//!
//! Rows discovered by an external source are snapshotted into
//! [`FlowRecord`]s, deduplicated per row, scored by a remote service
//! over an ordered list of transport channels with capped-backoff
//! retries, and reconciled back onto a presentation surface that may
//! be momentarily unable to display them.
//!
//! The seams are traits: [`RecordExtractor`] turns a row handle into
//! a record, [`ScoreSend`] delivers one record per attempt, and
//! [`Presenter`] renders a badge. [`ScoreQueue`] ties them together.

pub mod cli;
pub mod config;
pub mod error;
pub mod queue;
pub mod reconcile;
pub mod record;
pub mod retry;
pub mod row;
pub mod transport;
pub mod ui;

pub use config::FlowscoreConfig;
pub use error::FlowscoreError;
pub use queue::{MAX_CONCURRENT, ScoreQueue};
pub use reconcile::{Presenter, Reconciler, ScoreCategory};
pub use record::{FlowRecord, JsonRowExtractor, RecordExtractor};
pub use retry::RetryPolicy;
pub use row::{RenderState, RowLedger, RowState};
pub use transport::{
    Channel, HttpChannel, MessageRelay, ScoreResult, ScoreSend, Transport, TransportError,
};
pub use ui::ConsolePresenter;
