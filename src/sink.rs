//! Destinations for validated rows: a dry-run preview or the live database.

use async_trait::async_trait;

use crate::{db::Database, row::NormalizedUser};

/// Classified result of handing one validated row to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestResult {
    Inserted,
    DuplicateSkipped,
    DatabaseError(String),
    DryRunPreview,
}

/// Destination for validated rows. One sink instance spans the whole batch,
/// so database-backed implementations keep a single session (and its cached
/// prepared statement) across rows.
#[async_trait]
pub trait UserSink {
    async fn ingest(&mut self, user: &NormalizedUser) -> IngestResult;
}

/// Sink for `--dry_run`: accepts every row and touches nothing.
pub struct DryRunSink;

#[async_trait]
impl UserSink for DryRunSink {
    async fn ingest(&mut self, _user: &NormalizedUser) -> IngestResult {
        IngestResult::DryRunPreview
    }
}

/// Live sink borrowing the open database session for the batch. Row-level
/// failures come back classified; they never abort the loop.
pub struct DatabaseSink<'a> {
    db: &'a mut Database,
}

impl<'a> DatabaseSink<'a> {
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserSink for DatabaseSink<'_> {
    async fn ingest(&mut self, user: &NormalizedUser) -> IngestResult {
        self.db.insert_user(user).await
    }
}
