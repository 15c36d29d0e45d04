use super::*;
use crate::catalog::*;
use crate::schema::Row;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Worker inserts one shard of rows at a time through a shared engine
/// handle. Many workers can insert into the same table concurrently.
pub struct Worker<W> {
    id: usize,
    writer: Arc<W>,
    inserted: AtomicUsize,
    rejected: AtomicUsize,
}

impl<W: Writer> Worker<W> {
    pub fn new(id: usize, writer: Arc<W>) -> Self {
        Self {
            id,
            writer,
            inserted: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        }
    }
    pub fn inserted(&self) -> usize {
        self.inserted.load(Ordering::Relaxed)
    }
    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::Relaxed)
    }
    /// Inserts a shard row by row. Returns the number of rows inserted and
    /// the rows skipped under [`OnRecordError::SkipAndReport`].
    ///
    /// Anything other than a rejected row, such as a lost connection,
    /// aborts the shard under either policy.
    pub async fn insert(
        &self,
        table: &TableHandle,
        shard: Vec<(usize, Row)>,
        policy: OnRecordError,
    ) -> crate::Result<(usize, Vec<Rejected>)> {
        log::debug!("worker {} inserting {} rows", self.id, shard.len());
        let mut inserted = 0;
        let mut rejected = Vec::new();
        for (index, row) in shard {
            match self.writer.insert(table, &row).await {
                Ok(()) => {
                    inserted += 1;
                    self.inserted.fetch_add(1, Ordering::Relaxed);
                }
                Err(e @ crate::Error::Write { .. }) => {
                    self.rejected.fetch_add(1, Ordering::Relaxed);
                    match policy {
                        OnRecordError::FailFast => return Err(e),
                        OnRecordError::SkipAndReport => {
                            log::warn!("worker {} skipped row {}: {}", self.id, index, e);
                            rejected.push(Rejected {
                                index,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok((inserted, rejected))
    }
}
