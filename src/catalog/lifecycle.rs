use super::*;
use crate::schema::*;

/// Observed state of a table name relative to a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Absent,
    Matching,
    Mismatched,
}

/// What [`Lifecycle::declare`] does with a table whose shape differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMismatch {
    /// Drop the table and create it as declared. Its rows are lost.
    #[default]
    Recreate,
    /// Leave the table alone and fail with [`crate::Error::Schema`].
    Fail,
}

/// Table setup on top of any [`Catalog`].
///
/// Neither operation is atomic and neither takes a lock: two processes
/// driving the same table name race on delete and create. Callers must keep
/// to one writer per table name at a time.
#[async_trait::async_trait]
pub trait Lifecycle: Catalog {
    /// Drops any table under `name`, then creates it as declared.
    ///
    /// On success the table exists with exactly this schema, key and
    /// replication factor, and holds no rows. Contents of a previous table
    /// are never reused, even if its shape already matched. A failure after
    /// the drop leaves the table missing; nothing is rolled back.
    async fn ensure_fresh_table(
        &self,
        name: &str,
        schema: TableSchema,
        options: TableOptions,
    ) -> crate::Result<TableHandle> {
        let handle = TableHandle::new(name, schema, options)?;
        if self.exists(name).await? {
            log::info!("dropping  table ({})", name);
            self.delete(name).await?;
        }
        log::info!("creating  table ({})", handle);
        self.create(name, handle.schema(), handle.options()).await?;
        Ok(handle)
    }
    /// Creates the table if absent, keeps it if it already matches, and
    /// resolves a mismatch according to `on_mismatch`. A [`Shape::Foreign`]
    /// table never matches.
    async fn declare(
        &self,
        name: &str,
        schema: TableSchema,
        options: TableOptions,
        on_mismatch: OnMismatch,
    ) -> crate::Result<(TableHandle, TableState)> {
        let handle = TableHandle::new(name, schema, options)?;
        let state = match self.describe(name).await? {
            None => TableState::Absent,
            Some(Shape::Declared(ref schema, ref options)) if handle.matches(schema, options) => {
                TableState::Matching
            }
            Some(Shape::Declared(..)) => TableState::Mismatched,
            Some(Shape::Foreign(reason)) => {
                log::warn!("foreign   table ({}): {}", name, reason);
                TableState::Mismatched
            }
        };
        match (state, on_mismatch) {
            (TableState::Absent, _) => {
                log::info!("creating  table ({})", handle);
                self.create(name, handle.schema(), handle.options()).await?;
            }
            (TableState::Matching, _) => {
                log::info!("reusing   table ({})", name);
            }
            (TableState::Mismatched, OnMismatch::Recreate) => {
                log::info!("replacing table ({})", handle);
                self.delete(name).await?;
                self.create(name, handle.schema(), handle.options()).await?;
            }
            (TableState::Mismatched, OnMismatch::Fail) => {
                return Err(crate::Error::schema(format!(
                    "table {} exists with a different shape",
                    name
                )));
            }
        }
        Ok((handle, state))
    }
}

impl<C: Catalog> Lifecycle for C {}
