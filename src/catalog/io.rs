use super::*;
use crate::schema::*;
use std::sync::Arc;

/// Writer defines the row insert interface of a storage engine.
#[async_trait::async_trait]
pub trait Writer: Send + Sync {
    /// Inserts one row. A rejected row surfaces as [`crate::Error::Write`].
    async fn insert(&self, table: &TableHandle, row: &Row) -> crate::Result<()>;
}

/// Scanner defines the full-table read interface of a storage engine.
#[async_trait::async_trait]
pub trait Scanner: Send + Sync {
    /// Reads every current row of a table, grouped by range partition.
    async fn scan(&self, table: &str) -> crate::Result<RecordSet>;
}

#[async_trait::async_trait]
impl<T: Writer + ?Sized> Writer for Arc<T> {
    async fn insert(&self, table: &TableHandle, row: &Row) -> crate::Result<()> {
        self.as_ref().insert(table, row).await
    }
}

#[async_trait::async_trait]
impl<T: Scanner + ?Sized> Scanner for Arc<T> {
    async fn scan(&self, table: &str) -> crate::Result<RecordSet> {
        self.as_ref().scan(table).await
    }
}
