use crate::schema::*;
use std::sync::Arc;

/// What a catalog reports about an existing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Schema and options read back from the table's declaration.
    Declared(TableSchema, TableOptions),
    /// A table whose declaration cannot be read back, such as one created
    /// by another tool or holding column types outside [`Kind`].
    Foreign(String),
}

/// Catalog defines the administration interface of a storage engine.
/// Table existence, shape and creation all go through here.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Whether the catalog lists a table under this name.
    async fn exists(&self, name: &str) -> crate::Result<bool>;
    /// Shape of an existing table, `None` if there is no such table.
    async fn describe(&self, name: &str) -> crate::Result<Option<Shape>>;
    /// Drops a table and all of its rows.
    async fn delete(&self, name: &str) -> crate::Result<()>;
    /// Creates an empty table.
    async fn create(
        &self,
        name: &str,
        schema: &TableSchema,
        options: &TableOptions,
    ) -> crate::Result<()>;
}

#[async_trait::async_trait]
impl<T: Catalog + ?Sized> Catalog for Arc<T> {
    async fn exists(&self, name: &str) -> crate::Result<bool> {
        self.as_ref().exists(name).await
    }
    async fn describe(&self, name: &str) -> crate::Result<Option<Shape>> {
        self.as_ref().describe(name).await
    }
    async fn delete(&self, name: &str) -> crate::Result<()> {
        self.as_ref().delete(name).await
    }
    async fn create(
        &self,
        name: &str,
        schema: &TableSchema,
        options: &TableOptions,
    ) -> crate::Result<()> {
        self.as_ref().create(name, schema, options).await
    }
}
