use crate::schema::*;

/// A table as declared by this process.
///
/// Only a snapshot of what was created; the remote catalog stays the source
/// of truth for the table's actual shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    name: String,
    schema: TableSchema,
    options: TableOptions,
}

impl TableHandle {
    /// Cross-checks a declaration before anything is sent to an engine.
    pub fn new(name: &str, schema: TableSchema, options: TableOptions) -> crate::Result<Self> {
        if name.is_empty() {
            return Err(crate::Error::schema("table name must be non-empty"));
        }
        if name.chars().any(char::is_control) {
            return Err(crate::Error::schema(format!(
                "table name {:?} holds control characters",
                name
            )));
        }
        let key = PartitionKey::new(&schema, options.partition_key().columns().iter().cloned())?;
        let rebuilt = options
            .range_splits()
            .iter()
            .cloned()
            .try_fold(TableOptions::new(options.replication_factor(), key)?, |o, split| {
                o.split(&schema, split)
            })?;
        Ok(Self {
            name: name.to_string(),
            schema,
            options: rebuilt,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }
    pub fn options(&self) -> &TableOptions {
        &self.options
    }
    /// Whether a described remote table has exactly this declaration.
    pub fn matches(&self, schema: &TableSchema, options: &TableOptions) -> bool {
        self.schema == *schema && self.options == *options
    }
}

impl std::fmt::Display for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} key {} x{}",
            self.name,
            self.schema,
            self.options.partition_key(),
            self.options.replication_factor()
        )
    }
}
