use crate::record::Record;
use crate::schema::*;

/// Rows read from a table, grouped by the range partition that held them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    schema: TableSchema,
    partitions: Vec<Vec<Row>>,
}

impl RecordSet {
    pub fn new(schema: TableSchema, partitions: Vec<Vec<Row>>) -> Self {
        Self { schema, partitions }
    }
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }
    pub fn partitions(&self) -> &[Vec<Row>] {
        &self.partitions
    }
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.partitions.iter().flatten()
    }
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Vec::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Decodes every row into a typed record.
    pub fn records<R: Record>(&self) -> crate::Result<Vec<R>> {
        self.rows().cloned().map(R::from_row).collect()
    }
}
