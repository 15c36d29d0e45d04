use super::*;

/// Partitioning and replication settings applied at table creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    replication_factor: u32,
    partition_key: PartitionKey,
    range_splits: Vec<Vec<Value>>,
}

impl TableOptions {
    pub fn new(replication_factor: u32, partition_key: PartitionKey) -> crate::Result<Self> {
        if replication_factor == 0 {
            return Err(crate::Error::schema("replication factor must be positive"));
        }
        Ok(Self {
            replication_factor,
            partition_key,
            range_splits: Vec::new(),
        })
    }
    /// Adds a split row, the inclusive lower bound of a new range partition.
    ///
    /// Splits must be full key tuples typed like the key columns and must be
    /// added in strictly increasing order.
    pub fn split(mut self, schema: &TableSchema, row: Vec<Value>) -> crate::Result<Self> {
        let fields = self.partition_key.fields(schema);
        if fields.len() != self.partition_key.len() {
            return Err(crate::Error::schema("partition key does not match schema"));
        }
        if row.len() != fields.len() {
            return Err(crate::Error::schema(format!(
                "split has {} values, key {} has {} columns",
                row.len(),
                self.partition_key,
                fields.len()
            )));
        }
        for (field, value) in fields.iter().zip(row.iter()) {
            if value.kind() != Some(field.kind()) {
                return Err(crate::Error::schema(format!(
                    "split value {} does not fit key column {}",
                    value, field
                )));
            }
        }
        if let Some(last) = self.range_splits.last() {
            if *last >= row {
                return Err(crate::Error::schema("splits must be strictly increasing"));
            }
        }
        self.range_splits.push(row);
        Ok(self)
    }
    pub fn replication_factor(&self) -> u32 {
        self.replication_factor
    }
    pub fn partition_key(&self) -> &PartitionKey {
        &self.partition_key
    }
    pub fn range_splits(&self) -> &[Vec<Value>] {
        &self.range_splits
    }
    /// Number of range partitions the table is created with.
    pub fn partitions(&self) -> usize {
        self.range_splits.len() + 1
    }
    /// Index of the range partition a key tuple belongs to.
    pub fn partition(&self, key: &[Value]) -> usize {
        self.range_splits
            .partition_point(|split| split.as_slice() <= key)
    }
}
