use crate::catalog::*;
use crate::schema::*;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// Embedded, in-process storage engine.
///
/// Each table is split into range-partitioned tablets ordered by partition
/// key. Replicas are placed on distinct tablet servers, so a table may not
/// ask for more replicas than there are servers, and the replica count must
/// be odd to keep a majority. Rows are visible to scans as soon as their
/// insert returns.
pub struct Memory {
    servers: u32,
    online: AtomicBool,
    tables: RwLock<BTreeMap<String, Table>>,
}

struct Table {
    schema: TableSchema,
    options: TableOptions,
    tablets: Vec<BTreeMap<Vec<Value>, Row>>,
    locked: bool,
}

impl Table {
    fn new(schema: TableSchema, options: TableOptions) -> Self {
        Self {
            tablets: (0..options.partitions()).map(|_| BTreeMap::new()).collect(),
            schema,
            options,
            locked: false,
        }
    }
}

impl Memory {
    /// An engine backed by `servers` tablet servers.
    pub fn new(servers: u32) -> Self {
        Self {
            servers,
            online: AtomicBool::new(true),
            tables: RwLock::new(BTreeMap::new()),
        }
    }
    pub fn servers(&self) -> u32 {
        self.servers
    }
    /// Takes the master offline; every later call fails to connect.
    pub fn shutdown(&self) {
        log::warn!("memory engine shutting down");
        self.online.store(false, Ordering::Relaxed);
    }
    /// Marks a table as busy with another writer's alteration. Drops of a
    /// locked table are refused until [`Memory::unlock`]. Returns whether
    /// the table exists.
    pub async fn lock(&self, name: &str) -> bool {
        self.latch(name, true).await
    }
    pub async fn unlock(&self, name: &str) -> bool {
        self.latch(name, false).await
    }
    async fn latch(&self, name: &str, locked: bool) -> bool {
        match self.tables.write().await.get_mut(name) {
            Some(table) => {
                table.locked = locked;
                true
            }
            None => false,
        }
    }
    fn reachable(&self) -> crate::Result<()> {
        match self.online.load(Ordering::Relaxed) {
            true => Ok(()),
            false => Err(crate::Error::Connection("memory engine is offline".to_string())),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait::async_trait]
impl Catalog for Memory {
    async fn exists(&self, name: &str) -> crate::Result<bool> {
        self.reachable()?;
        Ok(self.tables.read().await.contains_key(name))
    }
    async fn describe(&self, name: &str) -> crate::Result<Option<Shape>> {
        self.reachable()?;
        Ok(self
            .tables
            .read()
            .await
            .get(name)
            .map(|t| Shape::Declared(t.schema.clone(), t.options.clone())))
    }
    async fn delete(&self, name: &str) -> crate::Result<()> {
        self.reachable()?;
        let mut tables = self.tables.write().await;
        match tables.get(name).map(|t| t.locked) {
            None => Err(crate::Error::drop(name, "table not found")),
            Some(true) => Err(crate::Error::drop(name, "table is being altered by another writer")),
            Some(false) => {
                tables.remove(name);
                Ok(())
            }
        }
    }
    async fn create(
        &self,
        name: &str,
        schema: &TableSchema,
        options: &TableOptions,
    ) -> crate::Result<()> {
        self.reachable()?;
        let replicas = options.replication_factor();
        if replicas % 2 == 0 {
            return Err(crate::Error::create(
                name,
                format!("illegal replication factor {}: must be odd", replicas),
            ));
        }
        if replicas > self.servers {
            return Err(crate::Error::create(
                name,
                format!(
                    "replication factor {} exceeds {} live tablet servers",
                    replicas, self.servers
                ),
            ));
        }
        let mut tables = self.tables.write().await;
        if tables.contains_key(name) {
            return Err(crate::Error::create(name, "table already exists"));
        }
        tables.insert(
            name.to_string(),
            Table::new(schema.clone(), options.clone()),
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl Writer for Memory {
    async fn insert(&self, table: &TableHandle, row: &Row) -> crate::Result<()> {
        self.reachable()?;
        let name = table.name();
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(name)
            .ok_or_else(|| crate::Error::write(name, "table not found"))?;
        table
            .schema
            .check(row)
            .map_err(|reason| crate::Error::write(name, reason))?;
        let key = table.options.partition_key().project(&table.schema, row);
        let tablet = table.options.partition(&key);
        match table.tablets[tablet].contains_key(&key) {
            true => Err(crate::Error::write(
                name,
                format!(
                    "key already present ({})",
                    key.iter().map(Value::to_string).collect::<Vec<_>>().join(", ")
                ),
            )),
            false => {
                table.tablets[tablet].insert(key, row.clone());
                Ok(())
            }
        }
    }
}

#[async_trait::async_trait]
impl Scanner for Memory {
    async fn scan(&self, name: &str) -> crate::Result<RecordSet> {
        self.reachable()?;
        let tables = self.tables.read().await;
        let table = tables
            .get(name)
            .ok_or_else(|| crate::Error::read(name, "table not found"))?;
        Ok(RecordSet::new(
            table.schema.clone(),
            table
                .tablets
                .iter()
                .map(|tablet| tablet.values().cloned().collect())
                .collect(),
        ))
    }
}
