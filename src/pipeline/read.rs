use crate::catalog::*;
use std::collections::BTreeMap;

/// Reader option naming the table to scan.
#[rustfmt::skip]
pub const TABLE_OPTION:  &str = "kudu.table";
/// Reader option naming the master endpoint.
#[rustfmt::skip]
pub const MASTER_OPTION: &str = "kudu.master";

/// Descriptor-driven table reader.
///
/// Configured with a connector format and string options, then loaded
/// against a connected [`Scanner`]:
///
/// ```
/// use rangetable::pipeline::*;
/// let reader = Reader::new()
///     .format(rangetable::FORMAT)
///     .option(TABLE_OPTION, "spark_kudu_tbl")
///     .option(MASTER_OPTION, "quickstart.cloudera:7051");
/// assert_eq!(reader.options().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reader {
    format: Option<String>,
    options: BTreeMap<String, String>,
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
    pub fn option(mut self, key: &str, value: &str) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }
    pub fn with(mut self, options: BTreeMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }
    /// Scans the configured table in full through `scanner`.
    ///
    /// The `kudu.master` option must be present and well formed, but it
    /// does not choose the cluster: `scanner` is already connected, and the
    /// master is only recorded in the log next to the scan.
    pub async fn load<S: Scanner + ?Sized>(&self, scanner: &S) -> crate::Result<RecordSet> {
        let table = self
            .options
            .get(TABLE_OPTION)
            .ok_or_else(|| crate::Error::read("?", format!("missing option {}", TABLE_OPTION)))?;
        match self.format.as_deref() {
            Some(crate::FORMAT) => {}
            Some(other) => {
                return Err(crate::Error::read(table, format!("unknown format {}", other)));
            }
            None => return Err(crate::Error::read(table, "no format selected")),
        }
        let master = self
            .options
            .get(MASTER_OPTION)
            .ok_or_else(|| crate::Error::read(table, format!("missing option {}", MASTER_OPTION)))
            .and_then(|m| Master::parse(m))?;
        log::info!("scanning  table ({}) from {}", table, master);
        let set = scanner.scan(table).await?;
        log::info!("scanned {} rows ({})", set.len(), table);
        Ok(set)
    }
}

/// Reader descriptor for one table on one master.
pub fn descriptor(table: &TableHandle, master: &Master) -> BTreeMap<String, String> {
    BTreeMap::from([
        (TABLE_OPTION.to_string(), table.name().to_string()),
        (MASTER_OPTION.to_string(), master.to_string()),
    ])
}

/// Reads the full current contents of a table.
///
/// Rows acknowledged by a finished insert are visible here for engines with
/// read-your-writes semantics, which both shipped engines provide.
pub async fn scan_all<S: Scanner + ?Sized>(
    scanner: &S,
    table: &TableHandle,
    master: &Master,
) -> crate::Result<RecordSet> {
    Reader::new()
        .format(crate::FORMAT)
        .with(descriptor(table, master))
        .load(scanner)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Memory;
    use crate::record::*;
    use crate::schema::*;

    async fn table(engine: &Memory) -> TableHandle {
        let (schema, key) = Customer::schema().build().unwrap();
        let options = TableOptions::new(1, key).unwrap();
        engine.create("customers", &schema, &options).await.unwrap();
        let handle = TableHandle::new("customers", schema, options).unwrap();
        for customer in Customer::samples() {
            engine.insert(&handle, &customer.row()).await.unwrap();
        }
        handle
    }

    #[test]
    fn descriptor_names_table_and_master() {
        let (schema, key) = Customer::schema().build().unwrap();
        let options = TableOptions::new(1, key).unwrap();
        let handle = TableHandle::new(crate::TABLE, schema, options).unwrap();
        let options = descriptor(&handle, &Master::default());
        assert_eq!(options[TABLE_OPTION], "spark_kudu_tbl");
        assert_eq!(options[MASTER_OPTION], "quickstart.cloudera:7051");
    }

    #[tokio::test]
    async fn scan_all_returns_every_row() {
        let engine = Memory::default();
        let handle = table(&engine).await;
        let mut customers = scan_all(&engine, &handle, &Master::default())
            .await
            .unwrap()
            .records::<Customer>()
            .unwrap();
        let mut expected = Customer::samples();
        customers.sort();
        expected.sort();
        assert_eq!(customers, expected);
    }

    #[tokio::test]
    async fn master_option_does_not_redirect_the_scan() {
        let engine = Memory::default();
        table(&engine).await;
        let elsewhere = Reader::new()
            .format(crate::FORMAT)
            .option(TABLE_OPTION, "customers")
            .option(MASTER_OPTION, "another.cluster:7151");
        assert_eq!(elsewhere.load(&engine).await.unwrap().len(), 3);
        let malformed = elsewhere.option(MASTER_OPTION, "another.cluster:port");
        assert!(matches!(
            malformed.load(&engine).await,
            Err(crate::Error::Connection(_))
        ));
    }

    #[tokio::test]
    async fn reader_requires_format_and_options() {
        let engine = Memory::default();
        table(&engine).await;
        let missing_format = Reader::new()
            .option(TABLE_OPTION, "customers")
            .option(MASTER_OPTION, "localhost");
        assert!(matches!(
            missing_format.load(&engine).await,
            Err(crate::Error::Read { .. })
        ));
        let wrong_format = missing_format.clone().format("parquet");
        assert!(matches!(
            wrong_format.load(&engine).await,
            Err(crate::Error::Read { .. })
        ));
        let missing_master = Reader::new()
            .format(crate::FORMAT)
            .option(TABLE_OPTION, "customers");
        assert!(matches!(
            missing_master.load(&engine).await,
            Err(crate::Error::Read { .. })
        ));
        let ok = missing_format.format(crate::FORMAT).load(&engine).await.unwrap();
        assert_eq!(ok.len(), 3);
    }
}
