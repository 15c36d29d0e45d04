use super::*;
use crate::catalog::*;
use crate::record::Record;
use crate::schema::Row;
use std::sync::Arc;
use std::time::Instant;

/// Fixed set of insert workers sharing one engine handle.
pub struct Pool<W> {
    workers: Vec<Worker<W>>,
    started: Instant,
}

impl<W: Writer> Pool<W> {
    /// One worker per CPU.
    pub fn new(writer: Arc<W>) -> Self {
        Self::with(writer, num_cpus::get())
    }
    pub fn with(writer: Arc<W>, workers: usize) -> Self {
        Self {
            workers: (0..workers.max(1))
                .map(|id| Worker::new(id, writer.clone()))
                .collect(),
            started: Instant::now(),
        }
    }
    pub fn size(&self) -> usize {
        self.workers.len()
    }
    /// Rows inserted by all workers since the pool started.
    pub fn inserted(&self) -> usize {
        self.workers.iter().map(|w| w.inserted()).sum()
    }
    /// Rows rejected by all workers since the pool started.
    pub fn rejected(&self) -> usize {
        self.workers.iter().map(|w| w.rejected()).sum()
    }
    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
    /// Splits records into contiguous shards, one per worker, and inserts
    /// every shard concurrently.
    ///
    /// Returns once every worker has finished. Under
    /// [`OnRecordError::FailFast`] the first rejected row cancels the
    /// remaining work and is returned as the error; rows already accepted
    /// stay in the table.
    pub async fn insert_all<R: Record>(
        &self,
        records: &[R],
        table: &TableHandle,
        policy: OnRecordError,
    ) -> crate::Result<WriteReport> {
        let start = Instant::now();
        let shards = parallelize(records.iter().map(R::row).collect(), self.size());
        log::info!(
            "inserting {} rows into ({}) across {} workers",
            records.len(),
            table.name(),
            self.size()
        );
        let results = futures::future::try_join_all(
            self.workers
                .iter()
                .zip(shards)
                .map(|(worker, shard)| worker.insert(table, shard, policy)),
        )
        .await?;
        let inserted = results.iter().map(|(n, _)| n).sum();
        let mut rejected = results
            .into_iter()
            .flat_map(|(_, r)| r)
            .collect::<Vec<Rejected>>();
        rejected.sort_by_key(|r| r.index);
        let report = WriteReport {
            inserted,
            rejected,
            elapsed: start.elapsed(),
        };
        log::info!("inserted {} rows ({})", report.inserted, table.name());
        Ok(report)
    }
}

/// Slices indexed rows into `n` contiguous shards of near-equal size.
pub fn parallelize(rows: Vec<Row>, n: usize) -> Vec<Vec<(usize, Row)>> {
    let n = n.max(1);
    let len = rows.len();
    let mut rows = rows.into_iter().enumerate();
    (0..n)
        .map(|i| (i * len / n, (i + 1) * len / n))
        .map(|(lo, hi)| rows.by_ref().take(hi - lo).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use crate::engine::Memory;
    use crate::record::Customer;
    use crate::schema::*;

    async fn table(engine: &Memory) -> TableHandle {
        let (schema, key) = Customer::schema().build().unwrap();
        let options = TableOptions::new(1, key).unwrap();
        engine.create("customers", &schema, &options).await.unwrap();
        TableHandle::new("customers", schema, options).unwrap()
    }

    #[test]
    fn shards_cover_every_row_once() {
        let rows = (0..10).map(|i| vec![Value::from(i)]).collect::<Vec<_>>();
        let shards = parallelize(rows, 4);
        assert_eq!(shards.len(), 4);
        assert_eq!(
            shards.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![2, 3, 2, 3]
        );
        let indices = shards.iter().flatten().map(|(i, _)| *i).collect::<Vec<_>>();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn more_workers_than_rows_leaves_empty_shards() {
        let shards = parallelize(vec![vec![Value::from(1)]], 3);
        assert_eq!(shards.iter().map(Vec::len).sum::<usize>(), 1);
        assert_eq!(shards.len(), 3);
    }

    #[tokio::test]
    async fn every_record_is_inserted() {
        let engine = Arc::new(Memory::default());
        let handle = table(&engine).await;
        let pool = Pool::with(engine.clone(), 4);
        let customers = (0..100).map(|_| Customer::random()).collect::<Vec<_>>();
        let report = pool
            .insert_all(&customers, &handle, OnRecordError::FailFast)
            .await
            .unwrap();
        assert_eq!(report.inserted, 100);
        assert!(report.rejected.is_empty());
        assert_eq!(pool.inserted(), 100);
        let mut back = engine
            .scan("customers")
            .await
            .unwrap()
            .records::<Customer>()
            .unwrap();
        let mut sent = customers.clone();
        back.sort();
        sent.sort();
        assert_eq!(back, sent);
    }

    #[tokio::test]
    async fn zero_records_is_not_an_error() {
        let engine = Arc::new(Memory::default());
        let handle = table(&engine).await;
        let report = Pool::with(engine.clone(), 2)
            .insert_all::<Customer>(&[], &handle, OnRecordError::FailFast)
            .await
            .unwrap();
        assert_eq!(report.inserted, 0);
        assert!(engine.exists("customers").await.unwrap());
        assert!(engine.scan("customers").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fail_fast_surfaces_the_rejected_row() {
        let engine = Arc::new(Memory::default());
        let handle = table(&engine).await;
        let customers = vec![
            Customer::new("jane", 30, "new york"),
            Customer::new("jane", 31, "boston"),
        ];
        let result = Pool::with(engine, 1)
            .insert_all(&customers, &handle, OnRecordError::FailFast)
            .await;
        assert!(matches!(result, Err(crate::Error::Write { .. })));
    }

    #[tokio::test]
    async fn skip_and_report_keeps_going() {
        let engine = Arc::new(Memory::default());
        let handle = table(&engine).await;
        let customers = vec![
            Customer::new("jane", 30, "new york"),
            Customer::new("jane", 31, "boston"),
            Customer::new("gil", 48, "london"),
        ];
        let pool = Pool::with(engine.clone(), 1);
        let report = pool
            .insert_all(&customers, &handle, OnRecordError::SkipAndReport)
            .await
            .unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(pool.rejected(), 1);
        assert_eq!(engine.scan("customers").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn connection_loss_aborts_under_either_policy() {
        let engine = Arc::new(Memory::default());
        let handle = table(&engine).await;
        engine.shutdown();
        let result = Pool::with(engine, 2)
            .insert_all(&Customer::samples(), &handle, OnRecordError::SkipAndReport)
            .await;
        assert!(matches!(result, Err(crate::Error::Connection(_))));
    }
}
