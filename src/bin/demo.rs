//! Demo Binary
//!
//! Recreates the demo table, bulk-inserts three customers, scans the table
//! back and persists it to the sink directory.
//!
//! Options: --master, --table, --sink, --mode, --replicas, --workers,
//! --on-record-error, --engine, --user, --dbname

use clap::Parser;
use clap::ValueEnum;
use rangetable::catalog::*;
use rangetable::engine::Memory;
use rangetable::pipeline::*;
use rangetable::record::*;
use rangetable::save::SaveMode;
use rangetable::schema::*;
use std::sync::Arc;

/// Storage engine backing the run.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Engine {
    /// Embedded engine living for the duration of the process.
    Memory,
    /// PostgreSQL reached at the master address.
    Postgres,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Master endpoint, `host` or `host:port`.
    #[arg(long, default_value_t = Master::default())]
    master: Master,
    #[arg(long, default_value = rangetable::TABLE)]
    table: String,
    /// Directory the scanned table is persisted to.
    #[arg(long, default_value = rangetable::SINK)]
    sink: std::path::PathBuf,
    /// error_if_exists or overwrite (replaces only a previous sink)
    #[arg(long, default_value = "error_if_exists")]
    mode: SaveMode,
    #[arg(long, default_value_t = rangetable::REPLICAS)]
    replicas: u32,
    /// Insert workers. Defaults to one per CPU.
    #[arg(long)]
    workers: Option<usize>,
    /// fail_fast or skip_and_report
    #[arg(long, default_value = "fail_fast")]
    on_record_error: OnRecordError,
    #[arg(long, value_enum, default_value_t = Engine::Memory)]
    engine: Engine,
    #[arg(long, default_value = "postgres")]
    user: String,
    #[arg(long, default_value = "postgres")]
    dbname: String,
}

impl Args {
    async fn run(self) -> anyhow::Result<()> {
        match self.engine {
            Engine::Memory => self.demo(Arc::new(Memory::default())).await,
            #[cfg(feature = "database")]
            Engine::Postgres => {
                let client =
                    rangetable::engine::postgres::connect(&self.master, &self.user, &self.dbname)
                        .await?;
                self.demo(client).await
            }
            #[cfg(not(feature = "database"))]
            Engine::Postgres => anyhow::bail!("built without the database feature"),
        }
    }

    async fn demo<E>(&self, engine: Arc<E>) -> anyhow::Result<()>
    where
        E: Catalog + Writer + Scanner + 'static,
    {
        let (schema, key) = Customer::schema().build()?;
        let options = TableOptions::new(self.replicas, key)?;
        let table = engine.ensure_fresh_table(&self.table, schema, options).await?;
        let pool = match self.workers {
            Some(n) => Pool::with(engine.clone(), n),
            None => Pool::new(engine.clone()),
        };
        let report = pool
            .insert_all(&Customer::samples(), &table, self.on_record_error)
            .await?;
        for rejected in report.rejected.iter() {
            log::warn!("row {} rejected: {}", rejected.index, rejected.reason);
        }
        log::info!("Inserted rows.");
        let set = scan_all(engine.as_ref(), &table, &self.master).await?;
        for row in set.rows() {
            log::info!(
                "{}",
                row.iter().map(Value::to_string).collect::<Vec<_>>().join(" | ")
            );
        }
        set.save(&self.sink, self.mode)?;
        log::info!("done in {:?}", pool.elapsed());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rangetable::log();
    rangetable::kys();
    Args::parse().run().await
}
