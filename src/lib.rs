//! Range-partitioned table lifecycle and bulk load pipeline.
//!
//! Declares a table schema with a range-partition key, makes sure the table
//! exists in exactly that shape, bulk-loads records through a pool of
//! concurrent workers, then scans the table back out and persists it.
//!
//! ## Components
//!
//! - [`schema`] — Field descriptors, partition keys, table options, builder
//! - [`catalog`] — Engine-facing traits and the table lifecycle manager
//! - [`engine`] — Storage engine backends (embedded memory, PostgreSQL)
//! - [`pipeline`] — Worker pool, bulk insert and scan
//! - [`save`] — Persisting record sets to a sink directory
//! - [`record`] — Typed records and the demo [`Customer`](record::Customer)
pub mod catalog;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod save;
pub mod schema;

pub use error::*;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// DEMO DEFAULTS
// ============================================================================
/// Host of the storage engine master in the demo cluster.
#[rustfmt::skip]
pub const MASTER_HOST: &str = "quickstart.cloudera";
/// Default master RPC port.
#[rustfmt::skip]
pub const MASTER_PORT: u16  = 7051;
/// Table the demo creates, fills and reads back.
#[rustfmt::skip]
pub const TABLE:       &str = "spark_kudu_tbl";
/// Sink directory the scanned table is persisted to.
#[rustfmt::skip]
pub const SINK:        &str = "/tmp/save";
/// Replication factor of the demo table.
#[rustfmt::skip]
pub const REPLICAS:    u32  = 1;
/// Format identifier selecting the storage engine connector on read.
#[rustfmt::skip]
pub const FORMAT:      &str = "org.apache.kudu.spark.kudu";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Directory run logs are written to.
#[cfg(feature = "server")]
#[rustfmt::skip]
pub const LOG_DIR:     &str = "logs";

/// Initialize logging for one run: INFO to the terminal, DEBUG to
/// `logs/rangetable-<unix seconds>.log`.
#[cfg(feature = "server")]
pub fn log() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let started = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let ref path = logfile(started);
    let file = std::fs::create_dir_all(LOG_DIR)
        .and_then(|_| std::fs::File::create(path))
        .map(|file| simplelog::WriteLogger::new(log::LevelFilter::Debug, config, file));
    match file {
        Ok(file) => simplelog::CombinedLogger::init(vec![term, file]),
        Err(ref e) => {
            eprintln!("run log {} unavailable: {}", path.display(), e);
            simplelog::CombinedLogger::init(vec![term])
        }
    }
    .expect("initialize logger");
}

/// Run log of a process started at `started` unix seconds.
#[cfg(feature = "server")]
fn logfile(started: u64) -> std::path::PathBuf {
    std::path::Path::new(LOG_DIR).join(format!("{}-{}.log", env!("CARGO_PKG_NAME"), started))
}

/// Exit immediately on Ctrl+C. Requires a running tokio runtime.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
