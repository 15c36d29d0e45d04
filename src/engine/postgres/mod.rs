//! PostgreSQL storage engine.
//!
//! Tables are declaratively range-partitioned on their key, one partition
//! per split range. PostgreSQL replicates whole clusters rather than tables,
//! so the declared replication factor travels as table metadata alongside
//! the key and the splits.
mod client;
mod ddl;
mod value;

pub use ddl::*;

use crate::catalog::Master;
use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection to the master endpoint.
///
/// Returns an `Arc<Client>` suitable for sharing across worker tasks.
pub async fn connect(master: &Master, user: &str, dbname: &str) -> crate::Result<Arc<Client>> {
    log::info!("connecting to database ({}/{})", master, dbname);
    let mut config = tokio_postgres::Config::new();
    config
        .host(master.host())
        .port(master.port())
        .user(user)
        .dbname(dbname);
    let (client, connection) = config
        .connect(tokio_postgres::tls::NoTls)
        .await
        .map_err(|e| crate::Error::Connection(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .map_err(|e| crate::Error::Connection(e.to_string()))?;
    Ok(Arc::new(client))
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Routes a driver error to the connection variant when the link is gone.
fn fault(e: PgErr, otherwise: impl FnOnce(String) -> crate::Error) -> crate::Error {
    match e.is_closed() {
        true => crate::Error::Connection(e.to_string()),
        false => otherwise(
            e.as_db_error()
                .map(|db| db.message().to_string())
                .unwrap_or_else(|| e.to_string()),
        ),
    }
}
