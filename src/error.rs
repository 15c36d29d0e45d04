/// Failures surfaced by the table lifecycle and the bulk pipeline.
///
/// The workflow is fail-stop: every variant aborts the remaining steps and
/// nothing already done remotely is rolled back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The cluster or its master could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),
    /// Invalid field or partition-key declaration.
    #[error("invalid schema: {0}")]
    Schema(String),
    /// The engine refused to drop a table.
    #[error("drop table ({table}) failed: {reason}")]
    Drop { table: String, reason: String },
    /// The engine refused to create a table.
    #[error("create table ({table}) failed: {reason}")]
    Create { table: String, reason: String },
    /// A row was rejected by the engine.
    #[error("insert into ({table}) failed: {reason}")]
    Write { table: String, reason: String },
    /// The scan failed or the scanned rows could not be decoded.
    #[error("read from ({table}) failed: {reason}")]
    Read { table: String, reason: String },
    #[error("sink i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink metadata: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn schema(reason: impl std::fmt::Display) -> Self {
        Self::Schema(reason.to_string())
    }
    pub fn drop(table: &str, reason: impl std::fmt::Display) -> Self {
        Self::Drop {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
    pub fn create(table: &str, reason: impl std::fmt::Display) -> Self {
        Self::Create {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
    pub fn write(table: &str, reason: impl std::fmt::Display) -> Self {
        Self::Write {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
    pub fn read(table: &str, reason: impl std::fmt::Display) -> Self {
        Self::Read {
            table: table.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
