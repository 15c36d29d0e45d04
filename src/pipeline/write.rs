use super::*;
use crate::catalog::*;
use crate::record::Record;
use std::sync::Arc;
use std::time::Duration;

/// What a bulk insert does when the engine rejects a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnRecordError {
    /// Abort the whole call with the first rejection.
    #[default]
    FailFast,
    /// Keep inserting and list every rejection in the report.
    SkipAndReport,
}

impl std::str::FromStr for OnRecordError {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail_fast" | "fail-fast" => Ok(Self::FailFast),
            "skip_and_report" | "skip-and-report" => Ok(Self::SkipAndReport),
            _ => Err(format!("unknown record error policy: {}", s)),
        }
    }
}

/// A row the engine refused, by position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub index: usize,
    pub reason: String,
}

/// Outcome of a bulk insert.
///
/// Every row counted here was acknowledged by the engine before the call
/// returned.
#[derive(Debug, Clone)]
pub struct WriteReport {
    pub inserted: usize,
    pub rejected: Vec<Rejected>,
    pub elapsed: Duration,
}

/// Inserts every record into `table` using one worker per CPU.
pub async fn insert_all<W, R>(
    writer: Arc<W>,
    records: &[R],
    table: &TableHandle,
    policy: OnRecordError,
) -> crate::Result<WriteReport>
where
    W: Writer,
    R: Record,
{
    Pool::new(writer).insert_all(records, table, policy).await
}
