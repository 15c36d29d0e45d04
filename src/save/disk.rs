use super::pgcopy;
use crate::catalog::RecordSet;
use crate::schema::TableSchema;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Schema of the persisted set, as JSON.
#[rustfmt::skip]
pub const SCHEMA_FILE: &str = "_schema.json";
/// Marker written after every other file in the sink.
#[rustfmt::skip]
pub const SUCCESS:     &str = "_SUCCESS";

/// File name of the `i`th partition in a sink.
pub fn part(i: usize) -> String {
    format!("part-{:05}.pgcopy", i)
}

fn is_part(name: &str) -> bool {
    name.strip_prefix("part-")
        .and_then(|n| n.strip_suffix(".pgcopy"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// What [`persist`] does when the sink path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Refuse any existing path.
    #[default]
    ErrorIfExists,
    /// Replace the files of a previous sink. Anything else in the directory
    /// is kept, and a directory that does not hold a sink is refused.
    Overwrite,
}

impl std::str::FromStr for SaveMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error_if_exists" | "error-if-exists" => Ok(Self::ErrorIfExists),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(format!("unknown save mode: {}", s)),
        }
    }
}

fn exists(sink: &Path, reason: &str) -> crate::Error {
    std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        format!("{} {}", sink.display(), reason),
    )
    .into()
}

/// Removes the files a previous [`persist`] left in `sink`, marker first.
fn clear(sink: &Path) -> crate::Result<()> {
    let names = std::fs::read_dir(sink)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<String>>>()?;
    if !names.is_empty() && !names.iter().any(|n| n == SUCCESS || n == SCHEMA_FILE) {
        return Err(exists(sink, "exists and does not hold a sink"));
    }
    log::debug!("overwriting sink {}", sink.display());
    let sink_files = std::iter::once(SUCCESS.to_string())
        .chain(names.into_iter().filter(|n| is_part(n)))
        .chain(std::iter::once(SCHEMA_FILE.to_string()));
    for name in sink_files {
        match std::fs::remove_file(sink.join(&name)) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            other => other?,
        }
    }
    Ok(())
}

/// Writes a record set to the `sink` directory.
///
/// One binary COPY file per partition, the schema as JSON, then an empty
/// `_SUCCESS` marker. A sink without the marker was not fully written. An
/// existing path is handled according to `mode`.
pub fn persist(set: &RecordSet, sink: impl AsRef<Path>, mode: SaveMode) -> crate::Result<()> {
    let sink = sink.as_ref();
    match (sink.exists(), mode) {
        (false, _) => std::fs::create_dir_all(sink)?,
        (true, SaveMode::ErrorIfExists) => return Err(exists(sink, "already exists")),
        (true, SaveMode::Overwrite) if !sink.is_dir() => {
            return Err(exists(sink, "exists and is not a directory"));
        }
        (true, SaveMode::Overwrite) => clear(sink)?,
    }
    let ref mut schema = BufWriter::new(File::create(sink.join(SCHEMA_FILE))?);
    serde_json::to_writer_pretty(&mut *schema, set.schema())?;
    schema.flush()?;
    for (i, rows) in set.partitions().iter().enumerate() {
        let ref mut file = BufWriter::new(File::create(sink.join(part(i)))?);
        pgcopy::write(file, rows)?;
        file.flush()?;
        log::debug!("wrote {} rows to {}", rows.len(), part(i));
    }
    File::create(sink.join(SUCCESS))?;
    log::info!("persisted {} rows to {}", set.len(), sink.display());
    Ok(())
}

/// Reads back a record set written by [`persist`].
pub fn load(sink: impl AsRef<Path>) -> crate::Result<RecordSet> {
    let sink = sink.as_ref();
    if !sink.join(SUCCESS).exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no {} marker", sink.display(), SUCCESS),
        )
        .into());
    }
    let schema: TableSchema =
        serde_json::from_reader(BufReader::new(File::open(sink.join(SCHEMA_FILE))?))?;
    let partitions = (0..)
        .map(|i| sink.join(part(i)))
        .take_while(|path| path.exists())
        .map(|path: PathBuf| -> crate::Result<_> {
            let ref mut file = BufReader::new(File::open(path)?);
            Ok(pgcopy::read(file, &schema)?)
        })
        .collect::<crate::Result<Vec<_>>>()?;
    Ok(RecordSet::new(schema, partitions))
}

impl RecordSet {
    /// Persists this set to `sink`. See [`persist`].
    pub fn save(&self, sink: impl AsRef<Path>, mode: SaveMode) -> crate::Result<()> {
        persist(self, sink, mode)
    }
}
