use crate::catalog::TableHandle;
use crate::schema::*;
use const_format::concatcp;

/// Whether a table is visible in the current schema.
#[rustfmt::skip]
pub const EXISTS: &str = concatcp!(
    "SELECT 1 ",
    "FROM   information_schema.tables ",
    "WHERE  table_schema = current_schema() ",
    "AND    table_name   = $1"
);

/// Columns of a table in declaration order.
#[rustfmt::skip]
pub const COLUMNS: &str = concatcp!(
    "SELECT   column_name, ",
             "udt_name, ",
             "is_nullable ",
    "FROM     information_schema.columns ",
    "WHERE    table_schema = current_schema() ",
    "AND      table_name   = $1 ",
    "ORDER BY ordinal_position"
);

/// Declaration metadata attached to a table.
#[rustfmt::skip]
pub const COMMENT: &str = concatcp!(
    "SELECT obj_description(to_regclass($1), 'pg_class')"
);

/// Partitioning metadata that PostgreSQL cannot express natively.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    replicas: u32,
    key: Vec<String>,
    splits: Vec<Vec<Value>>,
}

impl From<&TableOptions> for Declaration {
    fn from(options: &TableOptions) -> Self {
        Self {
            replicas: options.replication_factor(),
            key: options.partition_key().columns().to_vec(),
            splits: options.range_splits().to_vec(),
        }
    }
}

impl Declaration {
    /// Rebuilds validated options against a described schema.
    pub fn options(self, schema: &TableSchema) -> crate::Result<TableOptions> {
        let key = PartitionKey::new(schema, self.key)?;
        self.splits
            .into_iter()
            .try_fold(TableOptions::new(self.replicas, key)?, |o, split| {
                o.split(schema, split)
            })
    }
}

/// Column type for each field kind.
pub fn sql(kind: Kind) -> &'static str {
    match kind {
        Kind::Bool => "BOOLEAN",
        Kind::Int8 => "\"char\"",
        Kind::Int16 => "SMALLINT",
        Kind::Int32 => "INTEGER",
        Kind::Int64 => "BIGINT",
        Kind::Float => "REAL",
        Kind::Double => "DOUBLE PRECISION",
        Kind::String => "TEXT",
        Kind::Binary => "BYTEA",
    }
}

/// Field kind for a described `udt_name`.
pub fn kind(udt: &str) -> Option<Kind> {
    match udt {
        "bool" => Some(Kind::Bool),
        "char" => Some(Kind::Int8),
        "int2" => Some(Kind::Int16),
        "int4" => Some(Kind::Int32),
        "int8" => Some(Kind::Int64),
        "float4" => Some(Kind::Float),
        "float8" => Some(Kind::Double),
        "text" => Some(Kind::String),
        "bytea" => Some(Kind::Binary),
        _ => None,
    }
}

/// Quotes an identifier.
pub fn ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a string literal.
pub fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Renders a key value as a partition bound expression.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Int8(v) => format!("CAST({} AS \"char\")", v),
        Value::Int16(v) => v.to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::String(v) => quote(v),
        Value::Binary(v) => format!(
            "'\\x{}'::bytea",
            v.iter().map(|b| format!("{:02x}", b)).collect::<String>()
        ),
    }
}

/// Name of the `i`th range partition of a table.
pub fn partition(table: &str, i: usize) -> String {
    format!("{}_p{}", table, i)
}

/// `CREATE TABLE` for the parent, one `PARTITION OF` per range, and the
/// declaration comment. Runs as a single batch.
pub fn creates(name: &str, schema: &TableSchema, options: &TableOptions) -> crate::Result<String> {
    let key = options
        .partition_key()
        .columns()
        .iter()
        .map(|c| ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let columns = schema
        .fields()
        .iter()
        .map(|f| {
            let null = if f.nullable() { "" } else { " NOT NULL" };
            format!("    {} {}{}", ident(f.name()), sql(f.kind()), null)
        })
        .chain(std::iter::once(format!("    PRIMARY KEY ({})", key)))
        .collect::<Vec<_>>()
        .join(",\n");
    let arity = options.partition_key().len();
    let lower = std::iter::once(vec!["MINVALUE".to_string(); arity])
        .chain(options.range_splits().iter().map(|s| s.iter().map(literal).collect()));
    let upper = options
        .range_splits()
        .iter()
        .map(|s| s.iter().map(literal).collect())
        .chain(std::iter::once(vec!["MAXVALUE".to_string(); arity]));
    let partitions = lower
        .zip(upper)
        .enumerate()
        .map(|(i, (lo, hi)): (usize, (Vec<String>, Vec<String>))| {
            format!(
                "CREATE TABLE {} PARTITION OF {} FOR VALUES FROM ({}) TO ({});",
                ident(&partition(name, i)),
                ident(name),
                lo.join(", "),
                hi.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let declaration = serde_json::to_string(&Declaration::from(options))?;
    Ok(format!(
        "CREATE TABLE {t} (\n{columns}\n) PARTITION BY RANGE ({key});\n{partitions}\nCOMMENT ON TABLE {t} IS {comment};",
        t = ident(name),
        columns = columns,
        key = key,
        partitions = partitions,
        comment = quote(&declaration),
    ))
}

/// `DROP TABLE`, which takes every partition with it.
pub fn drops(name: &str) -> String {
    format!("DROP TABLE {}", ident(name))
}

/// Parameterized single-row `INSERT`.
pub fn inserts(table: &TableHandle) -> String {
    let fields = table.schema().fields();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        ident(table.name()),
        fields
            .iter()
            .map(|f| ident(f.name()))
            .collect::<Vec<_>>()
            .join(", "),
        (1..=fields.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Full scan of one range partition in key order.
pub fn selects(name: &str, i: usize, schema: &TableSchema, options: &TableOptions) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        schema.names().map(ident).collect::<Vec<_>>().join(", "),
        ident(&partition(name, i)),
        options
            .partition_key()
            .columns()
            .iter()
            .map(|c| ident(c))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
