use super::*;
use crate::catalog::*;
use crate::schema::*;
use tokio_postgres::Client;
use tokio_postgres::types::ToSql;

#[async_trait::async_trait]
impl Catalog for Client {
    async fn exists(&self, name: &str) -> crate::Result<bool> {
        self.query_opt(EXISTS, &[&name])
            .await
            .map(|row| row.is_some())
            .map_err(|e| crate::Error::Connection(e.to_string()))
    }
    async fn describe(&self, name: &str) -> crate::Result<Option<Shape>> {
        let columns = self
            .query(COLUMNS, &[&name])
            .await
            .map_err(|e| crate::Error::Connection(e.to_string()))?;
        if columns.is_empty() {
            return Ok(None);
        }
        let schema = match described(name, &columns) {
            Ok(schema) => schema,
            Err(reason) => return Ok(Some(Shape::Foreign(reason))),
        };
        let comment = self
            .query_one(COMMENT, &[&ident(name)])
            .await
            .map_err(|e| crate::Error::Connection(e.to_string()))?
            .get::<_, Option<String>>(0);
        Ok(Some(match comment {
            None => Shape::Foreign(format!("table {} carries no partitioning metadata", name)),
            Some(comment) => match serde_json::from_str::<Declaration>(&comment)
                .map_err(crate::Error::from)
                .and_then(|declaration| declaration.options(&schema))
            {
                Ok(options) => Shape::Declared(schema, options),
                Err(e) => Shape::Foreign(format!("unreadable metadata on {}: {}", name, e)),
            },
        }))
    }
    async fn delete(&self, name: &str) -> crate::Result<()> {
        self.batch_execute(&drops(name))
            .await
            .map_err(|e| fault(e, |reason| crate::Error::drop(name, reason)))
    }
    async fn create(
        &self,
        name: &str,
        schema: &TableSchema,
        options: &TableOptions,
    ) -> crate::Result<()> {
        self.batch_execute(&creates(name, schema, options)?)
            .await
            .map_err(|e| fault(e, |reason| crate::Error::create(name, reason)))
    }
}

#[async_trait::async_trait]
impl Writer for Client {
    async fn insert(&self, table: &TableHandle, row: &Row) -> crate::Result<()> {
        let params = row
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();
        self.execute(&inserts(table), &params)
            .await
            .map(|_| ())
            .map_err(|e| fault(e, |reason| crate::Error::write(table.name(), reason)))
    }
}

#[async_trait::async_trait]
impl Scanner for Client {
    async fn scan(&self, name: &str) -> crate::Result<RecordSet> {
        match self.describe(name).await? {
            None => Err(crate::Error::read(name, "table not found")),
            Some(Shape::Declared(schema, options)) => {
                let mut partitions = Vec::with_capacity(options.partitions());
                for i in 0..options.partitions() {
                    let sql = selects(name, i, &schema, &options);
                    partitions.push(rows(self, name, &sql, &schema).await?);
                }
                Ok(RecordSet::new(schema, partitions))
            }
            Some(Shape::Foreign(reason)) => {
                let columns = self
                    .query(COLUMNS, &[&name])
                    .await
                    .map_err(|e| fault(e, |reason| crate::Error::read(name, reason)))?;
                let schema = described(name, &columns)
                    .map_err(|_| crate::Error::read(name, reason))?;
                let sql = format!(
                    "SELECT {} FROM {}",
                    schema.names().map(ident).collect::<Vec<_>>().join(", "),
                    ident(name)
                );
                let rows = rows(self, name, &sql, &schema).await?;
                Ok(RecordSet::new(schema, vec![rows]))
            }
        }
    }
}

/// Runs a query and decodes every returned row against `schema`.
async fn rows(
    client: &Client,
    name: &str,
    sql: &str,
    schema: &TableSchema,
) -> crate::Result<Vec<Row>> {
    client
        .query(sql, &[])
        .await
        .map_err(|e| fault(e, |reason| crate::Error::read(name, reason)))?
        .iter()
        .map(|row| {
            schema
                .fields()
                .iter()
                .enumerate()
                .map(|(j, field)| super::value::decode(row, j, field.kind()))
                .collect::<Result<Row, PgErr>>()
        })
        .collect::<Result<Vec<Row>, PgErr>>()
        .map_err(|e| crate::Error::read(name, e))
}

/// Schema of described columns, or why they do not form one.
fn described(name: &str, columns: &[tokio_postgres::Row]) -> Result<TableSchema, String> {
    columns
        .iter()
        .map(|row| {
            let column = row.get::<_, String>(0);
            let udt = row.get::<_, String>(1);
            let nullable = row.get::<_, String>(2) == "YES";
            kind(&udt)
                .map(|kind| FieldDescriptor::new(column.as_str(), kind, nullable))
                .ok_or_else(|| format!("column {}.{} has unsupported type {}", name, column, udt))
        })
        .collect::<Result<Vec<FieldDescriptor>, String>>()
        .and_then(|fields| TableSchema::try_from(fields).map_err(|e| e.to_string()))
}
