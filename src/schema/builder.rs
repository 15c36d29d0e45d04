use super::*;

/// Collects a field list and a key, then validates both at once.
///
/// ```
/// use rangetable::schema::*;
/// let (schema, key) = SchemaBuilder::new()
///     .field("name", Kind::String, false)
///     .field("age", Kind::Int32, false)
///     .key(["name"])
///     .build()
///     .unwrap();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(key.columns(), &["name".to_string()]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SchemaBuilder {
    fields: Vec<FieldDescriptor>,
    key: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn field(mut self, name: impl Into<String>, kind: Kind, nullable: bool) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind, nullable));
        self
    }
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }
    pub fn key<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.key = columns.into_iter().map(Into::into).collect();
        self
    }
    pub fn build(self) -> crate::Result<(TableSchema, PartitionKey)> {
        let schema = TableSchema::try_from(self.fields)?;
        let key = PartitionKey::new(&schema, self.key)?;
        Ok((schema, key))
    }
}
