use super::*;

/// Column(s) that determine physical placement and sort order of rows.
///
/// Always validated against a [`TableSchema`]: every column exists, is
/// non-nullable, is of an orderable [`Kind`] and appears once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey {
    columns: Vec<String>,
}

impl PartitionKey {
    pub fn new<S>(schema: &TableSchema, columns: impl IntoIterator<Item = S>) -> crate::Result<Self>
    where
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect::<Vec<String>>();
        if columns.is_empty() {
            return Err(crate::Error::schema("partition key needs at least one column"));
        }
        for (i, column) in columns.iter().enumerate() {
            let field = schema.field(column).ok_or_else(|| {
                crate::Error::schema(format!("key column {} is not in the schema", column))
            })?;
            if field.nullable() {
                return Err(crate::Error::schema(format!(
                    "key column {} must not be nullable",
                    column
                )));
            }
            if !field.kind().orderable() {
                return Err(crate::Error::schema(format!(
                    "key column {} has unorderable kind {}",
                    column,
                    field.kind()
                )));
            }
            if columns[..i].contains(column) {
                return Err(crate::Error::schema(format!(
                    "key column {} is listed twice",
                    column
                )));
            }
        }
        Ok(Self { columns })
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn len(&self) -> usize {
        self.columns.len()
    }
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
    /// Key fields in key order.
    pub fn fields<'a>(&'a self, schema: &'a TableSchema) -> Vec<&'a FieldDescriptor> {
        self.columns
            .iter()
            .filter_map(|c| schema.field(c))
            .collect()
    }
    /// Extracts the key tuple of a schema-conforming row.
    pub fn project(&self, schema: &TableSchema, row: &Row) -> Vec<Value> {
        self.columns
            .iter()
            .filter_map(|c| schema.index(c))
            .map(|i| row[i].clone())
            .collect()
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}]", self.columns.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::try_from(vec![
            FieldDescriptor::new("name", Kind::String, false),
            FieldDescriptor::new("age", Kind::Int32, false),
            FieldDescriptor::new("city", Kind::String, true),
            FieldDescriptor::new("score", Kind::Double, false),
        ])
        .unwrap()
    }

    #[test]
    fn accepts_non_nullable_columns() {
        let key = PartitionKey::new(&schema(), ["name", "age"]).unwrap();
        assert_eq!(key.columns(), &["name".to_string(), "age".to_string()]);
    }

    #[test]
    fn rejects_nullable_absent_unorderable_and_repeated() {
        let schema = schema();
        assert!(PartitionKey::new(&schema, ["city"]).is_err());
        assert!(PartitionKey::new(&schema, ["zip"]).is_err());
        assert!(PartitionKey::new(&schema, ["score"]).is_err());
        assert!(PartitionKey::new(&schema, ["name", "name"]).is_err());
        assert!(PartitionKey::new(&schema, Vec::<String>::new()).is_err());
    }

    #[test]
    fn project_follows_key_order() {
        let schema = schema();
        let key = PartitionKey::new(&schema, ["age", "name"]).unwrap();
        let row = vec![
            Value::from("jane"),
            Value::from(30),
            Value::Null,
            Value::from(0.5f64),
        ];
        assert_eq!(key.project(&schema, &row), vec![Value::from(30), Value::from("jane")]);
    }
}
