use super::*;
use std::collections::HashSet;

/// Ordered, non-empty list of uniquely named fields.
///
/// Field order is both display order and the order of cells in a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<FieldDescriptor>", into = "Vec<FieldDescriptor>")]
pub struct TableSchema {
    fields: Vec<FieldDescriptor>,
}

impl TableSchema {
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }
    /// Position of a field within every [`Row`] of this schema.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldDescriptor::name)
    }
    /// Checks arity, kinds and nullability of a row.
    pub fn check(&self, row: &Row) -> std::result::Result<(), String> {
        if row.len() != self.fields.len() {
            return Err(format!(
                "row has {} cells, schema has {} fields",
                row.len(),
                self.fields.len()
            ));
        }
        self.fields
            .iter()
            .zip(row.iter())
            .try_for_each(|(field, value)| field.admits(value))
    }
}

impl TryFrom<Vec<FieldDescriptor>> for TableSchema {
    type Error = crate::Error;
    fn try_from(fields: Vec<FieldDescriptor>) -> crate::Result<Self> {
        if fields.is_empty() {
            return Err(crate::Error::schema("table needs at least one field"));
        }
        let mut seen = HashSet::new();
        for field in fields.iter() {
            if field.name().is_empty() {
                return Err(crate::Error::schema("field names must be non-empty"));
            }
            if !seen.insert(field.name()) {
                return Err(crate::Error::schema(format!(
                    "duplicate field name {}",
                    field.name()
                )));
            }
        }
        Ok(Self { fields })
    }
}

impl From<TableSchema> for Vec<FieldDescriptor> {
    fn from(schema: TableSchema) -> Self {
        schema.fields
    }
}

impl std::fmt::Display for TableSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{}}}", fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> TableSchema {
        TableSchema::try_from(vec![
            FieldDescriptor::new("name", Kind::String, false),
            FieldDescriptor::new("age", Kind::Int32, false),
            FieldDescriptor::new("city", Kind::String, true),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_empty_schema() {
        assert!(matches!(
            TableSchema::try_from(vec![]),
            Err(crate::Error::Schema(_))
        ));
    }

    #[test]
    fn rejects_duplicate_names() {
        let fields = vec![
            FieldDescriptor::new("name", Kind::String, false),
            FieldDescriptor::new("name", Kind::Int32, false),
        ];
        assert!(matches!(
            TableSchema::try_from(fields),
            Err(crate::Error::Schema(_))
        ));
    }

    #[test]
    fn check_accepts_matching_row() {
        let row = vec![Value::from("jane"), Value::from(30), Value::Null];
        assert!(customer().check(&row).is_ok());
    }

    #[test]
    fn check_rejects_wrong_arity_kind_and_null() {
        let schema = customer();
        assert!(schema.check(&vec![Value::from("jane")]).is_err());
        assert!(schema
            .check(&vec![Value::from("jane"), Value::from("30"), Value::Null])
            .is_err());
        assert!(schema
            .check(&vec![Value::Null, Value::from(30), Value::Null])
            .is_err());
    }

    #[test]
    fn json_round_trip_revalidates() {
        let json = serde_json::to_string(&customer()).unwrap();
        assert_eq!(serde_json::from_str::<TableSchema>(&json).unwrap(), customer());
        let duplicated = r#"[{"name":"a","kind":"int8","nullable":false},{"name":"a","kind":"int8","nullable":true}]"#;
        assert!(serde_json::from_str::<TableSchema>(duplicated).is_err());
    }
}
