use crate::schema::*;

/// A typed value object stored as one table row.
///
/// Field order and kinds of [`Record::row`] must match [`Record::schema`].
pub trait Record: Sized + Send + Sync + Clone + 'static {
    /// Field list and partition key of the backing table.
    fn schema() -> SchemaBuilder;
    /// Flattens this record into schema-ordered cells.
    fn row(&self) -> Row;
    /// Rebuilds a record from schema-ordered cells.
    fn from_row(row: Row) -> crate::Result<Self>;
}

/// Customer record loaded by the demo workflow.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Customer {
    name: String,
    age: i32,
    city: String,
}

impl Customer {
    pub fn new(name: &str, age: i32, city: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            city: city.to_string(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn age(&self) -> i32 {
        self.age
    }
    pub fn city(&self) -> &str {
        &self.city
    }
    /// The three customers the demo inserts.
    pub fn samples() -> Vec<Self> {
        vec![
            Self::new("jane", 30, "new york"),
            Self::new("jordan", 18, "toronto"),
            Self::new("gil", 48, "london"),
        ]
    }
}

impl Record for Customer {
    fn schema() -> SchemaBuilder {
        SchemaBuilder::new()
            .field("name", Kind::String, false)
            .field("age", Kind::Int32, false)
            .field("city", Kind::String, false)
            .key(["name"])
    }
    fn row(&self) -> Row {
        vec![
            Value::from(self.name.as_str()),
            Value::from(self.age),
            Value::from(self.city.as_str()),
        ]
    }
    fn from_row(row: Row) -> crate::Result<Self> {
        match <[Value; 3]>::try_from(row) {
            Ok([Value::String(name), Value::Int32(age), Value::String(city)]) => {
                Ok(Self { name, age, city })
            }
            Ok(cells) => Err(crate::Error::schema(format!(
                "customer row has unexpected cells ({}, {}, {})",
                cells[0], cells[1], cells[2]
            ))),
            Err(row) => Err(crate::Error::schema(format!(
                "customer row has {} cells, expected 3",
                row.len()
            ))),
        }
    }
}

impl crate::Arbitrary for Customer {
    fn random() -> Self {
        const CITIES: [&str; 4] = ["new york", "toronto", "london", "lagos"];
        Self {
            name: format!("customer-{:08x}", rand::random::<u32>()),
            age: rand::random_range(0..100),
            city: CITIES[rand::random_range(0..CITIES.len())].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_schema_is_valid() {
        let (schema, key) = Customer::schema().build().unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["name", "age", "city"]);
        assert!(schema.fields().iter().all(|f| !f.nullable()));
        assert_eq!(key.columns(), &["name".to_string()]);
    }

    #[test]
    fn rows_conform_to_schema() {
        let (schema, _) = Customer::schema().build().unwrap();
        for customer in Customer::samples() {
            assert!(schema.check(&customer.row()).is_ok());
            assert_eq!(Customer::from_row(customer.row()).unwrap(), customer);
        }
    }

    #[test]
    fn from_row_rejects_mismatched_cells() {
        assert!(Customer::from_row(vec![Value::from("jane")]).is_err());
        assert!(Customer::from_row(vec![Value::from("jane"), Value::from("30"), Value::from("x")]).is_err());
    }
}
