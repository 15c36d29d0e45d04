use super::*;
use crate::Arbitrary;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FieldDescriptor {
    name: String,
    kind: Kind,
    nullable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: Kind, nullable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            nullable,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn nullable(&self) -> bool {
        self.nullable
    }
    /// Checks a cell against this field's kind and nullability.
    pub fn admits(&self, value: &Value) -> std::result::Result<(), String> {
        match value.kind() {
            None if self.nullable => Ok(()),
            None => Err(format!("null in non-nullable column {}", self.name)),
            Some(kind) if kind == self.kind => Ok(()),
            Some(kind) => Err(format!(
                "column {} expects {}, got {}",
                self.name, self.kind, kind
            )),
        }
    }
}

impl std::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let null = if self.nullable { "" } else { " not null" };
        write!(f, "{}: {}{}", self.name, self.kind, null)
    }
}

impl crate::Arbitrary for FieldDescriptor {
    fn random() -> Self {
        let name = format!("c{:08x}", rand::random::<u32>());
        Self::new(name, Kind::random(), rand::random::<bool>())
    }
}
