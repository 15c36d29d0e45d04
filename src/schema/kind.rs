/// Column type as understood by the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    Binary,
}

impl Kind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Bool,
            Self::Int8,
            Self::Int16,
            Self::Int32,
            Self::Int64,
            Self::Float,
            Self::Double,
            Self::String,
            Self::Binary,
        ]
    }
    /// Whether rows can be range-partitioned on a column of this kind.
    /// Booleans and floating point columns cannot back a key.
    pub const fn orderable(&self) -> bool {
        !matches!(self, Self::Bool | Self::Float | Self::Double)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::String => write!(f, "string"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

impl crate::Arbitrary for Kind {
    fn random() -> Self {
        let kinds = Self::all();
        kinds[rand::random_range(0..kinds.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_exclude_unordered_kinds() {
        let unordered = Kind::all()
            .iter()
            .filter(|k| !k.orderable())
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(unordered, vec![Kind::Bool, Kind::Float, Kind::Double]);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Kind::Int32).unwrap();
        assert_eq!(json, "\"int32\"");
        assert_eq!(serde_json::from_str::<Kind>("\"string\"").unwrap(), Kind::String);
    }
}
