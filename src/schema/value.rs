use super::*;
use std::cmp::Ordering;

/// A single cell, dynamically typed by [`Kind`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    Binary(Vec<u8>),
}

/// An ordered row of cells, one per schema field.
pub type Row = Vec<Value>;

impl Value {
    /// Kind of a non-null value.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(Kind::Bool),
            Self::Int8(_) => Some(Kind::Int8),
            Self::Int16(_) => Some(Kind::Int16),
            Self::Int32(_) => Some(Kind::Int32),
            Self::Int64(_) => Some(Kind::Int64),
            Self::Float(_) => Some(Kind::Float),
            Self::Double(_) => Some(Kind::Double),
            Self::String(_) => Some(Kind::String),
            Self::Binary(_) => Some(Kind::Binary),
        }
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
    fn rank(&self) -> usize {
        self.kind().map(|k| k as usize + 1).unwrap_or(0)
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int8(a), Self::Int8(b)) => a.cmp(b),
            (Self::Int16(a), Self::Int16(b)) => a.cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.total_cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Binary(a), Self::Binary(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Value {}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Int8(v) => write!(f, "{}", v),
            Self::Int16(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Binary(v) => write!(f, "0x{}", v.iter().map(|b| format!("{:02x}", b)).collect::<String>()),
        }
    }
}

#[rustfmt::skip]
mod conversions {
    use super::*;
    impl From<bool>    for Value { fn from(v: bool)    -> Self { Self::Bool(v) } }
    impl From<i8>      for Value { fn from(v: i8)      -> Self { Self::Int8(v) } }
    impl From<i16>     for Value { fn from(v: i16)     -> Self { Self::Int16(v) } }
    impl From<i32>     for Value { fn from(v: i32)     -> Self { Self::Int32(v) } }
    impl From<i64>     for Value { fn from(v: i64)     -> Self { Self::Int64(v) } }
    impl From<f32>     for Value { fn from(v: f32)     -> Self { Self::Float(v) } }
    impl From<f64>     for Value { fn from(v: f64)     -> Self { Self::Double(v) } }
    impl From<String>  for Value { fn from(v: String)  -> Self { Self::String(v) } }
    impl From<&str>    for Value { fn from(v: &str)    -> Self { Self::String(v.to_string()) } }
    impl From<Vec<u8>> for Value { fn from(v: Vec<u8>) -> Self { Self::Binary(v) } }
    impl<T: Into<Value>> From<Option<T>> for Value {
        fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Self::Null) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sorts_first() {
        assert!(Value::Null < Value::from(i32::MIN));
        assert!(Value::Null < Value::from(""));
    }

    #[test]
    fn same_kind_orders_by_content() {
        assert!(Value::from("gil") < Value::from("jane"));
        assert!(Value::from(-1i64) < Value::from(0i64));
        assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(18)), Value::Int32(18));
    }
}
