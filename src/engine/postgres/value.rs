use crate::schema::*;
use bytes::BytesMut;
use tokio_postgres::types::IsNull;
use tokio_postgres::types::ToSql;
use tokio_postgres::types::Type;
use tokio_postgres::types::to_sql_checked;

type Fault = Box<dyn std::error::Error + Sync + Send>;

/// Each variant defers to the driver's encoding for its native type, which
/// still checks the column type it is bound to.
impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Fault> {
        match self {
            Self::Null => Ok(IsNull::Yes),
            Self::Bool(v) => v.to_sql_checked(ty, out),
            Self::Int8(v) => v.to_sql_checked(ty, out),
            Self::Int16(v) => v.to_sql_checked(ty, out),
            Self::Int32(v) => v.to_sql_checked(ty, out),
            Self::Int64(v) => v.to_sql_checked(ty, out),
            Self::Float(v) => v.to_sql_checked(ty, out),
            Self::Double(v) => v.to_sql_checked(ty, out),
            Self::String(v) => v.to_sql_checked(ty, out),
            Self::Binary(v) => v.to_sql_checked(ty, out),
        }
    }
    fn accepts(_: &Type) -> bool {
        true
    }
    to_sql_checked!();
}

/// Reads column `i` of a driver row as a cell of the given kind.
pub fn decode(row: &tokio_postgres::Row, i: usize, kind: Kind) -> Result<Value, super::PgErr> {
    Ok(match kind {
        Kind::Bool => row.try_get::<_, Option<bool>>(i)?.into(),
        Kind::Int8 => row.try_get::<_, Option<i8>>(i)?.into(),
        Kind::Int16 => row.try_get::<_, Option<i16>>(i)?.into(),
        Kind::Int32 => row.try_get::<_, Option<i32>>(i)?.into(),
        Kind::Int64 => row.try_get::<_, Option<i64>>(i)?.into(),
        Kind::Float => row.try_get::<_, Option<f32>>(i)?.into(),
        Kind::Double => row.try_get::<_, Option<f64>>(i)?.into(),
        Kind::String => row.try_get::<_, Option<String>>(i)?.into(),
        Kind::Binary => row.try_get::<_, Option<Vec<u8>>>(i)?.into(),
    })
}
