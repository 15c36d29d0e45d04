use crate::schema::*;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;

/// Postgres signature header + 8 null bytes for flags and extension.
/// https://www.postgresql.org/docs/current/sql-copy.html
pub const HEADER: &[u8] = b"PGCOPY\n\xFF\r\n\0\0\0\0\0\0\0\0\0";
/// Postgres signature footer to signal end of binary file.
pub const FOOTER: u16 = 0xFFFF;

fn invalid(reason: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, reason)
}

/// Writes rows as one binary COPY stream.
pub fn write<W: Write>(writer: &mut W, rows: &[Row]) -> std::io::Result<()> {
    writer.write_all(HEADER)?;
    for row in rows {
        let arity = u16::try_from(row.len())
            .map_err(|_| invalid(format!("row has {} cells", row.len())))?;
        writer.write_u16::<BE>(arity)?;
        for value in row {
            field(writer, value)?;
        }
    }
    writer.write_u16::<BE>(FOOTER)?;
    Ok(())
}

fn field<W: Write>(writer: &mut W, value: &Value) -> std::io::Result<()> {
    match value {
        Value::Null => writer.write_i32::<BE>(-1),
        Value::Bool(v) => {
            writer.write_i32::<BE>(1)?;
            writer.write_u8(*v as u8)
        }
        Value::Int8(v) => {
            writer.write_i32::<BE>(1)?;
            writer.write_i8(*v)
        }
        Value::Int16(v) => {
            writer.write_i32::<BE>(2)?;
            writer.write_i16::<BE>(*v)
        }
        Value::Int32(v) => {
            writer.write_i32::<BE>(4)?;
            writer.write_i32::<BE>(*v)
        }
        Value::Int64(v) => {
            writer.write_i32::<BE>(8)?;
            writer.write_i64::<BE>(*v)
        }
        Value::Float(v) => {
            writer.write_i32::<BE>(4)?;
            writer.write_f32::<BE>(*v)
        }
        Value::Double(v) => {
            writer.write_i32::<BE>(8)?;
            writer.write_f64::<BE>(*v)
        }
        Value::String(v) => bytes(writer, v.as_bytes()),
        Value::Binary(v) => bytes(writer, v),
    }
}

fn bytes<W: Write>(writer: &mut W, data: &[u8]) -> std::io::Result<()> {
    let len = i32::try_from(data.len())
        .map_err(|_| invalid(format!("field of {} bytes", data.len())))?;
    writer.write_i32::<BE>(len)?;
    writer.write_all(data)
}

/// Reads a binary COPY stream written for `schema`.
pub fn read<R: Read>(reader: &mut R, schema: &TableSchema) -> std::io::Result<Vec<Row>> {
    let ref mut header = [0u8; 19];
    reader.read_exact(header)?;
    if header[..] != *HEADER {
        return Err(invalid("missing binary copy signature".to_string()));
    }
    let mut rows = Vec::new();
    loop {
        match reader.read_u16::<BE>()? {
            FOOTER => break,
            arity if arity as usize == schema.len() => rows.push(
                schema
                    .fields()
                    .iter()
                    .map(|f| cell(reader, f.kind()))
                    .collect::<std::io::Result<Row>>()?,
            ),
            arity => {
                return Err(invalid(format!(
                    "tuple has {} fields, schema has {}",
                    arity,
                    schema.len()
                )));
            }
        }
    }
    Ok(rows)
}

fn cell<R: Read>(reader: &mut R, kind: Kind) -> std::io::Result<Value> {
    let len = reader.read_i32::<BE>()?;
    if len == -1 {
        return Ok(Value::Null);
    }
    let expect = |n: i32| match len == n {
        true => Ok(()),
        false => Err(invalid(format!("{} field of {} bytes", kind, len))),
    };
    Ok(match kind {
        Kind::Bool => {
            expect(1)?;
            Value::Bool(reader.read_u8()? != 0)
        }
        Kind::Int8 => {
            expect(1)?;
            Value::Int8(reader.read_i8()?)
        }
        Kind::Int16 => {
            expect(2)?;
            Value::Int16(reader.read_i16::<BE>()?)
        }
        Kind::Int32 => {
            expect(4)?;
            Value::Int32(reader.read_i32::<BE>()?)
        }
        Kind::Int64 => {
            expect(8)?;
            Value::Int64(reader.read_i64::<BE>()?)
        }
        Kind::Float => {
            expect(4)?;
            Value::Float(reader.read_f32::<BE>()?)
        }
        Kind::Double => {
            expect(8)?;
            Value::Double(reader.read_f64::<BE>()?)
        }
        Kind::String => Value::String(
            String::from_utf8(data(reader, len)?).map_err(|e| invalid(e.to_string()))?,
        ),
        Kind::Binary => Value::Binary(data(reader, len)?),
    })
}

fn data<R: Read>(reader: &mut R, len: i32) -> std::io::Result<Vec<u8>> {
    let len = usize::try_from(len).map_err(|_| invalid(format!("negative length {}", len)))?;
    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_nineteen_bytes() {
        assert_eq!(HEADER.len(), 19);
    }

    #[test]
    fn layout_matches_copy_binary_format() {
        let ref mut out = Vec::new();
        write(out, &[vec![Value::from("gil"), Value::from(48)]]).unwrap();
        let mut expected = HEADER.to_vec();
        expected.extend_from_slice(&2u16.to_be_bytes());
        expected.extend_from_slice(&3i32.to_be_bytes());
        expected.extend_from_slice(b"gil");
        expected.extend_from_slice(&4i32.to_be_bytes());
        expected.extend_from_slice(&48i32.to_be_bytes());
        expected.extend_from_slice(&0xFFFFu16.to_be_bytes());
        assert_eq!(*out, expected);
    }

    #[test]
    fn every_kind_and_null_survive() {
        let schema = TableSchema::try_from(
            Kind::all()
                .iter()
                .enumerate()
                .map(|(i, k)| FieldDescriptor::new(format!("c{}", i), *k, true))
                .collect::<Vec<_>>(),
        )
        .unwrap();
        let full = vec![
            Value::from(true),
            Value::from(-3i8),
            Value::from(300i16),
            Value::from(-70000i32),
            Value::from(1i64 << 40),
            Value::from(1.5f32),
            Value::from(-2.25f64),
            Value::from("new york"),
            Value::from(vec![0u8, 255, 7]),
        ];
        let empty = vec![Value::Null; Kind::all().len()];
        let rows = vec![full, empty];
        let ref mut out = Vec::new();
        write(out, &rows).unwrap();
        assert_eq!(read(&mut out.as_slice(), &schema).unwrap(), rows);
    }

    #[test]
    fn rejects_foreign_bytes() {
        let schema = TableSchema::try_from(vec![FieldDescriptor::new("a", Kind::Int32, false)]).unwrap();
        assert!(read(&mut &b"not a copy stream at all"[..], &schema).is_err());
        let ref mut out = Vec::new();
        write(out, &[vec![Value::from(1), Value::from(2)]]).unwrap();
        assert!(read(&mut out.as_slice(), &schema).is_err());
    }
}
