use std::path::Path;
use std::sync::Arc;

use arrow_array::builder::{
    Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder, StringBuilder,
};
use arrow_array::{Array, ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use diagnostics::debug;

use crate::dtype::TypedSchema;
use crate::error::{FlatfileError, Result};

/// A field holding this literal token is missing, for all column types.
pub const MISSING_SENTINEL: &str = ".";

/// Character encoding of the flat file. The archives predate UTF-8;
/// Latin-1 is the convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Latin1,
    Utf8,
}

impl Encoding {
    fn decode_line(&self, bytes: &[u8]) -> String {
        match self {
            // Latin-1 bytes map 1:1 onto Unicode scalar values
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Decode a fixed-width flat file into a typed record batch.
///
/// Floating-point columns are read as text first - the source encodes
/// decimals with a comma - then rewritten comma-to-period and parsed.
/// Every column name is lower-cased in the result. Widths pair with
/// schema entries positionally.
pub fn decode_flatfile<P: AsRef<Path>>(
    path: P,
    schema: &TypedSchema,
    widths: &[usize],
    encoding: Encoding,
) -> Result<RecordBatch> {
    let read_schema: TypedSchema = schema
        .iter()
        .map(|field| match field.data_type() {
            DataType::Float64 => Field::new(field.name(), DataType::Utf8, true),
            _ => field.clone(),
        })
        .collect();
    let raw = read_fwf(path, &read_schema, widths, encoding)?;

    let mut fields = Vec::with_capacity(schema.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.len());
    for (index, field) in schema.iter().enumerate() {
        let column = match field.data_type() {
            DataType::Float64 => rewrite_decimal_column(raw.column(index), field.name())?,
            _ => Arc::clone(raw.column(index)),
        };
        fields.push(Field::new(
            field.name().to_lowercase(),
            field.data_type().clone(),
            true,
        ));
        columns.push(column);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Low-level fixed-width reader: positional names, widths, and types.
/// Widths count characters in the decoded line, not bytes. Fields are
/// trimmed; an empty field or the missing sentinel is null.
pub fn read_fwf<P: AsRef<Path>>(
    path: P,
    schema: &TypedSchema,
    widths: &[usize],
    encoding: Encoding,
) -> Result<RecordBatch> {
    if schema.len() != widths.len() {
        return Err(FlatfileError::SchemaMismatch {
            names: schema.len(),
            widths: widths.len(),
        });
    }

    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let mut builders = schema
        .iter()
        .map(|field| ColumnBuilder::for_type(field.data_type()))
        .collect::<Result<Vec<_>>>()?;

    let mut rows = 0usize;
    for line in bytes.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let text = encoding.decode_line(line);
        let chars: Vec<char> = text.chars().collect();

        let mut start = 0usize;
        for ((builder, &width), field) in builders.iter_mut().zip(widths).zip(schema) {
            let value: String = if start < chars.len() {
                let end = (start + width).min(chars.len());
                chars[start..end].iter().collect()
            } else {
                String::new()
            };
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
                builder.append_null();
            } else {
                builder.append_value(trimmed, field.name(), rows)?;
            }
            start += width;
        }
        rows += 1;
    }
    debug!(
        "Read {rows} fixed-width rows from {path}",
        path: path.display().to_string()
    );

    let columns: Vec<ArrayRef> = builders.into_iter().map(ColumnBuilder::finish).collect();
    Ok(RecordBatch::try_new(
        Arc::new(Schema::new(schema.clone())),
        columns,
    )?)
}

/// Comma-decimal text column to nullable Float64.
fn rewrite_decimal_column(array: &ArrayRef, column: &str) -> Result<ArrayRef> {
    let strings = array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| FlatfileError::Decode {
            column: column.to_string(),
            row: 0,
            value: "expected a text column for decimal rewrite".to_string(),
        })?;

    let mut builder = Float64Builder::with_capacity(strings.len());
    for row in 0..strings.len() {
        if strings.is_null(row) {
            builder.append_null();
            continue;
        }
        let text = strings.value(row).replace(',', ".");
        let parsed = text.parse::<f64>().map_err(|_| FlatfileError::Decode {
            column: column.to_string(),
            row,
            value: strings.value(row).to_string(),
        })?;
        builder.append_value(parsed);
    }
    Ok(Arc::new(builder.finish()))
}

enum ColumnBuilder {
    Str(StringBuilder),
    I8(Int8Builder),
    I16(Int16Builder),
    I32(Int32Builder),
    I64(Int64Builder),
    F64(Float64Builder),
}

impl ColumnBuilder {
    fn for_type(datatype: &DataType) -> Result<Self> {
        match datatype {
            DataType::Utf8 => Ok(ColumnBuilder::Str(StringBuilder::new())),
            DataType::Int8 => Ok(ColumnBuilder::I8(Int8Builder::new())),
            DataType::Int16 => Ok(ColumnBuilder::I16(Int16Builder::new())),
            DataType::Int32 => Ok(ColumnBuilder::I32(Int32Builder::new())),
            DataType::Int64 => Ok(ColumnBuilder::I64(Int64Builder::new())),
            DataType::Float64 => Ok(ColumnBuilder::F64(Float64Builder::new())),
            other => Err(FlatfileError::UnsupportedType(other.to_string())),
        }
    }

    fn append_null(&mut self) {
        match self {
            ColumnBuilder::Str(b) => b.append_null(),
            ColumnBuilder::I8(b) => b.append_null(),
            ColumnBuilder::I16(b) => b.append_null(),
            ColumnBuilder::I32(b) => b.append_null(),
            ColumnBuilder::I64(b) => b.append_null(),
            ColumnBuilder::F64(b) => b.append_null(),
        }
    }

    fn append_value(&mut self, value: &str, column: &str, row: usize) -> Result<()> {
        let decode_error = || FlatfileError::Decode {
            column: column.to_string(),
            row,
            value: value.to_string(),
        };
        match self {
            ColumnBuilder::Str(b) => b.append_value(value),
            ColumnBuilder::I8(b) => b.append_value(value.parse().map_err(|_| decode_error())?),
            ColumnBuilder::I16(b) => b.append_value(value.parse().map_err(|_| decode_error())?),
            ColumnBuilder::I32(b) => b.append_value(value.parse().map_err(|_| decode_error())?),
            ColumnBuilder::I64(b) => b.append_value(value.parse().map_err(|_| decode_error())?),
            ColumnBuilder::F64(b) => b.append_value(value.parse().map_err(|_| decode_error())?),
        }
        Ok(())
    }

    fn finish(self) -> ArrayRef {
        match self {
            ColumnBuilder::Str(mut b) => Arc::new(b.finish()),
            ColumnBuilder::I8(mut b) => Arc::new(b.finish()),
            ColumnBuilder::I16(mut b) => Arc::new(b.finish()),
            ColumnBuilder::I32(mut b) => Arc::new(b.finish()),
            ColumnBuilder::I64(mut b) => Arc::new(b.finish()),
            ColumnBuilder::F64(mut b) => Arc::new(b.finish()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::map_types;
    use arrow_array::{Float64Array, Int16Array};
    use registry::ColumnDescriptor;
    use std::io::Write;

    fn descriptors() -> Vec<ColumnDescriptor> {
        [("NAVN", "Tekst", "10"), ("AAR", "Heltall", "5"), ("SNITT", "Desimaltall", "8")]
            .into_iter()
            .map(|(name, datatype, length)| ColumnDescriptor {
                name: name.to_string(),
                datatype: datatype.to_string(),
                length: length.to_string(),
            })
            .collect()
    }

    fn write_file(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g2022.dat");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_decode_comma_decimal_and_integer_width() {
        let schema = map_types(&descriptors()).unwrap();
        let (_dir, path) = write_file(b"ola nordma  123    3,14\nkari          7       .\n");

        let batch = decode_flatfile(&path, &schema, &[10, 5, 8], Encoding::Latin1).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(
            batch.schema().fields().iter().map(|f| f.name().clone()).collect::<Vec<_>>(),
            vec!["navn", "aar", "snitt"]
        );

        let aar = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int16Array>()
            .expect("Heltall length 5 decodes as Int16");
        assert_eq!(aar.value(0), 123);
        assert_eq!(aar.value(1), 7);

        let snitt = batch
            .column(2)
            .as_any()
            .downcast_ref::<Float64Array>()
            .expect("Desimaltall decodes as Float64");
        assert_eq!(snitt.value(0), 3.14);
        assert!(snitt.is_null(1), "the dot sentinel is missing data");
    }

    #[test]
    fn test_ragged_line_yields_nulls() {
        let schema = map_types(&descriptors()).unwrap();
        let (_dir, path) = write_file(b"per\n");

        let batch = decode_flatfile(&path, &schema, &[10, 5, 8], Encoding::Latin1).unwrap();
        assert_eq!(batch.num_rows(), 1);
        let navn = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(navn.value(0), "per");
        assert!(batch.column(1).is_null(0));
        assert!(batch.column(2).is_null(0));
    }

    #[test]
    fn test_latin1_text_round_trip() {
        let schema = map_types(&descriptors()).unwrap();
        // "bjørn" in Latin-1, 0xF8 for ø
        let (_dir, path) = write_file(b"bj\xF8rn        42    1,50\n");

        let batch = decode_flatfile(&path, &schema, &[10, 5, 8], Encoding::Latin1).unwrap();
        let navn = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(navn.value(0), "bjørn");
    }

    #[test]
    fn test_width_count_mismatch_is_fatal() {
        let schema = map_types(&descriptors()).unwrap();
        let (_dir, path) = write_file(b"x\n");

        let result = decode_flatfile(&path, &schema, &[10, 5], Encoding::Latin1);
        assert!(matches!(
            result,
            Err(FlatfileError::SchemaMismatch { names: 3, widths: 2 })
        ));
    }

    #[test]
    fn test_unparsable_integer_is_a_decode_error() {
        let schema = map_types(&descriptors()).unwrap();
        let (_dir, path) = write_file(b"ola nordma  abc    3,14\n");

        let result = decode_flatfile(&path, &schema, &[10, 5, 8], Encoding::Latin1);
        assert!(matches!(
            result,
            Err(FlatfileError::Decode { column, row: 0, .. }) if column == "AAR"
        ));
    }
}
