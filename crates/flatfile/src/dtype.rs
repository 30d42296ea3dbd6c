use arrow_schema::{DataType, Field};
use registry::ColumnDescriptor;

use crate::error::{FlatfileError, Result};

/// Resolved target schema: one nullable field per column, preserving
/// the registry's declaration order.
pub type TypedSchema = Vec<Field>;

/// Map registry column declarations onto Arrow types.
///
/// The recognized set is closed: text, the three decimal category
/// labels, and integers with a width picked from the declared length.
/// Anything else (dates and times included) is a hard error rather
/// than a silent skip.
pub fn map_types(columns: &[ColumnDescriptor]) -> Result<TypedSchema> {
    columns
        .iter()
        .map(|column| {
            let datatype = match column.datatype.as_str() {
                "Tekst" => DataType::Utf8,
                "Desimaltall" | "Desim. (K)" | "Desim. (P)" => DataType::Float64,
                "Heltall" => int_width_for(declared_length(column)?)?,
                other => return Err(FlatfileError::UnsupportedType(other.to_string())),
            };
            Ok(Field::new(&column.name, datatype, true))
        })
        .collect()
}

/// Field widths for the decode step, parsed off the same declarations
/// and in the same order as [`map_types`].
pub fn declared_widths(columns: &[ColumnDescriptor]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|column| declared_length(column).map(|n| n as usize))
        .collect()
}

/// Pick the narrowest signed integer type whose decimal capacity
/// covers the declared digit count.
pub fn int_width_for(precision: u32) -> Result<DataType> {
    // (digit bound, type): a declared length below the bound fits
    let bands = [
        (3, DataType::Int8),
        (5, DataType::Int16),
        (10, DataType::Int32),
        (19, DataType::Int64),
    ];
    for (bound, datatype) in bands {
        if precision < bound {
            return Ok(datatype);
        }
    }
    Err(FlatfileError::PrecisionTooLarge(precision))
}

fn declared_length(column: &ColumnDescriptor) -> Result<u32> {
    column
        .length
        .trim()
        .parse()
        .map_err(|_| FlatfileError::BadLength {
            column: column.name.clone(),
            value: column.length.clone(),
        })
}
