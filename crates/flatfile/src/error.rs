pub type Result<T> = std::result::Result<T, FlatfileError>;

/// Errors from type mapping and fixed-width decoding
#[derive(Debug, thiserror::Error)]
pub enum FlatfileError {
    /// Registry declared a datatype outside the recognized closed set.
    /// Temporal types are a known gap and land here too.
    #[error("Unsupported column datatype {0:?}, more dtypes (datetimes?) need programming")]
    UnsupportedType(String),

    /// Integer declared length exceeds the widest supported type
    #[error("Precision {0} is too large for the supported integer widths")]
    PrecisionTooLarge(u32),

    /// Column and width sequences disagree before decode
    #[error("Schema mismatch: {names} columns against {widths} widths")]
    SchemaMismatch { names: usize, widths: usize },

    /// Declared length was not an integer-parsable string
    #[error("Unparsable declared length {value:?} for column {column}")]
    BadLength { column: String, value: String },

    /// A field value did not parse into its mapped column type
    #[error("Cant parse {value:?} in column {column}, row {row}")]
    Decode {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] registry::RegistryError),

    #[error("Path error: {0}")]
    Path(#[from] stammer::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),
}
