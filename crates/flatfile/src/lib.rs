//! Fixed-width flat files into typed Arrow record batches.
//!
//! The registry declares each file's column titles, datatypes, and
//! field widths. This crate maps those declarations onto Arrow types,
//! reads the fixed-width layout (Latin-1 by convention), and fixes up
//! the source's decimal-comma convention on floating-point columns.

pub mod decode;
pub mod dtype;
pub mod error;
pub mod open;

pub use decode::{Encoding, MISSING_SENTINEL, decode_flatfile, read_fwf};
pub use dtype::{TypedSchema, declared_widths, int_width_for, map_types};
pub use error::{FlatfileError, Result};
pub use open::{OpenOptions, open_flatfile_from_path, open_flatfile_from_snapshot};
