//! Path aliasing and discovery for flat-file archives.
//!
//! The legacy archives address files through short symbolic roots
//! ("stammer", e.g. `$UTD`) that map to absolute directories on the
//! production filesystem. This crate loads that alias table, rewrites
//! paths between the two forms, generates plausible period variants of
//! an archive path, and locates the concrete file on disk.

pub mod alias;
pub mod error;
pub mod normalize;
pub mod resolve;
pub mod variants;

pub use alias::AliasMap;
pub use error::{Error, Result};
pub use normalize::{
    RESTRICTED_MARKER, normalize, restore_restricted_marker, strip_extension,
    strip_restricted_marker, swap_dollar_root,
};
pub use resolve::{KNOWN_EXTENSIONS, ResolveOptions, look_for_file_on_disk};
pub use variants::{DEFAULT_LOOKBACK, PERIOD_MARKER, VariantConfig, period_variants};
