//! Migration of legacy registry metadata into versioned JSON
//! snapshots, decoupling downstream consumers from the live services.
//!
//! Snapshots live next to the data they describe. Re-snapshotting a
//! file compares content order-insensitively against the latest
//! version on disk and bumps the version only on a semantic
//! difference.

pub mod dok;
pub mod equal;
pub mod error;
pub mod metadb;
pub mod var;
pub mod versions;

pub use dok::{SnapshotOptions, colnames_from_migrerdok, save_migrerdok_for_flatfile};
pub use equal::deep_equal;
pub use error::{MigrerError, Result};
pub use metadb::{collect_metadb_vars, save_metadb_vars};
pub use var::save_vardok_variables_for_section;
pub use versions::{latest_version_path, next_version_path};
