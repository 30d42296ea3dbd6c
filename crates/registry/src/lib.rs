//! Typed boundary to the legacy TBMD metadata registries.
//!
//! Four SOAP services (datadok, vardok, metadb, statbank) describe flat
//! files, variables, and code lists. The transport lives outside this
//! crate: callers hand in anything implementing [`Registry`], and every
//! operation here is a thin, typed wrapper over that trait. Documents
//! coming back over the boundary are validated once, up front, into
//! typed structures instead of being traversed dynamically downstream.

pub mod datadok;
pub mod error;
pub mod metadb;
pub mod models;
pub mod probe;
pub mod service;
pub mod statbank;
pub mod testing;
pub mod vardok;

pub use error::{RegistryError, Result};
pub use models::{ColumnDescriptor, ContextVariable, Document, FileDescription};
pub use probe::probe_file_description;
pub use service::{Arg, Lookup, Registry, Service};
