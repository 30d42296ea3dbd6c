//! Operations supported by the statbank metadata service.

use crate::error::Result;
use crate::models::Document;
use crate::service::{Arg, Registry, Service, expect_found};

/// Metadata for a statbank table by table id, e.g. 03886.
pub fn meta_by_table_id<R: Registry>(registry: &R, table_id: impl Into<Arg>) -> Result<Document> {
    call(registry, "GetStatbankMetaByTabelId", &[table_id.into()])
}

/// Metadata for a statbank table by table name, e.g. Raadyr.
pub fn meta_by_table_name<R: Registry>(registry: &R, table_name: &str) -> Result<Document> {
    call(registry, "GetStatbankMetaByTabelName", &[table_name.into()])
}

/// Vardok reference and the statbank tables tied to a concept
/// variable id, e.g. 1756.
pub fn table_ids_by_concept_variable_id<R: Registry>(
    registry: &R,
    variable_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetTableIdsByConceptVariableId", &[variable_id.into()])
}

fn call<R: Registry>(registry: &R, operation: &str, args: &[Arg]) -> Result<Document> {
    expect_found(registry.lookup(Service::Statbank, operation, args)?)
}
