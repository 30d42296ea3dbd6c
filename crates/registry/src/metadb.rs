//! Operations supported by the metadb service: table descriptions and
//! code lists approved for publishing.

use crate::error::Result;
use crate::models::Document;
use crate::service::{Arg, Registry, Service, expect_found};

/// One codelist by id or urn, e.g. 10013 or urn:ssb:codelist:metadb:10013.
pub fn codelist_by_id<R: Registry>(registry: &R, codelist_id: impl Into<Arg>) -> Result<Document> {
    call(registry, "GetCodelistById", &[codelist_id.into()])
}

/// Overview of the codelists metadb holds.
pub fn codelists<R: Registry>(registry: &R) -> Result<Document> {
    call(registry, "GetCodelists", &[])
}

/// One variable with all attributes by id or urn,
/// e.g. 14739 or urn:ssb:contextvariable:metadb:14739.
pub fn context_variable_by_id<R: Registry>(
    registry: &R,
    variable_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetContextVariableById", &[variable_id.into()])
}

/// One table with all attributes and variables by id or urn,
/// e.g. 11518 or urn:ssb:dataset:metadb:11518.
pub fn data_description_by_id<R: Registry>(
    registry: &R,
    table_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetDataDescriptionById", &[table_id.into()])
}

/// One project with its themes, tables and variables by project id or
/// urn. Valid project ids are 1001 and 1004.
pub fn event_history_structure_by_id<R: Registry>(
    registry: &R,
    project_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetEventHistoryStructureById", &[project_id.into()])
}

fn call<R: Registry>(registry: &R, operation: &str, args: &[Arg]) -> Result<Document> {
    expect_found(registry.lookup(Service::Metadb, operation, args)?)
}
