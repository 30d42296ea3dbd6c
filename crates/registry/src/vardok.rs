//! Operations supported by the vardok service: concept variables and
//! their code lists.

use crate::error::Result;
use crate::models::Document;
use crate::service::{Arg, Registry, Service, expect_found};

/// One codelist by id or urn, e.g. 46 or urn:ssb:codelist:vardok:46.
pub fn codelist_by_id<R: Registry>(registry: &R, codelist_id: impl Into<Arg>) -> Result<Document> {
    call(registry, "GetCodelistById", &[codelist_id.into()])
}

/// All codelist references in vardok.
pub fn codelists<R: Registry>(registry: &R) -> Result<Document> {
    call(registry, "GetCodelists", &[])
}

/// One concept variable with all attributes by id or urn,
/// e.g. 123 or urn:ssb:conceptvariable:vardok:123.
pub fn concept_variable_by_id<R: Registry>(
    registry: &R,
    variable_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetConceptVariableById", &[variable_id.into()])
}

/// Every variable approved for internal or external (internet) use.
/// Slow against the live service.
pub fn concept_variables_by_approved<R: Registry>(
    registry: &R,
    internal: bool,
) -> Result<Document> {
    let flag = if internal { "internal" } else { "internet" };
    call(registry, "GetConceptVariablesByApproved", &[flag.into()])
}

/// Concept variables for a given external source.
pub fn concept_variables_by_external_source<R: Registry>(
    registry: &R,
    source_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetConceptVariablesByExternalSource", &[source_id.into()])
}

/// Concept variables for a given internal source.
pub fn concept_variables_by_internal_source<R: Registry>(
    registry: &R,
    source_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetConceptVariablesByInternalSource", &[source_id.into()])
}

/// Free-text search over variable names and definitions.
pub fn concept_variables_by_name_def<R: Registry>(
    registry: &R,
    search_text: &str,
) -> Result<Document> {
    call(registry, "GetConceptVariablesByNameDef", &[search_text.into()])
}

/// Concept variables owned by a section.
pub fn concept_variables_by_owner<R: Registry>(
    registry: &R,
    section_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetConceptVariablesByOwner", &[section_id.into()])
}

/// Concept variables for a statistical unit.
pub fn concept_variables_by_statistical_unit<R: Registry>(
    registry: &R,
    statistical_unit: impl Into<Arg>,
) -> Result<Document> {
    call(
        registry,
        "GetConceptVariablesByStatisticalUnit",
        &[statistical_unit.into()],
    )
}

fn call<R: Registry>(registry: &R, operation: &str, args: &[Arg]) -> Result<Document> {
    expect_found(registry.lookup(Service::Vardok, operation, args)?)
}
