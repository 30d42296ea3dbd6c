//! Operations supported by the datadok service: file descriptions,
//! file variables, and their code lists.

use std::path::{Path, PathBuf};

use stammer::{AliasMap, VariantConfig};

use crate::error::Result;
use crate::models::{Document, FileDescription};
use crate::probe::probe_file_description;
use crate::service::{Arg, Registry, Service, expect_found};

/// One codelist with all attributes, by id or urn,
/// e.g. 228589 or urn:ssb:codelist:datadok:228589.
pub fn codelist_by_id<R: Registry>(registry: &R, codelist_id: impl Into<Arg>) -> Result<Document> {
    call(registry, "GetCodelistById", &[codelist_id.into()])
}

/// One codelist by the datadok reference of a file variable,
/// e.g. `$FOB/person/arkiv/personfil/g2001/spes_reg_type`.
pub fn codelist_by_reference<R: Registry>(registry: &R, reference: &str) -> Result<Document> {
    call(registry, "GetCodelistByReference", &[reference.into()])
}

/// Overview of the codelists datadok holds.
pub fn codelists<R: Registry>(registry: &R) -> Result<Document> {
    call(registry, "GetCodelists", &[])
}

/// One file variable with all attributes (name, description, datatype,
/// length, start position, decimals, value range, comment, codelist)
/// by id or urn, e.g. 865507 or urn:ssb:contextvariable:datadok:865507.
pub fn context_variable_by_id<R: Registry>(
    registry: &R,
    variable_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetContextVariableById", &[variable_id.into()])
}

/// One file variable by datadok reference: the file path plus the
/// variable name in the file.
pub fn context_variable_by_reference<R: Registry>(
    registry: &R,
    reference: &str,
) -> Result<Document> {
    call(registry, "GetContextVariableByReference", &[reference.into()])
}

/// One file description by id or urn,
/// e.g. 1288400 or urn:ssb:dataset:datadok:1288400.
pub fn file_description_by_id<R: Registry>(
    registry: &R,
    file_id: impl Into<Arg>,
) -> Result<Document> {
    call(registry, "GetFileDescriptionById", &[file_id.into()])
}

/// One file description by datadok path, e.g.
/// `$FOB/person/arkiv/personfil/g2001`, probing period variants of the
/// path until one matches. Returns the typed description and the path
/// variant that succeeded.
pub fn file_description_by_path<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    path: P,
    config: &VariantConfig,
) -> Result<(FileDescription, PathBuf)> {
    probe_file_description(registry, aliases, path, config)
}

fn call<R: Registry>(registry: &R, operation: &str, args: &[Arg]) -> Result<Document> {
    expect_found(registry.lookup(Service::Datadok, operation, args)?)
}
