use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use diagnostics::{info, warn};
use registry::{Arg, Document, Registry, RegistryError, metadb};
use serde_json::Value;
use stammer::{AliasMap, swap_dollar_root};

use crate::error::{MigrerError, Result};

/// Filename suffix of a metadb codelist snapshot.
pub const SNAPSHOT_SUFFIX: &str = "__MIGRERMETADB.json";

/// Fetch the metadb codelists backing the given variable names.
///
/// Each requested name is matched case-insensitively as a suffix of a
/// codelist title (the registry titles carry a table prefix); the
/// first matching title wins. A per-codelist fault is logged and the
/// entry skipped, keeping the rest of the harvest alive.
pub fn collect_metadb_vars<R: Registry>(
    registry: &R,
    varnames: &[&str],
) -> Result<BTreeMap<String, Document>> {
    let overview = metadb::codelists(registry)?;
    let catalog = codelist_catalog(&overview)?;

    let mut codelist_codes = BTreeMap::new();
    for &var in varnames {
        let wanted = var.to_lowercase();
        let Some((title, id)) = catalog
            .iter()
            .find(|(title, _)| title.to_lowercase().ends_with(&wanted))
        else {
            continue;
        };
        info!(
            "Found {var} at end of {title} with id {id}",
            title: title.clone(),
            id: id.to_string()
        );
        match metadb::codelist_by_id(registry, id.clone()) {
            Ok(codelist) => {
                codelist_codes.insert(title.clone(), codelist);
            }
            Err(RegistryError::Fault(fault)) => {
                warn!(
                    "Couldnt get {title} - {id} from the registry: {fault}",
                    title: title.clone(),
                    id: id.to_string()
                );
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(codelist_codes)
}

/// Snapshot metadb codelists for the given variable names into
/// `<stem>__MIGRERMETADB.json`. Returns the harvested map; fails with
/// [`MigrerError::AlreadyExists`] when the output exists and overwrite
/// was not requested.
pub fn save_metadb_vars<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    varnames: &[&str],
    outpath: P,
    overwrite: bool,
) -> Result<BTreeMap<String, Document>> {
    let mut outpath: PathBuf = swap_dollar_root(outpath, aliases);
    let named_right = outpath
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(SNAPSHOT_SUFFIX));
    if !named_right {
        let stem = outpath
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        outpath = match outpath.parent() {
            Some(parent) => parent.join(format!("{stem}{SNAPSHOT_SUFFIX}")),
            None => PathBuf::from(format!("{stem}{SNAPSHOT_SUFFIX}")),
        };
    }

    let codelists = collect_metadb_vars(registry, varnames)?;
    if !outpath.is_file() || overwrite {
        let file = std::fs::File::create(&outpath)?;
        serde_json::to_writer(file, &codelists)?;
        info!(
            "Wrote metadb snapshot to {path}",
            path: outpath.display().to_string()
        );
    } else {
        return Err(MigrerError::AlreadyExists(outpath));
    }
    Ok(codelists)
}

/// Ordered (title, id) pairs off the codelist overview document.
fn codelist_catalog(overview: &Document) -> Result<Vec<(String, Arg)>> {
    let entries = overview
        .as_array()
        .ok_or_else(|| RegistryError::bad_document("codelist overview is not a list"))?;

    let mut catalog = Vec::with_capacity(entries.len());
    for entry in entries {
        let title = entry
            .get("CodelistMeta")
            .and_then(|m| m.get("Title"))
            .and_then(|t| t.get("_value_1"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RegistryError::bad_document("codelist entry without CodelistMeta.Title")
            })?;
        let id = match entry.get("id") {
            Some(Value::String(s)) => Arg::Str(s.clone()),
            Some(Value::Number(n)) if n.as_i64().is_some() => {
                Arg::Int(n.as_i64().unwrap_or_default())
            }
            _ => return Err(RegistryError::bad_document("codelist entry without id").into()),
        };
        catalog.push((title.to_string(), id));
    }
    Ok(catalog)
}
