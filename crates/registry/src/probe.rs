use std::path::{Path, PathBuf};

use diagnostics::{debug, info};
use stammer::{AliasMap, VariantConfig, normalize, period_variants, restore_restricted_marker};

use crate::error::{RegistryError, Result};
use crate::models::FileDescription;
use crate::service::{Arg, Lookup, Registry, Service};

const OPERATION: &str = "GetFileDescriptionByPath";

/// Probe the datadok registry for a file description, trying period
/// variants of the path until one matches.
///
/// The path is normalized to its unrestricted alias form first; if no
/// unrestricted variant matches, the whole variant sequence is retried
/// with the restricted marker re-inserted, because the registry indexes
/// open and restricted datasets under different namespaces sharing the
/// same directory shape. First success wins. Per-variant no-match is an
/// expected outcome; transport errors propagate immediately.
///
/// Returns the description and the path variant that matched, or
/// [`RegistryError::NotFound`] carrying the original input path.
pub fn probe_file_description<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    path: P,
    config: &VariantConfig,
) -> Result<(FileDescription, PathBuf)> {
    let path = path.as_ref();
    let unrestricted = normalize(path, aliases);
    info!(
        "Looking up file description as {path}",
        path: unrestricted.display().to_string()
    );

    if let Some(hit) = probe_variants(registry, &unrestricted, config)? {
        return Ok(hit);
    }

    let restricted = restore_restricted_marker(&unrestricted);
    debug!(
        "No unrestricted match, retrying as {path}",
        path: restricted.display().to_string()
    );
    if let Some(hit) = probe_variants(registry, &restricted, config)? {
        return Ok(hit);
    }

    Err(RegistryError::NotFound(path.to_path_buf()))
}

fn probe_variants<R: Registry>(
    registry: &R,
    path: &Path,
    config: &VariantConfig,
) -> Result<Option<(FileDescription, PathBuf)>> {
    for variant in period_variants(path, config) {
        let arg = Arg::Str(variant.to_string_lossy().into_owned());
        match registry.lookup(Service::Datadok, OPERATION, &[arg])? {
            Lookup::Found(document) => {
                return Ok(Some((FileDescription::from_document(document)?, variant)));
            }
            Lookup::NoMatch(fault) => {
                info!(
                    "Couldnt find registry entry at {variant}: {fault}",
                    variant: variant.display().to_string()
                );
            }
        }
    }
    Ok(None)
}
