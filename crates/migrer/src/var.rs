use std::path::{Path, PathBuf};

use diagnostics::info;
use registry::{Document, Registry, vardok};
use stammer::{AliasMap, swap_dollar_root};

use crate::error::{MigrerError, Result};

/// Snapshot every vardok concept variable owned by a section into a
/// JSON file. Returns the fetched content; fails with
/// [`MigrerError::AlreadyExists`] when the output exists and overwrite
/// was not requested.
pub fn save_vardok_variables_for_section<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    section: i64,
    path: P,
    overwrite: bool,
) -> Result<Document> {
    let outpath: PathBuf = swap_dollar_root(path, aliases);
    let content = vardok::concept_variables_by_owner(registry, section)?;

    if !outpath.is_file() || overwrite {
        let file = std::fs::File::create(&outpath)?;
        serde_json::to_writer(file, &content)?;
        info!(
            "Wrote vardok variables for section {section} to {path}",
            path: outpath.display().to_string()
        );
    } else {
        return Err(MigrerError::AlreadyExists(outpath));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry::Service;
    use registry::testing::MockRegistry;
    use serde_json::json;

    fn registry_with_section() -> MockRegistry {
        let mut registry = MockRegistry::new();
        registry.insert(
            Service::Vardok,
            "GetConceptVariablesByOwner",
            &[registry::Arg::Int(360)],
            json!([{"id": "urn:ssb:conceptvariable:vardok:123"}])
        );
        registry
    }

    #[test]
    fn test_writes_section_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("section360.json");

        let content = save_vardok_variables_for_section(
            &registry_with_section(),
            &AliasMap::default(),
            360,
            &out,
            false,
        )
        .unwrap();

        assert!(out.is_file());
        let on_disk: serde_json::Value =
            serde_json::from_reader(std::fs::File::open(&out).unwrap()).unwrap();
        assert_eq!(on_disk, content);
    }

    #[test]
    fn test_existing_file_without_overwrite_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("section360.json");
        std::fs::File::create(&out).unwrap();

        let result = save_vardok_variables_for_section(
            &registry_with_section(),
            &AliasMap::default(),
            360,
            &out,
            false
        );
        assert!(matches!(result, Err(MigrerError::AlreadyExists(_))));
    }

    #[test]
    fn test_existing_file_with_overwrite_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("section360.json");
        std::fs::File::create(&out).unwrap();

        let result = save_vardok_variables_for_section(
            &registry_with_section(),
            &AliasMap::default(),
            360,
            &out,
            true
        );
        assert!(result.is_ok());
    }
}
