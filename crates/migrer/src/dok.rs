use std::path::{Path, PathBuf};

use diagnostics::info;
use registry::{FileDescription, Registry, datadok};
use stammer::{AliasMap, VariantConfig, swap_dollar_root};

use crate::equal::deep_equal;
use crate::error::{MigrerError, Result};
use crate::versions::{latest_version_path, next_version_path};

/// Filename suffix of a file-description snapshot's first version.
pub const SNAPSHOT_SUFFIX: &str = "__MIGRERDOK_v1.json";

/// What to do when a snapshot already exists on disk.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotOptions {
    /// Write a higher-numbered sibling when the registry content has
    /// drifted from the latest snapshot
    pub version_up: bool,
    /// Replace the first version in place
    pub overwrite: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        SnapshotOptions {
            version_up: true,
            overwrite: false,
        }
    }
}

/// Snapshot the registry's file description for a flat file into a
/// versioned JSON document next to the file, so downstream consumers
/// stop depending on the live registry.
///
/// A new snapshot lands as `<stem>__MIGRERDOK_v1.json`. When that file
/// exists, `version_up` compares the registry content against the
/// highest version on disk and writes the next version only on a
/// semantic difference; `overwrite` replaces the first version; with
/// neither, the call fails rather than touching the file.
///
/// Returns the first-version snapshot path.
pub fn save_migrerdok_for_flatfile<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    flatfile: P,
    config: &VariantConfig,
    options: &SnapshotOptions,
) -> Result<PathBuf> {
    let (description, resolved) =
        datadok::file_description_by_path(registry, aliases, flatfile, config)?;

    let stem = resolved
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let named = match resolved.parent() {
        Some(parent) => parent.join(format!("{stem}{SNAPSHOT_SUFFIX}")),
        None => PathBuf::from(format!("{stem}{SNAPSHOT_SUFFIX}")),
    };
    let snapshot_path = swap_dollar_root(named, aliases);

    if !snapshot_path.is_file() || options.overwrite {
        if let Some(parent) = snapshot_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_document(&snapshot_path, description.document())?;
        info!(
            "Wrote registry contents to {path}",
            path: snapshot_path.display().to_string()
        );
    } else if options.version_up {
        let highest = latest_version_path(&snapshot_path);
        let previous: serde_json::Value =
            serde_json::from_reader(std::fs::File::open(&highest)?)?;

        if deep_equal(&previous, description.document()) {
            info!("Registry contents equal the old version, no point in versioning up");
        } else {
            let bumped = next_version_path(&highest);
            write_document(&bumped, description.document())?;
            info!(
                "Versioning up, since we found an existing file: {path}",
                path: bumped.display().to_string()
            );
        }
    } else {
        return Err(MigrerError::AlreadyExists(snapshot_path));
    }

    Ok(snapshot_path)
}

/// Ordered column titles out of a snapshot on disk.
pub fn colnames_from_migrerdok<P: AsRef<Path>>(
    snapshot: P,
    aliases: &AliasMap,
) -> Result<Vec<String>> {
    let path = swap_dollar_root(snapshot, aliases);
    let document = serde_json::from_reader(std::fs::File::open(&path)?)?;
    let description = FileDescription::from_document(document)?;
    Ok(description.column_names())
}

fn write_document(path: &Path, document: &serde_json::Value) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer(file, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use registry::Service;
    use registry::testing::MockRegistry;
    use serde_json::json;

    const OPERATION: &str = "GetFileDescriptionByPath";

    fn config() -> VariantConfig {
        VariantConfig {
            lookback: 2,
            current_year: 2025,
        }
    }

    fn description(length: &str) -> serde_json::Value {
        json!({
            "ContextVariable": [
                {"Title": {"_value_1": "FNR"}, "Properties": {"Datatype": "Tekst", "Length": length}}
            ]
        })
    }

    fn registry_for(dir: &Path, length: &str) -> (MockRegistry, AliasMap) {
        let aliases = AliasMap::parse(&format!("export UTD={}\n", dir.display())).unwrap();
        let mut registry = MockRegistry::new();
        registry.insert(
            Service::Datadok,
            OPERATION,
            &["$UTD/arkiv/g2022".into()],
            description(length)
        );
        (registry, aliases)
    }

    #[test]
    fn test_first_snapshot_is_written_as_v1() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, aliases) = registry_for(dir.path(), "11");

        let path = save_migrerdok_for_flatfile(
            &registry,
            &aliases,
            "$UTD/arkiv/g2022",
            &config(),
            &SnapshotOptions::default(),
        )
        .unwrap();

        assert_eq!(path, dir.path().join("arkiv/g2022__MIGRERDOK_v1.json"));
        assert!(path.is_file());
        assert_eq!(
            colnames_from_migrerdok(&path, &aliases).unwrap(),
            vec!["FNR"]
        );
    }

    #[test]
    fn test_unchanged_content_does_not_version_up() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, aliases) = registry_for(dir.path(), "11");
        let opts = SnapshotOptions::default();

        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();
        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();

        assert!(dir.path().join("arkiv/g2022__MIGRERDOK_v1.json").is_file());
        assert!(!dir.path().join("arkiv/g2022__MIGRERDOK_v2.json").exists());
    }

    #[test]
    fn test_drifted_content_versions_up() {
        let dir = tempfile::tempdir().unwrap();
        let opts = SnapshotOptions::default();

        let (registry, aliases) = registry_for(dir.path(), "11");
        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();

        let (registry, aliases) = registry_for(dir.path(), "12");
        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();

        let (registry, aliases) = registry_for(dir.path(), "13");
        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();

        assert!(dir.path().join("arkiv/g2022__MIGRERDOK_v2.json").is_file());
        assert!(dir.path().join("arkiv/g2022__MIGRERDOK_v3.json").is_file());
        let latest: serde_json::Value = serde_json::from_reader(
            std::fs::File::open(dir.path().join("arkiv/g2022__MIGRERDOK_v3.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            latest["ContextVariable"][0]["Properties"]["Length"],
            json!("13")
        );
    }

    #[test]
    fn test_existing_snapshot_without_flags_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, aliases) = registry_for(dir.path(), "11");
        let opts = SnapshotOptions {
            version_up: false,
            overwrite: false,
        };

        save_migrerdok_for_flatfile(&registry, &aliases, "$UTD/arkiv/g2022", &config(), &opts)
            .unwrap();
        let result = save_migrerdok_for_flatfile(
            &registry,
            &aliases,
            "$UTD/arkiv/g2022",
            &config(),
            &opts
        );
        assert!(matches!(result, Err(MigrerError::AlreadyExists(_))));
    }
}
