use std::path::{Path, PathBuf};

/// Split a versioned filename into (base, version, extension), where
/// the version token has the shape `_v<digits>` at the end of the stem.
fn split_versioned(path: &Path) -> Option<(String, u32, String)> {
    let name = path.file_name()?.to_str()?;
    let (stem, ext) = match name.split_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (name, String::new()),
    };
    let marker = stem.rfind("_v")?;
    let version: u32 = stem[marker + 2..].parse().ok()?;
    Some((stem[..marker].to_string(), version, ext))
}

/// Highest-numbered sibling of a `_v<N>` versioned path present on
/// disk. Paths without a version token, or with no versioned siblings,
/// come back unchanged.
pub fn latest_version_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let Some((base, _, ext)) = split_versioned(path) else {
        return path.to_path_buf();
    };
    let parent = path.parent().unwrap_or(Path::new(""));
    let Ok(entries) = std::fs::read_dir(parent) else {
        return path.to_path_buf();
    };

    let mut highest: Option<(u32, PathBuf)> = None;
    for entry in entries.flatten() {
        let candidate = entry.path();
        let Some((b, version, e)) = split_versioned(&candidate) else {
            continue;
        };
        if b == base && e == ext && highest.as_ref().is_none_or(|(v, _)| version > *v) {
            highest = Some((version, candidate));
        }
    }
    match highest {
        Some((_, found)) => found,
        None => path.to_path_buf(),
    }
}

/// The path one version above the given `_v<N>` path. A path without a
/// version token is treated as the first version.
pub fn next_version_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or(Path::new(""));
    match split_versioned(path) {
        Some((base, version, ext)) => parent.join(format!("{}_v{}{}", base, version + 1, ext)),
        None => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (stem, ext) = match name.split_once('.') {
                Some((stem, ext)) => (stem.to_string(), format!(".{ext}")),
                None => (name, String::new()),
            };
            parent.join(format!("{}_v2{}", stem, ext))
        }
    }
}
