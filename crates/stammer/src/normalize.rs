use std::path::{Component, Path, PathBuf};

use crate::alias::AliasMap;

/// Suffix marking a first path segment as restricted (sensitive) data.
/// The registry indexes restricted datasets under the unrestricted name,
/// so the marker is stripped before lookup and re-inserted only for the
/// second probing pass. Case-sensitive.
pub const RESTRICTED_MARKER: &str = "_PII";

/// Rewrite a path into the canonical alias form used by the registry.
///
/// The extension is stripped, a registered absolute root is swapped for
/// its `$`-alias, the result is forced to be alias-rooted, and the
/// restricted marker is removed from the first segment.
pub fn normalize<P: AsRef<Path>>(path: P, aliases: &AliasMap) -> PathBuf {
    let stripped = strip_extension(path.as_ref());
    let mut text = path_to_string(&stripped);

    for (alias, root) in aliases.iter() {
        let prefix = format!("{}/", root.display());
        if let Some(rest) = text.strip_prefix(&prefix) {
            text = format!("{}/{}", alias, rest);
            break;
        }
    }

    if !text.starts_with('$') {
        text = format!("${}", text);
    }

    strip_restricted_marker(text)
}

/// Strip any file extension: text after the first `.` of the final
/// path segment.
pub fn strip_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => match name.split_once('.') {
            Some((stem, _)) => match path.parent() {
                Some(parent) => parent.join(stem),
                None => PathBuf::from(stem),
            },
            None => path.to_path_buf(),
        },
        None => path.to_path_buf(),
    }
}

/// Remove the restricted marker from the first path segment.
pub fn strip_restricted_marker<P: AsRef<Path>>(path: P) -> PathBuf {
    rewrite_first_segment(path, |first| first.replace(RESTRICTED_MARKER, ""))
}

/// Re-insert the restricted marker as the first segment's suffix.
pub fn restore_restricted_marker<P: AsRef<Path>>(path: P) -> PathBuf {
    rewrite_first_segment(path, |first| format!("{}{}", first, RESTRICTED_MARKER))
}

/// Swap a leading `$ALIAS` segment for the registered absolute root,
/// the opposite direction of [`normalize`]. Paths whose alias is not
/// registered come back unchanged.
pub fn swap_dollar_root<P: AsRef<Path>>(path: P, aliases: &AliasMap) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(seg)) => seg.to_string_lossy().to_string(),
        _ => return path.to_path_buf(),
    };
    let alias = first.strip_prefix('$').unwrap_or(&first);
    match aliases.root(alias) {
        Some(root) => {
            let mut out = root.to_path_buf();
            out.extend(components);
            out
        }
        None => path.to_path_buf(),
    }
}

fn rewrite_first_segment<P, F>(path: P, rewrite: F) -> PathBuf
where
    P: AsRef<Path>,
    F: FnOnce(&str) -> String,
{
    let text = path_to_string(path.as_ref());
    match text.split_once('/') {
        Some((first, rest)) => PathBuf::from(format!("{}/{}", rewrite(first), rest)),
        None => PathBuf::from(rewrite(&text)),
    }
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> AliasMap {
        AliasMap::parse("export UTD=/ssb/stamme01/utd\nexport FOB=/ssb/stamme02/fob\n")
            .unwrap()
    }

    #[test]
    fn test_normalize_swaps_root_for_alias() {
        let out = normalize("/ssb/stamme01/utd/nudb/arkiv/vg_vitnemal/g2002.dat", &aliases());
        assert_eq!(out, PathBuf::from("$UTD/nudb/arkiv/vg_vitnemal/g2002"));
    }

    #[test]
    fn test_normalize_keeps_dollar_path() {
        let out = normalize("$UTD/nudb/arkiv/vg_vitnemal/g2002", &aliases());
        assert_eq!(out, PathBuf::from("$UTD/nudb/arkiv/vg_vitnemal/g2002"));
    }

    #[test]
    fn test_normalize_forces_alias_root() {
        let out = normalize("UTD/nudb/g2002.txt", &aliases());
        assert_eq!(out, PathBuf::from("$UTD/nudb/g2002"));
    }

    #[test]
    fn test_normalize_strips_restricted_marker() {
        let out = normalize("$UTD_PII/nudb/arkiv/vg_vitnemal/g2001g2010", &aliases());
        assert_eq!(out, PathBuf::from("$UTD/nudb/arkiv/vg_vitnemal/g2001g2010"));
    }

    #[test]
    fn test_strip_extension_first_dot_of_final_segment() {
        assert_eq!(
            strip_extension("/a/b/g2002.dat.gz"),
            PathBuf::from("/a/b/g2002")
        );
        assert_eq!(strip_extension("/a/b/g2002"), PathBuf::from("/a/b/g2002"));
    }

    #[test]
    fn test_restore_restricted_marker() {
        assert_eq!(
            restore_restricted_marker("$UTD/nudb/g2002"),
            PathBuf::from("$UTD_PII/nudb/g2002")
        );
    }

    #[test]
    fn test_swap_dollar_root() {
        assert_eq!(
            swap_dollar_root("$UTD/nudb/g2002", &aliases()),
            PathBuf::from("/ssb/stamme01/utd/nudb/g2002")
        );
        // Unregistered alias passes through untouched
        assert_eq!(
            swap_dollar_root("$NOPE/nudb/g2002", &aliases()),
            PathBuf::from("$NOPE/nudb/g2002")
        );
    }
}
