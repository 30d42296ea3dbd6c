use std::path::{Path, PathBuf};

use diagnostics::{debug, info, warn};

use crate::alias::AliasMap;
use crate::error::*;
use crate::normalize::swap_dollar_root;

/// Extensions probed when the path as given does not exist.
pub const KNOWN_EXTENSIONS: &[&str] = &["", ".dat", ".txt"];

/// Index of the path segment carrying the on-disk restricted suffix,
/// fixed by the alias-rooted archive layout
/// (`/ssb/<stamme-dir>/<substamme>/...`).
const RESTRICTED_SEGMENT: usize = 3;

/// Lowercase form of the restricted marker as it appears in directory
/// names on disk.
const RESTRICTED_SUFFIX: &str = "_pii";

/// Options for on-disk file discovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Surface ambiguous glob matches as [`Error::Ambiguous`] instead of
    /// logging and falling through to the next strategy.
    pub strict: bool,
}

/// Locate the concrete file for a possibly alias-rooted, possibly
/// extension-less path.
///
/// Strategies, each tried only when the previous yielded nothing:
/// the exact path, known extensions, a single-match prefix glob, and
/// the same glob with the restricted directory suffix toggled. Fails
/// with [`Error::NotFound`] when every strategy is exhausted.
pub fn look_for_file_on_disk<P: AsRef<Path>>(
    path: P,
    aliases: &AliasMap,
    options: &ResolveOptions,
) -> Result<PathBuf> {
    let path = swap_dollar_root(path, aliases);

    if path.is_file() {
        info!("Discovered file to open at {path}", path: path.display().to_string());
        return Ok(path);
    }

    let no_ext = strip_last_extension(&path);

    for ext in KNOWN_EXTENSIONS {
        let candidate = PathBuf::from(format!("{}{}", no_ext.display(), ext));
        if candidate.is_file() {
            info!("Discovered file to open at {path}", path: candidate.display().to_string());
            return Ok(candidate);
        }
    }

    if let Some(found) = glob_single(&no_ext, options)? {
        return Ok(found);
    }

    if let Some(toggled) = toggle_restricted_segment(&no_ext.to_string_lossy()) {
        if let Some(found) = glob_single(Path::new(&toggled), options)? {
            return Ok(found);
        }
    }

    Err(Error::not_found(path))
}

/// Strip the extension of the final segment: text after its last `.`.
fn strip_last_extension(path: &Path) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => match name.rsplit_once('.') {
            Some((stem, _)) => match path.parent() {
                Some(parent) => parent.join(stem),
                None => PathBuf::from(stem),
            },
            None => path.to_path_buf(),
        },
        None => path.to_path_buf(),
    }
}

/// Prefix glob `stem*` in the stem's parent directory, accepted only on
/// exactly one match. Multiple matches are logged and yield nothing in
/// lenient mode; strict mode raises them as a distinct error.
fn glob_single(stem: &Path, options: &ResolveOptions) -> Result<Option<PathBuf>> {
    let matches = prefix_matches(stem);
    match matches.len() {
        1 => {
            let found = matches.into_iter().next().unwrap_or_default();
            info!("Discovered file to open at {path}", path: found.display().to_string());
            Ok(Some(found))
        }
        0 => Ok(None),
        n if options.strict => Err(Error::ambiguous(stem, n)),
        n => {
            warn!(
                "Too many files discovered (more than one) for {stem}: {count}",
                stem: stem.display().to_string(),
                count: n
            );
            Ok(None)
        }
    }
}

/// Entries of the stem's parent directory whose name starts with the
/// stem's final segment, in sorted order. An unreadable directory
/// yields no matches.
fn prefix_matches(stem: &Path) -> Vec<PathBuf> {
    let Some(parent) = stem.parent() else {
        return Vec::new();
    };
    let Some(prefix) = stem.file_name().and_then(|n| n.to_str()) else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(parent) else {
        debug!("No readable directory at {dir}", dir: parent.display().to_string());
        return Vec::new();
    };

    let mut matches: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix))
        })
        .map(|e| e.path())
        .collect();
    matches.sort();
    matches
}

/// Toggle the on-disk restricted suffix on the archive's stamme
/// segment. Returns `None` for paths too short to carry that segment.
fn toggle_restricted_segment(path: &str) -> Option<String> {
    let mut parts: Vec<String> = path.split('/').map(str::to_string).collect();
    let segment = parts.get_mut(RESTRICTED_SEGMENT)?;
    match segment.strip_suffix(RESTRICTED_SUFFIX) {
        Some(base) => *segment = base.to_string(),
        None => segment.push_str(RESTRICTED_SUFFIX),
    }
    Some(parts.join("/"))
}
