use std::path::{Path, PathBuf};

use crate::error::*;

/// Default location of the alias table on production hosts.
pub const DEFAULT_SOURCE: &str = "/etc/profile.d/stamme_variabel";

/// Immutable mapping between short symbolic roots ("stammer") and the
/// absolute directories they stand for.
///
/// Built once from the line-oriented alias source; declaration order is
/// preserved for prefix matching. Lookup works in both directions:
/// alias to root and root back to alias. Reverse lookup of an
/// unregistered root returns `None` rather than failing.
///
/// The map never touches the process environment. A caller that wants
/// the aliases visible as environment variables iterates the map and
/// performs the insertion itself.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    entries: Vec<(String, PathBuf)>,
}

impl AliasMap {
    /// Load the alias table from the default production source.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_SOURCE)
    }

    /// Load the alias table from an explicit source file.
    pub fn load_from<P: AsRef<Path>>(source: P) -> Result<Self> {
        let source = source.as_ref();
        let text = std::fs::read_to_string(source).map_err(|e| Error::io(source, &e))?;
        Self::parse(&text)
    }

    /// Parse alias table text.
    ///
    /// Relevant lines have the shape `export ALIAS=value`; anything else
    /// is ignored. A relevant line with more than one `=` is a fatal
    /// configuration error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if !line.starts_with("export") || !line.contains('=') {
                continue;
            }
            let assignment = line.strip_prefix("export").unwrap_or(line).trim_start();
            let parts: Vec<&str> = assignment.split('=').collect();
            if parts.len() != 2 {
                return Err(Error::config(format!("too many equal-signs: {}", line)));
            }
            entries.push((parts[0].to_string(), PathBuf::from(parts[1])));
        }
        Ok(AliasMap { entries })
    }

    /// Forward lookup: alias to absolute root.
    pub fn root(&self, alias: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, r)| r.as_path())
    }

    /// Reverse lookup: absolute root back to its alias.
    pub fn alias<P: AsRef<Path>>(&self, root: P) -> Option<&str> {
        let root = root.as_ref();
        self.entries
            .iter()
            .find(|(_, r)| r == root)
            .map(|(a, _)| a.as_str())
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(a, r)| (a.as_str(), r.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let text = "\n# comment\nexport UTDANNING=/ssb/stam/utdanning\nexport FOO=/bar/baz\nnot-an-export\nexport BAZ=/x/y/z\n";
        let map = AliasMap::parse(text).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.root("UTDANNING"), Some(Path::new("/ssb/stam/utdanning")));
        assert_eq!(map.root("FOO"), Some(Path::new("/bar/baz")));
        assert_eq!(map.root("BAZ"), Some(Path::new("/x/y/z")));
    }

    #[test]
    fn test_round_trip() {
        let map = AliasMap::parse("export A=/x/y\n").unwrap();
        assert_eq!(map.root("A"), Some(Path::new("/x/y")));
        assert_eq!(map.alias("/x/y"), Some("A"));
    }

    #[test]
    fn test_reverse_lookup_unregistered_root() {
        let map = AliasMap::parse("export A=/x/y\n").unwrap();
        assert_eq!(map.alias("/not/registered"), None);
    }

    #[test]
    fn test_ignores_non_export_and_missing_equals() {
        let text = "\nexport ONLY_THIS=/ok/path\nexport_missing_equals\nrandom text\n";
        let map = AliasMap::parse(text).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.root("ONLY_THIS"), Some(Path::new("/ok/path")));
    }

    #[test]
    fn test_bad_format_raises() {
        assert!(matches!(
            AliasMap::parse("export BAD=one=two\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("stamme_variabel");
        let mut f = std::fs::File::create(&source).unwrap();
        writeln!(f, "export UTD=/ssb/stamme01/utd").unwrap();
        let map = AliasMap::load_from(&source).unwrap();
        assert_eq!(map.root("UTD"), Some(Path::new("/ssb/stamme01/utd")));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(matches!(
            AliasMap::load_from("/no/such/file/anywhere"),
            Err(Error::Io(_, _))
        ));
    }
}
