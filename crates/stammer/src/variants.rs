use std::path::{Path, PathBuf};

use chrono::Datelike;
use diagnostics::warn;

/// How many start years back the variant generator will guess.
pub const DEFAULT_LOOKBACK: i32 = 20;

/// Character introducing a 4-digit year token in a file stem, e.g.
/// `g2002` or `g2001g2010`.
pub const PERIOD_MARKER: char = 'g';

/// Bounds for period-variant generation.
///
/// `current_year` is read from the live clock once per construction,
/// never memoized across calls; tests build fixed configs instead.
#[derive(Debug, Clone, Copy)]
pub struct VariantConfig {
    pub lookback: i32,
    pub current_year: i32,
}

impl VariantConfig {
    /// Config with the default lookback window and the wall-clock year.
    pub fn from_clock() -> Self {
        VariantConfig {
            lookback: DEFAULT_LOOKBACK,
            current_year: chrono::Local::now().year(),
        }
    }

    pub fn with_lookback(mut self, lookback: i32) -> Self {
        self.lookback = lookback;
        self
    }
}

/// Generate the ordered, finite sequence of plausible period variants
/// of `path`.
///
/// The file stem is scanned for a leading run of one or two year
/// tokens. For each candidate start year (most recent first) the head
/// element is the most conservative single/pair guess, followed by
/// range guesses with end years in descending recency order. Paths
/// with zero or more than two tokens come back as the sole variant,
/// unchanged.
pub fn period_variants<P: AsRef<Path>>(path: P, config: &VariantConfig) -> Vec<PathBuf> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let (periods, suffix) = split_periods(stem);
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut variations = Vec::new();
    match periods.as_slice() {
        [single] => {
            for first in window(*single, config.lookback) {
                variations.push(parent.join(format!("g{first}{suffix}")));
                for second in ((first + 1)..=config.current_year).rev() {
                    variations.push(parent.join(format!("g{first}g{second}{suffix}")));
                }
            }
        }
        [start, end] => {
            let diff = end - start;
            for first in window(*start, config.lookback) {
                variations.push(parent.join(format!("g{first}g{}{suffix}", first + diff)));
                for second in ((first + 1)..=config.current_year).rev() {
                    variations.push(parent.join(format!("g{first}g{second}{suffix}")));
                    variations.push(parent.join(format!(
                        "g{first}g{}g{second}g{}{suffix}",
                        first + diff,
                        second + diff
                    )));
                }
            }
        }
        _ => {
            variations.push(path.to_path_buf());
            warn!(
                "Dont know what to do with {count} periods in path, not guessing much",
                count: periods.len()
            );
        }
    }
    variations
}

/// Split the leading run of year tokens off a file stem, returning the
/// parsed years and the remaining suffix.
fn split_periods(stem: &str) -> (Vec<i32>, &str) {
    let mut periods = Vec::new();
    let mut rest = stem;
    loop {
        let Some(token) = rest.strip_prefix(PERIOD_MARKER) else {
            break;
        };
        if token.len() < 4 || !token.is_char_boundary(4) {
            break;
        }
        let digits = &token[..4];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            break;
        }
        match digits.parse::<i32>() {
            Ok(year) => periods.push(year),
            Err(_) => break,
        }
        rest = &token[4..];
    }
    (periods, rest)
}

/// Candidate start years: `year` down to `year - lookback + 1`.
fn window(year: i32, lookback: i32) -> impl Iterator<Item = i32> {
    ((year - lookback + 1)..=year).rev()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_config(lookback: i32) -> VariantConfig {
        VariantConfig {
            lookback,
            current_year: 2025,
        }
    }

    #[test]
    fn test_split_periods() {
        assert_eq!(split_periods("g2002"), (vec![2002], ""));
        assert_eq!(split_periods("g2001g2010"), (vec![2001, 2010], ""));
        assert_eq!(split_periods("g2001g2010_rev"), (vec![2001, 2010], "_rev"));
        assert_eq!(split_periods("personfil"), (vec![], "personfil"));
        assert_eq!(split_periods("g20x2"), (vec![], "g20x2"));
        assert_eq!(split_periods("g201"), (vec![], "g201"));
    }

    #[test]
    fn test_single_period_order_and_content() {
        let out = period_variants("/root/dir/g2022.dat", &fixed_config(3));

        let expected_prefix: Vec<PathBuf> = [
            "/root/dir/g2022",
            "/root/dir/g2022g2025",
            "/root/dir/g2022g2024",
            "/root/dir/g2022g2023",
            "/root/dir/g2021",
            "/root/dir/g2021g2025",
            "/root/dir/g2021g2024",
            "/root/dir/g2021g2023",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(&out[..expected_prefix.len()], &expected_prefix[..]);

        // Lookback 3 reaches the g2020 block and no further
        assert!(out.contains(&PathBuf::from("/root/dir/g2020")));
        assert!(!out.contains(&PathBuf::from("/root/dir/g2019")));
    }

    #[test]
    fn test_suffix_preserved_in_variants() {
        let out = period_variants("/root/dir/g2022_rev.dat", &fixed_config(2));
        assert_eq!(out[0], PathBuf::from("/root/dir/g2022_rev"));
        assert_eq!(out[1], PathBuf::from("/root/dir/g2022g2025_rev"));
    }

    #[test]
    fn test_two_period_order_and_content() {
        let out = period_variants("/root/dir/g2021g2022.dat", &fixed_config(2));
        let idx = |name: &str| {
            let p = PathBuf::from(format!("/root/dir/{name}"));
            out.iter().position(|x| *x == p)
        };

        // Block head for first=2021 is the same-difference pair
        assert_eq!(out[0], PathBuf::from("/root/dir/g2021g2022"));

        // Pair guess precedes the four-token guess for the same end year
        for (single, four) in [
            ("g2021g2025", "g2021g2022g2025g2026"),
            ("g2021g2024", "g2021g2022g2024g2025"),
            ("g2021g2023", "g2021g2022g2023g2024"),
        ] {
            let (i, j) = (idx(single).unwrap(), idx(four).unwrap());
            assert!(i < j, "{single} should precede {four}");
        }

        // The first=2020 block starts strictly after every g2021* entry
        let head_2020 = idx("g2020g2021").unwrap();
        let last_2021 = out
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("g2021"))
            })
            .map(|(i, _)| i)
            .max()
            .unwrap();
        assert!(head_2020 > last_2021);
    }

    #[test]
    fn test_no_periods_passes_through() {
        let out = period_variants("/root/dir/personfil.dat", &fixed_config(3));
        assert_eq!(out, vec![PathBuf::from("/root/dir/personfil.dat")]);
    }

    #[test]
    fn test_three_periods_passes_through() {
        let out = period_variants("/root/dir/g2001g2002g2003", &fixed_config(3));
        assert_eq!(out, vec![PathBuf::from("/root/dir/g2001g2002g2003")]);
    }
}
