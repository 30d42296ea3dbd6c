use std::path::Path;

use arrow_array::RecordBatch;
use registry::{FileDescription, Registry, datadok};
use stammer::{AliasMap, ResolveOptions, VariantConfig, look_for_file_on_disk, swap_dollar_root};

use crate::decode::{Encoding, decode_flatfile};
use crate::dtype::{declared_widths, map_types};
use crate::error::Result;

/// Options for the end-to-end open pipeline.
#[derive(Debug, Clone, Copy)]
pub struct OpenOptions {
    pub encoding: Encoding,
    pub resolve: ResolveOptions,
    pub variants: VariantConfig,
}

impl OpenOptions {
    /// Latin-1 decoding, lenient resolution, and a variant window
    /// anchored at the wall-clock year.
    pub fn new() -> Self {
        OpenOptions {
            encoding: Encoding::default(),
            resolve: ResolveOptions::default(),
            variants: VariantConfig::from_clock(),
        }
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a flat file into a typed record batch, pulling its column
/// layout from the registry.
///
/// `metadata_path` overrides where the description is probed from;
/// by default the data path itself is used. The concrete file is
/// discovered on disk via [`look_for_file_on_disk`].
pub fn open_flatfile_from_path<R: Registry, P: AsRef<Path>>(
    registry: &R,
    aliases: &AliasMap,
    path: P,
    metadata_path: Option<&Path>,
    options: &OpenOptions,
) -> Result<RecordBatch> {
    let probe_path = metadata_path.unwrap_or(path.as_ref());
    let (description, _) =
        datadok::file_description_by_path(registry, aliases, probe_path, &options.variants)?;
    open_with_description(&description, aliases, path, options)
}

/// Open a flat file against a previously snapshotted file description,
/// with no registry round-trip.
pub fn open_flatfile_from_snapshot<P: AsRef<Path>, Q: AsRef<Path>>(
    snapshot_path: P,
    data_path: Q,
    aliases: &AliasMap,
    options: &OpenOptions,
) -> Result<RecordBatch> {
    let snapshot = swap_dollar_root(snapshot_path, aliases);
    let file = std::fs::File::open(&snapshot)?;
    let document = serde_json::from_reader(file)?;
    let description = FileDescription::from_document(document)?;
    open_with_description(&description, aliases, data_path, options)
}

fn open_with_description<P: AsRef<Path>>(
    description: &FileDescription,
    aliases: &AliasMap,
    path: P,
    options: &OpenOptions,
) -> Result<RecordBatch> {
    let columns = description.columns();
    let schema = map_types(&columns)?;
    let widths = declared_widths(&columns)?;
    let file = look_for_file_on_disk(path, aliases, &options.resolve)?;
    decode_flatfile(file, &schema, &widths, options.encoding)
}
