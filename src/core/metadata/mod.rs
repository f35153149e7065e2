// ─── Bundle Metadata ───
// What the packer records about the bundle: the real entry point, where the
// dependency archives live, and which ones to load (in priority order).

mod reader;
mod record;

pub use reader::MetadataReader;
pub use record::MetadataRecord;

use serde::de::value::MapDeserializer;
use serde::Deserialize;
use tracing::warn;

use crate::core::archive::normalize_entry_name;
use crate::core::error::{LauncherError, LauncherResult};

pub const KEY_ENTRY_POINT: &str = "application-entry-point";
pub const KEY_DEPENDENCY_ROOT: &str = "dependency-root-path";
pub const KEY_DEPENDENCY_ARCHIVES: &str = "dependency-archive-list";

/// Separator between archive names in `dependency-archive-list`.
pub const ARCHIVE_LIST_SEPARATOR: char = '/';

/// Record as written, before trimming and normalization.
#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(rename = "application-entry-point", default)]
    entry_point: String,
    #[serde(rename = "dependency-root-path", default)]
    dependency_root: String,
    #[serde(rename = "dependency-archive-list", default)]
    dependency_archives: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMetadata {
    entry_point: String,
    dependency_root: String,
    dependency_archives: Vec<String>,
}

impl BundleMetadata {
    pub fn new(entry_point: &str, dependency_root: &str, dependency_archives: &[&str]) -> Self {
        Self {
            entry_point: entry_point.trim().to_string(),
            dependency_root: normalize_dependency_root(dependency_root),
            dependency_archives: split_archive_list(
                &dependency_archives.join(ARCHIVE_LIST_SEPARATOR.to_string().as_str()),
            ),
        }
    }

    /// Interpret a parsed record. Returns `Ok(None)` when the record has no
    /// usable entry point (missing or blank), so the caller can keep looking.
    pub fn from_record(record: MetadataRecord) -> LauncherResult<Option<Self>> {
        let raw = RawMetadata::deserialize(MapDeserializer::<_, serde::de::value::Error>::new(
            record.into_iter(),
        ))
        .map_err(|e| LauncherError::MetadataParse {
            line: 0,
            reason: e.to_string(),
        })?;

        let entry_point = raw.entry_point.trim();
        if entry_point.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            entry_point: entry_point.to_string(),
            dependency_root: normalize_dependency_root(&raw.dependency_root),
            dependency_archives: split_archive_list(&raw.dependency_archives),
        }))
    }

    /// Fully qualified name of the class holding the real entry method.
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    /// Either empty or ending with `/`.
    pub fn dependency_root(&self) -> &str {
        &self.dependency_root
    }

    pub fn dependency_archives(&self) -> &[String] {
        &self.dependency_archives
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependency_archives.is_empty()
    }

    /// Bundle-relative path of every dependency archive, in listed order.
    pub fn dependency_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.dependency_archives
            .iter()
            .map(move |name| format!("{}{}", self.dependency_root, name))
    }

    /// The record a packer writes for this metadata.
    pub fn to_record(&self) -> MetadataRecord {
        let mut record = MetadataRecord::default();
        record.insert(KEY_ENTRY_POINT, self.entry_point.clone());
        record.insert(KEY_DEPENDENCY_ROOT, self.dependency_root.clone());
        record.insert(
            KEY_DEPENDENCY_ARCHIVES,
            self.dependency_archives
                .join(ARCHIVE_LIST_SEPARATOR.to_string().as_str()),
        );
        record
    }
}

/// Trim, drop `./` prefixes and make sure a non-empty root ends with `/`.
fn normalize_dependency_root(raw: &str) -> String {
    let trimmed = normalize_entry_name(raw.trim());
    if trimmed.is_empty() || trimmed == "." {
        return String::new();
    }
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Split the `/`-joined archive list. Blank items are dropped; a repeated name
/// keeps its first position.
fn split_archive_list(raw: &str) -> Vec<String> {
    let mut archives: Vec<String> = Vec::new();
    for name in raw.split(ARCHIVE_LIST_SEPARATOR) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if archives.iter().any(|existing| existing == name) {
            warn!("Dependency archive '{}' is listed more than once", name);
            continue;
        }
        archives.push(name.to_string());
    }
    archives
}
