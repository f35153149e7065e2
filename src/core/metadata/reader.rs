// ─── Metadata Reader ───
// Several roots may carry a record at the well-known path (merged search
// paths). They are tried in order; the first usable one wins.

use tracing::{debug, info};

use super::{BundleMetadata, MetadataRecord, KEY_ENTRY_POINT};
use crate::core::archive::SearchPath;
use crate::core::error::{LauncherError, LauncherResult};

pub struct MetadataReader<'a> {
    search_path: &'a SearchPath,
    record_path: &'a str,
}

impl<'a> MetadataReader<'a> {
    pub fn new(search_path: &'a SearchPath, record_path: &'a str) -> Self {
        Self {
            search_path,
            record_path,
        }
    }

    /// Find the first record with a non-blank entry point.
    ///
    /// Records that cannot be read or parsed are skipped. Fails with
    /// `MetadataMissing` when no root has a record at all, and with
    /// `MetadataIncomplete` when none of them names an entry point.
    pub fn resolve(&self) -> LauncherResult<BundleMetadata> {
        let mut candidates = 0usize;

        for root in self.search_path.roots() {
            let origin = root.describe();
            let bytes = match root.read(self.record_path) {
                Ok(Some(bytes)) => bytes,
                Ok(None) => continue,
                Err(e) => {
                    candidates += 1;
                    debug!("Skipping unreadable metadata record in {}: {}", origin, e);
                    continue;
                }
            };
            candidates += 1;

            match MetadataRecord::parse(&bytes).and_then(BundleMetadata::from_record) {
                Ok(Some(metadata)) => {
                    info!(
                        "Using bundle metadata from {} (entry point {}, {} dependency archives)",
                        origin,
                        metadata.entry_point(),
                        metadata.dependency_archives().len()
                    );
                    return Ok(metadata);
                }
                Ok(None) => {
                    debug!("Metadata record in {} has no {}", origin, KEY_ENTRY_POINT);
                }
                Err(e) => {
                    debug!("Skipping malformed metadata record in {}: {}", origin, e);
                }
            }
        }

        if candidates == 0 {
            Err(LauncherError::MetadataMissing {
                path: self.record_path.to_string(),
            })
        } else {
            Err(LauncherError::MetadataIncomplete {
                key: KEY_ENTRY_POINT.to_string(),
            })
        }
    }
}
