// ─── Jar-in-Jar Resolver ───
// Maps `jij:` URIs to bytes inside the outer bundle or inside an archive that is
// itself stored in the outer bundle. Nothing is ever extracted to disk.

use std::io::{Cursor, Read};
use std::sync::Arc;

use tracing::debug;

use super::uri::VirtualUri;
use crate::core::archive::{normalize_entry_name, ArchiveRoot, ResourceSource};
use crate::core::config::ProtocolConfig;
use crate::core::error::{LauncherError, LauncherResult};

/// Read-only resolver for one URI scheme.
///
/// Opening is the only observable action and is repeatable: every call
/// hands out an independent stream.
pub trait ProtocolHandler: Send + Sync {
    fn scheme(&self) -> &str;

    /// Resolve `uri` fully into memory.
    fn read(&self, uri: &VirtualUri) -> LauncherResult<Vec<u8>>;

    fn open(&self, uri: &VirtualUri) -> LauncherResult<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.read(uri)?)))
    }
}

/// Open the archive addressed by a plain URI as a random-access archive in memory.
pub fn open_nested_archive(
    handler: &dyn ProtocolHandler,
    archive_uri: &VirtualUri,
) -> LauncherResult<ArchiveRoot> {
    let bytes = handler.read(archive_uri)?;
    debug!("Opened nested archive {} ({} bytes)", archive_uri, bytes.len());
    ArchiveRoot::from_bytes(archive_uri.to_string(), bytes)
}

pub struct JarInJarResolver {
    config: ProtocolConfig,
    /// The resource-fetch primitive of the context that loaded the launcher.
    outer: Arc<dyn ResourceSource>,
}

impl JarInJarResolver {
    pub fn new(config: ProtocolConfig, outer: Arc<dyn ResourceSource>) -> Self {
        Self { config, outer }
    }

    fn read_plain(&self, uri: &VirtualUri) -> LauncherResult<Vec<u8>> {
        let decoded = VirtualUri::decode(uri.path())?;
        let path = normalize_entry_name(&decoded);
        if path.is_empty() {
            return Err(not_found(uri));
        }

        self.outer.read(path)?.ok_or_else(|| not_found(uri))
    }

    fn read_nested(
        &self,
        uri: &VirtualUri,
        archive_uri: &VirtualUri,
        raw_inner: &str,
    ) -> LauncherResult<Vec<u8>> {
        let inner = VirtualUri::decode(raw_inner)?;
        let archive = open_nested_archive(self, archive_uri)?;
        archive.read(&inner)?.ok_or_else(|| not_found(uri))
    }
}

impl ProtocolHandler for JarInJarResolver {
    fn scheme(&self) -> &str {
        &self.config.scheme
    }

    fn read(&self, uri: &VirtualUri) -> LauncherResult<Vec<u8>> {
        if !uri.scheme().eq_ignore_ascii_case(&self.config.scheme) {
            return Err(LauncherError::UnknownScheme(uri.scheme().to_string()));
        }

        let bytes = match uri.nested_parts() {
            Some((archive_uri, inner)) => self.read_nested(uri, &archive_uri, inner)?,
            None => self.read_plain(uri)?,
        };
        debug!("Resolved {} ({} bytes)", uri, bytes.len());
        Ok(bytes)
    }
}

fn not_found(uri: &VirtualUri) -> LauncherError {
    LauncherError::ResourceNotFound {
        uri: uri.to_string(),
    }
}
