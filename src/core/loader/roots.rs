// ─── Virtual Roots ───
// One searchable location of an isolated loading context: the outer bundle
// itself, or an archive nested inside it.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::core::archive::{normalize_entry_name, ArchiveRoot, ResourceSource};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::protocol::{open_nested_archive, ProtocolHandler, VirtualUri};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootLocation {
    /// Code embedded directly in the outer bundle.
    Outer,
    /// The archive stored at `archive_path` inside the outer bundle.
    Nested { archive_path: String },
}

pub struct VirtualRoot {
    location: RootLocation,
    base: VirtualUri,
    handler: Arc<dyn ProtocolHandler>,
    /// Opened on first lookup and kept for the lifetime of the root.
    archive: OnceLock<ArchiveRoot>,
}

impl VirtualRoot {
    /// `jij:./`
    pub fn outer(handler: Arc<dyn ProtocolHandler>) -> Self {
        let base = VirtualUri::plain(handler.scheme(), "./");
        Self {
            location: RootLocation::Outer,
            base,
            handler,
            archive: OnceLock::new(),
        }
    }

    /// `jij:<archive_path>!/`
    pub fn nested(handler: Arc<dyn ProtocolHandler>, archive_path: &str) -> Self {
        let base = VirtualUri::nested(handler.scheme(), archive_path, "");
        Self {
            location: RootLocation::Nested {
                archive_path: archive_path.to_string(),
            },
            base,
            handler,
            archive: OnceLock::new(),
        }
    }

    pub fn location(&self) -> &RootLocation {
        &self.location
    }

    pub fn base(&self) -> &VirtualUri {
        &self.base
    }

    pub fn is_outer(&self) -> bool {
        self.location == RootLocation::Outer
    }

    /// URI naming `name` under this root.
    pub fn uri_for(&self, name: &str) -> VirtualUri {
        self.base.join(normalize_entry_name(name))
    }

    fn nested_archive(&self, archive_path: &str) -> LauncherResult<&ArchiveRoot> {
        if let Some(archive) = self.archive.get() {
            return Ok(archive);
        }

        let archive_uri = VirtualUri::plain(self.handler.scheme(), archive_path);
        let opened = open_nested_archive(self.handler.as_ref(), &archive_uri)?;
        Ok(self.archive.get_or_init(|| opened))
    }
}

impl ResourceSource for VirtualRoot {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        let name = normalize_entry_name(name);
        if name.is_empty() {
            return Ok(None);
        }

        match &self.location {
            RootLocation::Outer => match self.handler.read(&self.uri_for(name)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(LauncherError::ResourceNotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            },
            RootLocation::Nested { archive_path } => {
                let archive = self.nested_archive(archive_path)?;
                let found = archive.read(name)?;
                if found.is_some() {
                    debug!("Found {} in {}", name, self.base);
                }
                Ok(found)
            }
        }
    }
}

impl fmt::Debug for VirtualRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualRoot")
            .field("location", &self.location)
            .field("base", &self.base.to_string())
            .finish()
    }
}
