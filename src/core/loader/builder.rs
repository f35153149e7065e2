// ─── Loader Builder ───
// Turns bundle metadata into the loading context the application runs in.
//
// The isolated context has no parent and no fallback root. A class reachable
// from the launcher's context is still defined by the isolated one, so what it
// resolves later keeps seeing the dependency archives.

use std::sync::Arc;

use tracing::{debug, info};

use super::context::{IsolatedLoader, LoadingContext};
use super::roots::VirtualRoot;
use crate::core::archive::SearchPath;
use crate::core::config::ProtocolConfig;
use crate::core::error::LauncherResult;
use crate::core::metadata::BundleMetadata;
use crate::core::protocol::HandlerRegistry;

pub struct LoaderBuilder<'a> {
    registry: &'a HandlerRegistry,
    protocol: &'a ProtocolConfig,
    ambient: Arc<SearchPath>,
}

impl<'a> LoaderBuilder<'a> {
    pub fn new(
        registry: &'a HandlerRegistry,
        protocol: &'a ProtocolConfig,
        ambient: Arc<SearchPath>,
    ) -> Self {
        Self {
            registry,
            protocol,
            ambient,
        }
    }

    /// Outer root first, then one nested root per dependency archive in listed order.
    ///
    /// Requires the protocol handler to be installed already.
    pub fn roots(&self, metadata: &BundleMetadata) -> LauncherResult<Vec<VirtualRoot>> {
        let handler = self.registry.handler(&self.protocol.scheme)?;

        let mut roots = vec![VirtualRoot::outer(Arc::clone(&handler))];
        for archive_path in metadata.dependency_paths() {
            let root = VirtualRoot::nested(Arc::clone(&handler), &archive_path);
            debug!("Dependency root: {}", root.base());
            roots.push(root);
        }
        Ok(roots)
    }

    pub fn build(&self, metadata: &BundleMetadata) -> LauncherResult<LoadingContext> {
        if !metadata.has_dependencies() {
            info!("No dependency archives listed, keeping the launcher's loading context");
            return Ok(LoadingContext::Ambient(Arc::clone(&self.ambient)));
        }

        let roots = self.roots(metadata)?;
        info!(
            "Isolated loading context over the bundle root and {} dependency archives",
            roots.len() - 1
        );
        Ok(LoadingContext::Isolated(IsolatedLoader::new(roots)?))
    }
}
