// ─── Launch Task ───
// Resolves metadata, installs the jij: handler when dependencies exist, builds
// the loading context and hands control to the application's real entry point.

use std::sync::Arc;

use tracing::info;

use super::entry::EntryResolver;
use crate::core::archive::{ResourceSource, SearchPath};
use crate::core::config::LaunchConfig;
use crate::core::error::LauncherResult;
use crate::core::loader::{LoaderBuilder, LoadingContext};
use crate::core::metadata::{BundleMetadata, MetadataReader};
use crate::core::protocol::{HandlerRegistry, JarInJarResolver, ProtocolHandler};

pub struct Launcher<'a, R: EntryResolver> {
    config: LaunchConfig,
    ambient: Arc<SearchPath>,
    registry: &'a HandlerRegistry,
    resolver: Arc<dyn ProtocolHandler>,
    entries: R,
}

impl<R: EntryResolver> Launcher<'static, R> {
    /// Launcher over the configured bundle paths, using the process-wide registry.
    pub fn from_config(config: LaunchConfig, entries: R) -> LauncherResult<Self> {
        let ambient = Arc::new(SearchPath::from_paths(&config.bundle_paths)?);
        Ok(Self::new(config, ambient, HandlerRegistry::global(), entries))
    }
}

impl<'a, R: EntryResolver> Launcher<'a, R> {
    pub fn new(
        config: LaunchConfig,
        ambient: Arc<SearchPath>,
        registry: &'a HandlerRegistry,
        entries: R,
    ) -> Self {
        let outer: Arc<dyn ResourceSource> = ambient.clone();
        let resolver: Arc<dyn ProtocolHandler> =
            Arc::new(JarInJarResolver::new(config.protocol.clone(), outer));

        Self {
            config,
            ambient,
            registry,
            resolver,
            entries,
        }
    }

    /// Metadata and the loading context the application will run in.
    pub fn prepare(&self) -> LauncherResult<(BundleMetadata, LoadingContext)> {
        let metadata =
            MetadataReader::new(&self.ambient, &self.config.metadata_path).resolve()?;

        // The handler must exist before any nested root is built.
        if metadata.has_dependencies() {
            self.registry.install(Arc::clone(&self.resolver))?;
        }

        let context = LoaderBuilder::new(
            self.registry,
            &self.config.protocol,
            Arc::clone(&self.ambient),
        )
        .build(&metadata)?;

        Ok((metadata, context))
    }

    /// Launch the application with `args`. Failures of the application itself
    /// come back as [`LauncherError::Application`](crate::core::error::LauncherError::Application).
    pub fn launch(&self, args: Vec<String>) -> LauncherResult<()> {
        let (metadata, context) = self.prepare()?;
        let entry = self.entries.resolve(&context, metadata.entry_point())?;

        info!(
            "Invoking {} from {} with {} arguments",
            entry.class().name,
            entry.class().origin,
            args.len()
        );
        entry.invoke(&context, args)
    }
}
