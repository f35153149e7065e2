// ─── Launch Configuration ───
// Process-scoped settings shared by the resolver, metadata reader and launcher.

use std::path::PathBuf;

use crate::core::error::{LauncherError, LauncherResult};

/// Scheme used to address resources inside the bundle and its nested archives.
pub const DEFAULT_SCHEME: &str = "jij";

/// Well-known location of the metadata record written by the packer.
pub const DEFAULT_METADATA_PATH: &str = "META-INF/bundle.properties";

/// Settings handed to the protocol resolver at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub scheme: String,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub protocol: ProtocolConfig,
    /// Record path looked up in every root of the ambient search path.
    pub metadata_path: String,
    /// Archives (or exploded directories) forming the ambient search path, in order.
    pub bundle_paths: Vec<PathBuf>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolConfig::default(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            bundle_paths: Vec::new(),
        }
    }
}

impl LaunchConfig {
    /// Configuration for a bundle that is the running executable itself.
    pub fn for_current_exe() -> LauncherResult<Self> {
        let exe = std::env::current_exe().map_err(|source| LauncherError::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })?;

        Ok(Self {
            bundle_paths: vec![exe],
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_the_jij_scheme_and_standard_record() {
        let config = LaunchConfig::default();
        assert_eq!(config.protocol.scheme, "jij");
        assert_eq!(config.metadata_path, "META-INF/bundle.properties");
        assert!(config.bundle_paths.is_empty());
    }

    #[test]
    fn current_exe_is_the_only_bundle() {
        let config = LaunchConfig::for_current_exe().unwrap();
        assert_eq!(config.bundle_paths.len(), 1);
        assert!(config.bundle_paths[0].exists());
    }
}
