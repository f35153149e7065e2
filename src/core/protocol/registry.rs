// ─── Protocol Registry ───
// Scheme → handler table. Handlers are installed once and never removed.

use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, OnceLock, RwLock};

use tracing::info;

use super::resolver::ProtocolHandler;
use super::uri::VirtualUri;
use crate::core::error::{LauncherError, LauncherResult};

static GLOBAL_REGISTRY: OnceLock<HandlerRegistry> = OnceLock::new();

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn ProtocolHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static HandlerRegistry {
        GLOBAL_REGISTRY.get_or_init(HandlerRegistry::new)
    }

    /// Install `handler` for its scheme.
    ///
    /// Installing the same handler again is a no-op. Installing a different
    /// handler for a scheme that is already taken fails with
    /// [`LauncherError::HandlerAlreadyInstalled`].
    pub fn install(&self, handler: Arc<dyn ProtocolHandler>) -> LauncherResult<Arc<dyn ProtocolHandler>> {
        let scheme = handler.scheme().to_ascii_lowercase();
        let mut handlers = self
            .handlers
            .write()
            .map_err(|_| LauncherError::Other("Protocol registry is poisoned".into()))?;

        if let Some(existing) = handlers.get(&scheme) {
            if Arc::ptr_eq(existing, &handler) {
                return Ok(Arc::clone(existing));
            }
            return Err(LauncherError::HandlerAlreadyInstalled(scheme));
        }

        info!("Installed protocol handler for '{}:' URIs", scheme);
        handlers.insert(scheme, Arc::clone(&handler));
        Ok(handler)
    }

    pub fn handler(&self, scheme: &str) -> LauncherResult<Arc<dyn ProtocolHandler>> {
        let handlers = self
            .handlers
            .read()
            .map_err(|_| LauncherError::Other("Protocol registry is poisoned".into()))?;

        handlers
            .get(&scheme.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| LauncherError::UnknownScheme(scheme.to_string()))
    }

    pub fn is_installed(&self, scheme: &str) -> bool {
        self.handler(scheme).is_ok()
    }

    /// Open a raw URI through whichever handler owns its scheme.
    pub fn open(&self, raw: &str) -> LauncherResult<Box<dyn Read + Send>> {
        let uri: VirtualUri = raw.parse()?;
        self.handler(uri.scheme())?.open(&uri)
    }

    pub fn read(&self, raw: &str) -> LauncherResult<Vec<u8>> {
        let uri: VirtualUri = raw.parse()?;
        self.handler(uri.scheme())?.read(&uri)
    }
}
