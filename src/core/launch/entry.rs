// ─── Entry Points ───
// "Given a fully qualified class name, produce a callable or fail."

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{ApplicationError, LauncherError, LauncherResult};
use crate::core::loader::{LoadedClass, LoadingContext};

/// An application's real `main`: receives the loading context it runs in and
/// the unmodified argument vector.
pub type EntryFn =
    Arc<dyn Fn(&LoadingContext, Vec<String>) -> Result<(), ApplicationError> + Send + Sync>;

/// Resolved entry point, ready to be invoked.
pub struct EntryPoint {
    class: LoadedClass,
    main: EntryFn,
}

impl EntryPoint {
    pub fn class(&self) -> &LoadedClass {
        &self.class
    }

    /// Run the application. Its error is handed back as-is.
    pub fn invoke(&self, context: &LoadingContext, args: Vec<String>) -> LauncherResult<()> {
        (self.main)(context, args).map_err(LauncherError::Application)
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("class", &self.class.name)
            .field("origin", &self.class.origin)
            .finish()
    }
}

pub trait EntryResolver {
    /// Locate class `name` in `context` and its entry method.
    fn resolve(&self, context: &LoadingContext, name: &str) -> LauncherResult<EntryPoint>;
}

/// Explicit name → entry method table.
///
/// A registered method is only reachable when its class is present in the
/// loading context, so registering code does not bypass packaging.
#[derive(Default, Clone)]
pub struct EntryRegistry {
    entries: HashMap<String, EntryFn>,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, class_name: &str, main: F) -> &mut Self
    where
        F: Fn(&LoadingContext, Vec<String>) -> Result<(), ApplicationError> + Send + Sync + 'static,
    {
        self.entries
            .insert(class_name.trim().to_string(), Arc::new(main));
        self
    }

    pub fn with_entry<F>(mut self, class_name: &str, main: F) -> Self
    where
        F: Fn(&LoadingContext, Vec<String>) -> Result<(), ApplicationError> + Send + Sync + 'static,
    {
        self.register(class_name, main);
        self
    }
}

impl EntryResolver for EntryRegistry {
    fn resolve(&self, context: &LoadingContext, name: &str) -> LauncherResult<EntryPoint> {
        let class = context.load_class(name)?;
        let main = self
            .entries
            .get(class.name.as_str())
            .cloned()
            .ok_or_else(|| LauncherError::EntryMethodNotFound(class.name.clone()))?;

        Ok(EntryPoint { class, main })
    }
}
