// ─── Loading Context ───
// Resolves classes and resources by name. An isolated context searches only its
// own roots: there is no parent and no fallback to the launcher's context.

use std::sync::Arc;

use tracing::debug;

use super::roots::VirtualRoot;
use crate::core::archive::{ResourceSource, SearchPath};
use crate::core::error::{LauncherError, LauncherResult};

/// File extension of a class descriptor inside an archive.
pub const CLASS_SUFFIX: &str = ".class";

/// Map `a.b.C` to `a/b/C.class`. `None` for names that cannot be a class.
pub fn class_resource_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let segments: Vec<&str> = name.split('.').collect();
    let valid = segments
        .iter()
        .all(|segment| !segment.is_empty() && !segment.contains(|c: char| matches!(c, '/' | '\\' | '!')));
    if !valid {
        return None;
    }

    Some(format!("{}{}", segments.join("/"), CLASS_SUFFIX))
}

/// A class found by name, with the root it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedClass {
    pub name: String,
    pub origin: String,
    pub bytes: Vec<u8>,
}

/// Ordered roots with first-hit-wins lookup. Never empty; the outer root is first.
#[derive(Debug)]
pub struct IsolatedLoader {
    roots: Vec<VirtualRoot>,
}

impl IsolatedLoader {
    pub fn new(roots: Vec<VirtualRoot>) -> LauncherResult<Self> {
        match roots.first() {
            Some(first) if first.is_outer() => Ok(Self { roots }),
            Some(_) => Err(LauncherError::Other(
                "Isolated loader must search the outer bundle first".into(),
            )),
            None => Err(LauncherError::Other(
                "Isolated loader needs at least one root".into(),
            )),
        }
    }

    pub fn roots(&self) -> &[VirtualRoot] {
        &self.roots
    }
}

impl ResourceSource for IsolatedLoader {
    fn describe(&self) -> String {
        let bases: Vec<String> = self.roots.iter().map(|root| root.describe()).collect();
        format!("isolated[{}]", bases.join(", "))
    }

    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        for root in &self.roots {
            if let Some(bytes) = root.read(name)? {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

pub enum LoadingContext {
    /// The context the launcher itself was loaded from.
    Ambient(Arc<SearchPath>),
    Isolated(IsolatedLoader),
}

impl LoadingContext {
    pub fn is_isolated(&self) -> bool {
        matches!(self, LoadingContext::Isolated(_))
    }

    /// Roots of an isolated context; `None` for the ambient one.
    pub fn roots(&self) -> Option<&[VirtualRoot]> {
        match self {
            LoadingContext::Ambient(_) => None,
            LoadingContext::Isolated(loader) => Some(loader.roots()),
        }
    }

    /// Bytes of the first resource named `name`.
    pub fn resource(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        self.source().read(name)
    }

    /// Every resource named `name`, in search order, with its origin.
    ///
    /// In an isolated context the outer root contributes at most one hit:
    /// `jij:./` resolves through the launcher's search path, which answers with
    /// its first match only.
    pub fn resources(&self, name: &str) -> LauncherResult<Vec<(String, Vec<u8>)>> {
        match self {
            LoadingContext::Ambient(search_path) => search_path.read_all(name),
            LoadingContext::Isolated(loader) => {
                let mut hits = Vec::new();
                for root in loader.roots() {
                    if let Some(bytes) = root.read(name)? {
                        hits.push((root.uri_for(name).to_string(), bytes));
                    }
                }
                Ok(hits)
            }
        }
    }

    /// Where the first resource named `name` lives: a `jij:` URI for isolated
    /// contexts, the search path root for the ambient one.
    pub fn resource_origin(&self, name: &str) -> LauncherResult<Option<String>> {
        Ok(self.first_hit(name)?.map(|(origin, _)| origin))
    }

    /// Find the class `name` (fully qualified, `.`-separated).
    pub fn load_class(&self, name: &str) -> LauncherResult<LoadedClass> {
        let not_found = || LauncherError::ClassNotFound(name.to_string());
        let resource = class_resource_name(name).ok_or_else(not_found)?;
        let (origin, bytes) = self.first_hit(&resource)?.ok_or_else(not_found)?;

        debug!("Loaded class {} from {}", name, origin);
        Ok(LoadedClass {
            name: name.trim().to_string(),
            origin,
            bytes,
        })
    }

    fn first_hit(&self, name: &str) -> LauncherResult<Option<(String, Vec<u8>)>> {
        match self {
            LoadingContext::Ambient(search_path) => {
                for root in search_path.roots() {
                    if let Some(bytes) = root.read(name)? {
                        return Ok(Some((root.describe(), bytes)));
                    }
                }
            }
            LoadingContext::Isolated(loader) => {
                for root in loader.roots() {
                    if let Some(bytes) = root.read(name)? {
                        return Ok(Some((root.uri_for(name).to_string(), bytes)));
                    }
                }
            }
        }
        Ok(None)
    }

    fn source(&self) -> &dyn ResourceSource {
        match self {
            LoadingContext::Ambient(search_path) => &**search_path,
            LoadingContext::Isolated(loader) => loader,
        }
    }
}

impl std::fmt::Debug for LoadingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadingContext::Ambient(search_path) => f
                .debug_tuple("Ambient")
                .field(&search_path.describe())
                .finish(),
            LoadingContext::Isolated(loader) => f.debug_tuple("Isolated").field(loader).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_map_to_descriptor_paths() {
        assert_eq!(class_resource_name("app.Main").as_deref(), Some("app/Main.class"));
        assert_eq!(class_resource_name(" Main ").as_deref(), Some("Main.class"));
        assert_eq!(
            class_resource_name("com.example.deep.Thing").as_deref(),
            Some("com/example/deep/Thing.class")
        );
    }

    #[test]
    fn impossible_class_names_are_rejected() {
        assert!(class_resource_name("").is_none());
        assert!(class_resource_name("app..Main").is_none());
        assert!(class_resource_name(".Main").is_none());
        assert!(class_resource_name("app/Main").is_none());
        assert!(class_resource_name("lib.jar!.Main").is_none());
    }
}
