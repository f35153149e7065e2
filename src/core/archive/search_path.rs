// ─── Search Path ───
// The launcher's own (ambient) loading context: every root it was started with,
// in order. Several roots may carry a metadata record after classpath merging.

use std::path::PathBuf;

use tracing::debug;

use super::root::{ArchiveRoot, DirectoryRoot, ResourceSource};
use crate::core::error::LauncherResult;

#[derive(Default)]
pub struct SearchPath {
    roots: Vec<Box<dyn ResourceSource>>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open each path as a directory root or an archive root.
    pub fn from_paths(paths: &[PathBuf]) -> LauncherResult<Self> {
        let mut search_path = Self::new();
        for path in paths {
            if path.is_dir() {
                debug!("Search path root (directory): {:?}", path);
                search_path.push(DirectoryRoot::new(path.clone()));
            } else {
                debug!("Search path root (archive): {:?}", path);
                search_path.push(ArchiveRoot::open(path)?);
            }
        }
        Ok(search_path)
    }

    pub fn push(&mut self, root: impl ResourceSource + 'static) {
        self.roots.push(Box::new(root));
    }

    pub fn with_root(mut self, root: impl ResourceSource + 'static) -> Self {
        self.push(root);
        self
    }

    pub fn roots(&self) -> impl Iterator<Item = &dyn ResourceSource> {
        self.roots.iter().map(|root| root.as_ref())
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every hit for `name`, in root order, tagged with the root it came from.
    pub fn read_all(&self, name: &str) -> LauncherResult<Vec<(String, Vec<u8>)>> {
        let mut hits = Vec::new();
        for root in self.roots() {
            if let Some(bytes) = root.read(name)? {
                hits.push((root.describe(), bytes));
            }
        }
        Ok(hits)
    }
}

impl ResourceSource for SearchPath {
    fn describe(&self) -> String {
        let labels: Vec<String> = self.roots().map(|root| root.describe()).collect();
        format!("[{}]", labels.join(", "))
    }

    /// First root that has `name` wins.
    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        for root in self.roots() {
            if let Some(bytes) = root.read(name)? {
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{scratch_dir, zip_bytes};

    #[test]
    fn first_root_wins_and_all_hits_are_listed() {
        let search_path = SearchPath::new()
            .with_root(ArchiveRoot::from_bytes("first", zip_bytes(&[("x.txt", b"one")])).unwrap())
            .with_root(ArchiveRoot::from_bytes("second", zip_bytes(&[("x.txt", b"two")])).unwrap());

        assert_eq!(search_path.read("x.txt").unwrap().unwrap(), b"one");

        let hits = search_path.read_all("x.txt").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], ("first".to_string(), b"one".to_vec()));
        assert_eq!(hits[1], ("second".to_string(), b"two".to_vec()));
        assert!(search_path.read("missing").unwrap().is_none());
    }

    #[test]
    fn from_paths_mixes_directories_and_archives() {
        let temp = scratch_dir("search-path-mixed");
        let exploded = temp.join("classes");
        std::fs::create_dir_all(&exploded).unwrap();
        std::fs::write(exploded.join("only-in-dir.txt"), b"dir").unwrap();
        let archive = temp.join("bundle.jar");
        std::fs::write(&archive, zip_bytes(&[("only-in-jar.txt", b"jar")])).unwrap();

        let search_path = SearchPath::from_paths(&[exploded, archive]).unwrap();
        assert_eq!(search_path.len(), 2);
        assert_eq!(search_path.read("only-in-dir.txt").unwrap().unwrap(), b"dir");
        assert_eq!(search_path.read("only-in-jar.txt").unwrap().unwrap(), b"jar");

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn from_paths_fails_on_missing_archive() {
        let temp = scratch_dir("search-path-missing");
        assert!(SearchPath::from_paths(&[temp.join("nope.jar")]).is_err());
        let _ = std::fs::remove_dir_all(&temp);
    }
}
