// ─── Archive Roots ───
// Read-only views over the outer bundle: a zip archive on disk or in memory,
// or an exploded directory.

use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::error::{LauncherError, LauncherResult};

/// Anything that can answer "give me the bytes stored under this name".
///
/// `Ok(None)` means the name is simply not present; `Err` means the source
/// itself could not be read.
pub trait ResourceSource: Send + Sync {
    /// Human readable origin, used in logs and lookup results.
    fn describe(&self) -> String;

    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>>;
}

/// Strip the `./` and `/` prefixes a relative resource name may carry.
pub fn normalize_entry_name(name: &str) -> &str {
    let mut trimmed = name;
    loop {
        if let Some(rest) = trimmed.strip_prefix("./") {
            trimmed = rest;
        } else if let Some(rest) = trimmed.strip_prefix('/') {
            trimmed = rest;
        } else {
            return trimmed;
        }
    }
}

/// Upper bound on the buffer reserved up front from an entry's declared size.
const MAX_READ_RESERVE: u64 = 1 << 20;

trait ArchiveReader: Read + Seek + Send {}

impl<T: Read + Seek + Send> ArchiveReader for T {}

/// A zip archive opened once and shared by every lookup.
pub struct ArchiveRoot {
    label: String,
    archive: Mutex<ZipArchive<Box<dyn ArchiveReader>>>,
}

impl ArchiveRoot {
    pub fn open(path: &Path) -> LauncherResult<Self> {
        let file = File::open(path).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader: Box<dyn ArchiveReader> = Box::new(file);
        let archive = ZipArchive::new(reader)?;
        debug!("Opened archive {:?} ({} entries)", path, archive.len());

        Ok(Self {
            label: path.to_string_lossy().to_string(),
            archive: Mutex::new(archive),
        })
    }

    pub fn from_bytes(label: impl Into<String>, bytes: Vec<u8>) -> LauncherResult<Self> {
        let reader: Box<dyn ArchiveReader> = Box::new(Cursor::new(bytes));
        let archive = ZipArchive::new(reader)?;

        Ok(Self {
            label: label.into(),
            archive: Mutex::new(archive),
        })
    }
}

impl ResourceSource for ArchiveRoot {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        let name = normalize_entry_name(name);
        if name.is_empty() || name.ends_with('/') {
            return Ok(None);
        }

        let mut archive = self
            .archive
            .lock()
            .map_err(|_| LauncherError::Other(format!("Archive {} is poisoned", self.label)))?;

        let mut entry = match archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if entry.is_dir() {
            return Ok(None);
        }

        // Declared sizes are untrusted header data.
        let mut bytes = Vec::with_capacity(entry.size().min(MAX_READ_RESERVE) as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| LauncherError::Io {
                path: PathBuf::from(format!("{}!/{}", self.label, name)),
                source,
            })?;
        Ok(Some(bytes))
    }
}

/// An exploded bundle on disk. Handy while developing an application.
pub struct DirectoryRoot {
    path: PathBuf,
}

impl DirectoryRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ResourceSource for DirectoryRoot {
    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn read(&self, name: &str) -> LauncherResult<Option<Vec<u8>>> {
        let name = normalize_entry_name(name);
        let relative = Path::new(name);

        // Never step outside the root.
        if name.is_empty()
            || relative
                .components()
                .any(|component| !matches!(component, Component::Normal(_)))
        {
            return Ok(None);
        }

        let candidate = self.path.join(relative);
        if !candidate.is_file() {
            return Ok(None);
        }

        std::fs::read(&candidate)
            .map(Some)
            .map_err(|source| LauncherError::Io {
                path: candidate,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::zip_bytes;

    #[test]
    fn normalize_strips_relative_prefixes() {
        assert_eq!(normalize_entry_name("./a/B.class"), "a/B.class");
        assert_eq!(normalize_entry_name("/./a"), "a");
        assert_eq!(normalize_entry_name("lib/x.jar"), "lib/x.jar");
        assert_eq!(normalize_entry_name("./"), "");
    }

    #[test]
    fn archive_root_reads_entries_and_reports_absence() {
        let root = ArchiveRoot::from_bytes(
            "bundle",
            zip_bytes(&[("a/B.class", b"class-b")]),
        )
        .unwrap();

        assert_eq!(root.read("a/B.class").unwrap().unwrap(), b"class-b");
        assert_eq!(root.read("./a/B.class").unwrap().unwrap(), b"class-b");
        assert!(root.read("a/C.class").unwrap().is_none());
        assert!(root.read("./").unwrap().is_none());
    }

    #[test]
    fn archive_root_opens_from_disk() {
        let temp = std::env::temp_dir().join(format!("archive-root-disk-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(&temp).unwrap();
        let path = temp.join("bundle.jar");
        std::fs::write(&path, zip_bytes(&[("hello.txt", b"hi")])).unwrap();

        let root = ArchiveRoot::open(&path).unwrap();
        assert_eq!(root.read("hello.txt").unwrap().unwrap(), b"hi");
        assert!(root.describe().ends_with("bundle.jar"));

        let _ = std::fs::remove_dir_all(&temp);
    }

    #[test]
    fn lying_size_header_fails_the_read() {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .large_file(true);
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        writer.start_file("a/B.class", options).unwrap();
        std::io::Write::write_all(&mut writer, b"tiny").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        // Zip64 extra fields carry the uncompressed and compressed sizes side by side.
        let mut honest = Vec::new();
        honest.extend_from_slice(&4u64.to_le_bytes());
        honest.extend_from_slice(&4u64.to_le_bytes());
        let mut lying = Vec::new();
        lying.extend_from_slice(&(u64::MAX / 2).to_le_bytes());
        lying.extend_from_slice(&(u64::MAX / 2).to_le_bytes());

        let mut patched = 0;
        let mut idx = 0;
        while idx + honest.len() <= bytes.len() {
            if bytes[idx..idx + honest.len()] == honest[..] {
                bytes[idx..idx + honest.len()].copy_from_slice(&lying);
                patched += 1;
                idx += honest.len();
            } else {
                idx += 1;
            }
        }
        assert!(patched > 0);

        match ArchiveRoot::from_bytes("lying", bytes) {
            Ok(root) => assert!(root.read("a/B.class").is_err()),
            Err(LauncherError::Zip(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn archive_root_rejects_garbage() {
        assert!(ArchiveRoot::from_bytes("junk", b"not a zip".to_vec()).is_err());
    }

    #[test]
    fn directory_root_refuses_to_escape() {
        let temp = std::env::temp_dir().join(format!("directory-root-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&temp);
        std::fs::create_dir_all(temp.join("inner/a")).unwrap();
        std::fs::write(temp.join("inner/a/B.class"), b"b").unwrap();
        std::fs::write(temp.join("secret.txt"), b"secret").unwrap();

        let root = DirectoryRoot::new(temp.join("inner"));
        assert_eq!(root.read("a/B.class").unwrap().unwrap(), b"b");
        assert!(root.read("../secret.txt").unwrap().is_none());
        assert!(root.read("a").unwrap().is_none());

        let _ = std::fs::remove_dir_all(&temp);
    }
}
