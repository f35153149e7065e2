pub mod root;
pub mod search_path;

pub use root::{normalize_entry_name, ArchiveRoot, DirectoryRoot, ResourceSource};
pub use search_path::SearchPath;
