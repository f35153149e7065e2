// Fixtures shared by the unit tests: in-memory bundles and temp directories.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Build a zip archive in memory. Entries are deflated.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    write_zip(entries, CompressionMethod::Deflated)
}

/// Build a zip archive whose entries are stored uncompressed.
pub fn stored_zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    write_zip(entries, CompressionMethod::Stored)
}

fn write_zip(entries: &[(&str, &[u8])], method: CompressionMethod) -> Vec<u8> {
    let options = SimpleFileOptions::default().compression_method(method);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Fresh scratch directory under the system temp dir, unique per test and process.
pub fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bundle-launcher-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
