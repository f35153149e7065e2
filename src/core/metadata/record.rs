// ─── Metadata Record ───
// Flat `key=value` text record written by the packer.

use std::collections::BTreeMap;

use crate::core::error::{LauncherError, LauncherResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: BTreeMap<String, String>,
}

impl MetadataRecord {
    /// Parse a record.
    ///
    /// Rules:
    /// - content must be UTF-8
    /// - blank lines and lines starting with `#` or `!` are ignored
    /// - every other line is `key=value`; key and value are trimmed
    /// - an empty or repeated key is an error
    pub fn parse(bytes: &[u8]) -> LauncherResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| LauncherError::MetadataParse {
            line: 0,
            reason: format!("not UTF-8: {}", e),
        })?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut entries = BTreeMap::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| LauncherError::MetadataParse {
                line: line_no,
                reason: format!("expected key=value, got '{}'", line),
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(LauncherError::MetadataParse {
                    line: line_no,
                    reason: "empty key".into(),
                });
            }

            if entries
                .insert(key.to_string(), value.trim().to_string())
                .is_some()
            {
                return Err(LauncherError::MetadataParse {
                    line: line_no,
                    reason: format!("duplicate key '{}'", key),
                });
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render back into record text, one `key=value` per line.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}\n", k, v))
            .collect()
    }
}

impl IntoIterator for MetadataRecord {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
