// ─── Virtual URIs ───
// `scheme:<opaque path>` identifiers. There is no authority, port or query:
// everything after the first `:` is a single path token, kept verbatim until
// the final resolution step decodes it.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::core::error::{LauncherError, LauncherResult};

/// Marker between an archive path and an entry inside that archive.
pub const NESTED_SEPARATOR: &str = "!/";

/// Characters escaped when a path is built from raw file/entry names.
/// `%` and `!` must be escaped so decoding restores the name byte for byte
/// and no name can fake a nested marker.
const PATH_COMPONENT: &AsciiSet = &CONTROLS.add(b' ').add(b'%').add(b'!');

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualUri {
    scheme: String,
    path: String,
}

impl VirtualUri {
    /// Parse a raw URI. Only the scheme is validated; the path is opaque.
    pub fn parse(raw: &str) -> LauncherResult<Self> {
        let (scheme, path) = raw
            .split_once(':')
            .ok_or_else(|| LauncherError::InvalidUri(format!("'{}' has no scheme", raw)))?;

        if !is_valid_scheme(scheme) {
            return Err(LauncherError::InvalidUri(format!(
                "'{}' has an invalid scheme",
                raw
            )));
        }
        if path.is_empty() {
            return Err(LauncherError::InvalidUri(format!("'{}' has no path", raw)));
        }

        Ok(Self {
            scheme: scheme.to_ascii_lowercase(),
            path: path.to_string(),
        })
    }

    /// URI of a file inside the outer bundle, built from a raw (unescaped) path.
    pub fn plain(scheme: &str, path: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            path: encode(path),
        }
    }

    /// URI of `inner_path` inside the archive stored at `archive_path`.
    pub fn nested(scheme: &str, archive_path: &str, inner_path: &str) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            path: format!(
                "{}{}{}",
                encode(archive_path),
                NESTED_SEPARATOR,
                encode(inner_path)
            ),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Raw (still escaped) path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_nested(&self) -> bool {
        self.path.contains(NESTED_SEPARATOR)
    }

    /// Split a nested URI at its first `!/` into the archive URI and the raw inner path.
    pub fn nested_parts(&self) -> Option<(VirtualUri, &str)> {
        let (archive, inner) = self.path.split_once(NESTED_SEPARATOR)?;
        let archive_uri = Self {
            scheme: self.scheme.clone(),
            path: archive.to_string(),
        };
        Some((archive_uri, inner))
    }

    /// Append a raw resource name to a directory-like URI (`jij:./`, `jij:lib/a.jar!/`).
    pub fn join(&self, name: &str) -> Self {
        let encoded = encode(name.trim_start_matches('/'));
        let path = if self.path.ends_with('/') {
            format!("{}{}", self.path, encoded)
        } else {
            format!("{}/{}", self.path, encoded)
        };
        Self {
            scheme: self.scheme.clone(),
            path,
        }
    }

    /// Percent-decode a raw path fragment.
    pub fn decode(raw: &str) -> LauncherResult<String> {
        percent_decode_str(raw)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| LauncherError::InvalidUri(format!("'{}' is not valid UTF-8", raw)))
    }
}

impl fmt::Display for VirtualUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}

impl FromStr for VirtualUri {
    type Err = LauncherError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_COMPONENT).to_string()
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_path_opaque() {
        let uri = VirtualUri::parse("jij:a//b?x=1#frag:c").unwrap();
        assert_eq!(uri.scheme(), "jij");
        assert_eq!(uri.path(), "a//b?x=1#frag:c");
        assert!(!uri.is_nested());
        assert_eq!(uri.to_string(), "jij:a//b?x=1#frag:c");
    }

    #[test]
    fn parse_does_not_treat_slashes_as_authority() {
        let uri = VirtualUri::parse("jij://host:8080/x").unwrap();
        assert_eq!(uri.path(), "//host:8080/x");
    }

    #[test]
    fn parse_lowercases_scheme_only() {
        let uri = VirtualUri::parse("JIJ:Lib/Foo.jar").unwrap();
        assert_eq!(uri.scheme(), "jij");
        assert_eq!(uri.path(), "Lib/Foo.jar");
    }

    #[test]
    fn parse_rejects_missing_scheme_or_path() {
        assert!(VirtualUri::parse("no-scheme-here").is_err());
        assert!(VirtualUri::parse("jij:").is_err());
        assert!(VirtualUri::parse(":path").is_err());
        assert!(VirtualUri::parse("1ab:path").is_err());
    }

    #[test]
    fn nested_parts_split_at_first_marker() {
        let uri = VirtualUri::parse("jij:lib/foo.jar!/a/B.class").unwrap();
        let (archive, inner) = uri.nested_parts().unwrap();
        assert_eq!(archive.to_string(), "jij:lib/foo.jar");
        assert_eq!(inner, "a/B.class");

        let uri = VirtualUri::parse("jij:x.jar!/y.jar!/z").unwrap();
        let (archive, inner) = uri.nested_parts().unwrap();
        assert_eq!(archive.path(), "x.jar");
        assert_eq!(inner, "y.jar!/z");
    }

    #[test]
    fn decoding_is_deferred_until_asked() {
        let uri = VirtualUri::parse("jij:lib/my%20lib.jar").unwrap();
        assert_eq!(uri.path(), "lib/my%20lib.jar");
        assert_eq!(VirtualUri::decode(uri.path()).unwrap(), "lib/my lib.jar");
        assert!(VirtualUri::decode("%FF").is_err());
    }

    #[test]
    fn built_uris_survive_awkward_names() {
        let uri = VirtualUri::nested("jij", "deps!/odd%name.jar", "a b/C.class");
        let (archive, inner) = uri.nested_parts().unwrap();
        assert_eq!(VirtualUri::decode(archive.path()).unwrap(), "deps!/odd%name.jar");
        assert_eq!(VirtualUri::decode(inner).unwrap(), "a b/C.class");

        let reparsed = VirtualUri::parse(&uri.to_string()).unwrap();
        assert_eq!(reparsed, uri);
    }

    #[test]
    fn join_appends_names() {
        let root = VirtualUri::parse("jij:./").unwrap();
        assert_eq!(root.join("a/B.class").to_string(), "jij:./a/B.class");

        let nested = VirtualUri::nested("jij", "lib/a.jar", "");
        assert_eq!(nested.to_string(), "jij:lib/a.jar!/");
        assert_eq!(nested.join("/x/Y.class").to_string(), "jij:lib/a.jar!/x/Y.class");
    }
}
