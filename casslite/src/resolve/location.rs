//! Resource identity and content access.

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{CassliteError, CassliteResult};
use crate::resolve::archive;

/// Text encoding declared for a script resource. UTF-8 unless stated.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

impl TextEncoding {
    fn decode(self, bytes: Vec<u8>) -> Result<String, String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| e.to_string()),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Latin1 => write!(f, "Latin-1"),
        }
    }
}

/// Where the bytes of a resource live.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceSource {
    /// Regular file on the local filesystem.
    File(PathBuf),
    /// Entry inside a tar / tar.gz archive, identified by its `/`-separated
    /// entry path.
    ArchiveEntry { archive: PathBuf, entry: String },
}

/// A resolved resource: a location identifier plus its text encoding.
///
/// Two locations are equal iff identifier and encoding match. The canonical
/// string form (`/abs/path` or `/abs/archive.tar.gz!/entry/path`) defines the
/// sort order of resolver output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLocation {
    source: ResourceSource,
    encoding: TextEncoding,
}

impl ResourceLocation {
    /// Location of a plain file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ResourceSource::File(path.into()),
            encoding: TextEncoding::default(),
        }
    }

    /// Location of an archive entry.
    pub fn archive_entry(archive: impl Into<PathBuf>, entry: impl Into<String>) -> Self {
        Self {
            source: ResourceSource::ArchiveEntry {
                archive: archive.into(),
                entry: entry.into(),
            },
            encoding: TextEncoding::default(),
        }
    }

    /// Declare the encoding used by [`read_text`](Self::read_text).
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn source(&self) -> &ResourceSource {
        &self.source
    }

    /// Canonical string form of the identifier.
    pub fn uri(&self) -> String {
        match &self.source {
            ResourceSource::File(path) => path.display().to_string(),
            ResourceSource::ArchiveEntry { archive, entry } => {
                format!("{}!/{}", archive.display(), entry)
            }
        }
    }

    /// Read the raw bytes of the resource.
    pub fn read_bytes(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            ResourceSource::File(path) => fs::read(path),
            ResourceSource::ArchiveEntry { archive: path, entry } => {
                archive::read_entry(path, entry)
            }
        }
    }

    /// Read and decode the resource text, attaching the location on failure.
    pub fn read_text(&self) -> CassliteResult<String> {
        let bytes = self
            .read_bytes()
            .map_err(|e| CassliteError::Resource(format!("({self}) could not be read: {e}")))?;
        self.encoding.decode(bytes).map_err(|e| {
            CassliteError::Resource(format!("({self}) is not valid {} text: {e}", self.encoding))
        })
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl Ord for ResourceLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.uri()
            .cmp(&other.uri())
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| self.encoding.cmp(&other.encoding))
    }
}

impl PartialOrd for ResourceLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_uses_bang_slash_for_archive_entries() {
        let location = ResourceLocation::archive_entry("/tmp/scripts.tar.gz", "init/roles.cql");
        assert_eq!(location.uri(), "/tmp/scripts.tar.gz!/init/roles.cql");
    }

    #[test]
    fn equality_considers_encoding() {
        let utf8 = ResourceLocation::file("/tmp/roles.cql");
        let latin1 = ResourceLocation::file("/tmp/roles.cql").with_encoding(TextEncoding::Latin1);
        assert_ne!(utf8, latin1);
        assert_eq!(utf8, ResourceLocation::file("/tmp/roles.cql"));
    }

    #[test]
    fn locations_sort_by_canonical_string() {
        let mut locations = vec![
            ResourceLocation::file("/tmp/c.cql"),
            ResourceLocation::file("/tmp/a/b.cql"),
        ];
        locations.sort();
        assert_eq!(locations[0].uri(), "/tmp/a/b.cql");
        assert_eq!(locations[1].uri(), "/tmp/c.cql");
    }

    #[test]
    fn latin1_decodes_every_byte() {
        let text = TextEncoding::Latin1.decode(vec![0x63, 0x61, 0x66, 0xe9]).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn invalid_utf8_read_names_the_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cql");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = ResourceLocation::file(&path).read_text().unwrap_err();
        assert!(err.to_string().contains("bad.cql"), "got: {err}");
    }
}
