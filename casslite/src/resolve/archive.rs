//! Scoped read-only views over tar and tar.gz resource roots.
//!
//! An archive is opened lazily for a single resolution call and the handle is
//! dropped before the call returns, on success, empty result and error alike.

use std::fs;
use std::io::{self, BufReader, Read};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::resolve::location::{ResourceLocation, TextEncoding};
use crate::resolve::pattern::GlobPattern;

/// Gzip magic number: 0x1f 0x8b.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open `path` as a tar stream, sniffing the first two bytes for gzip.
fn open_reader(path: &Path) -> io::Result<Box<dyn Read>> {
    let mut header = [0u8; 2];
    fs::File::open(path)?.take(2).read_exact(&mut header)?;

    let file = fs::File::open(path)?;
    if header == GZIP_MAGIC {
        Ok(Box::new(GzDecoder::new(BufReader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// `/`-separated entry path with `./` and any non-normal components dropped.
fn entry_name(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walk the archive once and collect the entries matching `pattern`.
pub(crate) fn resolve(
    path: &Path,
    pattern: &GlobPattern,
    encoding: TextEncoding,
) -> io::Result<Vec<ResourceLocation>> {
    let mut matches = Vec::new();
    let mut archive = Archive::new(open_reader(path)?);
    for entry in archive.entries()? {
        let entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry_name(&entry.path()?);
        if name.is_empty() || !name.starts_with(pattern.static_prefix()) {
            continue;
        }
        if pattern.matches(&name) {
            matches.push(ResourceLocation::archive_entry(path, name).with_encoding(encoding));
        }
    }
    Ok(matches)
}

/// Read the bytes of a single entry located by a previous resolution.
pub(crate) fn read_entry(path: &Path, wanted: &str) -> io::Result<Vec<u8>> {
    let mut archive = Archive::new(open_reader(path)?);
    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        if entry_name(&entry.path()?) == wanted {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            return Ok(bytes);
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("entry {wanted:?} not found in {}", path.display()),
    ))
}
