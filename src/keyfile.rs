//! Reading and writing key files.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::encoding::{Jwk, RsaParameters};
use crate::errors::{KeyFileError, Result};
use crate::RsaKeyMaterial;

const TEMP_PREFIX: &str = ".workitem-signer-";
const TEMP_SUFFIX: &str = ".tmp";

/// Reads a key file in the [`RsaParameters`] format.
pub fn read_key_file(path: impl AsRef<Path>) -> Result<RsaKeyMaterial> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| KeyFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let key = RsaKeyMaterial::from_key_file_json(&json)?;
    debug!(
        "read {} key from {}",
        if key.has_private() { "private" } else { "public" },
        path.display()
    );
    Ok(key)
}

/// Writes `key` to `path` in the [`RsaParameters`] format.
///
/// The document is written to a temporary file next to `path` and renamed
/// into place, so `path` never holds a partial document. On failure the
/// temporary file is removed and `path` is left untouched.
pub fn write_key_file(key: &RsaKeyMaterial, path: impl AsRef<Path>, public_only: bool) -> Result<()> {
    let json = RsaParameters::from_key(key, public_only)?.to_json()?;
    write_document(path.as_ref(), &json, public_only)
}

/// Writes `key` to `path` as a [`Jwk`], with the same atomic replacement as
/// [`write_key_file`].
pub fn write_jwk_file(key: &RsaKeyMaterial, path: impl AsRef<Path>, public_only: bool) -> Result<()> {
    let json = Jwk::from_key(key, public_only)?.to_json()?;
    write_document(path.as_ref(), &json, public_only)
}

fn write_document(path: &Path, json: &str, public_only: bool) -> Result<()> {
    write_atomic(path, json.as_bytes()).map_err(|source| KeyFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        "wrote {} key to {}",
        if public_only { "public" } else { "private" },
        path.display()
    );
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;

    Ok(())
}
