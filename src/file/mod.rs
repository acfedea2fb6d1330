//! Byte-level access to class file buffers.
//!
//! This module holds the foundational layer every class file component is built on:
//!
//! - [`crate::file::io`] - Stateless, bounds-checked primitives (integer and text decoding,
//!   integer encoding, splicing)
//! - [`crate::file::parser::Parser`] - A cursor over a byte slice for sequential decoding
//!
//! It also provides the two filesystem helpers used by the file-level patching entry points,
//! [`crate::file::load`] and [`crate::file::store`]. Nothing in this module interprets the class
//! file format itself; that is the job of [`crate::classfile`].

pub mod io;
pub mod parser;

use std::path::Path;

use crate::Result;

/// Reads a whole file into an owned buffer.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the file can not be read.
pub fn load(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)?;
    log::debug!("Loaded {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Writes `data` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`crate::Error::FileError`] if the file can not be written.
pub fn store(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;
    log::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Hello.class");

        store(&path, &[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
        assert_eq!(load(&path).unwrap(), vec![0xCA, 0xFE, 0xBA, 0xBE]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(&dir.path().join("Missing.class"));
        assert!(matches!(result, Err(crate::Error::FileError(_))));
    }
}
