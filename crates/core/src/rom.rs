//! ROM file validation and loading.
//!
//! CHIP-8 ROMs are raw binary images with no header or checksum, so the only
//! validation possible before loading is on the file itself: it must exist,
//! be readable, and carry the conventional `.ch8` extension.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional file extension for CHIP-8 ROM images.
pub const ROM_EXTENSION: &str = "ch8";

#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM file not found: {0}")]
    NotFound(PathBuf),
    #[error("not a .{ROM_EXTENSION} file: {0}")]
    BadExtension(PathBuf),
    #[error("failed to read ROM file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a ROM image from disk, checking existence and extension first.
///
/// The returned bytes are the verbatim file contents; trimming to the
/// machine's capacity happens at load time inside the system.
pub fn read_rom_file(path: &Path) -> Result<Vec<u8>, RomError> {
    if !path.is_file() {
        return Err(RomError::NotFound(path.to_path_buf()));
    }

    let ext_matches = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case(ROM_EXTENSION))
        .unwrap_or(false);
    if !ext_matches {
        return Err(RomError::BadExtension(path.to_path_buf()));
    }

    std::fs::read(path).map_err(|source| RomError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("ocho_rom_tests");
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_read_valid_rom() {
        let path = temp_path("pong.ch8");
        fs::write(&path, [0x12, 0x00]).unwrap();

        let data = read_rom_file(&path).unwrap();
        assert_eq!(data, vec![0x12, 0x00]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let path = temp_path("PONG.CH8");
        fs::write(&path, [0x00, 0xE0]).unwrap();

        assert!(read_rom_file(&path).is_ok());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = temp_path("does_not_exist.ch8");
        assert!(matches!(
            read_rom_file(&path),
            Err(RomError::NotFound(_))
        ));
    }

    #[test]
    fn test_wrong_extension() {
        let path = temp_path("notes.txt");
        fs::write(&path, b"hello").unwrap();

        assert!(matches!(
            read_rom_file(&path),
            Err(RomError::BadExtension(_))
        ));

        fs::remove_file(&path).unwrap();
    }
}
