use anyhow::{Result, Context};
use std::fs;
use std::io::Read;
use std::path::Path;

// @module: File and directory utilities

/// Leading bytes of every zip container
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        } else if !path.is_dir() {
            return Err(anyhow::anyhow!("Not a directory: {:?}", path));
        }
        Ok(())
    }

    /// Write bytes to a file, replacing any existing content
    pub fn write_bytes<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @removes: File if present
    pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if Self::file_exists(path) {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove file: {:?}", path))?;
        }
        Ok(())
    }

    /// Detect whether a file looks like a Word document
    ///
    /// The extension is checked first, then the zip signature for files with
    /// an unexpected extension.
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            let ext_str = ext.to_string_lossy().to_lowercase();

            if ext_str == "docx" {
                return Ok(FileType::WordDocument);
            }

            // Legacy binary format, not readable as a package
            if ext_str == "doc" {
                return Ok(FileType::LegacyWordDocument);
            }
        }

        let mut header = [0u8; 4];
        let mut file = fs::File::open(path)
            .with_context(|| format!("Failed to open file: {:?}", path))?;

        if file.read_exact(&mut header).is_ok() && &header == ZIP_MAGIC {
            return Ok(FileType::WordDocument);
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Office Open XML word processing package (.docx)
    WordDocument,
    /// Pre-2007 binary Word document (.doc)
    LegacyWordDocument,
    /// Unknown file type
    Unknown,
}
