/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use docxlate::file_utils::{FileManager, FileType};
use crate::common;

#[test]
fn test_detect_file_type_withDocxExtension_shouldReturnWordDocument() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_docx(temp_dir.path(), "report.docx", &["x"])?;
    assert_eq!(FileManager::detect_file_type(&path)?, FileType::WordDocument);
    Ok(())
}

#[test]
fn test_detect_file_type_withLegacyDoc_shouldReturnLegacy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "old.doc", b"\xD0\xCF\x11\xE0")?;
    assert_eq!(FileManager::detect_file_type(&path)?, FileType::LegacyWordDocument);
    Ok(())
}

#[test]
fn test_detect_file_type_withZipUnderOtherName_shouldSniffSignature() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let bytes = docxlate::document::render_docx(&["x"])?;
    let path = common::create_test_file(temp_dir.path(), "upload.bin", &bytes)?;
    assert_eq!(FileManager::detect_file_type(&path)?, FileType::WordDocument);
    Ok(())
}

#[test]
fn test_detect_file_type_withPlainText_shouldReturnUnknown() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.txt", b"hello")?;
    assert_eq!(FileManager::detect_file_type(&path)?, FileType::Unknown);
    Ok(())
}

#[test]
fn test_detect_file_type_withMissingFile_shouldFail() {
    assert!(FileManager::detect_file_type("/nonexistent/file.docx").is_err());
}

#[test]
fn test_ensure_dir_shouldCreateNestedDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

#[test]
fn test_write_bytes_shouldCreateParentAndFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sub").join("out.bin");

    FileManager::write_bytes(&path, b"abc")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(std::fs::read(&path)?, b"abc");
    Ok(())
}

#[test]
fn test_remove_file_shouldDeleteExistingAndIgnoreMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "out.docx", b"PK")?;

    FileManager::remove_file(&path)?;
    assert!(!path.exists());

    FileManager::remove_file(&path)?;
    Ok(())
}
