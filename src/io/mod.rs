pub mod input;
pub mod output;

pub use input::{read_rows, read_rows_from_path, InputFormat};
pub use output::{render_report, write_report, OutputFormat};

use std::fs;
use std::path::Path;

use crate::errors::RoiError;

/// Write `contents` to `path`, creating missing parent directories first.
pub fn write_text_file(path: &Path, contents: &str) -> Result<(), RoiError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| RoiError::io("Failed to create directory", Some(parent), e))?;
    }
    fs::write(path, contents).map_err(|e| RoiError::io("Failed to write file", Some(path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_text_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("out.txt");

        write_text_file(&path, "hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_text_file_reports_path_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = write_text_file(&blocker.join("out.txt"), "hello").unwrap_err();

        assert!(matches!(err, RoiError::Io { path: Some(_), .. }));
    }
}
