use crate::error::{NotifierError, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Working directory where uploaded spreadsheets are stored before reading.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    /// Opens `root`, creating it if it does not exist.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Stores `contents` under `file_name`, replacing any previous upload with
    /// the same name. The file only appears once fully written.
    pub fn persist(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
        let name = checked_file_name(file_name)?;
        let target = self.root.join(name);

        let mut staging = NamedTempFile::new_in(&self.root)?;
        staging.write_all(contents)?;
        staging.flush()?;
        staging.persist(&target).map_err(|e| e.error)?;

        debug!("Stored upload at {}", target.display());
        Ok(target)
    }

    /// Copies a file from disk into the upload directory, keeping its base name.
    pub fn persist_file(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                NotifierError::InvalidUpload(format!(
                    "'{}' has no usable file name",
                    source.display()
                ))
            })?;
        let contents = fs::read(source)?;
        self.persist(name, &contents)
    }
}

fn checked_file_name(file_name: &str) -> Result<&str> {
    let name = file_name.trim();
    let escapes = name.contains(['/', '\\', '\0']) || name == "." || name == "..";
    if name.is_empty() || escapes {
        return Err(NotifierError::InvalidUpload(format!(
            "file name '{file_name}' is not allowed"
        )));
    }
    Ok(name)
}
