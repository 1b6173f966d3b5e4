//! Archive store backed by a local directory.

use std::path::PathBuf;

use spectrum_core::{ArchiveStore, ExportResult};

/// Keeps archived result tables as files in one directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Use `dir`, creating it on first write.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl ArchiveStore for DirStore {
    fn list(&self) -> ExportResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn put(&self, name: &str, contents: &[u8]) -> ExportResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(name), contents)?;
        Ok(())
    }
}
