use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage rooted at a local directory. Absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path))?)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Reads relative to the working directory and writes under `output_dir`.
#[derive(Debug, Clone)]
pub struct SplitStorage {
    reader: LocalStorage,
    writer: LocalStorage,
}

impl SplitStorage {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            reader: LocalStorage::new("."),
            writer: LocalStorage::new(output_dir.as_ref()),
        }
    }

    pub fn output_path(&self, path: &str) -> PathBuf {
        self.writer.resolve(path)
    }
}

impl Storage for SplitStorage {
    fn read_to_string(&self, path: &str) -> Result<String> {
        self.reader.read_to_string(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.writer.write_file(path, data)
    }
}
