//! Destinations for finished workbooks.

use std::io;
use std::path::{Path, PathBuf};

/// Somewhere an exported file can be saved.
pub trait ExportSink: Send + Sync {
    /// Store `bytes` under `file_name` and return where it ended up.
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Writes into a directory, creating it when missing.
///
/// The bytes go to a hidden sibling file first and are renamed into place,
/// so a failed export never leaves a partial workbook behind.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(file_name);
        let partial = self.dir.join(format!(".{file_name}.part"));

        let written = std::fs::write(&partial, bytes).and_then(|()| std::fs::rename(&partial, &target));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saves_under_the_given_name_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("reports"));

        let path = sink.save("CostReport_2024-05-01.xlsx", b"PK\x03\x04").unwrap();

        assert_eq!(path, dir.path().join("reports").join("CostReport_2024-05-01.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04");
        let names: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let sink = DirectorySink::new(blocker.join("sub"));
        assert!(sink.save("a.xlsx", b"x").is_err());
    }
}
