// Integration test utilities shared across test binaries

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding a document and its stop-word list
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Write a file under the fixture root, creating parent directories
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write `doc.txt` and `stop.txt`, returning their paths
    pub fn create_inputs(&self, document: &str, stop_words: &[&str]) -> (PathBuf, PathBuf) {
        let doc = self.create_file("doc.txt", document.as_bytes());
        let stop = self.create_file("stop.txt", stop_words.join("\n").as_bytes());
        (doc, stop)
    }

    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.root_path.join(relative_path)
    }
}
