use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where finished artifacts go: a browser download, a directory, a buffer.
pub trait FileSink {
    fn write(&mut self, content: &[u8], filename: &str, mime_type: &str) -> io::Result<()>;
}

/// A file delivered to a `MemorySink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Keeps every delivered file in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<DeliveredFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, filename: &str) -> Option<&DeliveredFile> {
        self.files.iter().find(|f| f.filename == filename)
    }
}

impl FileSink for MemorySink {
    fn write(&mut self, content: &[u8], filename: &str, mime_type: &str) -> io::Result<()> {
        self.files.push(DeliveredFile {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_vec(),
        });
        Ok(())
    }
}

/// Writes each artifact as a file under a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSink for DirectorySink {
    fn write(&mut self, content: &[u8], filename: &str, _mime_type: &str) -> io::Result<()> {
        // Only plain names; never escape the target directory.
        let name = Path::new(filename);
        if name.components().count() != 1 || name.file_name().is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a plain file name: {}", filename),
            ));
        }
        fs::write(self.root.join(name), content)
    }
}
