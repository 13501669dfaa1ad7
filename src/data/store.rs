use crate::error::Result;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Somewhere a raw genome can be dumped to and read back from.
///
/// Stores see unframed bytes only: no header, no length prefix. The reader
/// has to know the chromosome length out of band.
pub trait ByteStore {
    fn save(&mut self, bytes: &[u8]) -> Result<()>;
    fn load(&mut self) -> Result<Vec<u8>>;
}

/// Raw byte dump on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// A store under `dir` named with a freshly drawn number in `0..=999999`.
    pub fn random_in<P: AsRef<Path>, R: Rng>(dir: P, rng: &mut R) -> Self {
        let name = rng.gen_range(0..=999_999u32).to_string();
        Self::new(dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteStore for FileStore {
    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        std::fs::write(&self.path, bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<u8>> {
        let bytes = std::fs::read(&self.path)?;
        log::debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(bytes)
    }
}

/// In-memory store, mostly for tests and drivers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ByteStore for MemoryStore {
    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes = bytes.to_vec();
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
