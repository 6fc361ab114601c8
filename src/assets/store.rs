//! Read-only asset stores.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

use memmap2::Mmap;

use crate::error::{Error, Result};

/// Bytes of an asset, either mapped from disk or borrowed from memory.
pub enum AssetBytes<'a> {
    Mapped(Mmap),
    Borrowed(&'a [u8]),
    Owned(Vec<u8>),
}

impl Deref for AssetBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => &map[..],
            Self::Borrowed(bytes) => *bytes,
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }
}

impl std::fmt::Debug for AssetBytes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Mapped(_) => "Mapped",
            Self::Borrowed(_) => "Borrowed",
            Self::Owned(_) => "Owned",
        };
        f.debug_struct("AssetBytes")
            .field("kind", &kind)
            .field("len", &self.len())
            .finish()
    }
}

/// Read-only storage holding the bundled model and label files.
pub trait AssetStore {
    /// Open an asset for streaming reads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetNotFound`] if `path` does not resolve.
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>>;

    /// Read the whole asset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AssetNotFound`] if `path` does not resolve.
    fn read_bytes(&self, path: &Path) -> Result<AssetBytes<'_>>;
}

fn not_found(path: &Path, reason: &str) -> Error {
    Error::AssetNotFound {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::NotFound, reason.to_string()),
    }
}

fn open_error(path: &Path, source: io::Error) -> Error {
    if source.kind() == io::ErrorKind::NotFound {
        Error::AssetNotFound {
            path: path.to_path_buf(),
            source,
        }
    } else {
        Error::Io(source)
    }
}

/// Assets stored in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a relative asset path onto the root.
    ///
    /// Absolute paths and `..` components never resolve.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let mut full = self.root.clone();
        for component in path.components() {
            match component {
                Component::Normal(part) => full.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(not_found(path, "asset path escapes the asset root"));
                }
            }
        }
        Ok(full)
    }

    fn open_file(&self, path: &Path) -> Result<File> {
        let full = self.resolve(path)?;
        let file = File::open(&full).map_err(|source| open_error(path, source))?;
        if file.metadata()?.is_dir() {
            return Err(not_found(path, "asset path is a directory"));
        }
        Ok(file)
    }
}

impl AssetStore for DirAssets {
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.open_file(path)?))
    }

    fn read_bytes(&self, path: &Path) -> Result<AssetBytes<'_>> {
        let file = self.open_file(path)?;

        // Zero-length files cannot be mapped on every platform
        if file.metadata()?.len() == 0 {
            return Ok(AssetBytes::Owned(Vec::new()));
        }

        // Safety: the file must not be modified or truncated while it is mapped
        let map = unsafe { Mmap::map(&file)? };
        Ok(AssetBytes::Mapped(map))
    }
}

/// Assets held in memory, e.g. compiled in with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryAssets {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an asset.
    #[must_use]
    pub fn with<P, B>(mut self, path: P, bytes: B) -> Self
    where
        P: Into<PathBuf>,
        B: Into<Vec<u8>>,
    {
        self.insert(path, bytes);
        self
    }

    pub fn insert<P, B>(&mut self, path: P, bytes: B)
    where
        P: Into<PathBuf>,
        B: Into<Vec<u8>>,
    {
        self.files.insert(path.into(), bytes.into());
    }

    fn get(&self, path: &Path) -> Result<&[u8]> {
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| not_found(path, "no such bundled asset"))
    }
}

impl AssetStore for MemoryAssets {
    fn open(&self, path: &Path) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.get(path)?)))
    }

    fn read_bytes(&self, path: &Path) -> Result<AssetBytes<'_>> {
        self.get(path).map(AssetBytes::Borrowed)
    }
}
