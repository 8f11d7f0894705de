//! Read-only, path-addressed byte sources for font and corpus assets.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

/// Failure to produce the bytes behind a path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// Nothing is stored under the path.
    NotFound,
    /// Fewer bytes were read than the asset holds.
    Truncated,
    /// The destination buffer could not be reserved.
    AllocFailed,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("asset not found"),
            Self::Truncated => f.write_str("asset read was short"),
            Self::AllocFailed => f.write_str("out of memory reading asset"),
        }
    }
}

/// Abstract asset backend.
pub trait ByteStore {
    /// Reads the whole asset at `path` into one owned buffer.
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}

impl<S: ByteStore + ?Sized> ByteStore for &S {
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(path)
    }
}

/// Copies `bytes` into a freshly reserved buffer, reporting allocation failure.
pub(crate) fn try_copy(bytes: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len())
        .map_err(|_| StoreError::AllocFailed)?;
    out.extend_from_slice(bytes);
    Ok(out)
}

/// In-memory store keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    assets: BTreeMap<String, Box<[u8]>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, bytes: impl Into<Box<[u8]>>) {
        self.assets.insert(String::from(path), bytes.into());
    }
}

impl ByteStore for MemStore {
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let bytes = self.assets.get(path).ok_or(StoreError::NotFound)?;
        try_copy(bytes)
    }
}

#[cfg(feature = "std")]
pub use fs::FsStore;

#[cfg(feature = "std")]
mod fs {
    use std::{
        fs::File,
        io::{ErrorKind, Read},
        path::PathBuf,
        vec::Vec,
    };

    use log::warn;

    use super::{ByteStore, StoreError};

    /// Filesystem store rooted at a directory.
    #[derive(Clone, Debug)]
    pub struct FsStore {
        root: PathBuf,
    }

    impl FsStore {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &std::path::Path {
            &self.root
        }
    }

    impl ByteStore for FsStore {
        fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
            let full = self.root.join(path);
            let mut file = File::open(&full).map_err(|err| match err.kind() {
                ErrorKind::NotFound => StoreError::NotFound,
                _ => {
                    warn!("store: open {} failed: {}", full.display(), err);
                    StoreError::Truncated
                }
            })?;

            let expected = file
                .metadata()
                .map(|meta| meta.len() as usize)
                .map_err(|_| StoreError::Truncated)?;

            let mut bytes = Vec::new();
            bytes
                .try_reserve_exact(expected)
                .map_err(|_| StoreError::AllocFailed)?;
            file.read_to_end(&mut bytes).map_err(|err| {
                warn!("store: read {} failed: {}", full.display(), err);
                StoreError::Truncated
            })?;

            if bytes.len() < expected {
                warn!(
                    "store: short read {} ({} / {} bytes)",
                    full.display(),
                    bytes.len(),
                    expected
                );
                return Err(StoreError::Truncated);
            }

            Ok(bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_store_reads_copies() {
        let mut store = MemStore::new();
        store.insert("a.bin", vec![1u8, 2, 3]);

        assert_eq!(store.read("a.bin"), Ok(vec![1, 2, 3]));
        assert_eq!(store.read("b.bin"), Err(StoreError::NotFound));

        store.insert("a.bin", vec![9u8]);
        assert_eq!(store.read("a.bin"), Ok(vec![9]));
    }

    #[cfg(feature = "std")]
    #[test]
    fn fs_store_reports_missing_file() {
        let store = FsStore::new(std::env::temp_dir());
        assert_eq!(
            store.read("lexis-store-test-does-not-exist.bin"),
            Err(StoreError::NotFound)
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn fs_store_reads_whole_file() {
        let dir = std::env::temp_dir();
        let name = format!("lexis-store-test-{}.bin", std::process::id());
        std::fs::write(dir.join(&name), b"PRDB-bytes").unwrap();

        let store = FsStore::new(&dir);
        assert_eq!(store.read(&name).unwrap(), b"PRDB-bytes".to_vec());

        let _ = std::fs::remove_file(dir.join(&name));
    }
}
