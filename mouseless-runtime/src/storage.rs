//! Directory-backed page storage

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use mouseless_core::traits::{Storage, StorageError};

/// Storage rooted at a host directory
///
/// Page paths such as `/apps/clock.3ml` resolve below the root. Paths that
/// would leave the root are rejected.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let mut resolved = self.root.clone();
        for component in Path::new(path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(StorageError::InvalidPath),
            }
        }
        Ok(resolved)
    }
}

impl Storage for DirStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let resolved = self.resolve(path)?;
        std::fs::read(resolved).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::NotFound,
            _ => StorageError::Io,
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|resolved| resolved.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mouseless-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("apps")).unwrap();
        dir
    }

    #[test]
    fn test_read_relative_and_absolute() {
        let dir = scratch("read");
        std::fs::write(dir.join("apps/clock.3ml"), "<body/>").unwrap();
        let storage = DirStorage::new(&dir);

        assert_eq!(storage.read("/apps/clock.3ml").unwrap(), b"<body/>");
        assert_eq!(storage.read("apps/./clock.3ml").unwrap(), b"<body/>");
        assert!(storage.exists("/apps/clock.3ml"));
        assert!(!storage.exists("/apps"));
        assert_eq!(storage.read("/apps/missing.3ml"), Err(StorageError::NotFound));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let storage = DirStorage::new(scratch("escape"));
        assert_eq!(storage.read("../secret"), Err(StorageError::InvalidPath));
        assert_eq!(
            storage.read("/apps/../../secret"),
            Err(StorageError::InvalidPath)
        );
        assert!(!storage.exists("../secret"));
        std::fs::remove_dir_all(storage.root()).unwrap();
    }

    proptest! {
        #[test]
        fn prop_resolved_paths_stay_under_root(
            parts in prop::collection::vec(
                prop_oneof![
                    Just(String::from("..")),
                    Just(String::from(".")),
                    Just(String::new()),
                    "[a-z]{1,8}(\\.3ml)?",
                ],
                0..6,
            ),
            absolute in any::<bool>(),
        ) {
            let storage = DirStorage::new("/srv/pages");
            let mut path = parts.join("/");
            if absolute {
                path.insert(0, '/');
            }
            match storage.resolve(&path) {
                Ok(resolved) => prop_assert!(resolved.starts_with(storage.root())),
                Err(err) => {
                    prop_assert_eq!(err, StorageError::InvalidPath);
                    prop_assert!(parts.iter().any(|part| part == ".."));
                }
            }
        }
    }
}
