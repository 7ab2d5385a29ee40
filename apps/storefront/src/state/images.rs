//! # Image Store
//!
//! Product pictures live in `<data dir>/images/`. When a seller picks a file
//! for a new product it is copied in and the product row stores only the
//! file name.
//!
//! ```text
//!   ~/Pictures/hat.png ──import──► <data dir>/images/hat.png
//!                                         │
//!   products.image_path = "hat.png" ◄─────┘
//!
//!   resolve("hat.png") ──► Some(<data dir>/images/hat.png)   file exists
//!                     └──► None                              file is gone
//! ```
//!
//! A missing picture is never an error: the product is shown without one.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// The product images directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ImageStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the images directory if needed.
    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Copies `source` into the images directory.
    ///
    /// ## Returns
    /// * `Ok(Some(name))` - File name to store on the product
    /// * `Ok(None)` - `source` does not exist; the product gets no image
    /// * `Err(_)` - The copy itself failed
    ///
    /// An existing file with the same name is kept; the new copy gets a
    /// numeric suffix (`hat-1.png`).
    pub fn import(&self, source: &Path) -> io::Result<Option<String>> {
        if !source.is_file() {
            warn!(?source, "Selected image does not exist, skipping");
            return Ok(None);
        }

        let Some(file_name) = source.file_name().and_then(|n| n.to_str()) else {
            warn!(?source, "Selected image has no usable file name, skipping");
            return Ok(None);
        };

        self.ensure_dir()?;
        let target = self.free_name(file_name);
        let target_path = self.dir.join(&target);

        std::fs::copy(source, &target_path)?;
        info!(?source, image = %target, "Imported product image");

        Ok(Some(target))
    }

    /// Full path of a stored image, only when the file is still there.
    pub fn resolve(&self, stored: &str) -> Option<PathBuf> {
        if stored.trim().is_empty() {
            return None;
        }

        let path = Path::new(stored);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        };

        if path.is_file() {
            Some(path)
        } else {
            debug!(image = %stored, "Product image missing on disk");
            None
        }
    }

    fn free_name(&self, file_name: &str) -> String {
        if !self.dir.join(file_name).exists() {
            return file_name.to_string();
        }

        let path = Path::new(file_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        let extension = path.extension().and_then(|e| e.to_str());

        (1..)
            .map(|n| match extension {
                Some(ext) => format!("{stem}-{n}.{ext}"),
                None => format!("{stem}-{n}"),
            })
            .find(|candidate| !self.dir.join(candidate).exists())
            .unwrap_or_else(|| file_name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"\x89PNG").unwrap();
        path
    }

    #[test]
    fn test_import_and_resolve() {
        let data = tempfile::tempdir().unwrap();
        let pictures = tempfile::tempdir().unwrap();
        let store = ImageStore::new(data.path().join("images"));

        let source = picture(pictures.path(), "hat.png");
        let name = store.import(&source).unwrap();
        assert_eq!(name.as_deref(), Some("hat.png"));

        let resolved = store.resolve("hat.png").unwrap();
        assert_eq!(resolved, data.path().join("images").join("hat.png"));
        assert_eq!(std::fs::read(resolved).unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let data = tempfile::tempdir().unwrap();
        let store = ImageStore::new(data.path().join("images"));

        let imported = store.import(&data.path().join("nope.png")).unwrap();
        assert!(imported.is_none());
    }

    #[test]
    fn test_name_collision_gets_suffix() {
        let data = tempfile::tempdir().unwrap();
        let pictures = tempfile::tempdir().unwrap();
        let store = ImageStore::new(data.path().join("images"));
        let source = picture(pictures.path(), "hat.png");

        assert_eq!(store.import(&source).unwrap().as_deref(), Some("hat.png"));
        assert_eq!(store.import(&source).unwrap().as_deref(), Some("hat-1.png"));
        assert_eq!(store.import(&source).unwrap().as_deref(), Some("hat-2.png"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let data = tempfile::tempdir().unwrap();
        let store = ImageStore::new(data.path());

        assert!(store.resolve("gone.png").is_none());
        assert!(store.resolve("").is_none());
    }
}
