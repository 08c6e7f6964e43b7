//! Temporary output trees addressed with UTF-8 paths.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;

/// Temporary directory removed on drop.
pub struct TempTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TempTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path {} is not UTF-8", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Reads `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .with_context(|| format!("open {}", self.root))?;
        dir.read_to_string(relative)
            .with_context(|| format!("read {relative}"))
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .with_context(|| format!("open {}", self.root))?;
        if let Some(parent) = Utf8Path::new(relative)
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
        {
            dir.create_dir_all(parent)
                .with_context(|| format!("create {parent}"))?;
        }
        dir.write(relative, contents)
            .with_context(|| format!("write {relative}"))?;
        Ok(self.path(relative))
    }

    /// Whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }
}
