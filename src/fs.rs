//! Read-only filesystem capability used while locating and reading bundles.
//!
//! [`HostFs`] talks to the real filesystem; [`MemoryFs`] is an in-memory tree
//! so the locator's search order can be exercised without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

pub trait BundleFs {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the immediate subdirectories of `path`, in enumeration order.
    /// Names are returned as the platform gives them, undecoded.
    ///
    /// A missing or unreadable directory yields an empty list.
    fn list_subdirectories(&self, path: &Path) -> Vec<OsString>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<T: BundleFs + ?Sized> BundleFs for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_subdirectories(&self, path: &Path) -> Vec<OsString> {
        (**self).list_subdirectories(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl BundleFs for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_subdirectories(&self, path: &Path) -> Vec<OsString> {
        let Ok(entries) = fs::read_dir(path) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name())
            .collect()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory directory tree.
///
/// Subdirectory listings are returned in insertion order, which lets tests
/// simulate arbitrary filesystem enumeration orders.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    dirs: BTreeSet<PathBuf>,
    children: BTreeMap<PathBuf, Vec<OsString>>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `path` and every missing ancestor.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = normalize(path.as_ref());
        let mut current = PathBuf::new();
        for component in path.components() {
            let parent = current.clone();
            current.push(component);
            if self.dirs.insert(current.clone()) {
                if let Component::Normal(name) = component {
                    self.children
                        .entry(parent)
                        .or_default()
                        .push(name.to_os_string());
                }
            }
        }
        self
    }

    /// Write a file, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> &mut Self {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path, contents.into());
        self
    }
}

impl BundleFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let path = normalize(path);
        self.dirs.contains(&path) || self.files.contains_key(&path)
    }

    fn list_subdirectories(&self, path: &Path) -> Vec<OsString> {
        self.children
            .get(&normalize(path))
            .cloned()
            .unwrap_or_default()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = normalize(path);
        if self.dirs.contains(&path) {
            return Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            )));
        }
        self.files.get(&path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
