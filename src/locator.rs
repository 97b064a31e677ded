//! Bundle root discovery.
//!
//! A bundle can sit in one of three places depending on how the launcher was
//! invoked. Candidates are probed in a fixed order and the first existing one
//! wins:
//!
//! 1. `<working_dir>/.build/artifacts/<repository>/<bundle>` (local build)
//! 2. `<executable_dir>/.build/artifacts/<repository>/<bundle>` (installed)
//! 3. `<working_dir|executable_dir>/artifacts/<github.com_*>/<bundle>`, the
//!    layout used by installers that group bundles by source host.
//!
//! The repository segment is always lowercased.

use crate::error::ResolveError;
use crate::fs::BundleFs;
use crate::manifest::MANIFEST_FILE;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

const BUILD_DIR: &str = ".build";
const ARTIFACTS_DIR: &str = "artifacts";
/// Substring identifying installer-managed bundle directories.
pub const FALLBACK_MARKER: &str = "github.com_";

/// Directories the search is anchored on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub working_dir: PathBuf,
    pub executable_dir: PathBuf,
}

impl SearchContext {
    pub fn new(working_dir: impl Into<PathBuf>, executable_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            executable_dir: executable_dir.into(),
        }
    }

    /// Current directory plus the directory holding the running executable.
    pub fn from_process() -> io::Result<Self> {
        let working_dir = env::current_dir()?;
        let exe = env::current_exe()?;
        let executable_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::other(format!("{} has no parent", exe.display())))?;
        Ok(Self {
            working_dir,
            executable_dir,
        })
    }
}

/// Directory of an unpacked bundle; holds `info.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRoot(PathBuf);

impl BundleRoot {
    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.0.join(MANIFEST_FILE)
    }

    /// `<root>/<relative>`. Leading separators in `relative` are dropped, so
    /// an absolute variant path still lands under the root.
    pub fn variant_path(&self, relative: &str) -> PathBuf {
        let mut composed = self.0.clone().into_os_string();
        composed.push("/");
        composed.push(relative.trim_start_matches(['/', '\\']));
        PathBuf::from(composed)
    }
}

/// The fixed-order `.build/artifacts` candidates (priorities 1 and 2).
pub fn candidate_roots(
    ctx: &SearchContext,
    bundle_name: &str,
    repository_name: &str,
) -> [PathBuf; 2] {
    let relative = Path::new(BUILD_DIR)
        .join(ARTIFACTS_DIR)
        .join(repository_name.to_lowercase())
        .join(bundle_name);
    [
        ctx.working_dir.join(&relative),
        ctx.executable_dir.join(&relative),
    ]
}

pub fn locate_bundle_root(
    fs: &impl BundleFs,
    ctx: &SearchContext,
    bundle_name: &str,
    repository_name: &str,
) -> Result<BundleRoot, ResolveError> {
    let mut searched = Vec::new();

    for candidate in candidate_roots(ctx, bundle_name, repository_name) {
        if fs.exists(&candidate) {
            tracing::debug!(root = %candidate.display(), "found artifact bundle");
            return Ok(BundleRoot(candidate));
        }
        tracing::trace!(candidate = %candidate.display(), "bundle candidate missing");
        searched.push(candidate);
    }

    let artifacts = [
        ctx.working_dir.join(ARTIFACTS_DIR),
        ctx.executable_dir.join(ARTIFACTS_DIR),
    ];
    let present = artifacts.iter().find(|dir| fs.exists(dir)).cloned();
    if let Some(dir) = present {
        // Enumeration order is platform dependent; take the smallest name.
        let selected = fs
            .list_subdirectories(&dir)
            .into_iter()
            .filter(|name| name.to_string_lossy().contains(FALLBACK_MARKER))
            .min();
        match selected {
            Some(name) => {
                let root = dir.join(name).join(bundle_name);
                tracing::debug!(root = %root.display(), "using installer artifact layout");
                return Ok(BundleRoot(root));
            }
            None => {
                tracing::trace!(
                    dir = %dir.display(),
                    marker = FALLBACK_MARKER,
                    "no installer directory matched"
                );
                searched.push(dir.join(format!("{FALLBACK_MARKER}*")).join(bundle_name));
            }
        }
    } else {
        searched.extend(artifacts);
    }

    Err(ResolveError::BundleNotFound {
        bundle: bundle_name.to_string(),
        searched,
    })
}
