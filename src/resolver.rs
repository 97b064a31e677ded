//! Composes locator, manifest and triple detection into one resolution call.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::fs::{BundleFs, HostFs};
use crate::locator::{SearchContext, locate_bundle_root};
use crate::manifest::parse_manifest;
use crate::triple::{ToolchainDetector, TripleDetector};
use std::path::PathBuf;

/// Stateless resolution pipeline over injected capabilities.
///
/// Each [`Resolver::resolve`] call walks the whole pipeline again, including
/// a fresh host triple query; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Resolver<F, D> {
    fs: F,
    detector: D,
    context: SearchContext,
    verify_exists: bool,
}

impl Resolver<HostFs, ToolchainDetector> {
    /// Resolver backed by the real filesystem and toolchain.
    pub fn for_host(config: &ResolverConfig, context: SearchContext) -> Self {
        let detector = ToolchainDetector::new(config.toolchain.clone());
        Resolver::new(HostFs, detector, context).verify_exists(config.verify_exists)
    }
}

impl<F: BundleFs, D: TripleDetector> Resolver<F, D> {
    pub fn new(fs: F, detector: D, context: SearchContext) -> Self {
        Self {
            fs,
            detector,
            context,
            verify_exists: false,
        }
    }

    /// Check that the selected binary exists before returning it.
    pub fn verify_exists(mut self, enabled: bool) -> Self {
        self.verify_exists = enabled;
        self
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Absolute path of the `bundle_name` executable built for this host.
    pub fn resolve(
        &self,
        bundle_name: &str,
        repository_name: &str,
    ) -> Result<PathBuf, ResolveError> {
        let root = locate_bundle_root(&self.fs, &self.context, bundle_name, repository_name)?;

        let manifest_path = root.manifest_path();
        tracing::debug!(path = %manifest_path.display(), "reading bundle manifest");
        let bytes = self
            .fs
            .read(&manifest_path)
            .map_err(|source| ResolveError::ManifestRead {
                path: manifest_path.clone(),
                source,
            })?;
        let manifest = parse_manifest(&bytes)?;

        let artifact =
            manifest
                .artifact(bundle_name)
                .ok_or_else(|| ResolveError::ArtifactNotDeclared {
                    name: bundle_name.to_string(),
                })?;

        let triple = self.detector.detect()?;
        let variant =
            artifact
                .variant_for(&triple)
                .ok_or_else(|| ResolveError::NoVariantForTriple {
                    triple: triple.to_string(),
                })?;

        let path = root.variant_path(&variant.path);
        if self.verify_exists && !self.fs.exists(&path) {
            return Err(ResolveError::BinaryMissing { path });
        }
        tracing::debug!(%triple, path = %path.display(), "resolved artifact binary");
        Ok(path)
    }
}

/// Resolve against the running process: its working and executable
/// directories, the host filesystem, and the toolchain named by
/// [`ResolverConfig::from_env`].
pub fn resolve_binary_path(
    bundle_name: &str,
    repository_name: &str,
) -> Result<PathBuf, ResolveError> {
    let context = SearchContext::from_process().map_err(ResolveError::SearchContext)?;
    Resolver::for_host(&ResolverConfig::from_env(), context).resolve(bundle_name, repository_name)
}
