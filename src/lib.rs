//! Locate the host-specific executable inside an unpacked binary artifact
//! bundle.
//!
//! Resolution is a single synchronous pipeline: find the bundle root, parse
//! its `info.json`, query the toolchain for the host triple, and pick the
//! first variant built for that triple. Filesystem access and triple detection
//! sit behind [`BundleFs`] and [`TripleDetector`] so the pipeline can run
//! against in-memory doubles.

pub mod config;
pub mod error;
pub mod fs;
pub mod locator;
pub mod manifest;
pub mod resolver;
pub mod triple;

pub use config::ResolverConfig;
pub use error::{DetectionError, ManifestParseError, ResolveError};
pub use fs::{BundleFs, HostFs, MemoryFs};
pub use locator::{BundleRoot, SearchContext, candidate_roots, locate_bundle_root};
pub use manifest::{
    ArtifactDescriptor, BundleManifest, MANIFEST_FILE, VariantDescriptor, parse_manifest,
};
pub use resolver::{Resolver, resolve_binary_path};
pub use triple::{FixedTriple, HostTriple, ToolchainDetector, TripleDetector, parse_target_info};
