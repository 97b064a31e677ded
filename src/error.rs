//! Error taxonomy for bundle resolution.
//!
//! Every failure is returned to the immediate caller; nothing here retries or
//! falls back to a best-guess variant. Presentation (messages, exit codes) is
//! left to the launcher.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode an `info.json` manifest.
#[derive(Debug, Error)]
#[error("invalid bundle manifest: {0}")]
pub struct ManifestParseError(#[from] serde_json::Error);

/// Failure to obtain the host triple from the toolchain.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("failed to start '{program} -print-target-info'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program} -print-target-info' exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("target info output is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("target info output has no string at target.unversionedTriple")]
    MissingField,
}

/// Errors surfaced by [`crate::Resolver::resolve`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no artifact bundle directory found for '{bundle}' (searched: {})", display_paths(.searched))]
    BundleNotFound {
        bundle: String,
        searched: Vec<PathBuf>,
    },

    #[error("unable to determine the working or executable directory")]
    SearchContext(#[source] io::Error),

    #[error("unable to read manifest {}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    ManifestParse(#[from] ManifestParseError),

    #[error("artifact '{name}' is not declared in the bundle manifest")]
    ArtifactNotDeclared { name: String },

    #[error("host triple unavailable")]
    HostTripleUnavailable(#[from] DetectionError),

    #[error("no binary in the bundle supports host triple '{triple}'")]
    NoVariantForTriple { triple: String },

    #[error("resolved binary does not exist: {}", path.display())]
    BinaryMissing { path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
