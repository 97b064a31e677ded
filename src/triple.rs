//! Host triple detection.
//!
//! The triple is read from the installed toolchain by running
//! `<toolchain> -print-target-info` and extracting
//! `target.unversionedTriple` from its JSON output. Detection happens on every
//! call; nothing is cached. The wait for the child has no timeout, so callers
//! needing bounded latency must wrap the call themselves.

use crate::error::DetectionError;
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Command, Stdio};

/// Flag passed to the toolchain to print its target description.
pub const TARGET_INFO_FLAG: &str = "-print-target-info";

/// Opaque architecture/vendor/OS identifier such as `arm64-apple-macosx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTriple(String);

impl HostTriple {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HostTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the host triple.
pub trait TripleDetector {
    fn detect(&self) -> Result<HostTriple, DetectionError>;
}

impl<T: TripleDetector + ?Sized> TripleDetector for &T {
    fn detect(&self) -> Result<HostTriple, DetectionError> {
        (**self).detect()
    }
}

/// Runs the toolchain binary once per [`TripleDetector::detect`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDetector {
    program: OsString,
}

impl ToolchainDetector {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl TripleDetector for ToolchainDetector {
    fn detect(&self) -> Result<HostTriple, DetectionError> {
        let program = self.program.to_string_lossy().into_owned();
        tracing::debug!(%program, "querying toolchain target info");

        let output = Command::new(&self.program)
            .arg(TARGET_INFO_FLAG)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DetectionError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DetectionError::ExitStatus {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let triple = parse_target_info(&output.stdout)?;
        tracing::debug!(%triple, "detected host triple");
        Ok(triple)
    }
}

/// Always yields the same outcome without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTriple {
    triple: Option<HostTriple>,
}

impl FixedTriple {
    pub fn new(triple: impl Into<String>) -> Self {
        Self {
            triple: Some(HostTriple::new(triple)),
        }
    }

    /// A detector that reports the target info as lacking a triple.
    pub fn unavailable() -> Self {
        Self { triple: None }
    }
}

impl TripleDetector for FixedTriple {
    fn detect(&self) -> Result<HostTriple, DetectionError> {
        self.triple.clone().ok_or(DetectionError::MissingField)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetInfo {
    target: Option<TargetSection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetSection {
    unversioned_triple: Option<serde_json::Value>,
}

/// Extract `target.unversionedTriple` from `-print-target-info` output.
///
/// Any other fields are ignored.
pub fn parse_target_info(stdout: &[u8]) -> Result<HostTriple, DetectionError> {
    let info: TargetInfo = serde_json::from_slice(stdout).map_err(DetectionError::InvalidJson)?;
    info.target
        .and_then(|target| target.unversioned_triple)
        .and_then(|value| value.as_str().map(HostTriple::new))
        .ok_or(DetectionError::MissingField)
}
