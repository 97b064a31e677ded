//! Environment-driven settings for the resolver.

use std::env::{self, VarError};
use std::ffi::OsString;

/// Program queried with `-print-target-info` when nothing overrides it.
pub const DEFAULT_TOOLCHAIN: &str = "swift";

pub const ENV_TOOLCHAIN: &str = "ARTIFACT_TOOLCHAIN";
pub const ENV_VERIFY_BINARY: &str = "ARTIFACT_VERIFY_BINARY";
pub const ENV_LOG: &str = "ARTIFACT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub toolchain: OsString,
    /// Fail with `BinaryMissing` when the selected variant is absent on disk.
    pub verify_exists: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            toolchain: OsString::from(default_toolchain()),
            verify_exists: false,
        }
    }
}

impl ResolverConfig {
    /// Read `ARTIFACT_TOOLCHAIN` and `ARTIFACT_VERIFY_BINARY`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_non_empty)
    }

    /// Build from an arbitrary variable lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(toolchain) = lookup(ENV_TOOLCHAIN) {
            config.toolchain = OsString::from(toolchain);
        }
        if let Some(raw) = lookup(ENV_VERIFY_BINARY) {
            config.verify_exists = parse_flag(&raw);
        }
        config
    }
}

fn default_toolchain() -> &'static str {
    match option_env!("ARTIFACT_TOOLCHAIN_HINT") {
        Some(hint) if !hint.is_empty() => hint,
        _ => DEFAULT_TOOLCHAIN,
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        Ok(_) => None,
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(os)) => Some(os.to_string_lossy().into_owned()),
    }
}
