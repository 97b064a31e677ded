//! Data model for a bundle's `info.json`.
//!
//! The field names follow the on-disk manifest (`schemaVersion`,
//! `supportedTriples`, `type`). `schemaVersion` is carried through untouched;
//! bundles from older or newer schema revisions are not rejected here.

use crate::error::ManifestParseError;
use crate::triple::HostTriple;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the manifest at the root of every bundle.
pub const MANIFEST_FILE: &str = "info.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleManifest {
    pub schema_version: String,
    pub artifacts: BTreeMap<String, ArtifactDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub variants: Vec<VariantDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDescriptor {
    /// Path of the executable relative to the bundle root.
    pub path: String,
    pub supported_triples: Vec<String>,
}

/// Decode manifest bytes; every documented field is required.
pub fn parse_manifest(bytes: &[u8]) -> Result<BundleManifest, ManifestParseError> {
    Ok(serde_json::from_slice(bytes)?)
}

impl BundleManifest {
    pub fn artifact(&self, name: &str) -> Option<&ArtifactDescriptor> {
        self.artifacts.get(name)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ArtifactDescriptor {
    /// First variant, in declared order, listing `triple` verbatim.
    ///
    /// Matching is exact string equality: no prefix matching and no OS-only
    /// fallback.
    pub fn variant_for(&self, triple: &HostTriple) -> Option<&VariantDescriptor> {
        self.variants.iter().find(|variant| variant.supports(triple))
    }
}

impl VariantDescriptor {
    pub fn supports(&self, triple: &HostTriple) -> bool {
        self.supported_triples
            .iter()
            .any(|candidate| candidate == triple.as_str())
    }
}
