//! Front-end boundary: where enum declarations come from.
//!
//! The resolver never reads source code itself. A front end lists every enum
//! carrying the marker, and this crate trusts that list. The shipped front end
//! reads a declaration manifest written by an external tool.
//!
//! ## Manifest Format
//!
//! ```json
//! { "enums": [ { "name": "palette.Color", "underlying": "u8",
//!                "members": [ { "name": "Red" }, { "name": "Green", "value": 5 } ] } ] }
//! ```
//!
//! The same shape is accepted as YAML (`.yaml`, `.yml`) and TOML (`.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ReflectError, Result};
use crate::model::EnumDescriptor;

/// Lists the enums that opted into reflection.
pub trait EnumSource {
    /// Returns every marked enum, in discovery order.
    fn list_enums_with_marker(&self) -> Result<Vec<EnumDescriptor>>;
}

impl EnumSource for Vec<EnumDescriptor> {
    fn list_enums_with_marker(&self) -> Result<Vec<EnumDescriptor>> {
        Ok(self.clone())
    }
}

/// Serialized output of a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub enums: Vec<EnumDescriptor>,
}

/// Encoding of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ManifestFormat {
    Json,
    Yaml,
    Toml,
}

impl ManifestFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Decodes manifest text.
///
/// `origin` only labels errors.
///
/// ## Errors
///
/// Returns `ReflectError::ManifestError` if the text does not decode.
pub fn parse_manifest(content: &str, format: ManifestFormat, origin: &str) -> Result<Manifest> {
    let decoded = match format {
        ManifestFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ManifestFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ManifestFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    decoded.map_err(|reason| ReflectError::ManifestError {
        path: origin.to_string(),
        reason,
    })
}

/// A front end backed by a manifest file.
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads and decodes the manifest.
    ///
    /// ## Errors
    ///
    /// Returns `ReflectError::ManifestError` if the extension is unknown, the
    /// file cannot be read, or its contents do not decode.
    pub fn load(&self) -> Result<Manifest> {
        let origin = self.path.display().to_string();

        let format = ManifestFormat::from_path(&self.path).ok_or_else(|| {
            ReflectError::ManifestError {
                path: origin.clone(),
                reason: "unknown extension; expected .json, .yaml, .yml or .toml".to_string(),
            }
        })?;

        let content = std::fs::read_to_string(&self.path).map_err(|e| ReflectError::ManifestError {
            path: origin.clone(),
            reason: e.to_string(),
        })?;

        let manifest = parse_manifest(&content, format, &origin)?;
        debug!(path = %origin, %format, enums = manifest.enums.len(), "loaded manifest");
        Ok(manifest)
    }
}

impl EnumSource for ManifestSource {
    fn list_enums_with_marker(&self) -> Result<Vec<EnumDescriptor>> {
        Ok(self.load()?.enums)
    }
}
