//! Applier configuration
//!
//! Loaded from TOML by hosts; every field has a default so an empty file is
//! a valid configuration.
//!
//! ```toml
//! marker = "studio.variant_applier"
//! name_prefix = "set_"
//! validate_after_apply = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VarsetXError};

/// Marker written on every edit node the chain builder creates
pub const DEFAULT_APPLIER_MARKER: &str = "varsetx.applier";

/// Settings shared by the chain builder and chain reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplierConfig {
    /// Tag distinguishing builder-created nodes from everything else
    pub marker: String,

    /// Prepended to the choice name when naming new edit nodes
    pub name_prefix: String,

    /// Re-validate the chain after each builder mutation
    pub validate_after_apply: bool,
}

impl Default for ApplierConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_APPLIER_MARKER.to_string(),
            name_prefix: String::new(),
            validate_after_apply: true,
        }
    }
}

impl ApplierConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// * `InvalidConfig` - On TOML syntax errors, unknown keys, or an empty marker
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ApplierConfig =
            toml::from_str(content).map_err(|e| VarsetXError::InvalidConfig {
                reason: format!("TOML parse error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// * `InvalidConfig` - If the file cannot be read or is invalid
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| VarsetXError::InvalidConfig {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    /// * `InvalidConfig` - If the marker is blank
    pub fn validate(&self) -> Result<()> {
        if self.marker.trim().is_empty() {
            return Err(VarsetXError::InvalidConfig {
                reason: "marker cannot be empty or whitespace-only".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ApplierConfig::from_toml_str("").unwrap();
        assert_eq!(config, ApplierConfig::default());
        assert_eq!(config.marker, DEFAULT_APPLIER_MARKER);
    }

    #[test]
    fn test_overrides() {
        let config = ApplierConfig::from_toml_str(
            "marker = \"studio.applier\"\nname_prefix = \"set_\"\nvalidate_after_apply = false\n",
        )
        .unwrap();
        assert_eq!(config.marker, "studio.applier");
        assert_eq!(config.name_prefix, "set_");
        assert!(!config.validate_after_apply);
    }

    #[test]
    fn test_blank_marker_rejected() {
        let result = ApplierConfig::from_toml_str("marker = \"  \"");
        assert!(matches!(result, Err(VarsetXError::InvalidConfig { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = ApplierConfig::from_toml_str("colour = \"red\"");
        assert!(matches!(result, Err(VarsetXError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applier.toml");
        std::fs::write(&path, "name_prefix = \"v_\"").unwrap();

        let config = ApplierConfig::from_file(&path).unwrap();
        assert_eq!(config.name_prefix, "v_");

        let missing = ApplierConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(VarsetXError::InvalidConfig { .. })));
    }
}
