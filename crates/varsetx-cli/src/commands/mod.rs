pub mod apply;
pub mod inspect;
pub mod reset;
pub mod show;

use std::path::Path;

use anyhow::Context;
use varsetx_core::config::ApplierConfig;

/// Applier configuration from `--config`, or the defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ApplierConfig> {
    match path {
        Some(path) => ApplierConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ApplierConfig::default()),
    }
}
