//! YAML scene fixtures
//!
//! A small hierarchical format for demo and test scenes:
//!
//! ```yaml
//! schema_version: 0
//! nodes:
//!   - name: World
//!     children:
//!       - name: chair
//!         groups:
//!           - name: look
//!             choices: [red, blue]
//!             active: red
//! ```
//!
//! Nodes are flattened depth-first, parents before children, into paths such
//! as `/World/chair`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VarsetXError};

use super::memory::{ChoiceGroup, InMemoryScene};
use super::{SceneHandle, SceneLoader};

/// Top-level fixture document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFixtureV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub nodes: Vec<FixtureNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureNode {
    pub name: String,

    #[serde(default)]
    pub groups: Vec<FixtureGroup>,

    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureGroup {
    pub name: String,

    #[serde(default)]
    pub choices: Vec<String>,

    #[serde(default)]
    pub active: Option<String>,
}

/// Loads fixture files from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLoader;

impl SceneLoader for FixtureLoader {
    fn load(&self, locator: &str) -> Result<Box<dyn SceneHandle>> {
        Ok(Box::new(load_fixture_file(Path::new(locator))?))
    }
}

/// Parse a fixture file into an in-memory scene
///
/// # Errors
/// * `LoadFailed` - If the file cannot be read, parsed, or validated
pub fn load_fixture_file(path: &Path) -> Result<InMemoryScene> {
    let locator = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| VarsetXError::LoadFailed {
        locator: locator.clone(),
        diagnostic: format!("Failed to read scene file: {}", e),
    })?;
    parse_fixture(&locator, &content)
}

/// Parse fixture text into an in-memory scene
///
/// # Errors
/// * `LoadFailed` - On YAML errors or validation failures; `locator` is echoed back
pub fn parse_fixture(locator: &str, content: &str) -> Result<InMemoryScene> {
    let load_failed = |diagnostic: String| VarsetXError::LoadFailed {
        locator: locator.to_string(),
        diagnostic,
    };

    let fixture: SceneFixtureV0 = serde_yaml::from_str(content)
        .map_err(|e| load_failed(format!("YAML parse error: {}", e)))?;

    if fixture.schema_version != 0 {
        return Err(load_failed(format!(
            "Unsupported schema_version: {}. Expected 0",
            fixture.schema_version
        )));
    }

    let mut scene = InMemoryScene::new();
    let mut seen = HashSet::new();
    for node in &fixture.nodes {
        flatten(node, "", &mut seen, &mut scene).map_err(load_failed)?;
    }
    Ok(scene)
}

fn flatten(
    node: &FixtureNode,
    parent_path: &str,
    seen: &mut HashSet<String>,
    scene: &mut InMemoryScene,
) -> std::result::Result<(), String> {
    if node.name.trim().is_empty() || node.name.contains('/') {
        return Err(format!(
            "Invalid node name '{}' under '{}'",
            node.name,
            if parent_path.is_empty() { "/" } else { parent_path }
        ));
    }

    let path = format!("{}/{}", parent_path, node.name);
    if !seen.insert(path.clone()) {
        return Err(format!("Duplicate node path: {}", path));
    }

    let mut group_names = HashSet::new();
    let mut groups = Vec::with_capacity(node.groups.len());
    for group in &node.groups {
        if group.name.trim().is_empty() {
            return Err(format!("Empty choice group name on {}", path));
        }
        if !group_names.insert(group.name.as_str()) {
            return Err(format!("Duplicate choice group '{}' on {}", group.name, path));
        }

        let mut choice_names = HashSet::new();
        for choice in &group.choices {
            if choice.is_empty() {
                return Err(format!("Empty choice name in {}:{}", path, group.name));
            }
            if !choice_names.insert(choice.as_str()) {
                return Err(format!(
                    "Duplicate choice '{}' in {}:{}",
                    choice, path, group.name
                ));
            }
        }

        let mut converted = ChoiceGroup::new(group.name.clone(), group.choices.clone());
        if let Some(active) = &group.active {
            if !choice_names.contains(active.as_str()) {
                return Err(format!(
                    "Active choice '{}' is not declared in {}:{}",
                    active, path, group.name
                ));
            }
            converted = converted.with_active(active.clone());
        }
        groups.push(converted);
    }

    scene.push_node(path.clone(), groups);

    for child in &node.children {
        flatten(child, &path, seen, scene)?;
    }
    Ok(())
}
