use crate::errors::{Result, VarsetXError};

use super::SceneHandle;

/// A named set of mutually exclusive choices on one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    pub name: String,
    pub choices: Vec<String>,
    pub active: Option<String>,
}

impl ChoiceGroup {
    pub fn new<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            choices: choices.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn with_active(mut self, choice: impl Into<String>) -> Self {
        self.active = Some(choice.into());
        self
    }
}

/// A scene node and the choice groups it exposes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    pub path: String,
    pub groups: Vec<ChoiceGroup>,
}

/// Scene held entirely in memory, nodes kept in insertion (traversal) order
#[derive(Debug, Clone, Default)]
pub struct InMemoryScene {
    nodes: Vec<SceneNode>,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `push_node`
    pub fn with_node(mut self, path: impl Into<String>, groups: Vec<ChoiceGroup>) -> Self {
        self.push_node(path, groups);
        self
    }

    /// Append a node; an existing node with the same path is replaced in place
    pub fn push_node(&mut self, path: impl Into<String>, groups: Vec<ChoiceGroup>) {
        let path = path.into();
        match self.nodes.iter_mut().find(|n| n.path == path) {
            Some(existing) => existing.groups = groups,
            None => self.nodes.push(SceneNode { path, groups }),
        }
    }

    /// Drop a node, returning whether it existed
    pub fn remove_node(&mut self, path: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.path != path);
        self.nodes.len() != before
    }

    /// Change which choice the scene reports as active
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the node, group, or choice does not exist
    pub fn set_active(&mut self, node_path: &str, group: &str, choice: &str) -> Result<()> {
        let group = self.group_mut(node_path, group)?;
        if !group.choices.iter().any(|c| c == choice) {
            return Err(VarsetXError::SceneQueryFailed {
                node_path: node_path.to_string(),
                reason: format!("group '{}' has no choice '{}'", group.name, choice),
            });
        }
        group.active = Some(choice.to_string());
        Ok(())
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    fn node(&self, node_path: &str) -> Result<&SceneNode> {
        self.nodes
            .iter()
            .find(|n| n.path == node_path)
            .ok_or_else(|| VarsetXError::SceneQueryFailed {
                node_path: node_path.to_string(),
                reason: "node not found in scene".to_string(),
            })
    }

    fn group(&self, node_path: &str, group: &str) -> Result<&ChoiceGroup> {
        self.node(node_path)?
            .groups
            .iter()
            .find(|g| g.name == group)
            .ok_or_else(|| VarsetXError::SceneQueryFailed {
                node_path: node_path.to_string(),
                reason: format!("choice group '{}' not found", group),
            })
    }

    fn group_mut(&mut self, node_path: &str, group: &str) -> Result<&mut ChoiceGroup> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.path == node_path)
            .ok_or_else(|| VarsetXError::SceneQueryFailed {
                node_path: node_path.to_string(),
                reason: "node not found in scene".to_string(),
            })?;
        node.groups
            .iter_mut()
            .find(|g| g.name == group)
            .ok_or_else(|| VarsetXError::SceneQueryFailed {
                node_path: node_path.to_string(),
                reason: format!("choice group '{}' not found", group),
            })
    }
}

impl SceneHandle for InMemoryScene {
    fn list_nodes(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.path.clone()).collect()
    }

    fn choice_groups(&self, node_path: &str) -> Result<Vec<String>> {
        Ok(self
            .node(node_path)?
            .groups
            .iter()
            .map(|g| g.name.clone())
            .collect())
    }

    fn choices(&self, node_path: &str, group: &str) -> Result<Vec<String>> {
        Ok(self.group(node_path, group)?.choices.clone())
    }

    fn active_choice(&self, node_path: &str, group: &str) -> Result<Option<String>> {
        Ok(self.group(node_path, group)?.active.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InMemoryScene {
        InMemoryScene::new()
            .with_node(
                "/A",
                vec![
                    ChoiceGroup::new("look", ["red", "blue"]).with_active("red"),
                    ChoiceGroup::new("lod", ["high", "low"]),
                ],
            )
            .with_node("/B", vec![])
    }

    #[test]
    fn test_queries_keep_declaration_order() {
        let scene = sample();
        assert_eq!(scene.list_nodes(), vec!["/A", "/B"]);
        assert_eq!(scene.choice_groups("/A").unwrap(), vec!["look", "lod"]);
        assert_eq!(scene.choices("/A", "look").unwrap(), vec!["red", "blue"]);
        assert_eq!(
            scene.active_choice("/A", "look").unwrap(),
            Some("red".to_string())
        );
        assert_eq!(scene.active_choice("/A", "lod").unwrap(), None);
    }

    #[test]
    fn test_unknown_path_fails() {
        let scene = sample();
        assert!(matches!(
            scene.choice_groups("/missing"),
            Err(VarsetXError::SceneQueryFailed { .. })
        ));
        assert!(matches!(
            scene.choices("/A", "missing"),
            Err(VarsetXError::SceneQueryFailed { .. })
        ));
    }

    #[test]
    fn test_set_active_validates_choice() {
        let mut scene = sample();
        scene.set_active("/A", "look", "blue").unwrap();
        assert_eq!(
            scene.active_choice("/A", "look").unwrap(),
            Some("blue".to_string())
        );
        assert!(scene.set_active("/A", "look", "green").is_err());
    }

    #[test]
    fn test_push_node_replaces_in_place() {
        let mut scene = sample();
        scene.push_node("/A", vec![]);
        assert_eq!(scene.list_nodes(), vec!["/A", "/B"]);
        assert!(scene.choice_groups("/A").unwrap().is_empty());
        assert!(scene.remove_node("/A"));
        assert!(!scene.remove_node("/A"));
    }
}
