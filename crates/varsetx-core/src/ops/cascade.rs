//! Node → choice group → choice selection cascade
//!
//! Holds the operator's current selection and the candidate lists derived
//! from the scene. Changing an upstream level always clears every level
//! below it and re-derives the lists; candidate lists keep the scene's
//! declaration order.

use crate::errors::{Result, VarsetXError};
use crate::model::{ChoiceTriple, SelectionLevel, SelectionState};
use crate::notify::{Notification, NotificationKind};
use crate::scene::SceneHandle;
use crate::{log_op_end, log_op_error, log_op_start};

/// UI-independent selection state machine
#[derive(Default)]
pub struct SelectionCascade {
    scene: Option<Box<dyn SceneHandle>>,
    state: SelectionState,
    candidate_nodes: Vec<String>,
    candidate_groups: Vec<String>,
    candidate_choices: Vec<String>,
}

impl std::fmt::Debug for SelectionCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCascade")
            .field("has_scene", &self.scene.is_some())
            .field("state", &self.state)
            .field("candidate_nodes", &self.candidate_nodes)
            .field("candidate_groups", &self.candidate_groups)
            .field("candidate_choices", &self.candidate_choices)
            .finish()
    }
}

impl SelectionCascade {
    /// Cascade with no scene; every candidate list is empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scene and rebuild the candidate node list
    ///
    /// The selection is reset to empty. A node is a candidate when it
    /// exposes at least one group offering at least one choice. An empty
    /// candidate list is reported as `NoCandidates`, not as an error.
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If a node the scene lists cannot be queried;
    ///   the cascade keeps the new scene with no candidates
    pub fn set_scene_handle(&mut self, handle: Box<dyn SceneHandle>) -> Result<Notification> {
        log_op_start!("set_scene_handle");
        let start = std::time::Instant::now();

        self.scene = Some(handle);
        self.state = SelectionState::new();
        self.candidate_nodes.clear();
        self.candidate_groups.clear();
        self.candidate_choices.clear();

        let candidates = self.collect_candidate_nodes().map_err(|e| {
            log_op_error!(
                "set_scene_handle",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;
        self.candidate_nodes = candidates;

        log_op_end!(
            "set_scene_handle",
            duration_ms = start.elapsed().as_millis() as u64,
            candidates_len = self.candidate_nodes.len()
        );

        Ok(if self.candidate_nodes.is_empty() {
            Notification::new(
                NotificationKind::NoCandidates,
                "No nodes with choice groups found in scene",
            )
        } else {
            Notification::new(
                NotificationKind::CandidatesFound,
                format!(
                    "Found {} node(s) with choice groups",
                    self.candidate_nodes.len()
                ),
            )
        })
    }

    /// Select a node, or clear the node level with `None`
    ///
    /// Clears group and choice. When the node offers exactly one group, that
    /// group is selected as well and its choices are derived.
    ///
    /// # Errors
    /// * `InvalidSelection` - If `path` is not a candidate node; state unchanged
    /// * `SceneQueryFailed` - If the scene cannot resolve the node; the node
    ///   stays selected with empty downstream levels
    pub fn select_node(&mut self, path: Option<&str>) -> Result<()> {
        log_op_start!("select_node", node_path = path.unwrap_or_default());
        let start = std::time::Instant::now();

        self.select_node_impl(path).map_err(|e| {
            log_op_error!(
                "select_node",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                node_path = path.unwrap_or_default()
            );
            e
        })?;

        log_op_end!(
            "select_node",
            duration_ms = start.elapsed().as_millis() as u64,
            node_path = path.unwrap_or_default(),
            group = self.state.group.as_deref().unwrap_or_default()
        );
        Ok(())
    }

    fn select_node_impl(&mut self, path: Option<&str>) -> Result<()> {
        let Some(path) = path else {
            self.state = SelectionState::new();
            self.candidate_groups.clear();
            self.candidate_choices.clear();
            return Ok(());
        };

        ensure_candidate(SelectionLevel::Node, path, &self.candidate_nodes)?;

        self.state = SelectionState {
            node: Some(path.to_string()),
            group: None,
            choice: None,
        };
        self.candidate_groups.clear();
        self.candidate_choices.clear();

        let (groups, advanced) = {
            let scene = self.scene_ref()?;
            let groups = offerable_groups(scene, path)?;
            let advanced = match groups.as_slice() {
                [only] => Some((only.clone(), scene.choices(path, only)?)),
                _ => None,
            };
            (groups, advanced)
        };

        if let Some((group, choices)) = advanced {
            self.state.group = Some(group);
            self.candidate_choices = choices;
        }
        self.candidate_groups = groups;
        Ok(())
    }

    /// Select a choice group on the current node, or clear it with `None`
    ///
    /// # Errors
    /// * `InvalidSelection` - If `name` is not offered by the current node
    /// * `SceneQueryFailed` - If the scene can no longer resolve the node or
    ///   group; group and choice are reset to empty
    pub fn select_group(&mut self, name: Option<&str>) -> Result<()> {
        log_op_start!("select_group", group = name.unwrap_or_default());
        let start = std::time::Instant::now();

        self.select_group_impl(name).map_err(|e| {
            log_op_error!(
                "select_group",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                group = name.unwrap_or_default()
            );
            e
        })?;

        log_op_end!(
            "select_group",
            duration_ms = start.elapsed().as_millis() as u64,
            group = name.unwrap_or_default(),
            candidates_len = self.candidate_choices.len()
        );
        Ok(())
    }

    fn select_group_impl(&mut self, name: Option<&str>) -> Result<()> {
        let Some(name) = name else {
            self.state.group = None;
            self.state.choice = None;
            self.candidate_choices.clear();
            return Ok(());
        };

        ensure_candidate(SelectionLevel::Group, name, &self.candidate_groups)?;

        // A group candidate implies a selected node
        let node = self
            .state
            .node
            .clone()
            .ok_or(VarsetXError::IncompleteSelection {
                field: SelectionLevel::Node,
            })?;

        self.state.group = None;
        self.state.choice = None;
        self.candidate_choices.clear();

        let choices = self.scene_ref()?.choices(&node, name)?;
        self.state.group = Some(name.to_string());
        self.candidate_choices = choices;
        Ok(())
    }

    /// Select a choice in the current group, or clear it with `None`
    ///
    /// # Errors
    /// * `InvalidSelection` - If `name` is not offered by the current group
    pub fn select_choice(&mut self, name: Option<&str>) -> Result<()> {
        log_op_start!("select_choice", choice = name.unwrap_or_default());
        let start = std::time::Instant::now();

        if let Some(name) = name {
            ensure_candidate(SelectionLevel::Choice, name, &self.candidate_choices).map_err(
                |e| {
                    log_op_error!(
                        "select_choice",
                        e.clone(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        choice = name
                    );
                    e
                },
            )?;
        }
        self.state.choice = name.map(str::to_string);

        log_op_end!(
            "select_choice",
            duration_ms = start.elapsed().as_millis() as u64,
            choice = name.unwrap_or_default()
        );
        Ok(())
    }

    /// Snapshot of the current selection
    pub fn current_selection(&self) -> SelectionState {
        self.state.clone()
    }

    /// The current selection as a triple
    ///
    /// # Errors
    /// * `IncompleteSelection` - Naming the first empty level
    pub fn confirmed_triple(&self) -> Result<ChoiceTriple> {
        self.state.to_triple()
    }

    /// The choice the scene currently reports as active for the selected group
    ///
    /// Informational only; the selection is not changed. `None` when no
    /// group is selected.
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the scene no longer resolves the node or group
    pub fn active_choice(&self) -> Result<Option<String>> {
        match (&self.state.node, &self.state.group, &self.scene) {
            (Some(node), Some(group), Some(scene)) => scene.active_choice(node, group),
            _ => Ok(None),
        }
    }

    /// Nodes exposing at least one selectable group, in traversal order
    pub fn candidate_nodes(&self) -> &[String] {
        &self.candidate_nodes
    }

    /// Groups of the selected node; empty when no node is selected
    pub fn candidate_groups(&self) -> &[String] {
        &self.candidate_groups
    }

    /// Choices of the selected group; empty when no group is selected
    pub fn candidate_choices(&self) -> &[String] {
        &self.candidate_choices
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    fn scene_ref(&self) -> Result<&dyn SceneHandle> {
        self.scene
            .as_deref()
            .ok_or_else(|| VarsetXError::SceneQueryFailed {
                node_path: self.state.node.clone().unwrap_or_default(),
                reason: "no scene loaded".to_string(),
            })
    }

    fn collect_candidate_nodes(&self) -> Result<Vec<String>> {
        let scene = self.scene_ref()?;
        let mut candidates = Vec::new();
        for path in scene.list_nodes() {
            if !offerable_groups(scene, &path)?.is_empty() {
                candidates.push(path);
            }
        }
        Ok(candidates)
    }
}

/// Groups of a node that offer at least one choice, in declaration order
fn offerable_groups(scene: &dyn SceneHandle, path: &str) -> Result<Vec<String>> {
    let mut offerable = Vec::new();
    for group in scene.choice_groups(path)? {
        if !scene.choices(path, &group)?.is_empty() {
            offerable.push(group);
        }
    }
    Ok(offerable)
}

fn ensure_candidate(level: SelectionLevel, value: &str, candidates: &[String]) -> Result<()> {
    if candidates.iter().any(|c| c == value) {
        Ok(())
    } else {
        Err(VarsetXError::InvalidSelection {
            level,
            value: value.to_string(),
            candidates: candidates.to_vec(),
        })
    }
}
