use serde::{Deserialize, Serialize};

use crate::errors::{Result, VarsetXError};

/// One level of the node → group → choice cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionLevel {
    Node,
    Group,
    Choice,
}

impl std::fmt::Display for SelectionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SelectionLevel::Node => "node",
            SelectionLevel::Group => "group",
            SelectionLevel::Choice => "choice",
        };
        f.write_str(name)
    }
}

/// Snapshot of the cascade's current selection
///
/// A level is only ever populated when every level above it is populated:
/// `group` implies `node`, `choice` implies `group`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub node: Option<String>,
    pub group: Option<String>,
    pub choice: Option<String>,
}

impl SelectionState {
    /// Empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the upstream-populated invariant
    pub fn is_consistent(&self) -> bool {
        (self.node.is_some() || self.group.is_none())
            && (self.group.is_some() || self.choice.is_none())
    }

    /// Check whether all three levels are populated
    pub fn is_complete(&self) -> bool {
        self.node.is_some() && self.group.is_some() && self.choice.is_some()
    }

    /// Convert to a triple, naming the first empty level on failure
    ///
    /// # Errors
    /// * `IncompleteSelection` - If any level is still empty
    pub fn to_triple(&self) -> Result<ChoiceTriple> {
        let node = self.node.as_ref().ok_or(VarsetXError::IncompleteSelection {
            field: SelectionLevel::Node,
        })?;
        let group = self.group.as_ref().ok_or(VarsetXError::IncompleteSelection {
            field: SelectionLevel::Group,
        })?;
        let choice = self
            .choice
            .as_ref()
            .ok_or(VarsetXError::IncompleteSelection {
                field: SelectionLevel::Choice,
            })?;
        Ok(ChoiceTriple::new(node.clone(), group.clone(), choice.clone()))
    }
}

/// A confirmed (node path, group, choice) selection
///
/// Identity of an edit: two triples are the same edit exactly when all three
/// strings are byte-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceTriple {
    pub node_path: String,
    pub group: String,
    pub choice: String,
}

impl ChoiceTriple {
    pub fn new(
        node_path: impl Into<String>,
        group: impl Into<String>,
        choice: impl Into<String>,
    ) -> Self {
        Self {
            node_path: node_path.into(),
            group: group.into(),
            choice: choice.into(),
        }
    }

    /// Reject triples with an empty field
    ///
    /// # Errors
    /// * `IncompleteSelection` - Naming the first empty field
    pub fn validate(&self) -> Result<()> {
        let fields = [
            (SelectionLevel::Node, &self.node_path),
            (SelectionLevel::Group, &self.group),
            (SelectionLevel::Choice, &self.choice),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(VarsetXError::IncompleteSelection { field: *field }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for ChoiceTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {{{}={}}}", self.node_path, self.group, self.choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_is_consistent() {
        let state = SelectionState::new();
        assert!(state.is_consistent());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_group_without_node_is_inconsistent() {
        let state = SelectionState {
            node: None,
            group: Some("look".to_string()),
            choice: None,
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_to_triple_names_first_missing_level() {
        let state = SelectionState {
            node: Some("/A".to_string()),
            group: None,
            choice: None,
        };
        assert_eq!(
            state.to_triple(),
            Err(VarsetXError::IncompleteSelection {
                field: SelectionLevel::Group
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_choice() {
        let triple = ChoiceTriple::new("/A", "look", "");
        assert_eq!(
            triple.validate(),
            Err(VarsetXError::IncompleteSelection {
                field: SelectionLevel::Choice
            })
        );
        assert!(ChoiceTriple::new("/A", "look", "red").validate().is_ok());
    }

    #[test]
    fn test_triple_display() {
        let triple = ChoiceTriple::new("/A", "look", "red");
        assert_eq!(triple.to_string(), "/A {look=red}");
    }
}
