//! Scene access
//!
//! The cascade only ever reads a scene through `SceneHandle`. Production
//! hosts implement it over their scene-composition library; `memory` and
//! `fixture` provide an in-process implementation and a YAML loader for it.

pub mod fixture;
pub mod memory;

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::Result;

pub use fixture::FixtureLoader;
pub use memory::{ChoiceGroup, InMemoryScene, SceneNode};

/// Read-only query surface over a composed scene
///
/// All sequences come back in declaration order.
pub trait SceneHandle {
    /// Every node path, in traversal order
    fn list_nodes(&self) -> Vec<String>;

    /// Choice group names exposed by a node
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the path does not resolve
    fn choice_groups(&self, node_path: &str) -> Result<Vec<String>>;

    /// Choice names offered by one group of a node
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the path or group does not resolve
    fn choices(&self, node_path: &str, group: &str) -> Result<Vec<String>>;

    /// The choice the scene currently reports as active, if any
    ///
    /// # Errors
    /// * `SceneQueryFailed` - If the path or group does not resolve
    fn active_choice(&self, node_path: &str, group: &str) -> Result<Option<String>>;
}

/// Produces scene handles from a locator (file path, URI, ...)
pub trait SceneLoader {
    /// # Errors
    /// * `LoadFailed` - Carrying the loader's diagnostic unchanged
    fn load(&self, locator: &str) -> Result<Box<dyn SceneHandle>>;
}

/// Shared handles let a host keep mutating a live scene the cascade reads
impl<T: SceneHandle + ?Sized> SceneHandle for Rc<RefCell<T>> {
    fn list_nodes(&self) -> Vec<String> {
        self.borrow().list_nodes()
    }

    fn choice_groups(&self, node_path: &str) -> Result<Vec<String>> {
        self.borrow().choice_groups(node_path)
    }

    fn choices(&self, node_path: &str, group: &str) -> Result<Vec<String>> {
        self.borrow().choices(node_path, group)
    }

    fn active_choice(&self, node_path: &str, group: &str) -> Result<Option<String>> {
        self.borrow().active_choice(node_path, group)
    }
}
