pub mod upstream;

pub use upstream::{reachable_edit_nodes, upstream_path};
