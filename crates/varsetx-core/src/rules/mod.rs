pub mod validation;

pub use validation::{validate_appended, validate_chain};
