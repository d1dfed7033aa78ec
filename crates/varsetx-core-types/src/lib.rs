//! Core types shared across VarsetX facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Session types**: SessionId identifying one selection session
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod session;

pub use session::SessionId;
