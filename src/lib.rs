//! VITRINA - Terminal Business Directory Library
//!
//! A terminal-based municipal business directory with filtering, map
//! synchronization and a paginated articles view, built in Rust.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
