//! Infrastructure layer providing external service integrations.
//!
//! This module contains the mapping widget integration and the durable
//! preferences storage.

pub mod map;
pub mod persistence;

pub use map::*;
pub use persistence::*;
