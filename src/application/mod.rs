//! Application layer managing state and directory workflows.
//!
//! This module coordinates between the domain layer and presentation
//! layer, managing the shared filter/selection state and the map
//! synchronization both views rely on.

pub mod state;

pub use state::*;
