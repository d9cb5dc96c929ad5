pub mod models;
pub mod seed;
pub mod services;
pub mod errors;

pub use models::*;
pub use seed::*;
pub use services::*;
pub use errors::*;
