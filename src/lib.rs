pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod path;
pub mod suppress;
pub mod types;

pub use error::SuppressionError;
pub use suppress::{ErrorMessage, Scope, Suppression, Suppressions};
