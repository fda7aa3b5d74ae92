pub mod cli;
pub mod command;
mod error;
pub mod forge;
pub mod output;
pub mod reconcile;

pub use error::{Result, StewardError};
