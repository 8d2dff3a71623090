//! Env module - virtual environment list, details and actions

mod details;
mod entry;
mod list;
mod size;

pub mod backup;
pub mod discovery;
pub mod shell;

pub use details::EnvDetails;
pub use entry::EnvEntry;
pub use list::EnvList;
