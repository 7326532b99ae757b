pub mod commands;
pub mod config;
pub mod dispatch;
pub mod git;
pub mod resolve;
pub mod styling;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::Session;
pub use dispatch::CommandTable;
