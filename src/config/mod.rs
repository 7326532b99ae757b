//! Configuration for vc
//!
//! Settings come from `<config dir>/vc/config.toml`, then `VC_*` environment
//! variables. Every key is optional:
//!
//! ```toml
//! remote = "origin"
//! default-branch = "master"
//! history-limit = 10
//! open-command = "firefox --new-tab {url}"
//! ```

mod expansion;
mod user;

pub use expansion::expand_open_command;
pub use user::VcConfig;
