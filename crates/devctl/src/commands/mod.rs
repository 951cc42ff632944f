//! Command handlers: bridge CLI args -> core store operations -> output.

pub mod config_cmd;
pub mod devices;
pub mod login;
pub mod util;
