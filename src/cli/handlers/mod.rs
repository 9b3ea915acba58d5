//! Command handlers for the CLI

mod agent;
mod common;
mod config;
mod list;
#[cfg(feature = "api")]
mod serve;
mod ticket;

pub use agent::{handle_agent_add, handle_agent_list};
pub use common::HandlerContext;
pub use config::handle_config_show;
pub use list::{ListOptions, handle_list_command};
#[cfg(feature = "api")]
pub use serve::handle_serve_command;
pub use ticket::{
    EditParams, handle_assign_command, handle_close_command, handle_edit_command,
    handle_new_command, handle_resolve_command, handle_show_command,
};
