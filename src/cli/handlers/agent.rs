use super::common::HandlerContext;
use crate::cli::output::OutputFormatter;
use crate::error::Result;
use std::path::Path;

/// Handle `agent add`
pub fn handle_agent_add(
    name: &str,
    config_path: Option<&Path>,
    output: &OutputFormatter,
) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let agent = ctx.stores.directory.add_agent(name)?;

    if output.is_json() {
        output.print_json(&agent)
    } else {
        output.success(&format!("Registered agent '{}' with ID {}", agent.name, agent.id));
        Ok(())
    }
}

/// Handle `agent list`
pub fn handle_agent_list(config_path: Option<&Path>, output: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(config_path)?;
    let agents = ctx.stores.directory.load_all_agents()?;
    output.print_agents(&agents)
}
