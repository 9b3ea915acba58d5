use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Handle `config show`
pub fn handle_config_show(config_path: Option<&Path>, output: &OutputFormatter) -> Result<()> {
    let config = Config::load(config_path)?;

    if output.is_json() {
        output.print_json(&config)
    } else {
        output.info(serde_yaml::to_string(&config)?.trim_end());
        Ok(())
    }
}
