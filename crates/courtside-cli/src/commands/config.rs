//! Config command

use crate::app::OutputFormat;
use crate::output::json;
use anyhow::Result;
use courtside_core::Config;

pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let shown = config.redacted();
    match format {
        OutputFormat::Json => print!("{}", json::to_pretty(&shown)),
        OutputFormat::Cli => {
            println!("# {}", Config::default_path().display());
            print!("{}", serde_yaml::to_string(&shown)?);
        }
    }
    Ok(())
}
