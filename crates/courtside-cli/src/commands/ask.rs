//! Ask command

use crate::app::{OutputFormat, QuestionArgs};
use crate::output;
use anyhow::Result;
use courtside_core::{ChatPipeline, Config, CourtsideError};

pub async fn run(args: QuestionArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let question = args.text();
    if question.trim().is_empty() {
        return Err(CourtsideError::InvalidInput("No question provided".to_string()).into());
    }

    let pipeline = ChatPipeline::from_config(config)?;
    let reply = pipeline.answer(&question).await?;
    print!("{}", output::format_reply(&reply, format));
    Ok(())
}
