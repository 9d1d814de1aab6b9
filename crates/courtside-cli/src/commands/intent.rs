//! Intent command

use crate::app::{OutputFormat, QuestionArgs};
use crate::output;
use anyhow::Result;
use courtside_core::{Config, CourtsideError, Endpoint, IntentResolver};

pub async fn run(args: QuestionArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let question = args.text();
    if question.trim().is_empty() {
        return Err(CourtsideError::InvalidInput("No question provided".to_string()).into());
    }

    let resolver = IntentResolver::from_config(config.llm_service.clone())?;
    let intent = resolver.resolve(&question).await?;
    let endpoint = Endpoint::for_intent(&intent);
    print!("{}", output::format_intent(&intent, endpoint, format));
    Ok(())
}
