//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use courtside_core::{ChatReply, Endpoint, Intent, StatRecord};

pub fn format_reply(reply: &ChatReply, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::to_pretty(reply),
        OutputFormat::Cli => terminal::format_reply(reply),
    }
}

pub fn format_intent(intent: &Intent, endpoint: Option<Endpoint>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_intent(intent, endpoint),
        OutputFormat::Cli => terminal::format_intent(intent, endpoint),
    }
}

pub fn format_record(record: &StatRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::to_pretty(record),
        OutputFormat::Cli => terminal::format_record(record),
    }
}
