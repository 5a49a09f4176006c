use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use colored::*;

pub mod auth;
pub mod resolve;
pub mod tab;

use super::ShellState;
use crate::cache::SessionKey;
use crate::drive::file_view_url;
use crate::resolver::{MatchResult, MatchType};

/// Trait for shell commands
#[async_trait]
pub trait Command: Send + Sync {
    /// Get the command name
    fn name(&self) -> &str;

    /// Get command usage help
    fn usage(&self) -> &str;

    /// One-line description for `help`
    fn description(&self) -> &str;

    /// Execute the command
    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()>;
}

/// Fetch the positional argument at `index`, or fail with the usage line
pub(crate) fn arg<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Usage: {usage}"))
}

pub(crate) fn parse_key(raw: &str) -> Result<SessionKey> {
    raw.parse()
        .context(format!("Invalid session key: {raw}"))
}

/// Colored label for a match classification
pub fn match_label(match_type: MatchType) -> ColoredString {
    match match_type {
        MatchType::Full => "full".green().bold(),
        MatchType::Partial => "partial".yellow().bold(),
        MatchType::None => "none".dimmed(),
        MatchType::Login => "login".red().bold(),
    }
}

/// Render a resolution as one line: label, id and viewer URL
pub fn format_result(result: &MatchResult) -> String {
    let label = match_label(result.match_type());
    match result {
        MatchResult::Full { file_id } => format!("{label}  {file_id}  {}", file_view_url(file_id)),
        MatchResult::Partial { file_id, depth } => format!(
            "{label}  {file_id}  {}  ({depth} folder(s) verified)",
            file_view_url(file_id)
        ),
        MatchResult::None => format!("{label}  no matching file in Drive"),
        MatchResult::Login => format!("{label}  sign in with `login <token>`"),
    }
}
