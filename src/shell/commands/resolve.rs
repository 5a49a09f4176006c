use anyhow::{Result, bail};
use async_trait::async_trait;

use super::{Command, format_result};
use crate::resolver::LocalPath;
use crate::shell::ShellState;

/// resolve - look up paths or file:// URLs without touching the session cache
pub struct ResolveCommand;

#[async_trait]
impl Command for ResolveCommand {
    fn name(&self) -> &str {
        "resolve"
    }

    fn usage(&self) -> &str {
        "resolve PATH..."
    }

    fn description(&self) -> &str {
        "Resolve local paths or file:// URLs"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        if args.is_empty() {
            bail!("Usage: {}", self.usage());
        }

        for raw in args {
            let path = LocalPath::from_file_url(raw).unwrap_or_else(|| LocalPath::parse(raw));
            let result = state.link().resolver().resolve_path(&path).await?;
            if args.len() > 1 {
                println!("{raw}: {}", format_result(&result));
            } else {
                println!("{}", format_result(&result));
            }
        }
        Ok(())
    }
}
