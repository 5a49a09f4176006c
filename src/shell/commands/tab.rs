use anyhow::Result;
use async_trait::async_trait;
use colored::*;

use super::{Command, arg, format_result, parse_key};
use crate::link::{Activation, LinkState};
use crate::shell::ShellState;

fn print_state(key: u64, state: &LinkState) {
    match state {
        LinkState::Idle => println!("[{key}] {}", "not a local file".dimmed()),
        LinkState::Resolved(result) => println!("[{key}] {}", format_result(result)),
    }
}

/// open - a session navigated to a URL
pub struct OpenCommand;

#[async_trait]
impl Command for OpenCommand {
    fn name(&self) -> &str {
        "open"
    }

    fn usage(&self) -> &str {
        "open KEY URL"
    }

    fn description(&self) -> &str {
        "Load a URL in a session and resolve it"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        let key = parse_key(arg(args, 0, self.usage())?)?;
        let url = arg(args, 1, self.usage())?;
        let link_state = state.link().navigate(key, url).await?;
        print_state(key, &link_state);
        Ok(())
    }
}

/// focus - a session came to the foreground
pub struct FocusCommand;

#[async_trait]
impl Command for FocusCommand {
    fn name(&self) -> &str {
        "focus"
    }

    fn usage(&self) -> &str {
        "focus KEY URL"
    }

    fn description(&self) -> &str {
        "Switch to a session, reusing its cached result"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        let key = parse_key(arg(args, 0, self.usage())?)?;
        let url = arg(args, 1, self.usage())?;
        let link_state = state.link().focus(key, url).await?;
        print_state(key, &link_state);
        Ok(())
    }
}

/// click - activate the link for a session
pub struct ClickCommand;

#[async_trait]
impl Command for ClickCommand {
    fn name(&self) -> &str {
        "click"
    }

    fn usage(&self) -> &str {
        "click KEY"
    }

    fn description(&self) -> &str {
        "Show what activating a session's link would do"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        let key = parse_key(arg(args, 0, self.usage())?)?;
        match state.link().click(key).await {
            Activation::Login => println!("Please sign in with `login <token>` first."),
            Activation::NoMatch => println!("No matching file found in Google Drive."),
            Activation::Open { url, exact: true } => {
                println!("Exact match found. Opening {}", url.green())
            }
            Activation::Open { url, exact: false } => {
                println!("Partial match found. Opening {}", url.yellow())
            }
        }
        Ok(())
    }
}

/// close - a session ended
pub struct CloseCommand;

#[async_trait]
impl Command for CloseCommand {
    fn name(&self) -> &str {
        "close"
    }

    fn usage(&self) -> &str {
        "close KEY"
    }

    fn description(&self) -> &str {
        "End a session and forget its cached result"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        let key = parse_key(arg(args, 0, self.usage())?)?;
        state.link().close(key);
        Ok(())
    }
}
