use anyhow::Result;
use async_trait::async_trait;

use super::{Command, arg};
use crate::shell::ShellState;

/// login - install an access token
pub struct LoginCommand;

#[async_trait]
impl Command for LoginCommand {
    fn name(&self) -> &str {
        "login"
    }

    fn usage(&self) -> &str {
        "login TOKEN"
    }

    fn description(&self) -> &str {
        "Use an OAuth access token for Drive requests"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        let token = arg(args, 0, self.usage())?;
        state.store().set_token(Some(token.to_string()));
        println!("Access token set.");
        Ok(())
    }
}

/// logout - forget the access token
pub struct LogoutCommand;

#[async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "logout"
    }

    fn usage(&self) -> &str {
        "logout"
    }

    fn description(&self) -> &str {
        "Forget the access token"
    }

    async fn execute(&self, state: &mut ShellState, _args: &[String]) -> Result<()> {
        state.store().set_token(None);
        Ok(())
    }
}

/// root - show or set the root folder id
pub struct RootCommand;

#[async_trait]
impl Command for RootCommand {
    fn name(&self) -> &str {
        "root"
    }

    fn usage(&self) -> &str {
        "root [ID|-]"
    }

    fn description(&self) -> &str {
        "Show, set, or clear (-) the root folder id"
    }

    async fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<()> {
        match args.first().map(String::as_str) {
            None => match state.store().current_root_id() {
                Some(id) => println!("{id}"),
                None => println!("(no root folder id set)"),
            },
            Some("-") => state.store().set_root_id(None),
            Some(id) => state.store().set_root_id(Some(id.to_string())),
        }
        Ok(())
    }
}
