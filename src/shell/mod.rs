pub mod commands;
mod words;

use anyhow::{Result, anyhow};
use colored::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::SessionCache;
use crate::config::Config;
use crate::drive::{DriveClient, LookupMetrics};
use crate::link::LinkService;
use crate::providers::MemoryStore;
use crate::resolver::PathResolver;
use commands::Command;

/// Whether the REPL should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Shell state - owns the link service and dispatches commands
pub struct ShellState {
    link: Arc<LinkService>,
    /// Token and root id, editable with `login`/`logout`/`root`
    store: Arc<MemoryStore>,
    metrics: Arc<LookupMetrics>,
    /// Registered commands
    commands: HashMap<String, Arc<dyn Command>>,
}

impl ShellState {
    /// Build the Drive client, resolver and cache from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = DriveClient::new(config.client.clone())?;
        let metrics = client.metrics();
        let store = Arc::new(MemoryStore::new(
            config.access_token.clone(),
            config.root_id.clone(),
        ));
        let resolver = PathResolver::new(Arc::new(client), store.clone(), store.clone());
        let cache = SessionCache::new(config.cache_capacity);

        Ok(Self::from_components(
            LinkService::new(resolver, cache),
            store,
            metrics,
        ))
    }

    /// Create a shell state from components (useful for testing)
    pub fn from_components(
        link: LinkService,
        store: Arc<MemoryStore>,
        metrics: Arc<LookupMetrics>,
    ) -> Self {
        let mut state = ShellState {
            link: Arc::new(link),
            store,
            metrics,
            commands: HashMap::new(),
        };

        state.register_command(Arc::new(commands::tab::OpenCommand));
        state.register_command(Arc::new(commands::tab::FocusCommand));
        state.register_command(Arc::new(commands::tab::ClickCommand));
        state.register_command(Arc::new(commands::tab::CloseCommand));
        state.register_command(Arc::new(commands::resolve::ResolveCommand));
        state.register_command(Arc::new(commands::auth::LoginCommand));
        state.register_command(Arc::new(commands::auth::LogoutCommand));
        state.register_command(Arc::new(commands::auth::RootCommand));

        state
    }

    fn register_command(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    /// Execute a command line
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let parts = words::split_words(line)?;
        let Some((cmd_name, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match cmd_name.as_str() {
            "exit" | "quit" => return Ok(Flow::Exit),
            "help" => {
                self.print_help();
                return Ok(Flow::Continue);
            }
            "stats" => {
                self.print_stats();
                return Ok(Flow::Continue);
            }
            "sweep" => {
                let removed = self.link.cache().sweep();
                println!("Removed {removed} expired session(s)");
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let command = self
            .commands
            .get(cmd_name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown command: {cmd_name}"))?;
        command.execute(self, args).await?;
        Ok(Flow::Continue)
    }

    pub fn link(&self) -> &Arc<LinkService> {
        &self.link
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn metrics(&self) -> &Arc<LookupMetrics> {
        &self.metrics
    }

    pub fn cache(&self) -> &SessionCache {
        self.link.cache()
    }

    fn print_stats(&self) {
        println!("Sessions cached:   {}", self.cache().len());
        println!("Search requests:   {}", self.metrics.search_count());
        println!("Lookup requests:   {}", self.metrics.get_count());
        println!("Rejected tokens:   {}", self.metrics.unauthorized_count());
        println!("Failed requests:   {}", self.metrics.transport_failure_count());
        println!(
            "Time in requests:  {:.1?}",
            self.metrics.total_request_time()
        );
    }

    fn print_help(&self) {
        println!("Available commands:");
        let mut names: Vec<_> = self.commands.keys().collect();
        names.sort();
        for name in names {
            if let Some(command) = self.commands.get(name) {
                println!("  {:<22} - {}", command.usage(), command.description());
            }
        }
        println!("  {:<22} - Drop expired cache entries", "sweep");
        println!("  {:<22} - Show request and cache statistics", "stats");
        println!("  {:<22} - Show this help", "help");
        println!("  {:<22} - Exit the shell", "exit/quit");
    }

    /// Get the prompt string
    pub fn prompt(&self) -> String {
        if self.store.has_token() {
            format!("{} $ ", "drivelink".cyan())
        } else {
            format!("{} $ ", "drivelink (signed out)".yellow())
        }
    }
}
