use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use drivelink::config::Config;
use drivelink::drive::ClientConfig;
use drivelink::drive::client::DEFAULT_API_BASE;
use drivelink::shell::{self, Flow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Parser)]
#[command(name = "drivelink", version, about = "Find the Google Drive copy of a local file")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// OAuth access token with a Drive read scope
    #[arg(long, env = "DRIVELINK_ACCESS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Id of the folder treated as the top of the local tree
    #[arg(long, env = "DRIVELINK_ROOT_ID", global = true)]
    root_id: Option<String>,

    /// Drive API base URL
    #[arg(long, env = "DRIVELINK_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Result pages to follow for a single search
    #[arg(long, default_value_t = 1, global = true)]
    max_pages: usize,

    /// Sessions kept in the cache
    #[arg(long, default_value_t = drivelink::cache::DEFAULT_CAPACITY, global = true)]
    cache_capacity: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve local paths or file:// URLs and exit
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Interactive shell simulating browser sessions (default)
    Shell,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            client: ClientConfig {
                api_base: self.api_base.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
                max_pages: self.max_pages,
            },
            access_token: self.token.clone(),
            root_id: self.root_id.clone(),
            cache_capacity: self.cache_capacity,
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    drivelink::logging::init(cli.verbose);
    let config = cli.config();

    let mut state = match shell::ShellState::new(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} Failed to initialize Drive client: {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Resolve { paths }) => {
            let mut failed = false;
            for path in paths {
                let line = format!("resolve {}", shell_quote(&path));
                if let Err(e) = state.execute(&line).await {
                    eprintln!("{} {path}: {:#}", "Error:".red().bold(), e);
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Shell) | None => run_shell(state, &config).await,
    }
}

async fn run_shell(mut state: shell::ShellState, config: &Config) -> anyhow::Result<()> {
    println!("{}", "=".repeat(60).cyan());
    println!("{}", "  drivelink - local files to Google Drive".bold().cyan());
    println!("{}", "=".repeat(60).cyan());
    println!();
    println!("Type 'help' for available commands or 'exit' to quit");
    println!();

    let shutdown = CancellationToken::new();
    let sweeper = state
        .cache()
        .spawn_sweeper(config.sweep_interval, shutdown.clone());

    let mut rl = DefaultEditor::new()?;

    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".drivelink_history");
        p
    });
    if let Some(path) = &history_file {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(&state.prompt()) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match state.execute(&line).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => break,
                    Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    if let Some(path) = &history_file {
        let _ = rl.save_history(path);
    }

    shutdown.cancel();
    let _ = sweeper.await;
    println!("Goodbye!");
    Ok(())
}

/// Quote an argument so the shell parser reads it back verbatim
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}
