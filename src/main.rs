//! Todos CLI
//!
//! Runs the todo page in the terminal, or performs a single list or create
//! operation and prints the resulting page.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

use todos::config::{generate_default_config, Config, LoadedConfig};
use todos::view::{render, Command, TodoView};
use todos::{logging, Session, TodoApi, TodoClient};

#[derive(Parser)]
#[command(name = "todos")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Single-page todo list backed by a REST API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// API base URL (overrides config file and TODOS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/todos/config.toml, then ./todos.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive page (default)
    Shell,

    /// Load todos from the backend and print them
    List,

    /// Load sample todos from the health endpoint and print them
    Sample,

    /// Create a todo
    Add {
        /// Title words
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Wrote default config to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let loaded = match &cli.config {
        Some(path) => LoadedConfig {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            skipped: Vec::new(),
        },
        None => Config::load_default(),
    };

    let mut config = loaded.config;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    logging::init(&config.logging).context("Failed to initialise logging")?;

    match &loaded.source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    for e in &loaded.skipped {
        tracing::warn!("Ignoring config file: {}", e);
    }

    let base_url = config.api.base_url();
    tracing::info!("Todo API: {}", base_url);
    let api: Arc<dyn TodoApi> =
        Arc::new(TodoClient::new(&base_url).context("Failed to create HTTP client")?);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut session = Session::new(api);
            session
                .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
                .context("Terminal I/O failed")?;
        }
        Commands::List => one_shot(api.as_ref(), Command::LoadAll).await,
        Commands::Sample => one_shot(api.as_ref(), Command::LoadSample).await,
        Commands::Add { title } => {
            let mut view = TodoView::new();
            view.set_draft(title.join(" "));
            match view.submit() {
                Some(create) => {
                    view.dispatch(api.as_ref(), create).await;
                    print!("{}", render(&view, api.base_url()));
                }
                None => anyhow::bail!("Title must not be empty"),
            }
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

async fn one_shot(api: &dyn TodoApi, command: Command) {
    let mut view = TodoView::new();
    view.dispatch(api, command).await;
    print!("{}", render(&view, api.base_url()));
}
