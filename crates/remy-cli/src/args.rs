use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use remy_core::{AssistantConfig, PollConfig};

use crate::cli::{CookArgs, RecipeCommands, ServeArgs};

/// Remy, a voice-guided cooking assistant
///
/// Remy stores recipes parsed from web pages and walks you through them one
/// step at a time while a voice agent reads the current step and listens
/// for "next step" or "go back".
#[derive(Parser)]
#[command(version, about, name = "remy")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/remy/recipes.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Voice agent identifier used for cooking sessions
    #[arg(long, global = true, env = "REMY_AGENT_ID")]
    pub agent_id: Option<String>,

    /// API key for the signed conversation URL endpoint
    #[arg(long, global = true, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,

    /// Recipe parsing webhook
    #[arg(long, global = true, env = "REMY_WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// Delay between checks for a parsed recipe, in milliseconds
    #[arg(long, global = true, env = "REMY_POLL_INTERVAL_MS", default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// Number of checks for a parsed recipe before giving up
    #[arg(long, global = true, env = "REMY_POLL_ATTEMPTS", default_value_t = 30)]
    pub poll_attempts: u32,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            agent_id: self.agent_id.clone(),
            elevenlabs_api_key: self.elevenlabs_api_key.clone(),
            webhook_url: self.webhook_url.clone(),
            poll: PollConfig {
                interval: Duration::from_millis(self.poll_interval_ms),
                max_attempts: self.poll_attempts,
            },
            ..AssistantConfig::default()
        }
    }
}

/// Available commands for the Remy CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage stored recipes
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Cook a stored recipe step by step
    #[command(alias = "c")]
    Cook(CookArgs),
    /// Start the HTTP API server
    Serve(ServeArgs),
}
