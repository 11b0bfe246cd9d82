//! Subcommand definitions and their handlers.
//!
//! Argument structs carry only clap concerns; the [`Cli`] handler turns
//! them into library calls and renders the results as markdown.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use log::info;
use remy_core::{
    display::{DeleteResult, SaveResult},
    models::Recipe,
    AssistantConfig, RecipeLibrary, RecipeLoader, WebhookClient,
};

use crate::{console::ConsoleConversation, cook::CookingSession, renderer::TerminalRenderer};

/// Show a stored recipe in full
#[derive(Args)]
pub struct ShowRecipeArgs {
    #[arg(help = "Identifier of the recipe to show")]
    pub id: String,
}

/// Parse a recipe from a web page and store it
///
/// The URL is submitted to the parsing webhook. If the webhook answers with
/// the recipe it is stored right away; otherwise Remy waits for the webhook
/// to store it, checking at a fixed interval. Press Ctrl-C to stop waiting.
#[derive(Args)]
pub struct AddRecipeArgs {
    #[arg(help = "Address of the recipe page")]
    pub url: String,
}

/// Store a recipe from a JSON file
///
/// The file uses the webhook's recipe format (`title`, `total_time`,
/// `recipe_ingredients`, `recipe_steps`). Recipes without usable steps are
/// rejected.
#[derive(Args)]
pub struct ImportRecipeArgs {
    #[arg(help = "Path to the recipe JSON file")]
    pub file: PathBuf,
}

/// Delete a stored recipe
#[derive(Args)]
pub struct DeleteRecipeArgs {
    #[arg(help = "Identifier of the recipe to delete")]
    pub id: String,
    #[arg(long, help = "Confirm deletion without prompting")]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// List stored recipes by title
    #[command(alias = "ls")]
    List,
    /// Show a stored recipe in full
    #[command(alias = "s")]
    Show(ShowRecipeArgs),
    /// Parse a recipe from a web page and store it
    #[command(alias = "a")]
    Add(AddRecipeArgs),
    /// Store a recipe from a JSON file
    #[command(alias = "i")]
    Import(ImportRecipeArgs),
    /// Delete a stored recipe
    #[command(alias = "d")]
    Delete(DeleteRecipeArgs),
}

/// Cook a stored recipe step by step
///
/// Starts an interactive session. Type /talk to start or stop the voice
/// session, /next and /prev to move between steps, /retry after an error
/// and /quit to leave. While the session is live, any other line is spoken
/// to the assistant; saying "next step" or "go back" moves between steps.
#[derive(Args)]
pub struct CookArgs {
    #[arg(help = "Identifier of the recipe to cook")]
    pub id: String,
}

/// Start the HTTP API server
#[derive(Args)]
pub struct ServeArgs {
    #[arg(
        long,
        default_value = "127.0.0.1:3000",
        help = "Address the server listens on"
    )]
    pub bind: SocketAddr,
}

/// Agent identifier used when none is configured; the console adapter does
/// not talk to a hosted agent.
const CONSOLE_AGENT_ID: &str = "console";

/// Handles recipe and cooking commands.
pub struct Cli {
    library: RecipeLibrary,
    renderer: TerminalRenderer,
    config: AssistantConfig,
}

impl Cli {
    pub fn new(library: RecipeLibrary, renderer: TerminalRenderer, config: AssistantConfig) -> Self {
        Self {
            library,
            renderer,
            config,
        }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        match command {
            RecipeCommands::List => self.list_recipes().await,
            RecipeCommands::Show(args) => self.show_recipe(&args.id).await,
            RecipeCommands::Add(args) => self.add_recipe(&args.url).await,
            RecipeCommands::Import(args) => self.import_recipe(&args.file).await,
            RecipeCommands::Delete(args) => self.delete_recipe(&args.id, args.confirm).await,
        }
    }

    pub async fn list_recipes(&self) -> Result<()> {
        let summaries = self.library.recipes_for_selection().await;

        if !summaries.is_empty() {
            self.renderer.render("# Recipes\n\n")?;
        }
        self.renderer.render(&summaries.to_string())
    }

    pub async fn show_recipe(&self, id: &str) -> Result<()> {
        let recipe = self
            .library
            .require_recipe(id)
            .await
            .with_context(|| format!("Failed to load recipe {id}"))?;
        self.renderer.render(&recipe.to_string())
    }

    pub async fn add_recipe(&self, url: &str) -> Result<()> {
        let webhook = WebhookClient::new(
            self.config.require_webhook_url()?,
            self.config.request_timeout,
        )?;
        let loader = RecipeLoader::new(webhook, self.library.clone(), self.config.poll);

        self.renderer
            .render(&format!("Parsing {}...\n", url.trim()))?;

        // Dropping the load future on Ctrl-C abandons any polling in flight
        let recipe = tokio::select! {
            result = loader.load(url) => result.map_err(|e| anyhow::anyhow!(e.user_message()))?,
            _ = tokio::signal::ctrl_c() => {
                info!("Recipe loading cancelled");
                bail!("Cancelled while waiting for the recipe");
            }
        };

        self.renderer.render(&SaveResult::new(&recipe).to_string())
    }

    pub async fn import_recipe(&self, file: &Path) -> Result<()> {
        let contents = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let recipe: Recipe = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse recipe JSON in {}", file.display()))?;
        let recipe = recipe.ordered();

        self.library
            .save_recipe(&recipe)
            .await
            .context("Failed to import recipe")?;
        self.renderer.render(&SaveResult::new(&recipe).to_string())
    }

    pub async fn delete_recipe(&self, id: &str, confirm: bool) -> Result<()> {
        let recipe = self
            .library
            .require_recipe(id)
            .await
            .with_context(|| format!("Failed to load recipe {id}"))?;

        if !confirm {
            bail!(
                "Refusing to delete '{}' without --confirm",
                recipe.title
            );
        }

        self.library
            .delete_recipe(id)
            .await
            .context("Failed to delete recipe")?;
        self.renderer.render(&DeleteResult::new(&recipe).to_string())
    }

    pub async fn cook(&self, id: &str) -> Result<()> {
        let recipe = self
            .library
            .require_recipe(id)
            .await
            .with_context(|| format!("Failed to load recipe {id}"))?;

        let agent_id = self
            .config
            .require_agent_id()
            .map(str::to_string)
            .unwrap_or_else(|_| CONSOLE_AGENT_ID.to_string());

        let input = tokio::io::BufReader::new(tokio::io::stdin());
        CookingSession::new(ConsoleConversation::new(), agent_id, &self.renderer)
            .run(recipe, input)
            .await
    }
}
