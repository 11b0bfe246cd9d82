//! Remy CLI Application
//!
//! Command-line front end and HTTP API for the Remy cooking assistant.

mod args;
mod cli;
mod console;
mod cook;
mod renderer;
mod server;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use remy_core::RecipeLibraryBuilder;
use renderer::TerminalRenderer;
use server::{run_server, AppState};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.assistant_config();
    let Args {
        database_file,
        no_color,
        command,
        ..
    } = args;

    let library = RecipeLibraryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize recipe library")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Remy started");

    match command {
        Some(Recipe { command }) => {
            Cli::new(library, renderer, config)
                .handle_recipe_command(command)
                .await
        }
        Some(Cook(args)) => Cli::new(library, renderer, config).cook(&args.id).await,
        Some(Serve(args)) => {
            let state = AppState::from_config(library, &config)
                .context("Failed to configure HTTP clients")?;
            run_server(args.bind, state).await
        }
        None => Cli::new(library, renderer, config).list_recipes().await,
    }
}
