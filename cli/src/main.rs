mod config;
mod shell;
mod transport;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_core::{ManagerOptions, RecipeClient, RecipeField, RecipeId, RecipeManager, Transport};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::load_settings;
use crate::transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "recipe", version, about = "Manage recipes on a recipe book API")]
struct Cli {
    /// Config file (defaults to ./recipe.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API base URL; `/recipeapi` is appended
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Hide the find-by-id panel
    #[arg(long, global = true)]
    no_lookup: bool,
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Interactive session (default)
    Shell,
    /// Print the recipe table
    List,
    /// Look up one recipe
    Get {
        #[arg(value_parser = recipe_id)]
        id: RecipeId,
    },
    /// Add a recipe
    Add {
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Update a recipe; unset fields keep their current values
    Update {
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete a recipe
    Delete {
        #[arg(value_parser = recipe_id)]
        id: RecipeId,
    },
}

fn recipe_id(text: &str) -> Result<RecipeId, String> {
    let id = RecipeId::new(text);
    if id.is_path_safe() {
        Ok(id)
    } else {
        Err(format!("`{text}` is not a usable recipe ID"))
    }
}

#[derive(clap::Args, Debug)]
struct FormArgs {
    #[arg(long, value_parser = recipe_id)]
    id: RecipeId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    ingredients: Option<String>,
    #[arg(long)]
    instructions: Option<String>,
}

impl FormArgs {
    fn apply<T: Transport>(self, manager: &mut RecipeManager<T>) {
        // In edit mode the row already carries its id.
        if !manager.store().is_editing() {
            manager.set_field(RecipeField::RecipeId, self.id);
        }
        let optional = [
            (RecipeField::Name, self.name),
            (RecipeField::Ingredients, self.ingredients),
            (RecipeField::Instructions, self.instructions),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                manager.set_field(field, value);
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }
    if cli.no_lookup {
        settings.lookup_panel = false;
    }
    debug!(?settings, "settings loaded");

    let client = RecipeClient::new(&settings.api_url)
        .with_context(|| format!("cannot use api url '{}'", settings.api_url))?;
    let options = ManagerOptions {
        lookup_panel: settings.lookup_panel,
    };
    let mut manager = RecipeManager::new(client, UreqTransport::new(), options);

    match cli.action.unwrap_or(Action::Shell) {
        Action::Shell => {
            let stdin = io::stdin();
            shell::run(&mut manager, stdin.lock(), io::stdout()).context("terminal i/o failed")?;
        }
        action => {
            if let Some(note) = perform(&mut manager, action) {
                println!("{note}");
            }
            println!("{}", manager.render());
        }
    }
    Ok(())
}

/// Run one non-interactive action. Returns a note when the action could not
/// be carried out.
fn perform<T: Transport>(manager: &mut RecipeManager<T>, action: Action) -> Option<String> {
    manager.mount();
    match action {
        Action::Shell | Action::List => {}
        Action::Get { id } => {
            if !manager.options().lookup_panel {
                return Some("Lookup is disabled.".to_string());
            }
            manager.set_lookup_query(id.to_string());
            manager.lookup();
        }
        Action::Add { fields } => {
            fields.apply(manager);
            manager.add();
        }
        Action::Update { fields } => {
            if let Some(current) = manager.store().find_record(&fields.id).cloned() {
                manager.edit(&current);
            }
            fields.apply(manager);
            manager.update();
        }
        Action::Delete { id } => {
            let id = manager
                .store()
                .find_record(&id)
                .map(|record| record.recipe_id.clone())
                .unwrap_or(id);
            manager.delete(&id);
        }
    }
    None
}
