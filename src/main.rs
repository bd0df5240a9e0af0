use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use std::error::Error;

use recipify::config::AppConfig;
use recipify::render::{format_recipe_content, HtmlRenderer, RecipeRenderer, TextRenderer};
use recipify::store::{extract_recipe_name, FileStore, RecipeHistory};
use recipify::{ProviderKind, RecipeGenerator, RecipeQuery};

#[derive(Parser)]
#[command(name = "recipify")]
#[command(about = "Turn the ingredients you have into a recipe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe from a comma separated ingredient list
    Generate {
        /// Ingredients; defaults to the ones stashed with `recipify stash`
        ingredients: Option<String>,
        /// Cuisine style, e.g. "Italian"
        #[arg(long)]
        cuisine: Option<String>,
        /// Dietary constraint, e.g. "vegan"
        #[arg(long)]
        dietary: Option<String>,
        /// Provider to use instead of the configured chain
        #[arg(long)]
        provider: Option<ProviderKind>,
        /// Model name for the provider
        #[arg(long)]
        model: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print the model's text as-is instead of a normalized recipe
        #[arg(long)]
        raw: bool,
        /// Do not add the recipe to the history
        #[arg(long)]
        no_save: bool,
    },
    /// Remember ingredients for the next `generate`
    Stash { ingredients: String },
    /// Run the recipe proxy server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Browse saved recipes
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved recipes, newest first
    List,
    /// Print a saved recipe
    Show { id: u64 },
    /// Delete a saved recipe
    Delete { id: u64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

struct GenerateArgs {
    ingredients: Option<String>,
    cuisine: Option<String>,
    dietary: Option<String>,
    provider: Option<ProviderKind>,
    model: Option<String>,
    format: OutputFormat,
    raw: bool,
    no_save: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let history = RecipeHistory::with_capacity(
        FileStore::new(&config.history.path),
        config.history.capacity,
    );

    match cli.command {
        Commands::Generate {
            ingredients,
            cuisine,
            dietary,
            provider,
            model,
            format,
            raw,
            no_save,
        } => {
            let args = GenerateArgs {
                ingredients,
                cuisine,
                dietary,
                provider,
                model,
                format,
                raw,
                no_save,
            };
            generate(&config, &history, args).await?;
        }
        Commands::Stash { ingredients } => {
            history.set_pending_ingredients(&ingredients)?;
            println!("Ingredients saved for the next recipe.");
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let generator = RecipeGenerator::builder().build_with_config(&config)?;
            recipify::server::serve(generator, &host, port).await?;
        }
        Commands::History { command } => show_history(&history, command)?,
    }

    Ok(())
}

async fn generate(
    config: &AppConfig,
    history: &RecipeHistory<FileStore>,
    args: GenerateArgs,
) -> Result<(), Box<dyn Error>> {
    let ingredients = match args.ingredients {
        Some(ingredients) => ingredients,
        None => history
            .take_pending_ingredients()?
            .ok_or("Please enter some ingredients")?,
    };
    let query = RecipeQuery::new(ingredients)?
        .with_cuisine(args.cuisine.as_deref())
        .with_dietary(args.dietary.as_deref());

    let mut builder = RecipeGenerator::builder();
    if let Some(provider) = args.provider {
        builder = builder.provider(provider);
    }
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    let generator = builder.build_with_config(config)?;
    info!("Generating a recipe with {}", generator.provider_name());

    if args.raw {
        let text = generator.generate_raw(&query).await?;
        match args.format {
            OutputFormat::Html => println!("{}", format_recipe_content(&text)),
            OutputFormat::Json => println!("{}", serde_json::json!({ "recipe": text })),
            OutputFormat::Text => println!("{}", text),
        }
        if !args.no_save {
            save_to_history(history, &extract_recipe_name(&text), &query, &text);
        }
        return Ok(());
    }

    let generated = generator.generate(&query).await;
    if let Some(notice) = generated.notice() {
        eprintln!("{}", notice);
    }

    match args.format {
        OutputFormat::Text => print!("{}", TextRenderer.render(&generated.recipe)),
        OutputFormat::Html => println!("{}", HtmlRenderer.render(&generated.recipe)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&generated)?),
    }

    if let (false, Some(text)) = (args.no_save, generated.raw_text.as_deref()) {
        save_to_history(history, &generated.recipe.title, &query, text);
    }

    Ok(())
}

fn save_to_history(
    history: &RecipeHistory<FileStore>,
    name: &str,
    query: &RecipeQuery,
    text: &str,
) {
    match history.save(name, query.ingredients(), text) {
        Ok(stored) => info!("Saved recipe {} to history", stored.id),
        Err(e) => error!("Failed to save recipe to history: {}", e),
    }
}

fn show_history(
    history: &RecipeHistory<FileStore>,
    command: HistoryCommand,
) -> Result<(), Box<dyn Error>> {
    match command {
        HistoryCommand::List => {
            let recipes = history.list()?;
            if recipes.is_empty() {
                println!("No saved recipes yet.");
            }
            for recipe in recipes {
                println!(
                    "{}  {}  {} ({})",
                    recipe.id,
                    recipe.date_created.format("%Y-%m-%d %H:%M"),
                    recipe.name,
                    recipe.ingredients
                );
            }
        }
        HistoryCommand::Show { id } => {
            let recipe = history
                .view(id)?
                .ok_or_else(|| format!("No saved recipe with id {}", id))?;
            println!("{}\nIngredients: {}\n\n{}", recipe.name, recipe.ingredients, recipe.recipe);
        }
        HistoryCommand::Delete { id } => {
            if history.delete(id)? {
                println!("Deleted recipe {}", id);
            } else {
                return Err(format!("No saved recipe with id {}", id).into());
            }
        }
    }
    Ok(())
}
