//! Recipe commands
//!
//! Usage: chefvault recipe <add|list|show|search|delete|done|undone|rate|rated|image>

use super::{print_recipes, summary_line};
use chefvault_core::model::{Ingredient, RecipeId};
use chefvault_core::Recipe;
use chefvault_store::{Catalog, RecipeRepo};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RecipeArgs {
    #[command(subcommand)]
    pub command: RecipeCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecipeCommand {
    /// Add a recipe
    Add(AddArgs),
    /// List all recipes
    List(ListArgs),
    /// Show one recipe in full
    Show(ShowArgs),
    /// Find recipes whose name contains TEXT (ignoring case)
    Search {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a recipe permanently
    Delete { id: RecipeId },
    /// Mark a recipe as cooked
    Done { id: RecipeId },
    /// Clear the cooked flag (and its rating)
    Undone { id: RecipeId },
    /// Rate a cooked recipe from 1 to 5
    Rate { id: RecipeId, score: i64 },
    /// List cooked recipes, optionally only those with one rating
    Rated {
        #[arg(long)]
        score: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Set or clear the image reference
    Image {
        id: RecipeId,
        /// Omit to clear
        path: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,

    /// Free-text ingredients
    #[arg(long, default_value = "", conflicts_with = "ingredient")]
    pub ingredients: String,

    /// Structured ingredient as QUANTITY:UNIT:NAME, repeatable
    #[arg(long, value_parser = parse_ingredient)]
    pub ingredient: Vec<Ingredient>,

    #[arg(long, default_value = "")]
    pub preparation: String,

    /// Preparation time in minutes
    #[arg(long, default_value_t = 0)]
    pub time: u32,

    #[arg(long, default_value = "")]
    pub category: String,

    #[arg(long, default_value_t = 1)]
    pub servings: u32,

    #[arg(long)]
    pub image: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: RecipeId,
    #[arg(long)]
    pub json: bool,
}

/// Execute recipe command
pub fn execute(args: RecipeArgs, catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let conn = catalog.conn()?;
    match args.command {
        RecipeCommand::Add(add) => execute_add(add, catalog),
        RecipeCommand::List(list) => print_recipes(&RecipeRepo::list(conn)?, list.json),
        RecipeCommand::Show(show) => execute_show(show, catalog),
        RecipeCommand::Search { text, json } => {
            print_recipes(&RecipeRepo::search_by_name(conn, &text)?, json)
        }
        RecipeCommand::Delete { id } => {
            report(RecipeRepo::delete(conn, id)?, id, "Deleted")
        }
        RecipeCommand::Done { id } => {
            report(RecipeRepo::mark_done(conn, id, true)?, id, "Marked done")
        }
        RecipeCommand::Undone { id } => {
            report(RecipeRepo::mark_done(conn, id, false)?, id, "Marked not done")
        }
        RecipeCommand::Rate { id, score } => {
            RecipeRepo::rate(conn, id, score)?;
            println!("Rated recipe #{}: {}/5", id, score);
            Ok(())
        }
        RecipeCommand::Rated { score, json } => {
            let recipes = match score {
                Some(score) => RecipeRepo::list_by_rating(conn, score)?,
                None => RecipeRepo::list_done(conn)?,
            };
            print_recipes(&recipes, json)
        }
        RecipeCommand::Image { id, path } => report(
            RecipeRepo::update_image(conn, id, path.as_deref())?,
            id,
            "Updated image of",
        ),
    }
}

fn execute_add(args: AddArgs, catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let mut recipe = Recipe::new(
        args.name,
        args.ingredients,
        args.preparation,
        args.time,
        args.category,
        args.servings,
    );
    if !args.ingredient.is_empty() {
        recipe = recipe.with_ingredient_list(&args.ingredient);
    }
    if let Some(image) = args.image {
        recipe = recipe.with_image_path(image);
    }

    let id = RecipeRepo::create(catalog.conn()?, &recipe)?;
    println!("Added recipe #{}: {}", id, recipe.name);
    Ok(())
}

fn execute_show(args: ShowArgs, catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let Some(recipe) = RecipeRepo::get_by_id(catalog.conn()?, args.id)? else {
        return Err(format!("Recipe #{} not found", args.id).into());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    println!("{}", summary_line(&recipe));
    if !recipe.category.is_empty() {
        println!("Category: {}", recipe.category);
    }
    if let Some(image) = &recipe.image_path {
        println!("Image: {}", image);
    }
    println!("\nIngredients:\n{}", recipe.ingredients);
    println!("\nPreparation:\n{}", recipe.preparation);
    Ok(())
}

fn report(changed: bool, id: RecipeId, verb: &str) -> Result<(), Box<dyn std::error::Error>> {
    if changed {
        println!("{} recipe #{}", verb, id);
        Ok(())
    } else {
        Err(format!("Recipe #{} not found", id).into())
    }
}

/// Parse `QUANTITY:UNIT:NAME`; the unit may be empty
fn parse_ingredient(raw: &str) -> Result<Ingredient, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(quantity), Some(unit), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected QUANTITY:UNIT:NAME, got '{}'", raw));
    };

    let quantity: f64 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{}'", quantity))?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(format!("invalid quantity '{}'", quantity));
    }
    if name.trim().is_empty() {
        return Err("ingredient name cannot be empty".to_string());
    }

    Ok(Ingredient::new(name.trim(), quantity, unit.trim()))
}
