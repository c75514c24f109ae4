//! Tag commands
//!
//! Usage: chefvault tag <add|remove|list|for|suggest|recipes|delete>

use super::print_recipes;
use chefvault_core::model::RecipeId;
use chefvault_store::{Catalog, TagRepo};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TagArgs {
    #[command(subcommand)]
    pub command: TagCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// Attach tags to a recipe, creating them on first use
    Add {
        recipe_id: RecipeId,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Detach tags from a recipe
    Remove {
        recipe_id: RecipeId,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List every tag
    List,
    /// Tags of one recipe
    For { recipe_id: RecipeId },
    /// Tag names starting with PREFIX
    Suggest { prefix: String },
    /// Recipes carrying a tag
    Recipes {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a tag from every recipe and the catalog
    Delete { name: String },
}

/// Execute tag command
pub fn execute(args: TagArgs, catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let conn = catalog.conn()?;
    match args.command {
        TagCommand::Add { recipe_id, names } => {
            for name in &names {
                TagRepo::tag_recipe(conn, recipe_id, name)?;
            }
            println!(
                "Recipe #{} tags: {}",
                recipe_id,
                TagRepo::tags_for(conn, recipe_id)?.join(", ")
            );
        }
        TagCommand::Remove { recipe_id, names } => {
            for name in &names {
                if !TagRepo::untag_recipe(conn, recipe_id, name)? {
                    eprintln!("No tag named '{}'", name);
                }
            }
            println!(
                "Recipe #{} tags: {}",
                recipe_id,
                TagRepo::tags_for(conn, recipe_id)?.join(", ")
            );
        }
        TagCommand::List => {
            for tag in TagRepo::list_all(conn)? {
                println!("{}\t{}", tag.id, tag.name);
            }
        }
        TagCommand::For { recipe_id } => {
            for name in TagRepo::tags_for(conn, recipe_id)? {
                println!("{}", name);
            }
        }
        TagCommand::Suggest { prefix } => {
            for name in TagRepo::by_prefix(conn, &prefix)? {
                println!("{}", name);
            }
        }
        TagCommand::Recipes { name, json } => {
            print_recipes(&TagRepo::recipes_by_tag(conn, &name)?, json)?;
        }
        TagCommand::Delete { name } => match TagRepo::find_by_name(conn, &name)? {
            Some(tag_id) => {
                TagRepo::delete(conn, tag_id)?;
                println!("Deleted tag '{}'", name);
            }
            None => return Err(format!("Tag '{}' not found", name).into()),
        },
    }
    Ok(())
}
