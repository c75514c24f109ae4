pub mod backup;
pub mod recipe;
pub mod tag;

use chefvault_core::Recipe;

/// One-line summary used by every listing
pub fn summary_line(recipe: &Recipe) -> String {
    let mut line = format!("#{} {}", recipe.id, recipe.name);
    if recipe.completed {
        if recipe.is_rated() {
            line.push_str(&format!(" [done, {}/5]", recipe.rating));
        } else {
            line.push_str(" [done]");
        }
    }
    line.push_str(&format!(
        " ({} min, {} servings)",
        recipe.prep_time, recipe.servings
    ));
    if !recipe.tags.is_empty() {
        line.push_str(&format!(" tags: {}", recipe.tags.join(", ")));
    }
    line
}

/// Print recipes one per line, or as a JSON array
pub fn print_recipes(
    recipes: &[Recipe],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipes)?);
    } else if recipes.is_empty() {
        println!("No recipes found.");
    } else {
        for recipe in recipes {
            println!("{}", summary_line(recipe));
        }
    }
    Ok(())
}
