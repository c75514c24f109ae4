//! Structured ingredients and their free-text rendering
//!
//! A recipe stores ingredients as free text. When the front end collects a
//! structured list, the text is derived from it deterministically:
//!
//! - quantity with at most two decimals, trailing zeros and `.` trimmed
//! - unit pluralized with `s` when quantity > 1 and it doesn't already end in `s`
//! - no unit word at all for an empty unit or the bare `unit`

use serde::{Deserialize, Serialize};

/// Unit name that means "count of items" and is never printed
const BARE_UNIT: &str = "unit";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Render a quantity without trailing zeros or a dangling decimal point
///
/// ```
/// use chefvault_core::model::format_quantity;
///
/// assert_eq!(format_quantity(2.0), "2");
/// assert_eq!(format_quantity(1.50), "1.5");
/// assert_eq!(format_quantity(0.333), "0.33");
/// ```
pub fn format_quantity(quantity: f64) -> String {
    let fixed = format!("{:.2}", quantity);
    if !fixed.contains('.') {
        return fixed;
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn unit_word(unit: &str, quantity: f64) -> Option<String> {
    let unit = unit.trim();
    if unit.is_empty() || unit == BARE_UNIT {
        return None;
    }
    if quantity > 1.0 && !unit.ends_with('s') {
        Some(format!("{}s", unit))
    } else {
        Some(unit.to_string())
    }
}

/// Render one ingredient as `<quantity> [<unit>] <name>`
pub fn format_ingredient(ingredient: &Ingredient) -> String {
    let quantity = format_quantity(ingredient.quantity);
    match unit_word(&ingredient.unit, ingredient.quantity) {
        Some(unit) => format!("{} {} {}", quantity, unit, ingredient.name.trim()),
        None => format!("{} {}", quantity, ingredient.name.trim()),
    }
}

/// Render a structured list as free text, one ingredient per line
pub fn format_ingredients(list: &[Ingredient]) -> String {
    list.iter()
        .map(format_ingredient)
        .collect::<Vec<_>>()
        .join("\n")
}
