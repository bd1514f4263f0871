//! Recipes command implementation

use colored::Colorize;

use patcher_core::Recipe;

use crate::error::Result;

/// Run the recipes command
pub fn run_recipes() -> Result<()> {
    println!("{} Built-in recipes:", "=>".blue().bold());
    for name in Recipe::builtin_names() {
        let recipe = Recipe::builtin(name)?;
        println!(
            "   {} {} ({} steps, *.{})",
            name.cyan().bold(),
            recipe.description,
            recipe.steps.len(),
            recipe.selection.extension
        );
    }
    Ok(())
}
