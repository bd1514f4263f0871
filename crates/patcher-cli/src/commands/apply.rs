//! Apply and repair command implementations

use std::path::Path;

use colored::Colorize;

use patcher_core::{BatchEngine, BatchOptions, Recipe};
use patcher_fs::NormalizedPath;

use super::summary::print_report;
use crate::error::{CliError, Result};

const DEFAULT_RECIPE: &str = "recalculate";
const REPAIR_RECIPE: &str = "repair-recalculate";

fn resolve_recipe(recipe: Option<&Path>, builtin: Option<&str>) -> Result<Recipe> {
    match (recipe, builtin) {
        (Some(path), _) => {
            let path = NormalizedPath::new(path);
            if !path.is_file() {
                return Err(CliError::user(format!("Recipe file not found: {}", path)));
            }
            Ok(Recipe::load(&path)?)
        }
        (None, Some(name)) => Recipe::builtin(name).map_err(|_| {
            let known: Vec<_> = Recipe::builtin_names().collect();
            CliError::user(format!(
                "Unknown built-in recipe '{}'. Available: {}",
                name,
                known.join(", ")
            ))
        }),
        (None, None) => Ok(Recipe::builtin(DEFAULT_RECIPE)?),
    }
}

fn run_recipe(dir: &Path, recipe: &Recipe, options: BatchOptions) -> Result<()> {
    let root = NormalizedPath::new(dir);
    if !root.is_dir() {
        return Err(CliError::user(format!("Not a directory: {}", root)));
    }

    let mode = if options.dry_run { " (dry run)" } else { "" };
    println!(
        "{} Applying {} to {}{}",
        "=>".blue().bold(),
        recipe.name.cyan(),
        root,
        mode.yellow()
    );

    let report = BatchEngine::new(options).apply_recipe(&root, recipe)?;
    print_report(&report);
    Ok(())
}

/// Run the apply command
pub fn run_apply(
    dir: &Path,
    recipe: Option<&Path>,
    builtin: Option<&str>,
    options: BatchOptions,
) -> Result<()> {
    let recipe = resolve_recipe(recipe, builtin)?;
    run_recipe(dir, &recipe, options)
}

/// Run the repair command
pub fn run_repair(dir: &Path, options: BatchOptions) -> Result<()> {
    let recipe = Recipe::builtin(REPAIR_RECIPE)?;
    run_recipe(dir, &recipe, options)
}
