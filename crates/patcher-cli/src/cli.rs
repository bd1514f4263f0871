//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// calc-patch - Patch calculator components and translate their content
#[derive(Parser, Debug)]
#[command(name = "calc-patch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply a recipe to every matching file in a directory
    ///
    /// Examples:
    ///   calc-patch apply src/calculators                        # built-in recalculate
    ///   calc-patch apply src/calculators --builtin repair-recalculate
    ///   calc-patch apply src/calculators --recipe reset.toml --dry-run
    Apply {
        /// Directory holding the component files
        dir: PathBuf,

        /// Recipe file (TOML, JSON, or YAML)
        #[arg(long, conflicts_with = "builtin")]
        recipe: Option<PathBuf>,

        /// Name of a built-in recipe
        #[arg(long)]
        builtin: Option<String>,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Remove Recalculate buttons that reference missing state
    Repair {
        /// Directory holding the component files
        dir: PathBuf,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Translate labels in JSON content files
    ///
    /// Examples:
    ///   calc-patch translate content/calculators --lang es --lang fr
    ///   calc-patch translate content/calculators --seed --lang de --lang nl
    ///   calc-patch translate content/calculators --check
    Translate {
        /// Directory holding the content files
        dir: PathBuf,

        /// Extra label table merged over the built-in one
        #[arg(long)]
        labels: Option<PathBuf>,

        /// Only translate these languages (repeatable)
        #[arg(long = "lang")]
        languages: Vec<String>,

        /// Add missing language sections as copies of `en` before translating
        #[arg(long)]
        seed: bool,

        /// List labels still in English instead of translating
        #[arg(long, conflicts_with = "seed")]
        check: bool,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// List built-in recipes
    Recipes,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    /// Process at most this many files
    #[arg(long)]
    pub limit: Option<usize>,

    /// Preview changes without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_with_builtin() {
        let cli = Cli::parse_from([
            "calc-patch",
            "apply",
            "src",
            "--builtin",
            "repair-recalculate",
            "--limit",
            "3",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Apply {
                dir: PathBuf::from("src"),
                recipe: None,
                builtin: Some("repair-recalculate".into()),
                batch: BatchArgs {
                    limit: Some(3),
                    dry_run: false,
                },
            })
        );
    }

    #[test]
    fn recipe_and_builtin_conflict() {
        let result = Cli::try_parse_from([
            "calc-patch",
            "apply",
            "src",
            "--recipe",
            "r.toml",
            "--builtin",
            "recalculate",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_translate_languages() {
        let cli = Cli::parse_from([
            "calc-patch", "-v", "translate", "content", "--lang", "es", "--lang", "fr", "--dry-run",
        ]);
        assert!(cli.verbose);
        let Some(Commands::Translate {
            languages, batch, ..
        }) = cli.command
        else {
            panic!("expected translate");
        };
        assert_eq!(languages, vec!["es", "fr"]);
        assert!(batch.dry_run);
    }

    #[test]
    fn check_and_seed_conflict() {
        let result =
            Cli::try_parse_from(["calc-patch", "translate", "content", "--check", "--seed"]);
        assert!(result.is_err());

        let cli = Cli::parse_from(["calc-patch", "translate", "content", "--seed"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Translate {
                seed: true,
                check: false,
                ..
            })
        ));
    }
}
