//! Recipe steps compiled into block operations and run on one document.

use patcher_blocks::{
    AnchorInsert, AnchorOutcome, BlockRange, CompensatingRemoval, Document, LiteralReplace,
    PropertyInsert, PropertyOutcome, PropertyUpdate, RemovalOutcome, UpdateOutcome,
};
use patcher_content::Language;

use crate::error::{Error, Result};
use crate::recipe::{MarkupStep, PropertyStep, Recipe, RemovalStep, ReplaceStep, Step, UpdateStep};
use crate::report::StepNote;

#[derive(Debug, Clone)]
enum Operation {
    Property {
        name: String,
        within: Option<String>,
        inserts: Vec<(Language, PropertyInsert)>,
    },
    Update {
        name: String,
        within: Option<String>,
        updates: Vec<(Language, PropertyUpdate)>,
    },
    Markup(AnchorInsert),
    Replace(LiteralReplace),
    Remove(CompensatingRemoval),
}

/// A validated recipe, ready to run against any number of documents
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    operations: Vec<Operation>,
}

impl Pipeline {
    /// Validates every step up front so a bad recipe fails once, not once
    /// per document.
    pub fn compile(recipe: &Recipe) -> Result<Self> {
        let invalid = |reason: String| Error::invalid_recipe(&recipe.name, reason);

        if recipe.steps.is_empty() {
            return Err(invalid("recipe has no steps".into()));
        }

        let mut operations = Vec::with_capacity(recipe.steps.len());
        for (idx, step) in recipe.steps.iter().enumerate() {
            let operation = compile_step(step, &recipe.languages)
                .map_err(|e| invalid(format!("step {} ({}): {e}", idx + 1, step.kind())))?;
            operations.push(operation);
        }

        Ok(Self {
            name: recipe.name.clone(),
            operations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every step in order. The first error aborts the remaining steps;
    /// the caller decides what to do with the partially edited document.
    pub fn apply(&self, doc: &mut Document) -> Result<Vec<StepNote>> {
        let mut notes = Vec::new();
        for operation in &self.operations {
            match operation {
                Operation::Property {
                    name,
                    within,
                    inserts,
                } => apply_property(doc, name, within.as_deref(), inserts, &mut notes)?,
                Operation::Update {
                    name,
                    within,
                    updates,
                } => apply_update(doc, name, within.as_deref(), updates, &mut notes)?,
                Operation::Markup(insert) => notes.push(match doc.insert_at_anchor(insert)? {
                    AnchorOutcome::Inserted { line, count } => StepNote::MarkupInserted {
                        line: line + 1,
                        count,
                    },
                    AnchorOutcome::AlreadyPresent => StepNote::MarkupPresent,
                    AnchorOutcome::AnchorNotFound => StepNote::AnchorNotFound,
                    AnchorOutcome::PreconditionMissing => StepNote::PreconditionMissing,
                }),
                Operation::Replace(replace) => {
                    let count = doc.replace_literal(replace)?;
                    if count > 0 {
                        notes.push(StepNote::LiteralReplaced { count });
                    }
                }
                Operation::Remove(removal) => notes.push(match doc.compensating_remove(removal)? {
                    RemovalOutcome::Removed { blocks, lines } => {
                        StepNote::MarkupRemoved { blocks, lines }
                    }
                    RemovalOutcome::PreconditionHolds => StepNote::PreconditionHolds,
                    RemovalOutcome::NotFound => StepNote::MarkupNotFound,
                }),
            }
        }
        Ok(notes)
    }
}

fn compile_step(step: &Step, languages: &[Language]) -> Result<Operation> {
    let operation = match step {
        Step::InsertProperty(step) => compile_property(step, languages)?,
        Step::UpdateProperty(step) => compile_update(step, languages)?,
        Step::InsertMarkup(MarkupStep {
            anchors,
            marker,
            template,
            placement,
            default_indent,
            requires,
        }) => {
            let Some((first, rest)) = anchors.split_first() else {
                return Err(patcher_blocks::Error::invalid_edit("no anchors").into());
            };
            let mut insert = rest
                .iter()
                .fold(AnchorInsert::new(first, marker, template), |insert, anchor| {
                    insert.or_anchor(anchor)
                })
                .with_placement((*placement).into());
            if let Some(indent) = default_indent {
                insert = insert.with_default_indent(indent);
            }
            if let Some(binding) = requires {
                insert = insert.requires(binding)?;
            }
            insert.validate()?;
            Operation::Markup(insert)
        }
        Step::ReplaceLiteral(ReplaceStep {
            literal,
            replacement,
            followed_by,
        }) => {
            let mut replace = LiteralReplace::new(literal, replacement);
            if let Some(context) = followed_by {
                replace = replace.followed_by(context);
            }
            replace.validate()?;
            Operation::Replace(replace)
        }
        Step::RemoveMarkup(RemovalStep {
            open,
            close,
            signature,
            binding,
        }) => Operation::Remove(CompensatingRemoval::new(open, close, signature, binding)?),
    };
    Ok(operation)
}

fn compile_property(step: &PropertyStep, languages: &[Language]) -> Result<Operation> {
    let mut inserts = Vec::with_capacity(languages.len());
    for &lang in languages {
        let Some(value) = step.values.get(&lang) else {
            tracing::warn!(property = %step.name, lang = %lang, "no value, language skipped");
            continue;
        };
        let mut insert =
            PropertyInsert::new(&step.name, value).with_trailing_comma(step.trailing_comma);
        if let Some(indent) = &step.indent {
            insert = insert.with_indent(indent);
        }
        insert.validate()?;
        inserts.push((lang, insert));
    }

    if inserts.is_empty() {
        return Err(patcher_blocks::Error::invalid_edit(format!(
            "no value for any language of `{}`",
            step.name
        ))
        .into());
    }

    Ok(Operation::Property {
        name: step.name.clone(),
        within: step.within.clone(),
        inserts,
    })
}

fn compile_update(step: &UpdateStep, languages: &[Language]) -> Result<Operation> {
    let mut updates = Vec::with_capacity(languages.len());
    for &lang in languages {
        let Some(value) = step.values.get(&lang) else {
            tracing::warn!(property = %step.name, lang = %lang, "no value, language skipped");
            continue;
        };
        let mut update = PropertyUpdate::new(&step.name, value);
        if let Some(old) = step.replacing.get(&lang) {
            update = update.replacing(old);
        }
        update.validate()?;
        updates.push((lang, update));
    }

    if updates.is_empty() {
        return Err(patcher_blocks::Error::invalid_edit(format!(
            "no value for any language of `{}`",
            step.name
        ))
        .into());
    }

    Ok(Operation::Update {
        name: step.name.clone(),
        within: step.within.clone(),
        updates,
    })
}

/// Where language blocks are searched for.
enum Scope {
    Document,
    Within(BlockRange),
    Missing,
}

impl Scope {
    fn locate(doc: &Document, within: Option<&str>) -> Result<Self> {
        let Some(key) = within else {
            return Ok(Self::Document);
        };
        Ok(match doc.find_block(key, 0)? {
            Some(range) => Self::Within(range),
            None => Self::Missing,
        })
    }
}

fn apply_property(
    doc: &mut Document,
    name: &str,
    within: Option<&str>,
    inserts: &[(Language, PropertyInsert)],
    notes: &mut Vec<StepNote>,
) -> Result<()> {
    for (lang, insert) in inserts {
        // Re-located per language: earlier inserts grow the scope.
        let scope = match Scope::locate(doc, within)? {
            Scope::Document => None,
            Scope::Within(range) => Some(range),
            Scope::Missing => {
                notes.push(StepNote::ScopeNotFound {
                    key: within.unwrap_or_default().to_string(),
                });
                return Ok(());
            }
        };

        let outcomes = doc.insert_property_all(lang.code(), scope, insert)?;
        if outcomes.is_empty() {
            notes.push(StepNote::BlockNotFound { lang: *lang });
        }
        for outcome in outcomes {
            tracing::debug!(property = name, lang = %lang, ?outcome, "property step");
            notes.push(match outcome {
                PropertyOutcome::Inserted { line, .. } => StepNote::PropertyInserted {
                    name: name.to_string(),
                    lang: *lang,
                    line: line + 1,
                },
                PropertyOutcome::AlreadyPresent => StepNote::PropertyPresent {
                    name: name.to_string(),
                    lang: *lang,
                },
            });
        }
    }
    Ok(())
}

fn apply_update(
    doc: &mut Document,
    name: &str,
    within: Option<&str>,
    updates: &[(Language, PropertyUpdate)],
    notes: &mut Vec<StepNote>,
) -> Result<()> {
    let scope = match Scope::locate(doc, within)? {
        Scope::Document => None,
        Scope::Within(range) => Some(range),
        Scope::Missing => {
            notes.push(StepNote::ScopeNotFound {
                key: within.unwrap_or_default().to_string(),
            });
            return Ok(());
        }
    };

    for (lang, update) in updates {
        let outcomes = doc.update_property_all(lang.code(), scope, update)?;
        if outcomes.is_empty() {
            notes.push(StepNote::BlockNotFound { lang: *lang });
        }
        for outcome in outcomes {
            tracing::debug!(property = name, lang = %lang, ?outcome, "update step");
            notes.push(match outcome {
                UpdateOutcome::Updated { line } => StepNote::PropertyUpdated {
                    name: name.to_string(),
                    lang: *lang,
                    line: line + 1,
                },
                UpdateOutcome::Unchanged => StepNote::PropertyUnchanged {
                    name: name.to_string(),
                    lang: *lang,
                },
                UpdateOutcome::Missing => StepNote::PropertyMissing {
                    name: name.to_string(),
                    lang: *lang,
                },
            });
        }
    }
    Ok(())
}
