//! Invariants that must hold for any document the patcher touches.

use patcher_blocks::{AnchorInsert, Document, PropertyInsert, find_blocks};
use proptest::prelude::*;
use proptest::sample::subsequence;

const LANGS: [&str; 6] = ["en", "es", "pt", "fr", "de", "nl"];
const NAMES: [&str; 4] = ["title", "calculate", "reset", "recalculate"];

/// One language block: its property names, whether the last property has a
/// trailing comma, and how many blank lines precede the closing brace.
fn block() -> impl Strategy<Value = (Vec<&'static str>, bool, usize)> {
    (subsequence(NAMES.to_vec(), 0..=NAMES.len()), any::<bool>(), 0..3usize)
}

fn render(blocks: &[(Vec<&'static str>, bool, usize)], value: &str) -> String {
    let mut out = vec!["const translations = {".to_string()];
    for (lang, (names, comma, blanks)) in LANGS.iter().zip(blocks) {
        out.push(format!("  {lang}: {{"));
        for (idx, name) in names.iter().enumerate() {
            let sep = if idx + 1 < names.len() || *comma { "," } else { "" };
            out.push(format!("    {name}: \"{value}\"{sep}"));
        }
        out.extend(std::iter::repeat_n(String::new(), *blanks));
        out.push("  },".to_string());
    }
    out.push("};".to_string());
    out.push(String::new());
    out.join("\n")
}

fn document() -> impl Strategy<Value = String> {
    (prop::collection::vec(block(), 1..=LANGS.len()), "[a-zA-Z ]{0,10}")
        .prop_map(|(blocks, value)| render(&blocks, &value))
}

fn add_recalculate(source: &str) -> String {
    let mut doc = Document::parse(source);
    for lang in LANGS {
        doc.insert_property_all(lang, None, &PropertyInsert::new("recalculate", "🔄 R1"))
            .unwrap();
    }
    doc.render()
}

fn add_button(source: &str) -> String {
    let insert = AnchorInsert::new("};", "{t.recalculate}", ["<b>{t.recalculate}</b>"]);
    let mut doc = Document::parse(source);
    doc.insert_at_anchor(&insert).unwrap();
    doc.render()
}

proptest! {
    #[test]
    fn insertion_is_idempotent(source in document()) {
        let once = add_recalculate(&source);
        let twice = add_recalculate(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn insertion_preserves_brace_balance(source in document()) {
        let before = Document::parse(&source).brace_balance();
        let after = Document::parse(&add_recalculate(&source)).brace_balance();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn insertion_never_duplicates_keys(source in document()) {
        let patched = add_recalculate(&add_recalculate(&source));
        let lines: Vec<&str> = patched.split('\n').collect();
        for lang in LANGS {
            for block in find_blocks(&lines, lang).unwrap() {
                let count = lines[block.start..=block.end]
                    .iter()
                    .filter(|line| line.contains("recalculate:"))
                    .count();
                prop_assert_eq!(count, 1);
            }
        }
    }

    #[test]
    fn satisfied_document_is_untouched(source in document()) {
        let patched = add_recalculate(&source);
        prop_assert_eq!(add_recalculate(&patched), patched.clone());
        prop_assert_eq!(add_button(&add_button(&patched)), add_button(&patched));
    }

    #[test]
    fn every_block_ends_with_comma_free_property(source in document()) {
        let patched = add_recalculate(&source);
        let lines: Vec<&str> = patched.split('\n').collect();
        for lang in LANGS {
            for block in find_blocks(&lines, lang).unwrap() {
                let last = lines[block.start + 1..block.end]
                    .iter()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .unwrap();
                if last.contains("recalculate: \"🔄 R1\"") {
                    prop_assert!(!last.trim_end().ends_with(','));
                }
                for line in &lines[block.start + 1..block.end] {
                    if !line.trim().is_empty() && *line != *last {
                        prop_assert!(line.trim_end().ends_with(','));
                    }
                }
            }
        }
    }
}
