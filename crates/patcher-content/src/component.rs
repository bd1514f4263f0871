//! Label translation for one `calculatorComponent` object.

use serde_json::Value;

use crate::labels::LabelTable;
use crate::language::Language;

fn translate_field(field: Option<&mut Value>, lang: Language, table: &LabelTable) -> usize {
    let Some(Value::String(label)) = field else {
        return 0;
    };
    match table.lookup(label, lang) {
        Some(translated) if translated != label.as_str() => {
            *label = translated.to_string();
            1
        }
        _ => 0,
    }
}

fn translate_each(items: Option<&mut Value>, key: &str, lang: Language, table: &LabelTable) -> usize {
    let Some(Value::Array(items)) = items else {
        return 0;
    };
    items
        .iter_mut()
        .map(|item| translate_field(item.get_mut(key), lang, table))
        .sum()
}

/// Translates the labels of a calculator component in place.
///
/// Touches `inputs[].label`, `output.label`, `output.default`, and
/// `additionalOutputs[].label`. Returns the number of fields that changed.
pub fn translate_component(component: &mut Value, lang: Language, table: &LabelTable) -> usize {
    if lang.is_source() {
        return 0;
    }

    let mut changed = translate_each(component.get_mut("inputs"), "label", lang, table);
    if let Some(output) = component.get_mut("output") {
        changed += translate_field(output.get_mut("label"), lang, table);
        changed += translate_field(output.get_mut("default"), lang, table);
    }
    changed += translate_each(component.get_mut("additionalOutputs"), "label", lang, table);
    changed
}

/// The label fields [`translate_component`] touches, in document order.
pub fn component_labels(component: &Value) -> Vec<&str> {
    let each = |key: &str| {
        component
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|item| item.get("label").and_then(Value::as_str))
    };

    let mut labels: Vec<&str> = each("inputs").collect();
    if let Some(output) = component.get("output") {
        labels.extend(["label", "default"].iter().filter_map(|key| output.get(*key)?.as_str()));
    }
    labels.extend(each("additionalOutputs"));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table() -> LabelTable {
        let mut table = LabelTable::new();
        table.insert(Language::Es, "Loan Amount ($)", "Monto del Préstamo ($)");
        table.insert(Language::Es, "Monthly Payment", "Pago Mensual");
        table.insert(Language::Es, "Enter values above", "Ingrese los valores arriba");
        table.insert(Language::Es, "Total Interest", "Interés Total");
        table
    }

    #[test]
    fn translates_every_label_field() {
        let mut component = json!({
            "inputs": [
                { "name": "amount", "label": "Loan Amount ($)", "type": "number" },
                { "name": "pets", "label": "Number of Llamas" }
            ],
            "output": { "label": "Monthly Payment", "default": "Enter values above" },
            "additionalOutputs": [ { "label": "Total Interest" }, { "value": 3 } ]
        });

        let changed = translate_component(&mut component, Language::Es, &table());

        assert_eq!(changed, 4);
        assert_eq!(component["inputs"][0]["label"], "Monto del Préstamo ($)");
        assert_eq!(component["inputs"][1]["label"], "Number of Llamas");
        assert_eq!(component["output"]["label"], "Pago Mensual");
        assert_eq!(component["output"]["default"], "Ingrese los valores arriba");
        assert_eq!(component["additionalOutputs"][0]["label"], "Interés Total");
    }

    #[test]
    fn source_language_is_left_alone() {
        let mut component = json!({ "output": { "label": "Monthly Payment" } });
        assert_eq!(translate_component(&mut component, Language::En, &table()), 0);
        assert_eq!(component["output"]["label"], "Monthly Payment");
    }

    #[test]
    fn non_string_and_missing_fields_are_skipped() {
        let mut component = json!({ "inputs": "oops", "output": { "label": 7 } });
        assert_eq!(translate_component(&mut component, Language::Es, &table()), 0);
    }

    #[test]
    fn already_translated_counts_nothing() {
        let mut component = json!({ "output": { "label": "Pago Mensual" } });
        assert_eq!(translate_component(&mut component, Language::Es, &table()), 0);
    }

    #[test]
    fn collects_labels_in_order() {
        let component = json!({
            "additionalOutputs": [ { "label": "Total Interest" } ],
            "inputs": [ { "label": "Loan Amount ($)" }, { "name": "x" } ],
            "output": { "label": "Monthly Payment", "default": 0 }
        });
        assert_eq!(
            component_labels(&component),
            vec!["Loan Amount ($)", "Monthly Payment", "Total Interest"]
        );
    }
}
