use serde_json::Value;

/// Knockout round types and their short codes.
const ROUND_TYPE_CODES: &[(&str, &str)] = &[
    ("round_of_32", "R32"),
    ("round_of_16", "R16"),
    ("quarter_final", "QF"),
    ("semi_final", "SF"),
    ("final", "F"),
];

/// Round types are consumed league first, then knockout stages.
const ROUND_PRIORITY: &[&str] = &[
    "league",
    "round_of_32",
    "round_of_16",
    "quarter_final",
    "semi_final",
    "final",
];

/// Display order of the knockout codes.
const KNOCKOUT_ORDER: &[&str] = &["R32", "R16", "QF", "SF", "F"];

/// Derives the ordered list of round labels from a tournament's format
/// metadata. Absent or malformed metadata yields an empty list, never an
/// error.
pub fn derive_round_labels(metadata: Option<&Value>) -> Vec<String> {
    let mut labels = collect_labels(metadata);
    sort_labels(&mut labels);
    labels
}

fn collect_labels(metadata: Option<&Value>) -> Vec<String> {
    let Some(set_rules) = metadata
        .and_then(|m| m.get("set_rules"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let mut labels = Vec::new();

    for round_type in ROUND_PRIORITY {
        if let Some(config) = set_rules.get(*round_type) {
            emit_entry(round_type, config, &mut labels);
        }
    }

    // Any round types outside the priority list, in the map's own order.
    for (round_type, config) in set_rules {
        if !ROUND_PRIORITY.contains(&round_type.as_str()) {
            emit_entry(round_type, config, &mut labels);
        }
    }

    labels
}

fn emit_entry(round_type: &str, config: &Value, labels: &mut Vec<String>) {
    let Some(config) = config.as_object() else {
        return;
    };

    // A `_rounds` key claims the entry: a positive count expands to
    // numbered rounds, anything else emits nothing.
    if let Some(rounds) = config.get("_rounds") {
        if let Some(count) = rounds.as_i64() {
            for i in 1..=count {
                push_unique(labels, i.to_string());
            }
        }
        return;
    }

    let label = canonical_code(round_type).unwrap_or(round_type);
    push_unique(labels, label.to_string());
}

fn canonical_code(round_type: &str) -> Option<&'static str> {
    ROUND_TYPE_CODES
        .iter()
        .find(|(name, _)| *name == round_type)
        .map(|(_, code)| *code)
}

fn push_unique(labels: &mut Vec<String>, label: String) {
    if !labels.contains(&label) {
        labels.push(label);
    }
}

/// Numbered rounds first in ascending order, then knockout codes in their
/// canonical order, then anything unrecognized lexicographically.
fn sort_labels(labels: &mut Vec<String>) {
    let (numbered, special): (Vec<String>, Vec<String>) =
        labels.drain(..).partition(|l| is_numeric(l));

    let mut numbered = numbered;
    numbered.sort_by_key(|l| l.parse::<i64>().unwrap_or(i64::MAX));

    let mut special = special;
    special.sort_by(|a, b| match (knockout_index(a), knockout_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    });

    labels.extend(numbered);
    labels.extend(special);
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_digit())
}

fn knockout_index(label: &str) -> Option<usize> {
    KNOCKOUT_ORDER.iter().position(|code| *code == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn knockout_stages_map_to_codes() {
        let metadata = json!({ "set_rules": { "round_of_16": {}, "final": {} } });
        assert_eq!(derive_round_labels(Some(&metadata)), vec!["R16", "F"]);
    }

    #[test]
    fn league_expands_to_numbered_rounds() {
        let metadata = json!({ "set_rules": { "league": { "_rounds": 3 }, "final": {} } });
        assert_eq!(
            derive_round_labels(Some(&metadata)),
            vec!["1", "2", "3", "F"]
        );
    }

    #[test]
    fn missing_or_empty_metadata_yields_nothing() {
        assert!(derive_round_labels(None).is_empty());
        assert!(derive_round_labels(Some(&json!({}))).is_empty());
        assert!(derive_round_labels(Some(&json!({ "set_rules": 7 }))).is_empty());
    }

    #[test]
    fn derivation_is_pure() {
        let metadata = json!({ "set_rules": { "league": { "_rounds": 2 }, "semi_final": {} } });
        let first = derive_round_labels(Some(&metadata));
        let second = derive_round_labels(Some(&metadata));
        assert_eq!(first, second);
    }

    #[test]
    fn knockout_codes_sort_in_bracket_order() {
        let metadata = json!({
            "set_rules": {
                "final": {},
                "quarter_final": {},
                "round_of_32": {},
                "semi_final": {},
                "round_of_16": {}
            }
        });
        assert_eq!(
            derive_round_labels(Some(&metadata)),
            vec!["R32", "R16", "QF", "SF", "F"]
        );
    }

    #[test]
    fn unknown_round_types_pass_through_after_codes() {
        let metadata = json!({
            "set_rules": {
                "final": {},
                "playoff": {},
                "consolation": {}
            }
        });
        assert_eq!(
            derive_round_labels(Some(&metadata)),
            vec!["F", "consolation", "playoff"]
        );
    }

    #[test]
    fn numbered_rounds_deduplicate_across_entries() {
        let metadata = json!({
            "set_rules": {
                "league": { "_rounds": 3 },
                "group_stage": { "_rounds": 5 }
            }
        });
        assert_eq!(
            derive_round_labels(Some(&metadata)),
            vec!["1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn non_positive_or_non_integer_rounds_emit_nothing() {
        let metadata = json!({
            "set_rules": {
                "league": { "_rounds": 0 },
                "extra": { "_rounds": "three" },
                "final": {}
            }
        });
        assert_eq!(derive_round_labels(Some(&metadata)), vec!["F"]);
    }

    #[test]
    fn non_object_configs_are_skipped() {
        let metadata = json!({ "set_rules": { "league": 4, "final": {} } });
        assert_eq!(derive_round_labels(Some(&metadata)), vec!["F"]);
    }
}
