//! Building blocks for rules: presence checks on the fields of an entry.
//!
//! Each check returns at most one violation message. Lists of field names in
//! messages are sorted alphabetically.

use std::collections::BTreeSet;

use crate::types::BibEntry;

fn bracket_list(names: &BTreeSet<&str>) -> String {
    let names: Vec<&str> = names.iter().copied().collect();
    format!("[{}]", names.join(", "))
}

/// Report all of `fields` which the entry lacks
pub fn required_fields(entry: &BibEntry, fields: &[&str]) -> Vec<String> {
    let missing: BTreeSet<&str> = fields
        .iter()
        .copied()
        .filter(|name| !entry.has_field(name))
        .collect();
    if missing.is_empty() {
        return vec![];
    }
    vec![format!(
        "Entry '{}' misses the following required fields: {}",
        entry.name,
        bracket_list(&missing)
    )]
}

/// Report a single missing field, telling the author what belongs there
pub fn required_field(entry: &BibEntry, field: &str, explanation: &str) -> Vec<String> {
    if entry.has_field(field) {
        return vec![];
    }
    vec![format!(
        "Entry '{}' misses the required field [{}]. {}",
        entry.name, field, explanation
    )]
}

/// Report fields which are present but would be dropped when the bibliography is rendered
pub fn omitted_fields(entry: &BibEntry, fields: &[&str]) -> Vec<String> {
    let present: BTreeSet<&str> = fields
        .iter()
        .copied()
        .filter(|name| entry.has_field(name))
        .collect();
    if present.is_empty() {
        return vec![];
    }
    vec![format!(
        "Entry '{}' has fields present that would be omitted in the compiled document: {}. \
         This could lead to a loss of information.",
        entry.name,
        bracket_list(&present)
    )]
}

/// Report a field which must not be used at all
pub fn disallowed_field(entry: &BibEntry, field: &str, explanation: &str) -> Vec<String> {
    if !entry.has_field(field) {
        return vec![];
    }
    vec![format!(
        "Entry '{}' contains the non-allowed field: [{}]. {}",
        entry.name, field, explanation
    )]
}

/// Report two fields carrying the same data, suggesting to remove `redundant`.
/// The pair is named in the given order. Nothing is reported unless both fields are present.
pub fn distinct_fields(entry: &BibEntry, pair: [&str; 2], redundant: &str) -> Vec<String> {
    let [first, second] = pair;
    match (entry.get(first), entry.get(second)) {
        (Some(a), Some(b)) if a == b => vec![format!(
            "Entry '{}' fields [{}] and [{}] are the same. Remove field [{}].",
            entry.name, first, second, redundant
        )],
        _ => vec![],
    }
}
