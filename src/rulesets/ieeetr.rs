//! Rules for the `ieeetr` style: every entry type must carry the fields the
//! style prints, and must not carry fields the style silently drops.

use crate::checks::{omitted_fields, required_fields};
use crate::types::{BibEntry, EntryType};
use crate::verification::{RuleRegistry, RuleTarget};

pub(crate) fn register(registry: &mut RuleRegistry) {
    use EntryType as E;
    use RuleTarget::Only;

    registry.register("check_article", Only(E::Article), check_article);
    registry.register("check_conference", Only(E::Conference), check_conference);
    registry.register("check_online", Only(E::Online), check_online);
    registry.register("check_book", Only(E::Book), check_book);
    registry.register("check_in_book", Only(E::InBook), check_in_book);
    registry.register("check_in_collection", Only(E::InCollection), check_in_collection);
    registry.register("check_standard", Only(E::Standard), check_standard);
    registry.register("check_tech_report", Only(E::TechReport), check_tech_report);
    registry.register("check_misc", Only(E::Misc), check_misc);
}

/// Required and omitted fields of one entry
fn fields(entry: &BibEntry, required: &[&str], omitted: &[&str]) -> Vec<String> {
    let mut violations = required_fields(entry, required);
    violations.extend(omitted_fields(entry, omitted));
    violations
}

fn check_article(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "journal", "year"],
        &["language", "url"],
    )
}

fn check_conference(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "booktitle", "publisher", "year"],
        &["intype", "language", "number", "paper", "type", "url"],
    )
}

fn check_online(entry: &BibEntry) -> Vec<String> {
    let mut violations = Vec::new();
    // ieeetr ignores `url`, so the link has to live in `note`
    if !entry.has_field("note") {
        violations.push(format!(
            "Entry '{}' is of type 'online' and needs a field 'note' with the URL.",
            entry.name
        ));
    }
    violations.extend(fields(
        entry,
        &["author", "title", "howpublished", "year", "note"],
        &["language", "organization", "address", "url"],
    ));
    violations
}

fn check_book(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "publisher", "year"],
        &["editor", "language", "volume", "number", "url"],
    )
}

fn check_in_book(entry: &BibEntry) -> Vec<String> {
    let mut violations = Vec::new();
    if !entry.has_field("chapter") && !entry.has_field("pages") {
        violations.push(format!(
            "Entry {} needs to contain one of the following fields: [chapter, pages].",
            entry.name
        ));
    }
    violations.extend(fields(
        entry,
        &["author", "title", "publisher", "year"],
        &["editor", "language", "number", "url"],
    ));
    violations
}

fn check_in_collection(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "booktitle", "publisher", "year"],
        &["language", "number", "url"],
    )
}

fn check_standard(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "howpublished", "year", "note"],
        &[
            "language",
            "organization",
            "institution",
            "type",
            "number",
            "revision",
            "address",
            "url",
        ],
    )
}

fn check_tech_report(entry: &BibEntry) -> Vec<String> {
    let mut violations = Vec::new();
    if entry.has_field("howpublished") {
        violations.push(format!(
            "Entry {} is of type 'techreport', which does not render field 'howpublished'. \
             Either use field 'institution' instead, or switch to a different entry type completely.",
            entry.name
        ));
    }
    violations.extend(fields(
        entry,
        &["author", "title", "institution", "year"],
        &["language", "howpublished", "url"],
    ));
    violations
}

fn check_misc(entry: &BibEntry) -> Vec<String> {
    fields(
        entry,
        &["author", "title", "howpublished", "year"],
        &["language", "organization", "address", "pages", "url"],
    )
}
