//! Rules for the `IEEEtran` style.
//!
//! Links go into `note` using a fixed layout instead of `url`, and fields
//! which only repeat another field are flagged for removal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::checks::{disallowed_field, distinct_fields, required_field, required_fields};
use crate::types::{BibEntry, EntryType};
use crate::verification::{RuleRegistry, RuleTarget};

/// `[ONLINE]. Available: \url{…}, Accessed: YYYY-MM-DD`
static ONLINE_NOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[ONLINE\]\. Available: \\url\{(.+?)\}, Accessed: (\d{4}-\d{2}-\d{2})$")
        .expect("valid regex")
});

pub(crate) fn register(registry: &mut RuleRegistry) {
    use EntryType as E;
    use RuleTarget::Only;

    registry.register("check_url_field", RuleTarget::All, check_url_field);
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

fn check_url_field(entry: &BibEntry) -> Vec<String> {
    let mut violations = disallowed_field(
        entry,
        "url",
        "Move the content of the field into the [note] field.",
    );
    if let Some(note) = entry.get("note") {
        if !ONLINE_NOTE.is_match(note) {
            violations.push(format!(
                "Entry '{}' contains a malformed field [note]. Make sure the [note] field follows \
                 the following pattern: '[ONLINE]. Available: \\url{{...}}, Accessed: YYYY-mmm-dd'",
                entry.name
            ));
        }
    }
    violations
}

fn check_article(entry: &BibEntry) -> Vec<String> {
    required_fields(entry, &["author", "title", "journal", "year"])
}

fn check_conference(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(
        entry,
        &["author", "title", "booktitle", "publisher", "year", "type"],
    );
    violations.extend(required_field(
        entry,
        "booktitle",
        "This should be the name of the conference.",
    ));
    violations.extend(required_field(
        entry,
        "publisher",
        "This should be the company that published the proceedings.",
    ));
    violations.extend(required_field(
        entry,
        "type",
        "This should describe the type of report/publication (e.g., “Conference Paper”).",
    ));
    violations.extend(distinct_fields(entry, ["organization", "publisher"], "organization"));
    violations
}

fn check_online(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(entry, &["author", "title", "year", "howpublished"]);
    violations.extend(required_field(
        entry,
        "howpublished",
        "This should be something like: 'White paper', 'Blog post', 'GitHub repository', etc.",
    ));
    violations.extend(distinct_fields(entry, ["organization", "author"], "organization"));
    violations
}

fn check_book(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(entry, &["author", "title", "year", "publisher"]);
    violations.extend(distinct_fields(entry, ["publisher", "editor"], "editor"));
    violations
}

fn check_in_book(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(entry, &["author", "title", "year", "publisher"]);
    violations.extend(required_field(
        entry,
        "title",
        "This should be the title of the book.",
    ));
    violations.extend(disallowed_field(
        entry,
        "editor",
        "This field is not rendered in IEEEtran-style.",
    ));
    violations
}

fn check_in_collection(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(
        entry,
        &["author", "title", "year", "booktitle", "publisher"],
    );
    violations.extend(disallowed_field(
        entry,
        "type",
        "If this field is set to (Article, Paper, Essay etc.), you should use a different entry type.",
    ));
    violations.extend(distinct_fields(entry, ["editor", "publisher"], "editor"));
    violations
}

fn check_standard(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(
        entry,
        &["title", "organization", "type", "number", "year"],
    );
    violations.extend(required_field(
        entry,
        "organization",
        "This should be the issuing body or standards organization.",
    ));
    violations.extend(required_field(
        entry,
        "type",
        "This should be something like \
         (Standard, Technical Report, Recommendation, Specification, Guideline, Draft Standard).",
    ));
    violations.extend(distinct_fields(entry, ["author", "organization"], "author"));
    violations
}

fn check_tech_report(entry: &BibEntry) -> Vec<String> {
    vec![format!(
        "Entry '{}' is of type 'TECHREPORT'. Please use a different entry type, such as 'STANDARD'.",
        entry.name
    )]
}

fn check_misc(entry: &BibEntry) -> Vec<String> {
    required_fields(entry, &["author", "title", "howpublished", "year"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::Verifier;

    fn verifier() -> Verifier {
        let mut registry = RuleRegistry::new();
        register(&mut registry);
        Verifier::new(registry)
    }

    fn complete_misc(name: &str) -> BibEntry {
        BibEntry::new(EntryType::Misc, name)
            .with_field("author", "A")
            .with_field("title", "T")
            .with_field("howpublished", "Blog post")
            .with_field("year", "2024")
    }

    #[test]
    fn test_well_formed_note() {
        let entry = complete_misc("m").with_field(
            "note",
            "[ONLINE]. Available: \\url{https://example.com}, Accessed: 2024-05-01",
        );
        assert!(verifier().verify(&entry).is_empty());
    }

    #[test]
    fn test_url_and_malformed_note() {
        let entry = complete_misc("m")
            .with_field("url", "https://example.com")
            .with_field("note", "see https://example.com");
        let violations = verifier().verify(&entry);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0],
            "Entry 'm' contains the non-allowed field: [url]. Move the content of the field into the [note] field."
        );
        assert!(violations[1].starts_with("Entry 'm' contains a malformed field [note]."));
        assert!(violations[1].ends_with("'[ONLINE]. Available: \\url{...}, Accessed: YYYY-mmm-dd'"));
    }

    #[test]
    fn test_conference_duplicates() {
        let entry = BibEntry::new(EntryType::Conference, "c")
            .with_field("author", "A")
            .with_field("title", "T")
            .with_field("booktitle", "Conf")
            .with_field("publisher", "IEEE")
            .with_field("organization", "IEEE")
            .with_field("year", "2024")
            .with_field("type", "Conference Paper");
        assert_eq!(
            verifier().verify(&entry),
            vec!["Entry 'c' fields [organization] and [publisher] are the same. Remove field [organization].".to_string()]
        );
    }

    #[test]
    fn test_duplicate_fields_named_in_rule_order() {
        let book = BibEntry::new(EntryType::Book, "b")
            .with_field("author", "A")
            .with_field("title", "T")
            .with_field("year", "2024")
            .with_field("publisher", "ACME")
            .with_field("editor", "ACME");
        assert_eq!(
            verifier().verify(&book),
            vec!["Entry 'b' fields [publisher] and [editor] are the same. Remove field [editor].".to_string()]
        );

        let online = BibEntry::new(EntryType::Online, "o")
            .with_field("author", "ACME")
            .with_field("organization", "ACME")
            .with_field("title", "T")
            .with_field("year", "2024")
            .with_field("howpublished", "Blog post");
        assert_eq!(
            verifier().verify(&online),
            vec!["Entry 'o' fields [organization] and [author] are the same. Remove field [organization].".to_string()]
        );

        let standard = BibEntry::new(EntryType::Standard, "s")
            .with_field("author", "ISO")
            .with_field("organization", "ISO")
            .with_field("title", "T")
            .with_field("type", "Standard")
            .with_field("number", "8601")
            .with_field("year", "2019");
        assert_eq!(
            verifier().verify(&standard),
            vec!["Entry 's' fields [author] and [organization] are the same. Remove field [author].".to_string()]
        );
    }

    #[test]
    fn test_conference_missing_type_explained() {
        let entry = BibEntry::new(EntryType::Conference, "c")
            .with_field("author", "A")
            .with_field("title", "T")
            .with_field("booktitle", "Conf")
            .with_field("publisher", "IEEE")
            .with_field("year", "2024");
        let violations = verifier().verify(&entry);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].ends_with("[type]"));
        assert!(violations[1].starts_with("Entry 'c' misses the required field [type]."));
    }

    #[test]
    fn test_book_without_publisher_or_editor() {
        let entry = BibEntry::new(EntryType::Book, "b")
            .with_field("author", "A")
            .with_field("title", "T")
            .with_field("year", "2024");
        assert_eq!(
            verifier().verify(&entry),
            vec!["Entry 'b' misses the following required fields: [publisher]".to_string()]
        );
    }

    #[test]
    fn test_tech_report_rejected() {
        let entry = BibEntry::new(EntryType::TechReport, "tr");
        assert_eq!(
            verifier().verify(&entry),
            vec!["Entry 'tr' is of type 'TECHREPORT'. Please use a different entry type, such as 'STANDARD'.".to_string()]
        );
    }

    #[test]
    fn test_url_rule_applies_to_unlisted_types() {
        let entry = BibEntry::new(EntryType::PhdThesis, "p").with_field("url", "https://example.com");
        assert_eq!(verifier().verify(&entry).len(), 1);
    }
}
