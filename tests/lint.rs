use std::error;
use std::path::PathBuf;

use bibtex_linter::{
    omitted_fields, parse_file, parse_str, required_fields, split_entries, BibEntry,
    DuplicatePolicy, EntryType, LintReport, ParsingError, RuleRegistry, RuleTarget, Ruleset,
    Verifier,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test_refs.bib")
}

fn by_name<'e>(entries: &'e [BibEntry], name: &str) -> &'e BibEntry {
    entries
        .iter()
        .find(|entry| entry.name == name)
        .unwrap_or_else(|| panic!("entry '{}' not parsed", name))
}

#[test]
fn test_parse_all_entries() -> Result<(), Box<dyn error::Error>> {
    let entries = parse_file(fixture(), DuplicatePolicy::LastWins)?;
    assert_eq!(entries.len(), 17);

    let expected_types = [
        (EntryType::Article, 1),
        (EntryType::Conference, 1),
        (EntryType::Online, 1),
        (EntryType::TechReport, 1),
        (EntryType::Book, 1),
        (EntryType::Misc, 9),
        (EntryType::Standard, 1),
        (EntryType::InBook, 1),
        (EntryType::InCollection, 1),
    ];
    for (entry_type, count) in expected_types {
        assert_eq!(
            entries.iter().filter(|e| e.entry_type == entry_type).count(),
            count,
            "number of {} entries",
            entry_type
        );
    }
    assert!(entries.iter().all(|e| e.name != "truncated"));
    Ok(())
}

#[test]
fn test_entry_fields_and_values() -> Result<(), Box<dyn error::Error>> {
    let entries = parse_file(fixture(), DuplicatePolicy::LastWins)?;

    let expected: [(&str, EntryType, &[(&str, &str)]); 12] = [
        ("alias_conference", EntryType::Conference, &[
            ("author", "Should map to CONFERENCE"),
            ("title", "Using alias INPROCEEDINGS"),
            ("year", "2021"),
        ]),
        ("alias_online", EntryType::Online, &[("author", "Should map to ONLINE"), ("url", "https://example.com")]),
        ("spaced_book", EntryType::Book, &[
            ("author", "Extra spaces around field and value"),
            ("title", "Trimmed Title"),
            ("year", "2023"),
        ]),
        ("nested_braces", EntryType::Misc, &[
            ("note", "This has {nested} braces inside"),
            ("comment", "But only outermost braces should be stripped"),
        ]),
        ("double_braces", EntryType::Misc, &[("author", "Double brace test"), ("title", "Another level of nesting")]),
        ("quoted", EntryType::Misc, &[("author", "Quoted Author"), ("title", "Simple quoted title")]),
        ("multiline", EntryType::Misc, &[("note", "This value\nspans multiple\nlines")]),
        ("wrapped_url", EntryType::Misc, &[("howpublished", "\\url{https://wrapped-url.com}")]),
        ("latex_command", EntryType::Misc, &[("title", "\\LaTeX command in value")]),
        ("trailing_comma", EntryType::Misc, &[("author", "Trailing Comma"), ("title", "Should be OK")]),
        ("newlines", EntryType::Misc, &[("author", "Newlines and spacing\neverywhere"), ("title", "Still valid")]),
        ("book_part", EntryType::InBook, &[
            ("author", "Part of a book"),
            ("title", "Chapter Title"),
            ("booktitle", "Whole Book Title"),
        ]),
    ];

    for (name, entry_type, fields) in expected {
        let entry = by_name(&entries, name);
        assert_eq!(entry.entry_type, entry_type, "type of '{}'", name);
        assert_eq!(entry.fields.len(), fields.len(), "fields of '{}'", name);
        for (key, data) in fields.iter() {
            assert_eq!(entry.get(key), Some(*data), "field '{}' of '{}'", key, name);
        }
    }
    Ok(())
}

#[test]
fn test_split_count_matches_entries() {
    let entries = [
        "@article{one,\n  title = {One}\n}",
        "@book{two, title = {Two}}",
        "@misc{three,\n  note = {Three\n  lines},\n}",
    ];
    let src = entries.join("\n\n");
    let blocks = split_entries(&src);
    assert_eq!(blocks.len(), 3);
    for (block, name) in blocks.iter().zip(["one", "two", "three"]) {
        assert!(block.contains(name));
    }
}

fn misc_rule(entry: &BibEntry) -> Vec<String> {
    let mut violations = required_fields(entry, &["author", "title", "howpublished", "year"]);
    violations.extend(omitted_fields(entry, &["url"]));
    violations
}

#[test]
fn test_verify_misc_scenario() -> Result<(), ParsingError> {
    let entries = parse_str("@misc{x, author = {Jane}, url = {http://e.com}}")?;
    assert_eq!(entries.len(), 1);

    let mut registry = RuleRegistry::new();
    registry.register("misc_rule", RuleTarget::Only(EntryType::Misc), misc_rule);
    let verifier = Verifier::new(registry);

    assert_eq!(
        verifier.verify(&entries[0]),
        vec![
            "Entry 'x' misses the following required fields: [howpublished, title, year]".to_string(),
            "Entry 'x' has fields present that would be omitted in the compiled document: [url]. \
             This could lead to a loss of information."
                .to_string(),
        ]
    );

    let online = BibEntry::new(EntryType::Online, "o").with_field("url", "http://e.com");
    assert!(verifier.verify(&online).is_empty());
    Ok(())
}

#[test]
fn test_lint_fixture_with_rulesets() -> Result<(), Box<dyn error::Error>> {
    let entries = parse_file(fixture(), DuplicatePolicy::LastWins)?;

    let report = LintReport::collect(&entries, &Verifier::new(Ruleset::Ieeetr.registry()));
    assert_eq!(report.entry_count(), 17);
    assert!(!report.is_clean());
    let article = report
        .entries
        .iter()
        .find(|e| e.name == "basic_article")
        .ok_or("missing basic_article")?;
    assert_eq!(
        article.violations,
        vec!["Entry 'basic_article' misses the following required fields: [journal]".to_string()]
    );

    let report = LintReport::collect(&entries, &Verifier::new(Ruleset::IeeeTran.registry()));
    let online = report
        .entries
        .iter()
        .find(|e| e.name == "alias_online")
        .ok_or("missing alias_online")?;
    assert_eq!(online.entry_type, EntryType::Online);
    assert_eq!(
        online.violations[0],
        "Entry 'alias_online' contains the non-allowed field: [url]. Move the content of the field into the [note] field."
    );
    assert!(report.to_string().ends_with(&format!(
        "Found {} violation(s) in 17 entries.",
        report.violation_count()
    )));
    Ok(())
}

#[test]
fn test_parse_errors_propagate() {
    let src = "@misc{fine, title = {Fine}}\n@website{w, title = {Unknown}}\n";
    assert_eq!(
        parse_str(src),
        Err(ParsingError::UnknownEntryType {
            kind: "website".to_string()
        })
    );
}
