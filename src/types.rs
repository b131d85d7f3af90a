use std::collections::HashMap;
use std::fmt;
use std::str;

use crate::errors::ParsingError;

/// Long-form or legacy spellings of an entry type mapped to their canonical kind
const ENTRY_TYPE_ALIASES: [(&str, EntryType); 2] = [
    ("inproceedings", EntryType::Conference),
    ("electronic", EntryType::Online),
];

/// Canonical kind of a `.bib` entry, e.g. `article` in `@article{…}`.
///
/// Parsing is case-insensitive and resolves aliases, so `@InProceedings`
/// and `@conference` both yield `EntryType::Conference`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum EntryType {
    Article,
    Book,
    Booklet,
    Conference,
    InBook,
    InCollection,
    Manual,
    MastersThesis,
    Misc,
    Online,
    PhdThesis,
    Proceedings,
    Standard,
    TechReport,
    Unpublished,
}

impl EntryType {
    /// Every canonical entry type, in alphabetical order
    pub const ALL: [EntryType; 15] = [
        Self::Article,
        Self::Book,
        Self::Booklet,
        Self::Conference,
        Self::InBook,
        Self::InCollection,
        Self::Manual,
        Self::MastersThesis,
        Self::Misc,
        Self::Online,
        Self::PhdThesis,
        Self::Proceedings,
        Self::Standard,
        Self::TechReport,
        Self::Unpublished,
    ];

    /// The lowercase canonical spelling, as written after the `@`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Booklet => "booklet",
            Self::Conference => "conference",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::Manual => "manual",
            Self::MastersThesis => "mastersthesis",
            Self::Misc => "misc",
            Self::Online => "online",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::Standard => "standard",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl str::FromStr for EntryType {
    type Err = ParsingError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let kind = src.trim().to_lowercase();
        if let Some((_, canonical)) = ENTRY_TYPE_ALIASES.iter().find(|(alias, _)| *alias == kind) {
            return Ok(*canonical);
        }
        Self::ALL
            .iter()
            .find(|t| t.as_str() == kind)
            .copied()
            .ok_or(ParsingError::UnknownEntryType { kind })
    }
}

/// One entry in a `.bib` file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BibEntry {
    /// canonical entry type, e.g. “conference” for `@inproceedings`
    pub entry_type: EntryType,
    /// entry name, e.g. “DBLP:books/lib/Knuth97”
    pub name: String,
    /// map of lowercase field names to normalized values, e.g. “author” mapped to “Donald Ervin Knuth”
    pub fields: HashMap<String, String>,
}

impl BibEntry {
    pub fn new(entry_type: EntryType, name: &str) -> BibEntry {
        BibEntry {
            entry_type,
            name: name.to_string(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style helper, mostly useful to set up entries in rule tests.
    /// The field name is lowercased like the parser does.
    pub fn with_field(mut self, name: &str, data: &str) -> BibEntry {
        self.fields.insert(name.to_lowercase(), data.to_string());
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}
