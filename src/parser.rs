use std::collections::hash_map;
use std::io;
use std::path;
use std::str;

use tracing::{trace, warn};

use crate::errors::ParsingError;
use crate::lexer;
use crate::types::{BibEntry, EntryType};

/// What to do when a field name occurs twice within one entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later data overwrites the earlier one
    #[default]
    LastWins,
    /// The entry fails to parse with `ParsingError::DuplicateField`
    Deny,
}

impl BibEntry {
    /// Parse one entry block as yielded by `split_entries`, e.g.
    /// `@book{tolkien1937, author = {J. R. R. Tolkien}}`.
    ///
    /// The entry type is lowercased and resolved through its aliases, field
    /// names are lowercased and field data is normalized by `normalize_value`.
    /// No partial entry is returned if the block is malformed.
    pub fn parse(block: &str, policy: DuplicatePolicy) -> Result<BibEntry, ParsingError> {
        let raw_fields = lexer::split_fields(block)?;

        // `split_fields` guarantees the block looks like `@type{`
        let block = block.trim();
        let (head, body) = block
            .split_once('{')
            .ok_or_else(|| ParsingError::MissingOpenBrace {
                block: block.to_string(),
            })?;
        let entry_type: EntryType = head.trim_start_matches('@').parse()?;
        let name = body
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches('}')
            .trim();

        let mut entry = BibEntry::new(entry_type, name);
        for raw_field in raw_fields.iter() {
            let (key, data) = match raw_field.split_once('=') {
                Some((key, data)) => (key, lexer::normalize_value(data)),
                None => (raw_field.as_str(), ""),
            };
            let key = key.trim().to_lowercase();
            trace!(entry = name, field = %key, "parsed field");

            match entry.fields.entry(key) {
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(data.to_string());
                }
                hash_map::Entry::Occupied(mut slot) => match policy {
                    DuplicatePolicy::LastWins => {
                        warn!(
                            entry = name,
                            field = %slot.key(),
                            "duplicate field, keeping the last value"
                        );
                        slot.insert(data.to_string());
                    }
                    DuplicatePolicy::Deny => {
                        return Err(ParsingError::DuplicateField {
                            id: name.to_string(),
                            name: slot.key().clone(),
                        });
                    }
                },
            }
        }

        Ok(entry)
    }
}

impl str::FromStr for BibEntry {
    type Err = ParsingError;

    /// Parse one entry block with `DuplicatePolicy::LastWins`
    fn from_str(block: &str) -> Result<Self, Self::Err> {
        BibEntry::parse(block, DuplicatePolicy::default())
    }
}

/// Parser parsing a `.bib` file allowing iteration over `BibEntry` instances
pub struct Parser {
    pub(crate) lexer: lexer::Lexer,
    pub(crate) policy: DuplicatePolicy,
}

impl Parser {
    /// Use a file at some filepath as source for the parsing process.
    pub fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Parser, io::Error> {
        let lexer = lexer::Lexer::from_file(path)?;
        Ok(Parser {
            lexer,
            policy: DuplicatePolicy::default(),
        })
    }

    /// Use a string as source for the parsing process.
    pub fn from_string(data: String) -> Parser {
        Parser {
            lexer: lexer::Lexer::from_string(data),
            policy: DuplicatePolicy::default(),
        }
    }

    /// Choose how duplicate field names within one entry are treated
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Parser {
        self.policy = policy;
        self
    }

    pub fn iter(&self) -> BibEntries {
        BibEntries {
            iter: self.lexer.iter(),
            policy: self.policy,
        }
    }
}

impl str::FromStr for Parser {
    type Err = io::Error;

    /// Use a string as source for the parsing process.
    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(Parser::from_string(data.to_string()))
    }
}

/// A stateful iterator yielding one BibEntry instance after another.
///
/// Blocks which never close their braces are skipped silently. Every other
/// block yields either its entry or the error of parsing it.
pub struct BibEntries<'i> {
    pub(crate) iter: lexer::EntryBlocks<'i>,
    pub(crate) policy: DuplicatePolicy,
}

impl<'s> Iterator for BibEntries<'s> {
    type Item = Result<BibEntry, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|block| BibEntry::parse(&block, self.policy))
    }
}
