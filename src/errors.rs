use std::io;

use thiserror::Error;

/// Represents an error that happened while turning one entry block into a `BibEntry`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParsingError {
    #[error("invalid entry format, expected '@type{{' at the start of:\n\n{block}\n")]
    InvalidEntry { block: String },

    #[error("could not locate the opening brace of the entry:\n\n{block}\n")]
    MissingOpenBrace { block: String },

    #[error("unknown entry type '{kind}'")]
    UnknownEntryType { kind: String },

    #[error("found duplicate field '{name}' in entry '{id}'")]
    DuplicateField { id: String, name: String },
}

/// Errors surfaced to the command line driver.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("unknown ruleset '{name}', available rulesets: {}", .available.join(", "))]
    UnknownRuleset {
        name: String,
        available: Vec<&'static str>,
    },
}
