//! This crate verifies the entries of `.bib` files against the rules of a
//! bibliography style.
//!
//! `.bib` files are popular in reference management, but a style like
//! `ieeetr` only prints some of the fields of an entry. Missing fields make
//! for incomplete references, and fields the style ignores are silently lost
//! in the compiled document. One entry in such a file can look like this:
//!
//! ```tex
//! @book{DBLP:books/aw/Knuth73a,
//!     author    = {Donald E. Knuth},
//!     title     = {The Art of Computer Programming, Volume {I:} Fundamental Algorithms,
//!                  2nd Edition},
//!     publisher = {Addison-Wesley},
//!     year      = {1973},
//!     url       = {https://www.worldcat.org/oclc/310903895},
//! }
//! ```
//!
//! In this example, we call `book` the entry type and `DBLP:books/aw/Knuth73a`
//! the entry name. Then we have a sequence of fields, e.g. `year` with data `1973`.
//!
//! Checking works in two steps. First, the source is split into entry blocks
//! and each block is parsed into a `BibEntry`. Then a `Verifier` runs every
//! rule of its `RuleRegistry` which targets the entry's type:
//!
//! ```rust
//! use bibtex_linter::{Parser, Ruleset, Verifier};
//! use std::str::FromStr;
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     //let p = Parser::from_file("source.bib")?;
//!     let p = Parser::from_str("@misc{x, author = {Jane}, url = {http://e.com}}")?;
//!     let verifier = Verifier::new(Ruleset::Ieeetr.registry());
//!     for result in p.iter() {
//!         let entry = result?;
//!         for violation in verifier.verify(&entry) {
//!             println!("{}", violation);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Only the structure of entries is checked. Teχ macros are not expanded
//! and the data of fields is taken as opaque text.

mod checks;
mod errors;
mod lexer;
mod parser;
mod report;
mod rulesets;
mod types;
mod verification;

use std::path;

pub use crate::checks::{
    disallowed_field, distinct_fields, omitted_fields, required_field, required_fields,
};
pub use crate::errors::{Error, ParsingError};
pub use crate::lexer::{normalize_value, split_entries, EntryBlocks};
pub use crate::parser::{BibEntries, DuplicatePolicy, Parser};
pub use crate::report::{EntryReport, LintReport};
pub use crate::rulesets::Ruleset;
pub use crate::types::{BibEntry, EntryType};
pub use crate::verification::{Rule, RuleFn, RuleRegistry, RuleTarget, Verifier};

/// Parse all entries of a `.bib` source, failing on the first malformed entry
pub fn parse_str(src: &str) -> Result<Vec<BibEntry>, ParsingError> {
    Parser::from_string(src.to_string()).iter().collect()
}

/// Read and parse all entries of a `.bib` file, failing on the first malformed entry
pub fn parse_file<P: AsRef<path::Path>>(
    path: P,
    policy: DuplicatePolicy,
) -> Result<Vec<BibEntry>, Error> {
    let parser = Parser::from_file(path)?.with_duplicate_policy(policy);
    let entries = parser.iter().collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}
