use std::fs;
use std::io;
use std::io::Read;
use std::mem;
use std::path;
use std::str;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::errors::ParsingError;

/// An entry block must start like `@type{` (whitespace before the brace is fine)
static ENTRY_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@\w+\s*\{").expect("valid regex"));

/// A comma followed by trailing whitespace up to the end of the line
static COMMA_EOL: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\n").expect("valid regex"));

/// Normalize the raw data of a field, i.e. the right-hand side of `key = data`.
///
/// A trailing comma and surrounding whitespace are dropped. Then exactly one
/// level of delimiters is removed: `{{…}}`, `{…}` or `"…"`. Bare data like
/// `2020` is returned as is. Teχ commands such as `\url{…}` are opaque text
/// and never touched. For example,
///
/// ```rust
/// use bibtex_linter::normalize_value;
/// assert_eq!(normalize_value("  {{Industrial Digital Twin Association e. V.}} ,"),
///            "Industrial Digital Twin Association e. V.");
/// assert_eq!(normalize_value(r"{\url{https://example.com}}"), r"\url{https://example.com}");
/// assert_eq!(normalize_value("1973"), "1973");
/// ```
pub fn normalize_value(raw: &str) -> &str {
    let data = raw.trim().trim_end_matches(',').trim();
    let len = data.len();

    if len >= 4 && data.starts_with("{{") && data.ends_with("}}") {
        return data[2..len - 2].trim();
    }
    let braced = data.starts_with('{') && data.ends_with('}');
    let quoted = data.starts_with('"') && data.ends_with('"');
    if len >= 2 && (braced || quoted) {
        return data[1..len - 1].trim();
    }
    data
}

/// Split the text of one entry block into its raw `key = data` segments.
///
/// The segment holding the entry ID is not part of the result. Fields are
/// separated by commas outside of any braces or double quotes, so data like
/// `{Line 1,\n Line 2}` stays within its field.
pub(crate) fn split_fields(block: &str) -> Result<Vec<String>, ParsingError> {
    let block = block.trim();

    let start = match block.find('{') {
        Some(start) => start,
        None => {
            return Err(ParsingError::MissingOpenBrace {
                block: block.to_string(),
            })
        }
    };
    if !ENTRY_START.is_match(block) {
        return Err(ParsingError::InvalidEntry {
            block: block.to_string(),
        });
    }

    // only the brace closing the entry goes, the data keeps its own braces
    let body = &block[start + 1..];
    let body = body.strip_suffix('}').unwrap_or(body);
    let body = body.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    let body = COMMA_EOL.replace_all(body, ",\n");

    let mut segments = top_level_segments(&body);
    if !segments.is_empty() {
        segments.remove(0);
    }
    Ok(segments
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Split `src` at every comma which is neither inside braces nor inside double quotes
fn top_level_segments(src: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut level: i64 = 0;
    let mut quoted = false;
    let mut start = 0;

    for (idx, chr) in src.char_indices() {
        match chr {
            '{' => level += 1,
            '}' => level -= 1,
            '"' if level == 0 => quoted = !quoted,
            ',' if level == 0 && !quoted => {
                segments.push(&src[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&src[start..]);
    segments
}

/// Split a `.bib` source into its entry blocks, one string per `@type{…}` entry.
///
/// See `EntryBlocks` for the splitting rules.
pub fn split_entries(src: &str) -> Vec<String> {
    EntryBlocks::new(src).collect()
}

/// A stateful iterator yielding the text of one entry block after another.
///
/// Lines are trimmed. A line starting with `@` begins a new block; the block
/// ends at the line where its curly brace level returns to zero. Text between
/// blocks is ignored, and a block whose braces never close is dropped without
/// an error. The lines of a block are joined with `\n`, so the indentation of
/// continuation lines does not survive.
pub struct EntryBlocks<'s> {
    lines: str::Lines<'s>,
    current: Vec<&'s str>,
    level: i64,      // curly brace level of the current block
    opened: bool,    // did the current block contain a `{` yet?
    inside: bool,    // are we collecting lines of a block?
    lineno: usize,   // line number where the current block started
    next_line: usize,
}

impl<'s> EntryBlocks<'s> {
    pub fn new(src: &'s str) -> EntryBlocks<'s> {
        EntryBlocks {
            lines: src.lines(),
            current: Vec::new(),
            level: 0,
            opened: false,
            inside: false,
            lineno: 0,
            next_line: 0,
        }
    }

    /// Add a line to the current block and report whether the block is complete
    fn consume(&mut self, line: &'s str) -> bool {
        self.current.push(line);
        let opening = line.matches('{').count() as i64;
        let closing = line.matches('}').count() as i64;
        self.level += opening - closing;
        self.opened |= opening > 0;
        self.opened && self.level == 0
    }

    fn drop_unterminated(&mut self) {
        if self.inside {
            debug!(
                line = self.lineno + 1,
                start = self.current.first().copied().unwrap_or_default(),
                "dropping entry whose braces never close"
            );
        }
        self.current.clear();
        self.inside = false;
    }
}

impl<'s> Iterator for EntryBlocks<'s> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        #[allow(clippy::while_let_on_iterator)]
        while let Some(line) = self.lines.next() {
            let lineno = self.next_line;
            self.next_line += 1;
            let line = line.trim();

            if line.starts_with('@') {
                self.drop_unterminated();
                self.inside = true;
                self.level = 0;
                self.opened = false;
                self.lineno = lineno;
            } else if !self.inside {
                continue;
            }

            if self.consume(line) {
                self.inside = false;
                let block = mem::take(&mut self.current).join("\n");
                trace!(line = self.lineno + 1, "split entry block");
                return Some(block);
            }
        }

        self.drop_unterminated();
        None
    }
}

/// Holds the source text of a `.bib` file
pub(crate) struct Lexer {
    src: String,
}

impl Lexer {
    /// Use a file stored at a `path` as source for the lexing process.
    pub(crate) fn from_file<P: AsRef<path::Path>>(path: P) -> Result<Lexer, io::Error> {
        let mut fd = fs::File::open(path)?;
        let mut buf = String::new();
        fd.read_to_string(&mut buf)?;
        Ok(Lexer { src: buf })
    }

    /// Use a string as source for the lexing process.
    pub(crate) fn from_string(data: String) -> Lexer {
        Lexer { src: data }
    }

    pub(crate) fn iter(&self) -> EntryBlocks {
        EntryBlocks::new(&self.src)
    }
}
