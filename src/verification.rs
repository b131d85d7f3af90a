//! Verification of `BibEntry` instances against a set of rules.
//!
//! A rule is a plain function returning one human-readable message per
//! violation it finds, or nothing if the entry is fine:
//!
//! ```rust
//! use bibtex_linter::{BibEntry, EntryType, RuleRegistry, RuleTarget, Verifier};
//!
//! fn online_must_have_url(entry: &BibEntry) -> Vec<String> {
//!     if entry.has_field("url") {
//!         return vec![];
//!     }
//!     vec![format!("Entry '{}' of type 'online' must include a URL", entry.name)]
//! }
//!
//! let mut registry = RuleRegistry::new();
//! registry.register("online_must_have_url", RuleTarget::Only(EntryType::Online), online_must_have_url);
//!
//! let verifier = Verifier::new(registry);
//! let entry = BibEntry::new(EntryType::Online, "blog");
//! assert_eq!(verifier.verify(&entry).len(), 1);
//! ```

use std::fmt;

use tracing::debug;

use crate::types::{BibEntry, EntryType};

/// Signature of a rule: all violations found in one entry
pub type RuleFn = fn(&BibEntry) -> Vec<String>;

/// The entry types a rule applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleTarget {
    All,
    Only(EntryType),
}

impl RuleTarget {
    pub fn applies_to(&self, entry_type: EntryType) -> bool {
        match self {
            Self::All => true,
            Self::Only(target) => *target == entry_type,
        }
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all entry types"),
            Self::Only(entry_type) => write!(f, "{}", entry_type),
        }
    }
}

/// A named rule together with the entry types it checks
#[derive(Clone)]
pub struct Rule {
    pub name: &'static str,
    pub target: RuleTarget,
    pub check: RuleFn,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only collection of rules
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule and hand the function back, so it can still be called directly.
    ///
    /// Registering the same function twice is allowed, it then simply runs twice.
    pub fn register(&mut self, name: &'static str, target: RuleTarget, check: RuleFn) -> RuleFn {
        debug!(rule = name, target = %target, "registered rule");
        self.rules.push(Rule {
            name,
            target,
            check,
        });
        check
    }

    /// All rules, in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Runs the rules of a registry against entries
#[derive(Clone, Debug)]
pub struct Verifier {
    registry: RuleRegistry,
}

impl Verifier {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Collect the violations of every rule targeting `entry.entry_type` or all types.
    ///
    /// Violations are ordered by rule registration first and by the order
    /// a rule reports them second. An empty result means the entry passed.
    pub fn verify(&self, entry: &BibEntry) -> Vec<String> {
        let mut violations = Vec::new();
        for rule in self
            .registry
            .iter()
            .filter(|rule| rule.target.applies_to(entry.entry_type))
        {
            let found = (rule.check)(entry);
            debug!(
                rule = rule.name,
                entry = %entry.name,
                violations = found.len(),
                "applied rule"
            );
            violations.extend(found);
        }
        violations
    }
}
