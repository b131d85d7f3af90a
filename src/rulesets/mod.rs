//! Compiled-in rule catalogs, one per bibliography style.
//!
//! Rule code is never loaded at runtime; a ruleset is picked by name and
//! turned into a `RuleRegistry`.

use std::fmt;
use std::str;

use crate::errors::Error;
use crate::verification::RuleRegistry;

mod ieeetr;
mod ieeetran;

/// A bibliography style whose rendering rules can be checked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ruleset {
    /// The `ieeetr` BibTeX style, used unless another one is asked for
    #[default]
    Ieeetr,
    /// The `IEEEtran` BibTeX style
    IeeeTran,
}

impl Ruleset {
    /// Names accepted by `Ruleset::from_str`
    pub const NAMES: [&'static str; 3] = ["default", "ieeetr", "IEEEtran"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ieeetr => "ieeetr",
            Self::IeeeTran => "IEEEtran",
        }
    }

    /// Build a fresh registry holding all rules of this style
    pub fn registry(&self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        match self {
            Self::Ieeetr => ieeetr::register(&mut registry),
            Self::IeeeTran => ieeetran::register(&mut registry),
        }
        registry
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl str::FromStr for Ruleset {
    type Err = Error;

    /// Look up a ruleset by name, ignoring case
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "default" | "ieeetr" => Ok(Self::Ieeetr),
            "ieeetran" => Ok(Self::IeeeTran),
            _ => Err(Error::UnknownRuleset {
                name: name.to_string(),
                available: Self::NAMES.to_vec(),
            }),
        }
    }
}
