//! Signed tag patterns, as written in rules: `+Open` or `-Open`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::WorldError;

/// A tag requirement. A positive pattern requires the tag, a negative one
/// requires its absence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagPattern {
    pub name: String,
    pub polarity: bool,
}

impl TagPattern {
    /// Pattern requiring the tag.
    pub fn present(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polarity: true,
        }
    }

    /// Pattern requiring the tag to be missing.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polarity: false,
        }
    }

    /// The sign character used in the textual form.
    pub fn sign(&self) -> char {
        if self.polarity {
            '+'
        } else {
            '-'
        }
    }
}

impl FromStr for TagPattern {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let polarity = match chars.next() {
            Some('+') => true,
            Some('-') => false,
            _ => return Err(WorldError::InvalidTagPattern(s.to_string())),
        };
        let name = chars.as_str();
        if name.is_empty() {
            return Err(WorldError::InvalidTagPattern(s.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            polarity,
        })
    }
}

impl std::fmt::Display for TagPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.sign(), self.name)
    }
}
