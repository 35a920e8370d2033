//! County/city name canonicalization.
//!
//! Names are rewritten character by character first (variant script forms),
//! then looked up in a rename table covering county-to-city reclassifications.
//! The table ships as `data/name_aliases.json` and can be swapped for another
//! document with the same shape.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

const BUILTIN_ALIASES: &str = include_str!("../data/name_aliases.json");

static BUILTIN: LazyLock<NameAliases> = LazyLock::new(|| {
    NameAliases::from_json(BUILTIN_ALIASES)
        .unwrap_or_else(|e| panic!("embedded name alias table is invalid: {e}"))
});

#[derive(Debug, Error)]
pub enum AliasTableError {
    #[error("failed to decode alias table: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("substitution {from:?} -> {to:?} must map exactly one character to one character")]
    NotSingleCharacter { from: String, to: String },
    #[error("substitution target {0:?} is also a substitution source")]
    ChainedSubstitution(char),
    #[error("{name:?} is renamed to both {first:?} and {second:?}")]
    ConflictingRename {
        name: String,
        first: String,
        second: String,
    },
    #[error("rename target {target:?} (from {name:?}) is not canonical")]
    NonCanonicalTarget { name: String, target: String },
}

#[derive(Deserialize)]
struct RawAliasTable {
    #[serde(default)]
    character_substitutions: Vec<(String, String)>,
    #[serde(default)]
    renames: HashMap<String, String>,
}

/// Variant-character substitutions plus a legacy-name rename table.
///
/// Construction validates that [`NameAliases::normalize`] is idempotent:
/// substitution targets never feed another substitution, and rename targets
/// are already canonical.
#[derive(Debug, Clone, PartialEq)]
pub struct NameAliases {
    substitutions: Vec<(char, char)>,
    renames: HashMap<String, String>,
}

impl NameAliases {
    /// The table embedded in the crate.
    pub fn builtin() -> &'static NameAliases {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self, AliasTableError> {
        let raw: RawAliasTable = serde_json::from_str(json)?;

        let mut substitutions = Vec::with_capacity(raw.character_substitutions.len());
        for (from, to) in raw.character_substitutions {
            match (single_char(&from), single_char(&to)) {
                (Some(f), Some(t)) => substitutions.push((f, t)),
                _ => return Err(AliasTableError::NotSingleCharacter { from, to }),
            }
        }
        for &(_, to) in &substitutions {
            if substitutions.iter().any(|&(from, _)| from == to) {
                return Err(AliasTableError::ChainedSubstitution(to));
            }
        }

        let mut aliases = Self {
            substitutions,
            renames: HashMap::with_capacity(raw.renames.len()),
        };

        // Keys are stored in substituted form so `台北縣` and `臺北縣` collapse.
        for (name, target) in raw.renames {
            let key = aliases.substitute(&name);
            match aliases.renames.get(&key) {
                Some(existing) if *existing != target => {
                    return Err(AliasTableError::ConflictingRename {
                        name: key,
                        first: existing.clone(),
                        second: target,
                    });
                }
                _ => {
                    aliases.renames.insert(key, target);
                }
            }
        }

        for (name, target) in &aliases.renames {
            if aliases.substitute(target) != *target || aliases.renames.contains_key(target) {
                return Err(AliasTableError::NonCanonicalTarget {
                    name: name.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(aliases)
    }

    /// Canonical form of a county/city label.
    pub fn normalize(&self, name: &str) -> String {
        let substituted = self.substitute(name);
        match self.renames.get(&substituted) {
            Some(target) => target.clone(),
            None => substituted,
        }
    }

    pub fn rename_count(&self) -> usize {
        self.renames.len()
    }

    fn substitute(&self, name: &str) -> String {
        name.chars()
            .map(|c| {
                self.substitutions
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map_or(c, |&(_, to)| to)
            })
            .collect()
    }
}

/// [`NameAliases::normalize`] against the built-in table.
pub fn normalize(name: &str) -> String {
    NameAliases::builtin().normalize(name)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
