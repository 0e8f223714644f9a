//! Canonical project name validation and the derived variable table.
//!
//! A scaffolding run takes exactly one user-supplied string, the canonical
//! project name. Every other name-derived placeholder value (`_UPPER`,
//! `_SNAKE`, `_PASCAL`, `_LOWER`) is a pure function of that canonical name,
//! computed once at table construction. There is no way to mutate a single
//! variant independently, so the variants can never drift apart.

use std::collections::BTreeMap;

use crate::error::{OvoError, Result};

/// A validated canonical project name.
///
/// Validation is a pre-flight check: it happens before any template file is
/// read, so a bad name never causes filesystem activity. The charset is
/// restricted to what survives every derivation as a valid C identifier
/// component: a leading ASCII letter, then letters, digits, hyphens, and
/// underscores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: &str) -> Result<Self> {
        let mut chars = name.chars();
        let first = chars.next().ok_or(OvoError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        })?;
        if !first.is_ascii_alphabetic() {
            return Err(OvoError::InvalidName {
                name: name.to_string(),
                reason: "must start with a letter",
            });
        }
        if let Some(bad) = chars.find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_') {
            return Err(OvoError::InvalidName {
                name: name.to_string(),
                reason: match bad {
                    c if c.is_whitespace() => "contains whitespace",
                    _ => "contains a character outside [A-Za-z0-9_-]",
                },
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable placeholder-name to value mapping for one scaffolding run.
///
/// Always contains the minimum set the shipped templates reference:
/// `PROJECT_NAME`, `PROJECT_NAME_UPPER`, `PROJECT_NAME_SNAKE`, plus the
/// extra derived variants `PROJECT_NAME_PASCAL` and `PROJECT_NAME_LOWER`.
#[derive(Debug, Clone)]
pub struct VariableTable {
    vars: BTreeMap<String, String>,
}

impl VariableTable {
    /// Build the table from the canonical name. All derived variants are
    /// computed here and nowhere else.
    pub fn new(name: &ProjectName) -> Self {
        let words = split_words(name.as_str());
        let mut vars = BTreeMap::new();
        vars.insert("PROJECT_NAME".into(), name.as_str().to_string());
        vars.insert("PROJECT_NAME_UPPER".into(), join_case(&words, Case::UpperSnake));
        vars.insert("PROJECT_NAME_SNAKE".into(), join_case(&words, Case::Snake));
        vars.insert("PROJECT_NAME_PASCAL".into(), join_case(&words, Case::Pascal));
        vars.insert("PROJECT_NAME_LOWER".into(), name.as_str().to_lowercase());
        Self { vars }
    }

    /// Add a caller-supplied variable at construction time. Values are
    /// inserted literally; they are never re-scanned for tokens during
    /// substitution.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

enum Case {
    Snake,
    UpperSnake,
    Pascal,
}

/// Split a name into words at hyphens, underscores, and lower-to-upper case
/// boundaries: `MyApp` and `my-app` both split into `["My", "App"]` /
/// `["my", "app"]`.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;

    for c in name.chars() {
        if c == '-' || c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower_or_digit = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn join_case(words: &[String], case: Case) -> String {
    match case {
        Case::Snake => words
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_"),
        Case::UpperSnake => words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
        Case::Pascal => words
            .iter()
            .map(|w| {
                let mut cs = w.chars();
                match cs.next() {
                    Some(first) => {
                        first.to_ascii_uppercase().to_string() + &cs.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect(),
    }
}
