//! Placeholder substitution over entry paths and contents.
//!
//! Tokens are literal `{{KEY}}` markers. Every brace-delimited span in a
//! text entry is treated as a token: a key absent from the
//! [`VariableTable`](crate::vars::VariableTable), including a malformed one
//! like `{{PROJECT-NAME}}` or `{{ KEY }}`, is a hard error carrying the
//! offending key and the entry path — the run must never emit a file with a
//! visible unresolved marker.
//!
//! Substitution is a single left-to-right pass over the template text: a
//! substituted value is never re-scanned for further tokens, so a value that
//! happens to contain `{{...}}` text cannot trigger recursive expansion.
//!
//! Binary entries pass through untouched, path included. Binary assets are
//! assumed not to carry token-bearing file names; revisit if a template ever
//! needs one.

use regex::Regex;

use crate::error::{OvoError, Result};
use crate::loader::{EntryContent, TemplateEntry};
use crate::vars::VariableTable;

/// A template entry after substitution: final relative path, final content,
/// no `{{...}}` marker remaining.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub path: String,
    pub content: EntryContent,
    pub executable: bool,
}

/// Token matcher and replacer. Compile the regex once, reuse per entry.
pub struct SubstitutionEngine {
    token: Regex,
}

impl SubstitutionEngine {
    pub fn new() -> Self {
        // Matches any brace-delimited span, whatever the key looks like, so
        // that malformed or misnamed markers surface as unresolved errors
        // instead of passing through to the output.
        let token = Regex::new(r"\{\{([^{}]*)\}\}").expect("token pattern is valid");
        Self { token }
    }

    /// Apply the variable table to one entry's path and content.
    pub fn resolve(&self, entry: &TemplateEntry, vars: &VariableTable) -> Result<ResolvedEntry> {
        match &entry.content {
            EntryContent::Binary(bytes) => Ok(ResolvedEntry {
                path: entry.path.clone(),
                content: EntryContent::Binary(bytes.clone()),
                executable: entry.executable,
            }),
            EntryContent::Text(text) => Ok(ResolvedEntry {
                path: self.apply(&entry.path, vars, &entry.path)?,
                content: EntryContent::Text(self.apply(text, vars, &entry.path)?),
                executable: entry.executable,
            }),
        }
    }

    /// Replace every token in `input`, erroring on the first unknown key.
    fn apply(&self, input: &str, vars: &VariableTable, entry_path: &str) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        let mut last = 0;
        for m in self.token.find_iter(input) {
            let key = &input[m.start() + 2..m.end() - 2];
            let value = vars.get(key).ok_or_else(|| OvoError::UnresolvedToken {
                key: key.to_string(),
                path: entry_path.to_string(),
            })?;
            out.push_str(&input[last..m.start()]);
            out.push_str(value);
            last = m.end();
        }
        out.push_str(&input[last..]);
        Ok(out)
    }
}

impl Default for SubstitutionEngine {
    fn default() -> Self {
        Self::new()
    }
}
