//! Built-in project templates.
//!
//! Templates are embedded into the binary at compile-time via [`include_str!`]
//! in the [`embedded`] module and exposed as [`TemplateKind`]s that build a
//! ready-to-substitute [`TemplateSet`].
//!
//! ## Template variables
//!
//! Templates use literal `{{UPPER_SNAKE_KEY}}` tokens, in file contents and
//! in file names. The shipped templates reference:
//! - `{{PROJECT_NAME}}` — the canonical name as given
//! - `{{PROJECT_NAME_UPPER}}` — header-guard-safe, e.g. `MY_APP`
//! - `{{PROJECT_NAME_SNAKE}}` — identifier/namespace-safe, e.g. `my_app`

pub mod embedded;

use crate::error::{OvoError, Result};
use crate::loader::{TemplateEntry, TemplateSet};

/// The built-in template kinds shipped with ovo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// C17 executable project.
    CProject,
    /// C++23 executable project.
    CppExe,
    /// C++ library with a token-named header/source pair.
    CppLib,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [Self::CProject, Self::CppExe, Self::CppLib];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CProject => "c",
            Self::CppExe => "cpp-exe",
            Self::CppLib => "cpp-lib",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "c" => Ok(Self::CProject),
            "cpp-exe" => Ok(Self::CppExe),
            "cpp-lib" => Ok(Self::CppLib),
            other => Err(OvoError::UnknownTemplate(other.to_string())),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CProject => "C17 executable — argument parsing and squares demo",
            Self::CppExe => "C++23 executable — std::expected, ranges, std::print",
            Self::CppLib => "C++ library — versioned API with export macros",
        }
    }

    /// Build the template set for this kind from the embedded files.
    pub fn template_set(&self) -> TemplateSet {
        let entries = match self {
            Self::CProject => vec![
                TemplateEntry::text("src/main.c", embedded::C_PROJECT_MAIN),
                TemplateEntry::text("README.md", embedded::C_PROJECT_README),
            ],
            Self::CppExe => vec![
                TemplateEntry::text("src/main.cpp", embedded::CPP_EXE_MAIN),
                TemplateEntry::text("README.md", embedded::CPP_EXE_README),
            ],
            Self::CppLib => vec![
                TemplateEntry::text(
                    "include/{{PROJECT_NAME_SNAKE}}.hpp",
                    embedded::CPP_LIB_HEADER,
                ),
                TemplateEntry::text("src/{{PROJECT_NAME_SNAKE}}.cpp", embedded::CPP_LIB_SOURCE),
                TemplateEntry::text("README.md", embedded::CPP_LIB_README),
            ],
        };
        TemplateSet::from_entries(entries)
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips() {
        for kind in TemplateKind::ALL {
            assert_eq!(TemplateKind::from_name(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_from_name_unknown() {
        assert!(matches!(
            TemplateKind::from_name("fortran"),
            Err(OvoError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_sets_are_nonempty_and_sorted() {
        for kind in TemplateKind::ALL {
            let set = kind.template_set();
            assert!(!set.is_empty());
            let paths: Vec<&str> = set.entries().iter().map(|e| e.path.as_str()).collect();
            let mut sorted = paths.clone();
            sorted.sort();
            assert_eq!(paths, sorted);
        }
    }
}
