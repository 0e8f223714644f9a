//! Core library for the ovo scaffolding tool.
//!
//! Turns a tree of template files carrying `{{PLACEHOLDER}}` tokens into a
//! ready-to-build project directory. The pipeline is: load a [`TemplateSet`]
//! (from disk or from the [`templates`] embedded into the binary), derive a
//! [`vars::VariableTable`] from one validated canonical project name, apply
//! the [`subst::SubstitutionEngine`] to every entry's path and content, and
//! commit the result with the [`materialize::Materializer`] using atomic
//! per-file stage-then-rename writes.
//!
//! The CLI frontend lives in the `ovo` binary crate; this crate has no
//! terminal or argument concerns.

pub mod error;
pub mod loader;
pub mod materialize;
pub mod pipeline;
pub mod project;
pub mod subst;
pub mod templates;
pub mod vars;

pub use error::{OvoError, Result};
pub use loader::{EntryContent, TemplateEntry, TemplateSet};
pub use materialize::{MaterializationResult, Materializer, RunStatus};
pub use pipeline::{scaffold, ScaffoldOptions};
pub use project::ProjectManifest;
pub use templates::TemplateKind;
pub use vars::{ProjectName, VariableTable};
