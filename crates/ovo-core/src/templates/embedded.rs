//! Compile-time embedded built-in templates.
//!
//! Each constant loads a template file from the repository's `templates/`
//! tree via [`include_str!`]. The paths are relative to this source file
//! (`crates/ovo-core/src/templates/embedded.rs`).
//!
//! ## Adding a new template
//!
//! 1. Place the template files under the appropriate `templates/` subdirectory
//! 2. Add a `pub const` here with `include_str!("../../../../templates/<path>")`
//! 3. Register the entries in [`super::TemplateKind::template_set`]
//! 4. Run `cargo build` — if the path is wrong, compilation will fail
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the `include_str!`
//! path here. File names under `templates/` may themselves carry `{{...}}`
//! tokens; the entry paths registered in [`super::TemplateKind::template_set`]
//! must match them exactly.

// -------------------------------------------------------
// C project (executable)
// -------------------------------------------------------

pub const C_PROJECT_MAIN: &str = include_str!("../../../../templates/c_project/src/main.c");
pub const C_PROJECT_README: &str = include_str!("../../../../templates/c_project/README.md");

// -------------------------------------------------------
// C++ executable
// -------------------------------------------------------

pub const CPP_EXE_MAIN: &str = include_str!("../../../../templates/cpp_exe/src/main.cpp");
pub const CPP_EXE_README: &str = include_str!("../../../../templates/cpp_exe/README.md");

// -------------------------------------------------------
// C++ library
// -------------------------------------------------------

pub const CPP_LIB_HEADER: &str =
    include_str!("../../../../templates/cpp_lib/include/{{PROJECT_NAME_SNAKE}}.hpp");
pub const CPP_LIB_SOURCE: &str =
    include_str!("../../../../templates/cpp_lib/src/{{PROJECT_NAME_SNAKE}}.cpp");
pub const CPP_LIB_README: &str = include_str!("../../../../templates/cpp_lib/README.md");
