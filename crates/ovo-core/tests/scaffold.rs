//! End-to-end scaffolding tests: load → resolve → substitute → materialize.

use std::fs;
use std::path::Path;

use ovo_core::error::OvoError;
use ovo_core::loader::{TemplateEntry, TemplateSet};
use ovo_core::materialize::RunStatus;
use ovo_core::pipeline::{scaffold, ScaffoldOptions};
use ovo_core::templates::TemplateKind;
use ovo_core::vars::ProjectName;

/// Collect every file under `root` as (relative path, content bytes).
fn walk_output(root: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    for item in walkdir::WalkDir::new(root).sort_by_file_name() {
        let item = item.unwrap();
        if item.file_type().is_file() {
            let rel = item
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            files.push((rel, fs::read(item.path()).unwrap()));
        }
    }
    files
}

#[test]
fn builtin_c_project_materializes_without_markers() {
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("widget").unwrap();
    let set = TemplateKind::CProject.template_set();

    let result = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();
    assert_eq!(result.status, RunStatus::Success);

    let files = walk_output(dest.path());
    assert_eq!(files.len(), set.len());
    for (path, content) in &files {
        assert!(!path.contains("{{"), "marker left in path {path}");
        assert!(
            !content.windows(2).any(|w| w == b"{{"),
            "marker left in {path}"
        );
    }

    let main_c = fs::read_to_string(dest.path().join("src/main.c")).unwrap();
    assert!(main_c.contains("#define APP_NAME \"widget\""));
}

#[test]
fn cpp_lib_paths_and_guards_derive_from_name() {
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("MyApp").unwrap();
    let set = TemplateKind::CppLib.template_set();

    let result = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();
    assert_eq!(result.status, RunStatus::Success);

    let header = dest.path().join("include/my_app.hpp");
    let source = dest.path().join("src/my_app.cpp");
    assert!(header.exists(), "token-bearing header path not derived");
    assert!(source.exists(), "token-bearing source path not derived");

    let header_text = fs::read_to_string(&header).unwrap();
    assert!(header_text.contains("#ifndef MY_APP_HPP"));
    assert!(header_text.contains("namespace my_app {"));
    assert!(fs::read_to_string(&source)
        .unwrap()
        .contains("#include \"my_app.hpp\""));
}

#[test]
fn scaffold_from_disk_template_directory() {
    let template_root = tempfile::tempdir().unwrap();
    fs::create_dir_all(template_root.path().join("src")).unwrap();
    fs::write(
        template_root.path().join("src/{{PROJECT_NAME_SNAKE}}.c"),
        "/* {{PROJECT_NAME}} */\n",
    )
    .unwrap();
    fs::write(
        template_root.path().join("{{PROJECT_NAME_SNAKE}}.h"),
        "#ifndef {{PROJECT_NAME_UPPER}}_H\n#define {{PROJECT_NAME_UPPER}}_H\n#endif\n",
    )
    .unwrap();

    let set = TemplateSet::from_dir(template_root.path()).unwrap();
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("MyApp").unwrap();
    let result = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();

    assert_eq!(result.status, RunStatus::Success);
    assert!(dest.path().join("my_app.h").exists());
    assert!(dest.path().join("src/my_app.c").exists());
    assert!(fs::read_to_string(dest.path().join("src/my_app.c"))
        .unwrap()
        .contains("/* MyApp */"));
}

#[test]
fn unresolved_token_aborts_with_zero_files_written() {
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("widget").unwrap();
    let set = TemplateSet::from_entries(vec![
        TemplateEntry::text("ok.txt", "{{PROJECT_NAME}}"),
        TemplateEntry::text("zz_broken.txt", "value: {{UNDEFINED_KEY}}"),
    ]);

    let err = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap_err();
    match err {
        OvoError::UnresolvedToken { key, path } => {
            assert_eq!(key, "UNDEFINED_KEY");
            assert_eq!(path, "zz_broken.txt");
        }
        other => panic!("expected UnresolvedToken, got {other:?}"),
    }

    // Substitution runs before any write: nothing on disk, and in particular
    // no file containing the literal token text.
    assert!(walk_output(dest.path()).is_empty());
}

#[test]
fn malformed_marker_never_materializes_verbatim() {
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("widget").unwrap();
    let set = TemplateSet::from_entries(vec![TemplateEntry::text(
        "a.txt",
        "name: {{PROJECT-NAME}}\n",
    )]);

    let err = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap_err();
    assert!(matches!(err, OvoError::UnresolvedToken { .. }));
    assert!(walk_output(dest.path()).is_empty());
}

#[test]
fn invalid_name_rejected_before_any_template_read() {
    let err = ProjectName::new("1abc").unwrap_err();
    assert!(matches!(err, OvoError::InvalidName { .. }));
}

#[test]
fn write_failure_midway_reports_partial_result() {
    let dest = tempfile::tempdir().unwrap();
    // Entry 3 of 4 (sorted order) collides with a pre-existing file.
    fs::write(dest.path().join("c.txt"), "occupied").unwrap();

    let name = ProjectName::new("widget").unwrap();
    let set = TemplateSet::from_entries(vec![
        TemplateEntry::text("a.txt", "{{PROJECT_NAME}}"),
        TemplateEntry::text("b.txt", "b"),
        TemplateEntry::text("c.txt", "c"),
        TemplateEntry::text("d.txt", "d"),
    ]);

    let result = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();
    assert_eq!(result.status, RunStatus::PartialFailure);
    assert_eq!(result.written(), 2);
    assert_eq!(result.failed(), 1);

    // Committed files are readable with correct, fully substituted content.
    assert_eq!(
        fs::read_to_string(dest.path().join("a.txt")).unwrap(),
        "widget"
    );
    assert_eq!(fs::read_to_string(dest.path().join("b.txt")).unwrap(), "b");
    assert!(!dest.path().join("d.txt").exists());
}

#[test]
fn overwrite_option_replaces_existing_output() {
    let dest = tempfile::tempdir().unwrap();
    let name = ProjectName::new("widget").unwrap();
    let set = TemplateSet::from_entries(vec![TemplateEntry::text("a.txt", "{{PROJECT_NAME}}")]);

    let first = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();
    assert_eq!(first.status, RunStatus::Success);

    let rerun = scaffold(&set, &name, dest.path(), &ScaffoldOptions::default()).unwrap();
    assert_eq!(rerun.status, RunStatus::HardFailure);

    let forced = scaffold(
        &set,
        &name,
        dest.path(),
        &ScaffoldOptions {
            overwrite: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(forced.status, RunStatus::Success);
}
