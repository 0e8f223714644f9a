//! `ovo new` — materialize a project from a template.

use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use ovo_core::pipeline::{scaffold, ScaffoldOptions};
use ovo_core::project::{ProjectManifest, MANIFEST_FILE};
use ovo_core::templates::TemplateKind;
use ovo_core::vars::ProjectName;
use ovo_core::{OvoError, TemplateSet};

use crate::output;
use crate::TemplateChoice;

/// Create a new project.
///
/// Validates the name before anything is read from disk, loads the template
/// set (built-in or from a directory), substitutes, materializes, and writes
/// the `ovo.json` manifest. If neither `--template` nor `--from-dir` is
/// given, prompts interactively.
pub async fn run(
    name: &str,
    template: Option<TemplateChoice>,
    from_dir: Option<&Path>,
    dest: &Path,
    force: bool,
) -> Result<()> {
    output::banner(&format!("ovo new: {name}"));

    // Pre-flight: a bad name must fail before any template file is read.
    let project_name = ProjectName::new(name)?;

    let (set, template_label) = match from_dir {
        Some(dir) => {
            output::step(1, 3, &format!("Loading templates from {}", dir.display()));
            (TemplateSet::from_dir(dir)?, dir.display().to_string())
        }
        None => {
            let kind = match template {
                Some(choice) => choice.kind(),
                None => prompt_for_kind()?,
            };
            output::step(1, 3, &format!("Using built-in template '{kind}'"));
            (kind.template_set(), kind.as_str().to_string())
        }
    };

    let project_dir = dest.join(name);
    if project_dir.exists() && !force {
        return Err(OvoError::DestinationConflict(project_dir).into());
    }

    output::step(
        2,
        3,
        &format!("Materializing {} files into {}/", set.len(), name),
    );
    let options = ScaffoldOptions {
        overwrite: force,
        ..Default::default()
    };
    let result = scaffold(&set, &project_name, &project_dir, &options)?;
    output::report_outcomes(&result);

    if !result.is_success() {
        anyhow::bail!(
            "materialization incomplete: {} written, {} failed — partial output left in {}",
            result.written(),
            result.failed(),
            project_dir.display()
        );
    }

    output::step(3, 3, "Writing project manifest");
    let manifest = ProjectManifest::new(name, &template_label);
    manifest.save(&project_dir.join(MANIFEST_FILE))?;

    output::success(&format!("Project '{name}' created"));
    output::next_steps(name);

    Ok(())
}

/// Interactive template selection when none was specified.
fn prompt_for_kind() -> Result<TemplateKind> {
    let descriptions: Vec<String> = TemplateKind::ALL
        .iter()
        .map(|k| format!("{k} — {}", k.description()))
        .collect();

    let selection = Select::new()
        .with_prompt("Select a template")
        .items(&descriptions)
        .default(0)
        .interact()?;

    Ok(TemplateKind::ALL[selection])
}
