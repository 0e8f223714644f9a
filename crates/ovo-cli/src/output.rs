//! Terminal output for the ovo CLI: run banner, step lines, and the
//! per-entry materialization report. Colored via the [`console`] crate.

use console::style;

use ovo_core::materialize::{EntryStatus, MaterializationResult, RunStatus};
use ovo_core::templates::TemplateKind;

/// Bold cyan banner opening a command's output.
pub fn banner(text: &str) {
    println!("\n{}", style(text).bold().cyan());
}

/// Dimmed `[n/total]` step line.
pub fn step(n: usize, total: usize, text: &str) {
    println!("{} {text}", style(format!("[{n}/{total}]")).dim());
}

pub fn success(text: &str) {
    println!("{} {text}", style("[OK]").green().bold());
}

pub fn warn(text: &str) {
    println!("{} {text}", style("[WARN]").yellow().bold());
}

pub fn error(text: &str) {
    println!("{} {text}", style("[ERROR]").red().bold());
}

/// Spell out every per-entry outcome of a run that did not complete.
/// Partial output is always itemized, never summarized as success.
pub fn report_outcomes(result: &MaterializationResult) {
    if result.status == RunStatus::Success {
        return;
    }
    for outcome in &result.outcomes {
        match &outcome.status {
            EntryStatus::Written => success(&outcome.path),
            EntryStatus::Skipped => warn(&format!("{} (not attempted)", outcome.path)),
            EntryStatus::Failed(reason) => error(&format!("{}: {reason}", outcome.path)),
        }
    }
}

/// One line per built-in template for `ovo templates`.
pub fn template_row(kind: TemplateKind) {
    println!(
        "  {}  {}",
        style(format!("{:<8}", kind.as_str())).bold(),
        kind.description()
    );
}

/// Epilogue after a successful `ovo new`.
pub fn next_steps(name: &str) {
    println!();
    println!("  Next steps:");
    println!("    cd {name}");
    println!("    ovo build");
    println!("    ovo run");
    println!();
}
