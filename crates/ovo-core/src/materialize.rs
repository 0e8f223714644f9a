//! Writing resolved entries to the destination directory.
//!
//! Each entry is staged to a temporary file in its target directory and
//! renamed into place, so no observer ever sees a half-written file at its
//! final path. The temporary file is cleaned up on every exit path by
//! [`tempfile::NamedTempFile`]'s drop guard.
//!
//! The run halts on the first entry failure and reports everything written
//! up to that point. Already-written files are not rolled back; partial
//! output is acceptable but must be reported as such, never as success.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{OvoError, Result};
use crate::subst::ResolvedEntry;

/// Outcome of a single entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum EntryStatus {
    Written,
    /// Not attempted: the run was cancelled or halted before this entry.
    Skipped,
    Failed(String),
}

/// Per-entry record in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    pub path: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Aggregate status of a materialization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Every entry was written.
    Success,
    /// The run halted with some entries unwritten: a write failed after at
    /// least one entry was committed, or cancellation was requested.
    /// Committed files are on disk; the outcomes list says which.
    PartialFailure,
    /// A write failed before anything was committed.
    HardFailure,
}

/// The sole output artifact of a run: per-entry outcomes plus the aggregate
/// status the caller maps to an exit code.
#[derive(Debug, Clone, Serialize)]
pub struct MaterializationResult {
    pub outcomes: Vec<EntryOutcome>,
    pub status: RunStatus,
}

impl MaterializationResult {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, EntryStatus::Written))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, EntryStatus::Failed(_)))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}

/// Writes resolved entries under a destination root.
pub struct Materializer {
    dest: PathBuf,
    overwrite: bool,
    cancel: Option<Arc<AtomicBool>>,
}

impl Materializer {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            overwrite: false,
            cancel: None,
        }
    }

    /// Allow replacing files that already exist at final paths.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Cooperative cancellation. Checked at entry boundaries only; an
    /// in-progress file write is never interrupted.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Write the entries in order, halting at the first failure or at the
    /// first entry boundary after cancellation is requested.
    ///
    /// The error channel is reserved for setup problems; per-entry failures
    /// are reported through the result so the caller always learns which
    /// files were committed.
    pub fn run(&self, entries: &[ResolvedEntry]) -> Result<MaterializationResult> {
        let mut outcomes: Vec<EntryOutcome> = Vec::with_capacity(entries.len());
        let mut halted = false;
        let mut cancelled = false;

        for entry in entries {
            if !halted && !cancelled && self.cancelled() {
                cancelled = true;
            }
            if halted || cancelled {
                outcomes.push(EntryOutcome {
                    path: entry.path.clone(),
                    status: EntryStatus::Skipped,
                });
                continue;
            }
            match self.write_entry(entry) {
                Ok(()) => {
                    tracing::debug!(path = %entry.path, "wrote entry");
                    outcomes.push(EntryOutcome {
                        path: entry.path.clone(),
                        status: EntryStatus::Written,
                    });
                }
                Err(err) => {
                    // Alternate formatting includes the io source, so the
                    // report carries both the destination path and the reason.
                    let reason = format!("{:#}", anyhow::Error::from(err));
                    tracing::warn!(path = %entry.path, %reason, "entry failed, halting run");
                    outcomes.push(EntryOutcome {
                        path: entry.path.clone(),
                        status: EntryStatus::Failed(reason),
                    });
                    halted = true;
                }
            }
        }

        let written = outcomes
            .iter()
            .filter(|o| matches!(o.status, EntryStatus::Written))
            .count();
        // Cancellation is not a failure: whatever was committed is intact,
        // so the run is partial even when it stopped before the first write.
        let status = if written == entries.len() {
            RunStatus::Success
        } else if written > 0 || cancelled {
            RunStatus::PartialFailure
        } else {
            RunStatus::HardFailure
        };

        Ok(MaterializationResult { outcomes, status })
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }

    /// Stage-then-rename commit of one entry.
    fn write_entry(&self, entry: &ResolvedEntry) -> Result<()> {
        let final_path = self.dest.join(&entry.path);
        let result = self.commit(entry, &final_path);
        result.map_err(|source| OvoError::Write {
            path: final_path,
            source,
        })
    }

    fn commit(&self, entry: &ResolvedEntry, final_path: &Path) -> std::io::Result<()> {
        let parent = final_path.parent().unwrap_or(&self.dest);
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        std::io::Write::write_all(&mut tmp, entry.content.as_bytes())?;
        set_mode(tmp.path(), entry.executable)?;

        if self.overwrite {
            tmp.persist(final_path)?;
        } else {
            // Atomic no-clobber rename: a concurrent writer cannot race past
            // a separate exists() check.
            tmp.persist_noclobber(final_path)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, executable: bool) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = if executable { 0o755 } else { 0o644 };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _executable: bool) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::EntryContent;

    fn entry(path: &str, content: &str) -> ResolvedEntry {
        ResolvedEntry {
            path: path.into(),
            content: EntryContent::Text(content.into()),
            executable: false,
        }
    }

    #[test]
    fn test_writes_all_entries_with_parent_dirs() {
        let dest = tempfile::tempdir().unwrap();
        let m = Materializer::new(dest.path());
        let result = m
            .run(&[entry("src/main.c", "int main;"), entry("README.md", "hi")])
            .unwrap();

        assert_eq!(result.status, RunStatus::Success);
        assert_eq!(result.written(), 2);
        assert_eq!(
            fs::read_to_string(dest.path().join("src/main.c")).unwrap(),
            "int main;"
        );
    }

    #[test]
    fn test_conflict_without_overwrite_fails() {
        let dest = tempfile::tempdir().unwrap();
        fs::write(dest.path().join("README.md"), "existing").unwrap();

        let m = Materializer::new(dest.path());
        let result = m.run(&[entry("README.md", "new")]).unwrap();
        assert_eq!(result.status, RunStatus::HardFailure);
        // The existing file is untouched.
        assert_eq!(
            fs::read_to_string(dest.path().join("README.md")).unwrap(),
            "existing"
        );
    }

    #[test]
    fn test_overwrite_replaces_existing() {
        let dest = tempfile::tempdir().unwrap();
        fs::write(dest.path().join("README.md"), "existing").unwrap();

        let m = Materializer::new(dest.path()).overwrite(true);
        let result = m.run(&[entry("README.md", "new")]).unwrap();
        assert_eq!(result.status, RunStatus::Success);
        assert_eq!(
            fs::read_to_string(dest.path().join("README.md")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_halts_on_first_failure_preserving_prior_writes() {
        let dest = tempfile::tempdir().unwrap();
        // Third of four entries collides with a pre-existing file.
        fs::write(dest.path().join("c.txt"), "occupied").unwrap();

        let m = Materializer::new(dest.path());
        let result = m
            .run(&[
                entry("a.txt", "a"),
                entry("b.txt", "b"),
                entry("c.txt", "c"),
                entry("d.txt", "d"),
            ])
            .unwrap();

        assert_eq!(result.status, RunStatus::PartialFailure);
        assert_eq!(result.written(), 2);
        assert_eq!(result.failed(), 1);
        assert!(matches!(result.outcomes[3].status, EntryStatus::Skipped));

        // The failure reason names the destination path.
        match &result.outcomes[2].status {
            EntryStatus::Failed(reason) => {
                assert!(reason.contains("failed to write"), "reason: {reason}");
                assert!(reason.contains("c.txt"), "reason: {reason}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }

        // The two committed files are readable with correct content.
        assert_eq!(fs::read_to_string(dest.path().join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dest.path().join("b.txt")).unwrap(), "b");
        assert!(!dest.path().join("d.txt").exists());
    }

    #[test]
    fn test_cancellation_takes_effect_at_entry_boundary() {
        let dest = tempfile::tempdir().unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let m = Materializer::new(dest.path()).with_cancel_flag(cancel);

        let result = m.run(&[entry("a.txt", "a"), entry("b.txt", "b")]).unwrap();
        // Cancellation yields a partial result, distinct from a write
        // failure, even when it lands before the first write.
        assert_eq!(result.status, RunStatus::PartialFailure);
        assert_eq!(result.written(), 0);
        assert_eq!(result.failed(), 0);
        assert!(result
            .outcomes
            .iter()
            .all(|o| matches!(o.status, EntryStatus::Skipped)));
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_bit_preserved() {
        use std::os::unix::fs::PermissionsExt;
        let dest = tempfile::tempdir().unwrap();
        let script = ResolvedEntry {
            path: "run.sh".into(),
            content: EntryContent::Text("#!/bin/sh\n".into()),
            executable: true,
        };
        Materializer::new(dest.path()).run(&[script]).unwrap();
        let mode = fs::metadata(dest.path().join("run.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);
    }
}
