use std::process::ExitCode;

/// How a keyshift run ended, as seen by scripts and CI.
///
/// A run that found nothing to migrate, or whose source path does not exist,
/// still ends in `Success`: the catalog and sources are consistent either way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Exit 0.
    Success,
    /// Exit 1: some source files were not migrated. The catalog holds the
    /// entries of every file that was.
    FilesFailed,
    /// Exit 2: nothing was merged (unreadable catalog, bad config). Clap
    /// usage errors exit with the same code.
    Aborted,
}

impl ExitStatus {
    /// Status for a completed run with `files_failed` unprocessed files.
    pub fn after_run(files_failed: usize) -> Self {
        if files_failed == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::FilesFailed
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(match status {
            ExitStatus::Success => 0,
            ExitStatus::FilesFailed => 1,
            ExitStatus::Aborted => 2,
        })
    }
}
