use log::debug;

use crate::checker::LinkCheck;
use crate::config::Config;
use crate::core::constants::exit_codes;
use crate::core::error::Result;
use crate::core::types::{LinkStatus, MarkdownFile};
use crate::reporting::console::Report;
use crate::validation::{FileReport, check_file};

/// Pass/fail determination for one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: MarkdownFile,
    pub result: Result<FileReport>,
}

impl FileOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-file outcomes of a run, in the order the files were checked.
#[derive(Debug, Default)]
pub struct RunOutcome {
    outcomes: Vec<FileOutcome>,
}

impl RunOutcome {
    pub fn record(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    /// True when at least one file failed.
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|outcome| !outcome.passed())
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &MarkdownFile> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed())
            .map(|outcome| &outcome.file)
    }

    pub fn files_checked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn exit_code(&self) -> i32 {
        if self.has_errors() {
            exit_codes::FAILURE
        } else {
            exit_codes::SUCCESS
        }
    }
}

/// Check `files` one after another.
///
/// A failing file is recorded and never stops the loop, so every file gets
/// exactly one outcome.
pub async fn run_checks(
    files: &[MarkdownFile],
    config: &Config,
    checker: &dyn LinkCheck,
    reporter: &mut dyn Report,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();

    for file in files {
        reporter.file_started(file);
        let result = check_file(checker, config, file, reporter).await;
        match result {
            Ok(ref report) => debug!(
                "{file}: {} alive, {} ignored",
                report.count(LinkStatus::Alive),
                report.count(LinkStatus::Ignored)
            ),
            Err(ref err) => debug!("{file} failed: {err}"),
        }
        outcome.record(FileOutcome {
            file: file.clone(),
            result,
        });
    }

    debug!(
        "Checked {} file(s), {} failed",
        outcome.files_checked(),
        outcome.failed_files().count()
    );
    outcome
}
