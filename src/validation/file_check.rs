use crate::checker::{LinkCheck, LinkCheckOptions};
use crate::config::Config;
use crate::core::error::{LinkCheckError, Result};
use crate::core::types::{LinkResult, LinkStatus, MarkdownFile};
use crate::reporting::console::Report;

/// Results for a file whose links are all valid.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file: MarkdownFile,
    pub results: Vec<LinkResult>,
}

impl FileReport {
    pub fn count(&self, status: LinkStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// Check every link in one file.
///
/// Produces exactly one terminal result: `Ok` when no link is dead,
/// `BrokenLinks` when some are, or the error that stopped the check.
pub async fn check_file(
    checker: &dyn LinkCheck,
    config: &Config,
    file: &MarkdownFile,
    reporter: &mut dyn Report,
) -> Result<FileReport> {
    let results = match invoke_checker(checker, config, file).await {
        Ok(results) => results,
        Err(err) => {
            reporter.check_errored(file, &err);
            return Err(err);
        }
    };

    let broken: Vec<&LinkResult> = results.iter().filter(|r| r.is_dead()).collect();
    if !broken.is_empty() {
        reporter.broken_links(file, &broken);
        return Err(LinkCheckError::BrokenLinks {
            file: file.display_name(),
            count: broken.len(),
        });
    }

    reporter.file_passed(file);
    Ok(FileReport {
        file: file.clone(),
        results,
    })
}

async fn invoke_checker(
    checker: &dyn LinkCheck,
    config: &Config,
    file: &MarkdownFile,
) -> Result<Vec<LinkResult>> {
    // Invalid UTF-8 is replaced rather than rejected
    let bytes = tokio::fs::read(file.path()).await?;
    let markdown = String::from_utf8_lossy(&bytes);
    let options = LinkCheckOptions::for_directory(file.dir(), config)?;
    checker.check_markdown(&markdown, &options).await
}
