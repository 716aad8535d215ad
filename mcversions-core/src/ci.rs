//! CI summary sinks
//!
//! After a run that added versions, the comma-joined list is published to
//! GitHub Actions: a line in the step summary and the `ADDED_VERSIONS`
//! output variable. Both are best effort.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ENV_STEP_SUMMARY: &str = "GITHUB_STEP_SUMMARY";
pub const ENV_OUTPUT: &str = "GITHUB_OUTPUT";

/// Output variable carrying the added identifiers
pub const OUTPUT_KEY: &str = "ADDED_VERSIONS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiSinks {
    /// Markdown step summary file
    pub step_summary: Option<PathBuf>,
    /// `key=value` output file
    pub output: Option<PathBuf>,
}

impl CiSinks {
    /// Sinks advertised by the GitHub Actions environment, if any
    pub fn from_env() -> Self {
        let path = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };

        Self {
            step_summary: path(ENV_STEP_SUMMARY),
            output: path(ENV_OUTPUT),
        }
    }

    /// Publish the added identifiers
    ///
    /// Without an output file the legacy `::set-output` workflow command is
    /// printed to stdout instead. Write failures are logged and swallowed.
    pub fn publish(&self, added: &[String]) {
        self.publish_to(added, &mut std::io::stdout().lock());
    }

    /// [`publish`](Self::publish) with the workflow command written to `stdout`
    pub fn publish_to(&self, added: &[String], stdout: &mut impl Write) {
        let joined = added.join(",");

        if let Some(path) = &self.step_summary {
            if let Err(e) = append_line(path, &format!("Added Versions: {joined}")) {
                tracing::warn!("Failed to write step summary {}: {}", path.display(), e);
            }
        }

        match &self.output {
            Some(path) => {
                if let Err(e) = append_line(path, &format!("{OUTPUT_KEY}={joined}")) {
                    tracing::warn!("Failed to write CI output {}: {}", path.display(), e);
                }
            }
            None => {
                if let Err(e) = writeln!(stdout, "::set-output name={OUTPUT_KEY}::{joined}") {
                    tracing::warn!("Failed to print CI output: {}", e);
                }
            }
        }
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
