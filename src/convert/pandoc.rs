//! Pandoc converter.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::exec::run_with_timeout;
use super::{stderr_snippet, AttemptError, Converter};

const CONVERT_TIMEOUT: Duration = Duration::from_secs(30);

/// Converts by handing the file to `pandoc` with explicit formats.
pub(crate) struct Pandoc {
    program: PathBuf,
}

impl Pandoc {
    pub(crate) fn new() -> Self {
        Self {
            program: PathBuf::from("pandoc"),
        }
    }

    #[cfg(test)]
    fn with_program(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Converter for Pandoc {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn attempt(&self, input: &Path, expected: &Path) -> Result<(), AttemptError> {
        let mut command = Command::new(&self.program);
        command
            .arg(input)
            .arg("-o")
            .arg(expected)
            .arg("--from=doc")
            .arg("--to=docx");

        let output = run_with_timeout(command, CONVERT_TIMEOUT)?;
        if !output.status.success() {
            return Err(AttemptError::Failed {
                status: output.status,
                detail: stderr_snippet(&output),
            });
        }
        if !expected.exists() {
            return Err(AttemptError::OutputMissing(expected.to_path_buf()));
        }
        Ok(())
    }
}
