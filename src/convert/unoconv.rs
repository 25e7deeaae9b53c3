//! unoconv converter (LibreOffice UNO bridge).

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::exec::run_with_timeout;
use super::{stderr_snippet, AttemptError, Converter};

const CONVERT_TIMEOUT: Duration = Duration::from_secs(30);

/// Converts through `unoconv`, the last resort in the chain.
pub(crate) struct Unoconv {
    program: PathBuf,
}

impl Unoconv {
    pub(crate) fn new() -> Self {
        Self {
            program: PathBuf::from("unoconv"),
        }
    }

    #[cfg(test)]
    fn with_program(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Converter for Unoconv {
    fn name(&self) -> &'static str {
        "unoconv"
    }

    fn attempt(&self, input: &Path, expected: &Path) -> Result<(), AttemptError> {
        let mut command = Command::new(&self.program);
        command
            .arg("-f")
            .arg("docx")
            .arg("-o")
            .arg(expected)
            .arg(input);

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
