//! LibreOffice headless converter.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use super::exec::run_with_timeout;
use super::{stderr_snippet, AttemptError, Converter};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const CONVERT_TIMEOUT: Duration = Duration::from_secs(45);

/// Locations probed for the LibreOffice binary, in order.
const CANDIDATES: &[&str] = &[
    "libreoffice",
    "/Applications/LibreOffice.app/Contents/MacOS/soffice",
    "/usr/bin/libreoffice",
    "/opt/libreoffice/program/soffice",
    "soffice",
];

/// Converts through a headless LibreOffice run.
pub(crate) struct Soffice {
    candidates: Vec<PathBuf>,
}

impl Soffice {
    pub(crate) fn new() -> Self {
        Self {
            candidates: CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }

    #[cfg(test)]
    fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Probes each candidate with `--version` until one responds.
    fn locate(&self) -> Option<&Path> {
        for candidate in &self.candidates {
            let mut command = Command::new(candidate);
            command.arg("--version");
            match run_with_timeout(command, PROBE_TIMEOUT) {
                Ok(output) if output.status.success() => {
                    log::debug!("found LibreOffice at {}", candidate.display());
                    return Some(candidate);
                }
                Ok(_) | Err(_) => continue,
            }
        }
        None
    }
}

impl Converter for Soffice {
    fn name(&self) -> &'static str {
        "libreoffice"
    }

    fn attempt(&self, input: &Path, expected: &Path) -> Result<(), AttemptError> {
        let program = match self.locate() {
            Some(program) => program,
            None => return Err(AttemptError::NotInstalled),
        };

        let outdir = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut command = Command::new(program);
        command
            .arg("--headless")
            .arg("--invisible")
            .arg("--nodefault")
            .arg("--nolockcheck")
            .arg("--convert-to")
            .arg("docx")
            .arg("--outdir")
            .arg(outdir)
            .arg(input);

        let output = run_with_timeout(command, CONVERT_TIMEOUT)?;
        if !output.status.success() {
            return Err(AttemptError::Failed {
                status: output.status,
                detail: stderr_snippet(&output),
            });
        }

        // LibreOffice names its output <stem>.docx next to the input.
        let auto = input.with_extension("docx");
        if !auto.exists() {
            return Err(AttemptError::OutputMissing(auto));
        }
        if auto != expected {
            fs::rename(&auto, expected)?;
        }
        Ok(())
    }
}
