//! Legacy `.doc` to `.docx` conversion through external converters.

mod exec;
mod pandoc;
mod soffice;
mod unoconv;

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::time::Duration;

use thiserror::Error;

use crate::error::Error;
use exec::ExecError;
use pandoc::Pandoc;
use soffice::Soffice;
use unoconv::Unoconv;

/// Why a single converter did not produce the expected file.
///
/// Attempt failures are logged and the chain moves on to the next converter.
#[derive(Error, Debug)]
pub(crate) enum AttemptError {
    #[error("not installed")]
    NotInstalled,

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("exited with {status}: {detail}")]
    Failed { status: ExitStatus, detail: String },

    #[error("reported success but left no file at {0}")]
    OutputMissing(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExecError> for AttemptError {
    fn from(err: ExecError) -> Self {
        match err {
            ExecError::NotFound => AttemptError::NotInstalled,
            ExecError::TimedOut(timeout) => AttemptError::TimedOut(timeout),
            ExecError::Io(err) => AttemptError::Io(err),
        }
    }
}

/// One external converter in the fallback chain.
pub(crate) trait Converter {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Tries to convert `input`, leaving the result at `expected`.
    fn attempt(&self, input: &Path, expected: &Path) -> Result<(), AttemptError>;
}

/// Converts a legacy `.doc` file to `.docx`, saving the result next to the
/// input as `<stem>_converted.docx`.
///
/// Converters are tried in fixed order: LibreOffice headless, then pandoc,
/// then unoconv. The first one to leave the expected file wins. When every
/// attempt fails the returned error names the input; the per-converter
/// reasons are in the log.
pub fn doc_to_docx<P: AsRef<Path>>(input: P) -> crate::Result<PathBuf> {
    let soffice = Soffice::new();
    let pandoc = Pandoc::new();
    let unoconv = Unoconv::new();
    convert_with(input.as_ref(), &[&soffice, &pandoc, &unoconv])
}

fn convert_with(input: &Path, converters: &[&dyn Converter]) -> crate::Result<PathBuf> {
    if !is_legacy_doc(input) {
        return Err(Error::NotLegacyFormat(input.display().to_string()));
    }
    let expected = converted_output_path(input);

    for converter in converters {
        log::debug!("trying {} on {}", converter.name(), input.display());
        match converter.attempt(input, &expected) {
            Ok(()) => {
                log::info!(
                    "converted {} -> {} ({})",
                    input.display(),
                    expected.display(),
                    converter.name()
                );
                return Ok(expected);
            }
            Err(err) => log::warn!("{} attempt failed: {}", converter.name(), err),
        }
    }
    Err(Error::ConversionFailed(input.display().to_string()))
}

/// True when the path carries the legacy `.doc` extension, in any case.
pub fn is_legacy_doc(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("doc"))
}

/// Derives the converter target: `scan.doc` becomes `scan_converted.docx`
/// next to the input.
fn converted_output_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push("_converted.docx");
    input.with_file_name(name)
}

/// First part of a process's stderr, for log lines.
pub(crate) fn stderr_snippet(output: &Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr);
    text.trim().chars().take(200).collect()
}
