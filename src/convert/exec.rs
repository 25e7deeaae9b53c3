//! Bounded execution of external converter processes.

use std::io::Read;
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Why an invocation produced no usable [`Output`].
#[derive(Error, Debug)]
pub(crate) enum ExecError {
    /// The executable is not installed or not on PATH.
    #[error("executable not found")]
    NotFound,

    /// The process outlived its deadline and was killed.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs `command` to completion with a deadline.
///
/// Output pipes are drained on background threads so a chatty process cannot
/// block on a full pipe. On expiry the process is killed and reaped.
pub(crate) fn run_with_timeout(
    mut command: Command,
    timeout: Duration,
) -> Result<Output, ExecError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(ExecError::NotFound),
        Err(err) => return Err(ExecError::Io(err)),
    };
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let started = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if started.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait(); // reap
                    return Err(ExecError::TimedOut(timeout));
                }
                thread::sleep(Duration::from_millis(100));
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExecError::Io(err));
            }
        }
    };

    Ok(Output {
        status,
        stdout: stdout.join().unwrap_or_default(),
        stderr: stderr.join().unwrap_or_default(),
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}
