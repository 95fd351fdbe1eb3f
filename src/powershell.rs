//! Bounded, hidden-window PowerShell invocation.
//!
//! Both the PowerShell fact source and adapter control funnel through this
//! module: one blocking child process per call, no console window, stdout
//! and stderr drained on reader threads, and a hard timeout after which the
//! child is killed. Commands are fixed strings; anything variable travels
//! out-of-band through the child's environment, never through command text.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;

/// `CREATE_NO_WINDOW` process creation flag.
/// Value from the Windows SDK; keeps the child from flashing a console.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Interval between child exit polls while waiting out the timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Error type for PowerShell invocations.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The child process could not be launched.
    #[error("Failed to launch powershell: {0}")]
    Spawn(#[source] std::io::Error),

    /// Waiting on or killing the child failed.
    #[error("I/O error while waiting for powershell: {0}")]
    Wait(#[source] std::io::Error),

    /// The child exited with a failure status.
    #[error("powershell exited with {status}: {detail}")]
    Failed {
        /// Exit status description.
        status: String,
        /// Captured stderr, trimmed.
        detail: String,
    },

    /// The child did not exit within the configured timeout.
    #[error("powershell did not finish within {seconds}s")]
    Timeout {
        /// Configured timeout in seconds.
        seconds: u64,
    },
}

/// A PowerShell invoker with a fixed per-call timeout.
#[derive(Debug, Clone)]
pub struct PowerShell {
    timeout: Duration,
}

impl PowerShell {
    /// Creates an invoker that bounds each call by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the configured per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs a fixed command string and returns its stdout.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] if the child cannot be launched, exits with
    /// a failure status, or does not finish within the timeout.
    pub fn run(&self, command: &str) -> Result<String, InvokeError> {
        self.run_with_env(command, &[])
    }

    /// Runs a fixed command string with extra environment variables set for
    /// the child, and returns its stdout.
    ///
    /// Environment variables are the parameter channel: the command string
    /// itself never embeds caller-supplied text.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] if the child cannot be launched, exits with
    /// a failure status, or does not finish within the timeout.
    #[cfg(not(tarpaulin_include))]
    pub fn run_with_env(
        &self,
        command: &str,
        env: &[(&str, &str)],
    ) -> Result<String, InvokeError> {
        let mut invocation = Command::new("powershell");
        invocation
            .args(["-NoProfile", "-NonInteractive", "-Command", command])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in env {
            invocation.env(key, value);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            invocation.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = invocation.spawn().map_err(InvokeError::Spawn)?;
        let stdout = spawn_drain(child.stdout.take());
        let stderr = spawn_drain(child.stderr.take());

        let status = self.wait_with_timeout(&mut child)?;

        let stdout = String::from_utf8_lossy(&stdout.join().unwrap_or_default()).into_owned();
        let stderr = String::from_utf8_lossy(&stderr.join().unwrap_or_default()).into_owned();

        if status.success() {
            Ok(stdout)
        } else {
            Err(InvokeError::Failed {
                status: status.to_string(),
                detail: stderr.trim().to_string(),
            })
        }
    }

    /// Polls the child until it exits or the timeout elapses; on timeout the
    /// child is killed and reaped.
    #[cfg(not(tarpaulin_include))]
    fn wait_with_timeout(
        &self,
        child: &mut Child,
    ) -> Result<std::process::ExitStatus, InvokeError> {
        let deadline = Instant::now() + self.timeout;

        loop {
            if let Some(status) = child.try_wait().map_err(InvokeError::Wait)? {
                return Ok(status);
            }

            if Instant::now() >= deadline {
                // Best effort: the child may have exited between the poll
                // and the kill.
                let _ = child.kill();
                let _ = child.wait();
                return Err(InvokeError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }

            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Drains a child pipe on a background thread so the child can never block
/// on a full pipe buffer while we wait for it to exit.
fn spawn_drain<R>(pipe: Option<R>) -> std::thread::JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        buffer
    })
}
