//! Typed failure classes for hook dispatch

use std::process::ExitStatus;

use thiserror::Error;

/// Final error surfaced by a hook once its retries are exhausted.
///
/// Each attempt's error drives the retry decision locally; only the last
/// attempt's error ever reaches the caller, and only when the hook does not
/// set `ignore_errors`. HTTP response statuses are never classified as
/// errors: a webhook that reaches the server counts as delivered regardless
/// of status code.
#[derive(Debug, Error)]
pub enum HookError {
    /// The child process could not be started, or could not be fed its stdin
    #[error("failed to launch `{cmd}`: {source}")]
    Launch {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    /// The child ran past its wall-clock bound and was killed
    #[error("`{cmd}` timed out after {timeout_sec}s")]
    Timeout { cmd: String, timeout_sec: f64 },

    /// The child ran to completion but exited with a failure status
    #[error("`{cmd}` failed with {status}")]
    NonZeroExit { cmd: String, status: ExitStatus },

    /// The webhook request failed at the transport level
    /// (connection refused, DNS, timeout)
    #[error("webhook POST to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
