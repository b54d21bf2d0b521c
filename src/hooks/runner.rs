//! Hook execution engine
//!
//! Dispatches expanded hooks to the matching executor, applying the timeout,
//! retry-with-backoff, and error-suppression policy each hook carries.

use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use super::error::HookError;
use super::expand::expand_hook;
use super::model::{Context, ExecHook, Hook, WebhookHook};

/// Longest backoff sleep between attempts, in seconds.
const MAX_BACKOFF_SECS: u64 = 60;

/// Runs hooks registered for lifecycle events.
///
/// The event→hooks registry is fixed at construction and [`run`](Self::run)
/// is the only operational entry point. Hooks for one event fire one at a
/// time in registration order; a hook that exhausts its retries without
/// `ignore_errors` aborts the rest of that `run` call.
pub struct HookRunner {
    hooks: HashMap<String, Vec<Hook>>,
    http: reqwest::Client,
}

impl HookRunner {
    /// Create a runner over a validated event→hooks registry
    pub fn new(hooks: HashMap<String, Vec<Hook>>) -> Self {
        Self {
            hooks,
            http: reqwest::Client::new(),
        }
    }

    /// Create a runner with no hooks
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    /// Total number of registered hooks across all events
    pub fn hook_count(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Fire `event`, running each bound hook against `context`.
    ///
    /// Unknown events are a no-op. The call blocks until every hook has been
    /// attempted or one has failed past its retries with `ignore_errors`
    /// unset; that hook's final error is returned and later hooks do not run.
    pub async fn run(&self, event: &str, context: &Context) -> Result<(), HookError> {
        let Some(hooks) = self.hooks.get(event) else {
            debug!("No hooks registered for event '{}'", event);
            return Ok(());
        };

        debug!("Firing event '{}' to {} hook(s)", event, hooks.len());

        for hook in hooks {
            let expanded = expand_hook(hook, context);
            let result = match &expanded {
                Hook::Exec(exec) => self.run_exec(exec, context).await,
                Hook::Webhook(webhook) => self.run_webhook(webhook).await,
            };

            if let Err(err) = result {
                if expanded.ignore_errors() {
                    warn!("Hook {} failed (ignored): {}", expanded.describe(), err);
                    continue;
                }
                return Err(err);
            }
            debug!("Hook {} completed", expanded.describe());
        }

        Ok(())
    }

    /// Run an already-expanded exec hook through the retry loop.
    async fn run_exec(&self, hook: &ExecHook, context: &Context) -> Result<(), HookError> {
        // One environment snapshot per dispatch: the ambient process
        // environment overlaid with the hook's entries. Retries reuse it.
        let mut env: HashMap<String, String> = std::env::vars().collect();
        env.extend(hook.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        // The stdin payload carries the original, unexpanded context.
        let stdin_json = hook
            .pass_json_stdin
            .then(|| Value::Object(context.clone()).to_string());

        let mut attempt: u32 = 0;
        loop {
            match self.exec_attempt(hook, &env, stdin_json.as_deref()).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < hook.retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Hook `{}` failed ({}), retry {}/{} in {}s",
                        hook.cmd,
                        err,
                        attempt,
                        hook.retries,
                        delay.as_secs()
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One process invocation: spawn, optionally feed stdin, wait for exit.
    async fn exec_attempt(
        &self,
        hook: &ExecHook,
        env: &HashMap<String, String>,
        stdin_json: Option<&str>,
    ) -> Result<(), HookError> {
        let launch = |source| HookError::Launch {
            cmd: hook.cmd.clone(),
            source,
        };

        let mut command = Command::new(&hook.cmd);
        command
            .args(&hook.args)
            .env_clear()
            .envs(env)
            .stdin(if stdin_json.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        let wait = async {
            let mut child = command.spawn().map_err(&launch)?;
            if let Some(json) = stdin_json
                && let Some(mut stdin) = child.stdin.take()
            {
                stdin.write_all(json.as_bytes()).await.map_err(&launch)?;
                // stdin drops here, closing the pipe so the child sees EOF
            }
            child.wait().await.map_err(&launch)
        };

        let status = match hook.timeout_sec {
            Some(secs) => timeout(duration_secs(secs), wait).await.map_err(|_| {
                HookError::Timeout {
                    cmd: hook.cmd.clone(),
                    timeout_sec: secs,
                }
            })??,
            None => wait.await?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(HookError::NonZeroExit {
                cmd: hook.cmd.clone(),
                status,
            })
        }
    }

    /// Run an already-expanded webhook hook through the retry loop.
    async fn run_webhook(&self, hook: &WebhookHook) -> Result<(), HookError> {
        let mut attempt: u32 = 0;
        loop {
            match self.webhook_attempt(hook).await {
                Ok(()) => return Ok(()),
                Err(err) if attempt < hook.retries => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    warn!(
                        "Webhook {} failed ({}), retry {}/{} in {}s",
                        hook.url,
                        err,
                        attempt,
                        hook.retries,
                        delay.as_secs()
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One HTTP POST. Any response counts as delivered; only transport-level
    /// failures are errors.
    async fn webhook_attempt(&self, hook: &WebhookHook) -> Result<(), HookError> {
        let mut request = self.http.post(&hook.url);
        for (name, value) in &hook.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &hook.body_json {
            let has_content_type = hook
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                request = request.header(reqwest::header::CONTENT_TYPE, "application/json");
            }
            request = request.body(body.to_string());
        }
        if let Some(secs) = hook.timeout_sec {
            request = request.timeout(duration_secs(secs));
        }

        request
            .send()
            .await
            .map(|_| ())
            .map_err(|source| HookError::Transport {
                url: hook.url.clone(),
                source,
            })
    }
}

/// Exponential backoff before retry `attempt` (1-based): `2^attempt` seconds,
/// capped at [`MAX_BACKOFF_SECS`].
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2_u64.saturating_pow(attempt).min(MAX_BACKOFF_SECS))
}

/// Fractional-second timeout bound. Values `Hook::validate` would reject
/// (non-finite, non-positive) behave as unbounded.
fn duration_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
