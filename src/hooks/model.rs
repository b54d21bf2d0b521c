//! Hook definitions: the typed configuration for each side-effect action
//!
//! A hook is a static template. Placeholder expansion produces a resolved
//! copy per `run` call; the registered value itself is never mutated.

use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime data available for placeholder expansion and JSON-stdin delivery
/// when an event fires. String-keyed, caller-owned, read-only to the core.
pub type Context = serde_json::Map<String, Value>;

/// A configured side-effect action bound to a lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Hook {
    /// Spawn a child process
    Exec(ExecHook),
    /// Issue an HTTP POST
    Webhook(WebhookHook),
}

/// Child-process hook configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecHook {
    /// Executable or command token
    pub cmd: String,

    /// Additional command-line arguments, in order
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables, merged over the runner's environment
    /// snapshot (hook entries win on collision)
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Wall-clock bound in seconds; the child is killed on expiry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<f64>,

    /// Additional attempts after the first failure
    #[serde(default)]
    pub retries: u32,

    /// Serialize the event context to JSON and feed it to the child's stdin
    #[serde(default)]
    pub pass_json_stdin: bool,

    /// Swallow a final failure instead of propagating it
    #[serde(default)]
    pub ignore_errors: bool,
}

/// HTTP webhook hook configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookHook {
    /// POST target
    pub url: String,

    /// Request headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// JSON request body; `Content-Type: application/json` is added unless
    /// the headers already carry a Content-Type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_json: Option<Value>,

    /// Wall-clock bound in seconds for the whole request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<f64>,

    /// Additional attempts after the first transport failure
    #[serde(default)]
    pub retries: u32,

    /// Swallow a final failure instead of propagating it
    #[serde(default)]
    pub ignore_errors: bool,
}

impl Hook {
    /// Additional attempts after the first failure
    pub fn retries(&self) -> u32 {
        match self {
            Hook::Exec(hook) => hook.retries,
            Hook::Webhook(hook) => hook.retries,
        }
    }

    /// Whether a final failure is swallowed instead of propagated
    pub fn ignore_errors(&self) -> bool {
        match self {
            Hook::Exec(hook) => hook.ignore_errors,
            Hook::Webhook(hook) => hook.ignore_errors,
        }
    }

    /// Wall-clock bound in seconds, if any
    pub fn timeout_sec(&self) -> Option<f64> {
        match self {
            Hook::Exec(hook) => hook.timeout_sec,
            Hook::Webhook(hook) => hook.timeout_sec,
        }
    }

    /// One-line label for logs and listings
    pub fn describe(&self) -> String {
        match self {
            Hook::Exec(hook) => format!("exec `{}`", hook.cmd),
            Hook::Webhook(hook) => format!("webhook {}", hook.url),
        }
    }

    /// Check the invariants the type system cannot express
    pub fn validate(&self) -> Result<()> {
        match self {
            Hook::Exec(hook) => {
                if hook.cmd.is_empty() {
                    bail!("exec hook requires a non-empty cmd");
                }
                validate_timeout(hook.timeout_sec)
            }
            Hook::Webhook(hook) => {
                if hook.url.is_empty() {
                    bail!("webhook hook requires a non-empty url");
                }
                validate_timeout(hook.timeout_sec)
            }
        }
    }
}

fn validate_timeout(timeout_sec: Option<f64>) -> Result<()> {
    if let Some(secs) = timeout_sec
        && !(secs.is_finite() && secs > 0.0)
    {
        bail!("timeout_sec must be a positive number, got {}", secs);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_exec_hook() {
        let hook: Hook = serde_json::from_value(json!({
            "type": "exec",
            "cmd": "notify-send",
            "args": ["done"],
            "env": {"LANG": "C"},
            "timeout_sec": 10,
            "retries": 2,
            "pass_json_stdin": true,
            "ignore_errors": true
        }))
        .unwrap();

        let Hook::Exec(exec) = hook else {
            panic!("expected exec variant");
        };
        assert_eq!(exec.cmd, "notify-send");
        assert_eq!(exec.args, vec!["done"]);
        assert_eq!(exec.env.get("LANG").unwrap(), "C");
        assert_eq!(exec.timeout_sec, Some(10.0));
        assert_eq!(exec.retries, 2);
        assert!(exec.pass_json_stdin);
        assert!(exec.ignore_errors);
    }

    #[test]
    fn test_parse_webhook_hook_defaults() {
        let hook: Hook = serde_json::from_value(json!({
            "type": "webhook",
            "url": "http://media.local/ingest"
        }))
        .unwrap();

        let Hook::Webhook(webhook) = hook else {
            panic!("expected webhook variant");
        };
        assert_eq!(webhook.url, "http://media.local/ingest");
        assert!(webhook.headers.is_empty());
        assert!(webhook.body_json.is_none());
        assert!(webhook.timeout_sec.is_none());
        assert_eq!(webhook.retries, 0);
        assert!(!webhook.ignore_errors);
    }

    #[test]
    fn test_exec_hook_defaults() {
        let hook: Hook = serde_json::from_value(json!({
            "type": "exec",
            "cmd": "true"
        }))
        .unwrap();

        let Hook::Exec(exec) = hook else {
            panic!("expected exec variant");
        };
        assert!(exec.args.is_empty());
        assert!(exec.env.is_empty());
        assert!(exec.timeout_sec.is_none());
        assert_eq!(exec.retries, 0);
        assert!(!exec.pass_json_stdin);
        assert!(!exec.ignore_errors);
    }

    #[test]
    fn test_unknown_type_tag_rejected() {
        let result: Result<Hook, _> = serde_json::from_value(json!({
            "type": "carrier_pigeon",
            "cmd": "coo"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_cmd() {
        let hook = Hook::Exec(ExecHook::default());
        assert!(hook.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nonpositive_timeout() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let hook = Hook::Webhook(WebhookHook {
                url: "http://localhost/".to_string(),
                timeout_sec: Some(bad),
                ..Default::default()
            });
            assert!(hook.validate().is_err(), "timeout_sec {} should fail", bad);
        }
    }

    #[test]
    fn test_validate_accepts_fractional_timeout() {
        let hook = Hook::Exec(ExecHook {
            cmd: "sleep".to_string(),
            timeout_sec: Some(0.25),
            ..Default::default()
        });
        assert!(hook.validate().is_ok());
    }
}
