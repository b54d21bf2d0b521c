//! Placeholder expansion: `{key}` substitution over hook configuration
//!
//! Expansion is best-effort: tokens whose key is absent from the context are
//! left verbatim, braces included, so a hook stays partially useful even with
//! an incomplete context. Stateless and pure.

use serde_json::Value;

use super::model::{Context, ExecHook, Hook, WebhookHook};

/// Replace every `{key}` occurrence in `template` whose key is present in
/// `ctx` with the value's string form. Unknown tokens are left untouched,
/// and a template with no resolvable keys comes back byte-for-byte.
pub fn expand_str(template: &str, ctx: &Context) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open + 1..].find('}').map(|i| open + 1 + i) else {
            // No closing brace ahead of us; the remainder is literal.
            break;
        };
        let key = &rest[open + 1..close];
        match ctx.get(key) {
            Some(value) => {
                out.push_str(&rest[..open]);
                out.push_str(&value_to_string(value));
                rest = &rest[close + 1..];
            }
            None => {
                // Keep the token verbatim and resume scanning after the
                // opening brace.
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Recursively expand a JSON value: strings are templated, arrays element by
/// element in order, object values (never keys) in place. Other types pass
/// through unchanged.
pub fn expand_value(value: &Value, ctx: &Context) -> Value {
    match value {
        Value::String(s) => Value::String(expand_str(s, ctx)),
        Value::Array(items) => Value::Array(items.iter().map(|v| expand_value(v, ctx)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), expand_value(v, ctx)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Expand every templatable field of a hook, reconstructing a new instance of
/// the same variant. Non-string fields (`retries`, `timeout_sec`, flags) pass
/// through as-is; the input template is left untouched.
pub fn expand_hook(hook: &Hook, ctx: &Context) -> Hook {
    match hook {
        Hook::Exec(exec) => Hook::Exec(ExecHook {
            cmd: expand_str(&exec.cmd, ctx),
            args: exec.args.iter().map(|arg| expand_str(arg, ctx)).collect(),
            env: exec
                .env
                .iter()
                .map(|(k, v)| (k.clone(), expand_str(v, ctx)))
                .collect(),
            ..exec.clone()
        }),
        Hook::Webhook(webhook) => Hook::Webhook(WebhookHook {
            url: expand_str(&webhook.url, ctx),
            headers: webhook
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), expand_str(v, ctx)))
                .collect(),
            body_json: webhook.body_json.as_ref().map(|b| expand_value(b, ctx)),
            ..webhook.clone()
        }),
    }
}

/// String form of a context value: strings verbatim, scalars via their
/// display form, composite values as compact JSON.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
