//! Lifecycle hook system
//!
//! A host application announces named events ("after_move", "on_error", ...)
//! and hookfire runs the side-effect actions bound to them:
//! - exec hooks spawn a child process with templated arguments
//! - webhook hooks POST to an HTTP endpoint with a templated body
//!
//! Hook configuration is static; runtime data is injected at fire time by
//! replacing `{key}` placeholders with values from the event's context.
//!
//! Example config:
//! ```yaml
//! hooks:
//!   after_move:
//!     - type: exec
//!       cmd: notify-send
//!       args: ["moved {name}"]
//!     - type: webhook
//!       url: http://media.local/ingest
//!       body_json: { file: "{final_filepath}" }
//!       retries: 2
//!       ignore_errors: true
//! ```
//!
//! Hooks for one event run sequentially in configuration order. A hook that
//! exhausts its retries either aborts the event (default) or is logged and
//! skipped (`ignore_errors: true`).

mod error;
mod expand;
mod model;
mod runner;

pub use error::HookError;
pub use expand::{expand_hook, expand_str, expand_value};
pub use model::{Context, ExecHook, Hook, WebhookHook};
pub use runner::HookRunner;
