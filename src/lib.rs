//! hookfire — lifecycle-event hook execution.
//!
//! A host application announces named lifecycle events (e.g. "a file finished
//! moving") and hookfire runs the side-effect actions configured for them:
//! child-process commands and HTTP webhooks, with `{key}` placeholders in
//! their configuration filled from the event's runtime context.
//!
//! The library is consumed through two types: [`HooksConfig`] parses and
//! validates an event→hooks document, and [`HookRunner`] owns the resulting
//! registry and exposes the single operational entry point,
//! [`HookRunner::run`].

pub mod config;
pub mod env;
pub mod hooks;

pub use config::HooksConfig;
pub use hooks::{Context, ExecHook, Hook, HookError, HookRunner, WebhookHook};
