//! Environment variable constants used throughout the application.
//!
//! Centralized definition of all `HOOKFIRE_*` environment variables to ensure
//! consistency and avoid hardcoded strings.

/// Hook configuration file path (CLI arg default env)
pub const HOOKFIRE_CONFIG: &str = "HOOKFIRE_CONFIG";
