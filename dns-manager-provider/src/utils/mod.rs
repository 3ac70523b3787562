//! Utility modules.

/// Keeps response bodies short in logs.
pub mod log_sanitizer;
