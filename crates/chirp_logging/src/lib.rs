#![deny(missing_docs)]
//! Shared logging utilities for the chirp workspace.
//!
//! This crate provides the `chirp_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Backends are chosen
//! by the binary; library crates only ever log through these macros.

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! chirp_info {
    ($($arg:tt)*) => {{
        log::info!(target: "chirp", $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! chirp_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: "chirp", $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! chirp_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: "chirp", $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! chirp_error {
    ($($arg:tt)*) => {{
        log::error!(target: "chirp", $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test binary thread may have won the race; that logger is fine.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
