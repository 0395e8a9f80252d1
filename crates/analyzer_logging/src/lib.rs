#![deny(missing_docs)]
//! Shared logging utilities for the analyzer workspace.
//!
//! This crate provides the `analyzer_*` logging macros used by the engine and
//! the app, plus a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Id of the analysis request currently being driven on this thread.
    static REQUEST_ID: Cell<u64> = const { Cell::new(0) };
}

/// Records the analysis request id the current thread is working on.
/// The orchestrator sets this when it starts a backend call.
pub fn set_request_id(request_id: u64) {
    REQUEST_ID.with(|v| v.set(request_id));
}

/// Forgets the request id once its request has settled, so later log lines
/// are tagged 0.
pub fn clear_request_id() {
    set_request_id(0);
}

/// Returns the request id recorded for the current thread, or 0 if none.
pub fn current_request_id() -> u64 {
    REQUEST_ID.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current request id.
#[macro_export]
macro_rules! analyzer_trace {
    ($($arg:tt)*) => {{
        log::trace!("[req {}] {}", $crate::current_request_id(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current request id.
#[macro_export]
macro_rules! analyzer_debug {
    ($($arg:tt)*) => {{
        log::debug!("[req {}] {}", $crate::current_request_id(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current request id.
#[macro_export]
macro_rules! analyzer_info {
    ($($arg:tt)*) => {{
        log::info!("[req {}] {}", $crate::current_request_id(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current request id.
#[macro_export]
macro_rules! analyzer_warn {
    ($($arg:tt)*) => {{
        log::warn!("[req {}] {}", $crate::current_request_id(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current request id.
#[macro_export]
macro_rules! analyzer_error {
    ($($arg:tt)*) => {{
        log::error!("[req {}] {}", $crate::current_request_id(), format_args!($($arg)*));
    }};
}

/// Initializes a terminal logger for use in tests.
///
/// Safe to call from every test: it no-ops once a logger is installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
