//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//!
//! # Example
//!
//! ```ignore
//! log!("manifest"; "generated with {} entries", count);
//! debug!("scan"; "skipped {}", path.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
    tty::IsTty,
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// `error` and `warning` go to stderr, everything else to stdout.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();

    if matches!(module_lower.as_str(), "error" | "warning") {
        let prefix = colorize_prefix(module, &module_lower, Stream::Stderr);
        let mut err = stderr().lock();
        let tty = err.is_tty();
        write_line(&mut err, tty, &prefix, message);
    } else {
        let prefix = colorize_prefix(module, &module_lower, Stream::Stdout);
        let mut out = stdout().lock();
        let tty = out.is_tty();
        write_line(&mut out, tty, &prefix, message);
    }
}

/// Line clearing only applies to terminals.
fn write_line<W: Write>(out: &mut W, tty: bool, prefix: &str, message: &str) {
    if tty {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module type.
///
/// Honors `--color` through the owo-colors override.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str, stream: Stream) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "manifest" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        "warning" => Style::new().bright_magenta().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    prefix
        .if_supports_color(stream, |text| text.style(style))
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================
