//! Lightweight, configurable logging shared by all tbmd crates.
//!
//! Usage:
//! - Set TBMD_LOG=off (default) - no logs
//! - Set TBMD_LOG=info - basic operation logs
//! - Set TBMD_LOG=debug - detailed diagnostic logs

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

static INIT: Once = Once::new();

/// Initialize diagnostics based on the TBMD_LOG environment variable.
///
/// This should be called once at application startup. It's safe to call
/// multiple times - subsequent calls will be ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let log_level = std::env::var("TBMD_LOG").unwrap_or_else(|_| "off".to_string());

        let rt = match log_level.as_str() {
            "off" => return, // No setup needed
            "debug" => emit::setup()
                .emit_to(emit_term::stderr())
                .emit_when(emit::level::min_filter(emit::Level::Debug))
                .init(),
            "info" => emit::setup()
                .emit_to(emit_term::stderr())
                .emit_when(emit::level::min_filter(emit::Level::Info))
                .init(),
            "warn" => emit::setup()
                .emit_to(emit_term::stderr())
                .emit_when(emit::level::min_filter(emit::Level::Warn))
                .init(),
            "error" => emit::setup()
                .emit_to(emit_term::stderr())
                .emit_when(emit::level::min_filter(emit::Level::Error))
                .init(),
            _ => {
                let rt = emit::setup()
                    .emit_to(emit_term::stderr())
                    .emit_when(emit::level::min_filter(emit::Level::Info))
                    .init();
                eprintln!("Warning: Unknown TBMD_LOG value '{}', using 'info'", log_level);
                rt
            }
        };

        // The runtime must outlive every emitting call site.
        std::mem::forget(rt);
    });
}

// Forward the emit logging macros directly. Re-exporting rather than
// wrapping in `macro_rules!` preserves emit's implicit template capture
// (e.g. `info!("... {local}")`), which an extra macro layer would break
// through hygiene.
//
// - info:  basic operations (registry lookups, resolved paths, written files, etc.)
// - debug: detailed diagnostics (per-variant probes, candidate lists, internal state, etc.)
// - warn:  warning conditions (anomalous paths, ambiguous matches, skipped entries)
// - error: critical error conditions (failures that abort the calling operation)
pub use emit::{debug, error, info, warn};

/// Re-export the init function for convenience
pub use init_diagnostics as init;
