pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. `verbosity` raises the default
/// crate level; `RUST_LOG` still takes precedence.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let level = match verbosity {
            0 => "bill_split=warn",
            1 => "bill_split=info",
            2 => "bill_split=debug",
            _ => "bill_split=trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Rounds half away from zero to three decimals. Negative zero becomes zero.
pub fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Shortest display of an amount (`1500`, `993.464`, `0`).
pub fn format_amount(value: f64) -> String {
    format!("{}", if value == 0.0 { 0.0 } else { value })
}
