//! Tracing subscriber setup for binaries and test harnesses embedding the
//! engine. Library code only emits events; installing a subscriber is the
//! host's call.

use tracing_subscriber::EnvFilter;
use utxoledger_types::{LedgerError, LogConfig, Result, constants};

/// Install a global `fmt` subscriber built from `config`.
///
/// `RUST_LOG` is not consulted; the filter comes from the config only.
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> Result<bool> {
    let filter = EnvFilter::try_new(&config.filter).map_err(|e| {
        LedgerError::Configuration(format!("invalid log filter {:?}: {e}", config.filter))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    if installed {
        tracing::info!(
            engine = constants::ENGINE_NAME,
            version = constants::VERSION,
            filter = %config.filter,
            json = config.json,
            "Tracing initialized"
        );
    }
    Ok(installed)
}
