//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "permatrix=info,permatrix_cli=info,permatrix_policy=info,permatrix_table=info";

/// Filter used with `--verbose`
pub const VERBOSE_FILTER: &str = "permatrix=debug,permatrix_cli=debug,permatrix_policy=debug,permatrix_table=debug";

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` wins over both defaults. Safe to call more than once.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
