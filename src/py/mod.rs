use pyo3::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod resolve;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(resolve::resolve_crs, m)?)?;
    m.add_function(wrap_pyfunction!(resolve::parse_definition, m)?)?;
    m.add_function(wrap_pyfunction!(resolve::is_datum_supported, m)?)?;
    m.add_function(wrap_pyfunction!(resolve::is_prime_meridian_supported, m)?)?;
    Ok(())
}

/// Route resolver diagnostics to stderr, filtered by `RUST_LOG` (default `warn`).
/// A subscriber installed by the host takes precedence.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
