use pyo3::prelude::*;

pub mod crs;
pub mod datum;
pub mod error;
pub mod params;
pub mod proj;
pub mod units;
mod py;
#[cfg(test)]
mod test_support;

pub use crs::{create_crs, CoordinateReferenceSystem};
pub use error::ResolveError;
pub use params::{ParamKey, ParameterSet};

/// A Python module implemented in Rust.
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::init_logging();
    py::register(m)?;
    Ok(())
}
