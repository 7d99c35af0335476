//! PyO3 bindings for CRS resolution.

use std::collections::HashMap;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::crs::create_crs;
use crate::datum::{geodetic, meridian};
use crate::params::ParameterSet;

/// Resolve a proj4-style parameter mapping into a coordinate reference system.
///
/// Args:
///     params: Mapping of proj4 keys to string values (e.g. {"proj": "utm", "zone": "31"}).
///         Flags such as `south` map to an empty string.
///     identifier: Identifier recorded on the resulting CRS.
///
/// Returns:
///     Dict with keys:
///     - kind: "geocentric", "geographic3d" or "projected"
///     - identifier, title
///     - datum: datum short name, or "unnamed" when synthesized
///     - datum_epsg: EPSG code of a well-known datum, or None
///     - ellipsoid: {name, a, b, rf}
///     - prime_meridian: {name, longitude}
///     - to_wgs84: 7-element list or None
///     - projection: None, or {kind, zone, lon_0, lat_0, lat_1, lat_2, k_0, x_0, y_0}
///     - axes: list of (axis, unit name, unit scale)
///     - proj_string: canonical proj4 definition
#[pyfunction]
#[pyo3(signature = (params, identifier=""))]
pub fn resolve_crs<'py>(
    py: Python<'py>,
    params: HashMap<String, String>,
    identifier: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let params = ParameterSet::from_pairs(params);
    let identifier = identifier.to_string();

    let crs = py
        .allow_threads(move || create_crs(&identifier, &params))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let datum = crs.datum();
    let dict = PyDict::new(py);
    dict.set_item("kind", crs.kind_name())?;
    dict.set_item("identifier", crs.id().code.as_str())?;
    dict.set_item("title", crs.id().title.as_deref())?;
    dict.set_item("datum", datum.label())?;
    dict.set_item("datum_epsg", datum.id.map(|id| id.epsg))?;

    let ellipsoid = PyDict::new(py);
    ellipsoid.set_item("name", datum.ellipsoid.name)?;
    ellipsoid.set_item("a", datum.ellipsoid.a)?;
    ellipsoid.set_item("b", datum.ellipsoid.b)?;
    ellipsoid.set_item("rf", datum.ellipsoid.inverse_flattening())?;
    dict.set_item("ellipsoid", ellipsoid)?;

    let pm = PyDict::new(py);
    pm.set_item("name", datum.prime_meridian.name)?;
    pm.set_item("longitude", datum.prime_meridian.longitude)?;
    dict.set_item("prime_meridian", pm)?;

    dict.set_item("to_wgs84", datum.to_wgs84.map(|op| op.parameters().to_vec()))?;

    match crs.projection() {
        Some(spec) => {
            let p = &spec.parameters;
            let proj = PyDict::new(py);
            proj.set_item("kind", spec.kind.name())?;
            proj.set_item("zone", spec.zone)?;
            proj.set_item("lon_0", p.central_meridian.value)?;
            proj.set_item("lat_0", p.latitude_of_origin.value)?;
            proj.set_item("lat_1", p.standard_parallel_1.value)?;
            proj.set_item("lat_2", p.standard_parallel_2.value)?;
            proj.set_item("k_0", p.scale_factor.value)?;
            proj.set_item("x_0", p.false_easting.value)?;
            proj.set_item("y_0", p.false_northing.value)?;
            dict.set_item("projection", proj)?;
        }
        None => dict.set_item("projection", py.None())?,
    }

    let axes: Vec<(String, String, f64)> = crs
        .coordinate_system()
        .axes
        .iter()
        .map(|(axis, unit)| (format!("{axis:?}"), unit.name.clone(), unit.scale))
        .collect();
    dict.set_item("axes", axes)?;
    dict.set_item("proj_string", crs.to_proj_string())?;

    Ok(dict)
}

/// Split a proj4 definition string ("+proj=utm +zone=31 +south") into its
/// supported key/value pairs.
#[pyfunction]
pub fn parse_definition(text: &str) -> HashMap<String, String> {
    text.parse::<ParameterSet>()
        .unwrap_or_default()
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_string()))
        .collect()
}

/// Whether `name` is one of the well-known datums.
#[pyfunction]
pub fn is_datum_supported(name: &str) -> bool {
    geodetic::is_supported(name)
}

/// Whether a `pm` value (or its absence) resolves to a prime meridian.
#[pyfunction]
#[pyo3(signature = (name=None))]
pub fn is_prime_meridian_supported(name: Option<&str>) -> bool {
    meridian::is_supported(name)
}
