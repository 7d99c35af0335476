//! Projection selection: maps a `proj` token and its numeric parameters to a
//! `ProjectionSpec` for the projection math provider.

pub mod handle;

use std::fmt::Write as _;

use crate::datum::Ellipsoid;
use crate::error::ResolveError;
use crate::params::{ParamKey, ParameterSet};
use crate::units::Measure;

/// UTM scale factor on the central meridian.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
/// False northing applied to southern-hemisphere UTM zones.
pub const UTM_SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// Boundary to the projection math provider: builds an opaque projection
/// object from a resolved spec.
pub trait ProjectionProvider {
    type Handle;

    fn construct(&self, spec: &ProjectionSpec) -> Result<Self::Handle, ResolveError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectionKind {
    LambertConformal1SP,
    LambertConformal2SP,
    TransverseMercator,
    UniversalTransverseMercator,
}

impl ProjectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LambertConformal1SP => "Lambert Conic Conformal (1SP)",
            Self::LambertConformal2SP => "Lambert Conic Conformal (2SP)",
            Self::TransverseMercator => "Transverse Mercator",
            Self::UniversalTransverseMercator => "Universal Transverse Mercator",
        }
    }
}

/// The seven projection parameters, each carried with its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionParameters {
    pub central_meridian: Measure,
    pub latitude_of_origin: Measure,
    pub standard_parallel_1: Measure,
    pub standard_parallel_2: Measure,
    pub scale_factor: Measure,
    pub false_easting: Measure,
    pub false_northing: Measure,
}

impl ProjectionParameters {
    /// Read `lat_0`, `lat_1`, `lat_2`, `lon_0`, `k_0`, `x_0`, `y_0`; absent keys are 0.
    pub fn from_params(params: &ParameterSet) -> Result<Self, ResolveError> {
        Ok(Self {
            central_meridian: Measure::degrees(params.f64_or(ParamKey::Lon0, 0.0)?),
            latitude_of_origin: Measure::degrees(params.f64_or(ParamKey::Lat0, 0.0)?),
            standard_parallel_1: Measure::degrees(params.f64_or(ParamKey::Lat1, 0.0)?),
            standard_parallel_2: Measure::degrees(params.f64_or(ParamKey::Lat2, 0.0)?),
            scale_factor: Measure::unitless(params.f64_or(ParamKey::K0, 0.0)?),
            false_easting: Measure::meters(params.f64_or(ParamKey::X0, 0.0)?),
            false_northing: Measure::meters(params.f64_or(ParamKey::Y0, 0.0)?),
        })
    }
}

/// A fully parameterized projection, ready for the math provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionSpec {
    pub kind: ProjectionKind,
    pub ellipsoid: Ellipsoid,
    pub parameters: ProjectionParameters,
    /// Zone number for UTM, as parsed (0 when `zone` was absent).
    pub zone: Option<i32>,
}

impl ProjectionSpec {
    /// Projection part of a proj4 definition (no ellipsoid or datum terms).
    pub fn proj_params(&self) -> String {
        let p = &self.parameters;
        let mut out = String::new();
        match self.kind {
            ProjectionKind::LambertConformal1SP => {
                let lat0 = p.latitude_of_origin.value;
                let _ = write!(
                    out,
                    "+proj=lcc +lat_1={lat0} +lat_0={lat0} +lon_0={} +k_0={} +x_0={} +y_0={}",
                    p.central_meridian.value,
                    p.scale_factor.value,
                    p.false_easting.value,
                    p.false_northing.value,
                );
            }
            ProjectionKind::LambertConformal2SP => {
                let _ = write!(
                    out,
                    "+proj=lcc +lat_1={} +lat_2={} +lat_0={} +lon_0={} +x_0={} +y_0={}",
                    p.standard_parallel_1.value,
                    p.standard_parallel_2.value,
                    p.latitude_of_origin.value,
                    p.central_meridian.value,
                    p.false_easting.value,
                    p.false_northing.value,
                );
            }
            ProjectionKind::TransverseMercator => {
                let _ = write!(
                    out,
                    "+proj=tmerc +lat_0={} +lon_0={} +k_0={} +x_0={} +y_0={}",
                    p.latitude_of_origin.value,
                    p.central_meridian.value,
                    p.scale_factor.value,
                    p.false_easting.value,
                    p.false_northing.value,
                );
            }
            // Rendered through tmerc so the zone-derived meridian is used as is.
            ProjectionKind::UniversalTransverseMercator => {
                let _ = write!(
                    out,
                    "+proj=tmerc +lat_0=0 +lon_0={} +k_0={UTM_SCALE_FACTOR} +x_0={UTM_FALSE_EASTING} +y_0={}",
                    p.central_meridian.value,
                    p.false_northing.value,
                );
            }
        }
        out
    }
}

/// Central meridian of a UTM zone, in degrees.
///
/// Zone 1 gives 183 rather than -177; zone 0 gives 177.
pub fn utm_central_meridian(zone: i32) -> f64 {
    (6.0 * (zone as f64 - 1.0) + 183.0) % 360.0
}

/// Resolve a projection token (case-insensitive) against `params`.
pub fn resolve(
    name: &str,
    ellipsoid: &Ellipsoid,
    params: &ParameterSet,
) -> Result<ProjectionSpec, ResolveError> {
    let mut parameters = ProjectionParameters::from_params(params)?;
    let mut zone = None;

    let kind = match name.to_ascii_lowercase().as_str() {
        "lcc" if params.contains(ParamKey::Lat2) => ProjectionKind::LambertConformal2SP,
        "lcc" => ProjectionKind::LambertConformal1SP,
        "tmerc" => ProjectionKind::TransverseMercator,
        "utm" => {
            // A missing zone reads as zone 0 (central meridian 177).
            let z = params.parse_i32(ParamKey::Zone)?.unwrap_or(0);
            parameters.central_meridian = Measure::degrees(utm_central_meridian(z));
            parameters.false_northing = Measure::meters(if params.contains(ParamKey::South) {
                UTM_SOUTH_FALSE_NORTHING
            } else {
                0.0
            });
            zone = Some(z);
            ProjectionKind::UniversalTransverseMercator
        }
        _ => return Err(ResolveError::UnknownProjection(name.to_string())),
    };

    Ok(ProjectionSpec {
        kind,
        ellipsoid: *ellipsoid,
        parameters,
        zone,
    })
}
