//! Coordinate reference systems and their assembly from a parameter set.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::datum::{geodetic, Ellipsoid, GeodeticDatum};
use crate::error::ResolveError;
use crate::params::{parse_decimal, ParamKey, ParameterSet};
use crate::proj::{self, ProjectionSpec};
use crate::units::{Quantity, Unit};

const GEOCENT: &str = "geocent";
const LONGLAT: &str = "longlat";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    Longitude,
    Latitude,
    Height,
    Easting,
    Northing,
}

/// Ordered axes, each with its unit.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateSystem {
    pub axes: Vec<(Axis, Unit)>,
}

impl CoordinateSystem {
    pub fn cartesian(unit: Unit) -> Self {
        Self {
            axes: vec![(Axis::X, unit.clone()), (Axis::Y, unit.clone()), (Axis::Z, unit)],
        }
    }

    /// Longitude/latitude in `horizontal`, height always in metres.
    pub fn ellipsoidal_3d(horizontal: Unit) -> Self {
        Self {
            axes: vec![
                (Axis::Longitude, horizontal.clone()),
                (Axis::Latitude, horizontal),
                (Axis::Height, Unit::meter()),
            ],
        }
    }

    pub fn planar() -> Self {
        Self {
            axes: vec![(Axis::Easting, Unit::meter()), (Axis::Northing, Unit::meter())],
        }
    }

    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    pub fn unit(&self, axis: Axis) -> Option<&Unit> {
        self.axes.iter().find(|(a, _)| *a == axis).map(|(_, u)| u)
    }
}

/// Identification carried by every CRS variant.
#[derive(Clone, Debug, PartialEq)]
pub struct CrsId {
    pub code: String,
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeocentricCrs {
    pub id: CrsId,
    pub datum: Cow<'static, GeodeticDatum>,
    pub coordinate_system: CoordinateSystem,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Geographic3DCrs {
    pub id: CrsId,
    pub datum: Cow<'static, GeodeticDatum>,
    pub coordinate_system: CoordinateSystem,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedCrs {
    pub id: CrsId,
    pub datum: Cow<'static, GeodeticDatum>,
    pub projection: ProjectionSpec,
    pub coordinate_system: CoordinateSystem,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CoordinateReferenceSystem {
    Geocentric(GeocentricCrs),
    Geographic3D(Geographic3DCrs),
    Projected(ProjectedCrs),
}

impl CoordinateReferenceSystem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Geocentric(_) => "geocentric",
            Self::Geographic3D(_) => "geographic3d",
            Self::Projected(_) => "projected",
        }
    }

    pub fn id(&self) -> &CrsId {
        match self {
            Self::Geocentric(c) => &c.id,
            Self::Geographic3D(c) => &c.id,
            Self::Projected(c) => &c.id,
        }
    }

    pub fn datum(&self) -> &GeodeticDatum {
        match self {
            Self::Geocentric(c) => &c.datum,
            Self::Geographic3D(c) => &c.datum,
            Self::Projected(c) => &c.datum,
        }
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        match self {
            Self::Geocentric(c) => &c.coordinate_system,
            Self::Geographic3D(c) => &c.coordinate_system,
            Self::Projected(c) => &c.coordinate_system,
        }
    }

    pub fn projection(&self) -> Option<&ProjectionSpec> {
        match self {
            Self::Projected(c) => Some(&c.projection),
            _ => None,
        }
    }

    /// Canonical proj4 definition of the resolved CRS.
    pub fn to_proj_string(&self) -> String {
        let head = match self {
            Self::Geocentric(_) => format!("+proj={GEOCENT}"),
            Self::Geographic3D(_) => format!("+proj={LONGLAT}"),
            Self::Projected(c) => c.projection.proj_params(),
        };
        format!("{head} {}", datum_params(self.datum()))
    }
}

pub(crate) fn ellipsoid_params(ellipsoid: &Ellipsoid) -> String {
    format!("+a={} +b={}", ellipsoid.a, ellipsoid.b)
}

fn datum_params(datum: &GeodeticDatum) -> String {
    let mut out = ellipsoid_params(&datum.ellipsoid);
    if !datum.prime_meridian.is_greenwich() {
        let _ = write!(out, " +pm={}", datum.prime_meridian.longitude);
    }
    if let Some(op) = &datum.to_wgs84 {
        let _ = write!(out, " +towgs84={op}");
    }
    out
}

/// Unit of the non-projected axes. When `to_meter` is present the scale is
/// read from the `units` value, as a length unit.
fn override_unit(params: &ParameterSet, default: Unit) -> Result<Unit, ResolveError> {
    let Some(to_meter) = params.get(ParamKey::ToMeter) else {
        return Ok(default);
    };
    let units = params
        .get(ParamKey::Units)
        .ok_or(ResolveError::MissingRequiredKey(ParamKey::Units))?;
    let scale = parse_decimal(ParamKey::Units, units)?;
    tracing::warn!(
        to_meter,
        units,
        "Unit override takes its scale from the units value"
    );
    Ok(Unit::new(Quantity::Length, "", scale, ""))
}

/// Assemble the CRS described by `params`.
///
/// The datum is resolved first; `proj` then selects a geocentric,
/// geographic 3D or projected CRS.
pub fn create_crs(
    identifier: &str,
    params: &ParameterSet,
) -> Result<CoordinateReferenceSystem, ResolveError> {
    let datum = geodetic::resolve(params).inspect_err(|e| {
        tracing::warn!(error = %e, "No datum definition, cannot create the coordinate reference system");
    })?;

    let Some(sproj) = params.get(ParamKey::Proj) else {
        tracing::warn!(identifier, "No projection defined for this coordinate reference system");
        return Err(ResolveError::MissingRequiredKey(ParamKey::Proj));
    };

    let id = CrsId {
        code: identifier.to_string(),
        title: params.get(ParamKey::Title).map(str::to_string),
    };

    match sproj {
        GEOCENT => {
            let unit = override_unit(params, Unit::meter())?;
            Ok(CoordinateReferenceSystem::Geocentric(GeocentricCrs {
                id,
                datum,
                coordinate_system: CoordinateSystem::cartesian(unit),
            }))
        }
        LONGLAT => {
            let unit = override_unit(params, Unit::degree())?;
            Ok(CoordinateReferenceSystem::Geographic3D(Geographic3DCrs {
                id,
                datum,
                coordinate_system: CoordinateSystem::ellipsoidal_3d(unit),
            }))
        }
        _ => {
            let projection = proj::resolve(sproj, &datum.ellipsoid, params).inspect_err(|e| {
                tracing::warn!(proj = sproj, error = %e, "Cannot create the projection");
            })?;
            Ok(CoordinateReferenceSystem::Projected(ProjectedCrs {
                id,
                datum,
                projection,
                coordinate_system: CoordinateSystem::planar(),
            }))
        }
    }
}
