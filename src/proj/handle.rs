use std::fmt;

use proj4rs::Proj;

use crate::crs::{ellipsoid_params, CoordinateReferenceSystem};
use crate::error::ResolveError;
use crate::proj::{ProjectionProvider, ProjectionSpec};

/// Opaque projection object built by proj4rs from a resolved definition.
///
/// proj4rs uses radians for geographic CRS; `transform_to` takes and returns
/// degrees for those and converts internally.
pub struct ProjectionHandle {
    proj: Proj,
    definition: String,
}

impl ProjectionHandle {
    /// Build a handle from a proj4 definition string.
    pub fn from_definition(definition: &str) -> Result<Self, ResolveError> {
        let proj = Proj::from_proj_string(definition).map_err(|e| ResolveError::Provider {
            definition: definition.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            proj,
            definition: definition.to_string(),
        })
    }

    /// Build a handle for any resolved CRS variant.
    pub fn from_crs(crs: &CoordinateReferenceSystem) -> Result<Self, ResolveError> {
        Self::from_definition(&crs.to_proj_string())
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn is_latlong(&self) -> bool {
        self.proj.is_latlong()
    }

    /// Transform a single point from this CRS into `dst`.
    ///
    /// Coordinates are in CRS native units (degrees for geographic, metres for projected).
    pub fn transform_to(&self, dst: &ProjectionHandle, x: f64, y: f64) -> Result<(f64, f64), ResolveError> {
        let mut point = if self.is_latlong() {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        proj4rs::transform::transform(&self.proj, &dst.proj, &mut point).map_err(|e| {
            ResolveError::Provider {
                definition: dst.definition.clone(),
                reason: e.to_string(),
            }
        })?;

        if dst.is_latlong() {
            Ok((point.0.to_degrees(), point.1.to_degrees()))
        } else {
            Ok(point)
        }
    }
}

impl fmt::Debug for ProjectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionHandle")
            .field("definition", &self.definition)
            .field("latlong", &self.is_latlong())
            .finish()
    }
}

/// Projection math provider backed by proj4rs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Proj4rsProvider;

impl ProjectionProvider for Proj4rsProvider {
    type Handle = ProjectionHandle;

    fn construct(&self, spec: &ProjectionSpec) -> Result<ProjectionHandle, ResolveError> {
        let definition = format!("{} {}", spec.proj_params(), ellipsoid_params(&spec.ellipsoid));
        ProjectionHandle::from_definition(&definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::create_crs;
    use crate::params::ParameterSet;
    use approx::assert_relative_eq;

    fn crs(definition: &str) -> CoordinateReferenceSystem {
        let params: ParameterSet = definition.parse().unwrap();
        create_crs("test", &params).unwrap()
    }

    #[test]
    fn test_utm31_central_meridian_easting() {
        let geo = ProjectionHandle::from_crs(&crs("+proj=longlat +datum=WGS84")).unwrap();
        let utm = ProjectionHandle::from_crs(&crs("+proj=utm +zone=31 +datum=WGS84")).unwrap();
        assert!(geo.is_latlong());
        assert!(!utm.is_latlong());

        let (e, n) = geo.transform_to(&utm, 3.0, 45.0).unwrap();
        assert_relative_eq!(e, 500_000.0, epsilon = 1e-3);
        assert!(n > 4_900_000.0 && n < 5_100_000.0, "northing = {n}");
    }

    #[test]
    fn test_roundtrip_utm_south() {
        let geo = ProjectionHandle::from_crs(&crs("+proj=longlat +datum=WGS84")).unwrap();
        let utm =
            ProjectionHandle::from_crs(&crs("+proj=utm +zone=33 +south +datum=WGS84")).unwrap();

        let (e, n) = geo.transform_to(&utm, 16.0, -30.0).unwrap();
        assert!(n > 0.0, "Southing should be positive with FN=10M, got {n}");
        let (lon, lat) = utm.transform_to(&geo, e, n).unwrap();
        assert_relative_eq!(lon, 16.0, epsilon = 1e-8);
        assert_relative_eq!(lat, -30.0, epsilon = 1e-8);
    }

    #[test]
    fn test_provider_constructs_from_spec() {
        let crs = crs("+proj=tmerc +lat_0=0 +lon_0=9 +k_0=0.9996 +x_0=500000 +ellps=GRS80");
        let spec = crs.projection().unwrap();
        let handle = Proj4rsProvider.construct(spec).unwrap();
        assert!(handle.definition().starts_with("+proj=tmerc"));
        assert!(!handle.is_latlong());
    }

    #[test]
    fn test_provider_rejection_is_reported() {
        let err = ProjectionHandle::from_definition("+proj=nonsense").unwrap_err();
        assert!(matches!(err, ResolveError::Provider { .. }));
    }

    #[test]
    fn test_debug_shows_definition() {
        let handle = ProjectionHandle::from_crs(&crs("+proj=longlat +datum=WGS84")).unwrap();
        let shown = format!("{handle:?}");
        assert!(shown.starts_with("ProjectionHandle"), "{shown}");
        assert!(shown.contains("+proj=longlat"), "{shown}");
        assert!(shown.contains("latlong: true"), "{shown}");
    }
}
