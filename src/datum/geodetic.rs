use std::borrow::Cow;

use crate::datum::ellipsoid::{self, Ellipsoid};
use crate::datum::meridian::{self, PrimeMeridian};
use crate::datum::shift::ShiftOperation;
use crate::error::ResolveError;
use crate::params::{ParamKey, ParameterSet};

/// Authority identity of a well-known datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatumId {
    pub epsg: u32,
    pub name: &'static str,
    pub short_name: &'static str,
}

/// A geodetic datum: ellipsoid, prime meridian, and optional default shift to WGS84.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodeticDatum {
    /// `None` for datums synthesized from parameters.
    pub id: Option<DatumId>,
    pub prime_meridian: PrimeMeridian,
    pub ellipsoid: Ellipsoid,
    pub to_wgs84: Option<ShiftOperation>,
}

impl GeodeticDatum {
    pub fn builder(prime_meridian: PrimeMeridian, ellipsoid: Ellipsoid) -> DatumBuilder {
        DatumBuilder {
            prime_meridian,
            ellipsoid,
            to_wgs84: None,
        }
    }

    pub fn is_well_known(&self) -> bool {
        self.id.is_some()
    }

    /// Short name for well-known datums, `"unnamed"` otherwise.
    pub fn label(&self) -> &'static str {
        self.id.map_or("unnamed", |id| id.short_name)
    }
}

/// Collects the parts of a synthesized datum so it is immutable once built.
#[derive(Clone, Debug)]
pub struct DatumBuilder {
    prime_meridian: PrimeMeridian,
    ellipsoid: Ellipsoid,
    to_wgs84: Option<ShiftOperation>,
}

impl DatumBuilder {
    pub fn to_wgs84(mut self, op: ShiftOperation) -> Self {
        self.to_wgs84 = Some(op);
        self
    }

    pub fn build(self) -> GeodeticDatum {
        GeodeticDatum {
            id: None,
            prime_meridian: self.prime_meridian,
            ellipsoid: self.ellipsoid,
            to_wgs84: self.to_wgs84,
        }
    }
}

pub static WGS84: GeodeticDatum = GeodeticDatum {
    id: Some(DatumId {
        epsg: 6326,
        name: "World Geodetic System 1984",
        short_name: "WGS84",
    }),
    prime_meridian: meridian::GREENWICH,
    ellipsoid: ellipsoid::WGS84,
    to_wgs84: Some(ShiftOperation::Identity),
};

pub static ED50: GeodeticDatum = GeodeticDatum {
    id: Some(DatumId {
        epsg: 6230,
        name: "ED50",
        short_name: "ED50",
    }),
    prime_meridian: meridian::GREENWICH,
    ellipsoid: ellipsoid::INTERNATIONAL1924,
    to_wgs84: Some(ShiftOperation::GeocentricTranslation {
        dx: -87.0,
        dy: -98.0,
        dz: -121.0,
    }),
};

pub static NTF: GeodeticDatum = GeodeticDatum {
    id: Some(DatumId {
        epsg: 6275,
        name: "NTF",
        short_name: "NTF",
    }),
    prime_meridian: meridian::GREENWICH,
    ellipsoid: ellipsoid::CLARKE1880IGN,
    to_wgs84: Some(ShiftOperation::GeocentricTranslation {
        dx: -168.0,
        dy: -60.0,
        dz: 320.0,
    }),
};

pub static NTF_PARIS: GeodeticDatum = GeodeticDatum {
    id: Some(DatumId {
        epsg: 6807,
        name: "NTF_PARIS",
        short_name: "NTF_PARIS",
    }),
    prime_meridian: meridian::PARIS,
    ellipsoid: ellipsoid::CLARKE1880IGN,
    to_wgs84: Some(ShiftOperation::GeocentricTranslation {
        dx: -168.0,
        dy: -60.0,
        dz: 320.0,
    }),
};

pub static RGF93: GeodeticDatum = GeodeticDatum {
    id: Some(DatumId {
        epsg: 6171,
        name: "RGF93",
        short_name: "RGF93",
    }),
    prime_meridian: meridian::GREENWICH,
    ellipsoid: ellipsoid::GRS80,
    to_wgs84: Some(ShiftOperation::Identity),
};

/// Lookup tokens: WGS84 answers to its short name, the others to their name.
static KNOWN: [(&str, &GeodeticDatum); 5] = [
    ("WGS84", &WGS84),
    ("ED50", &ED50),
    ("NTF", &NTF),
    ("NTF_PARIS", &NTF_PARIS),
    ("RGF93", &RGF93),
];

/// Registry lookup of a well-known datum.
pub fn lookup(name: &str) -> Result<&'static GeodeticDatum, ResolveError> {
    KNOWN
        .iter()
        .find(|(token, _)| *token == name)
        .map(|(_, gd)| *gd)
        .ok_or_else(|| ResolveError::NotFound(format!("datum {name}")))
}

/// Whether `name` designates one of the well-known datums.
pub fn is_supported(name: &str) -> bool {
    lookup(name).is_ok()
}

/// Resolve the datum described by `params`.
///
/// Well-known datums are returned borrowed, shift parameters untouched.
/// Anything else is synthesized from the resolved ellipsoid and prime
/// meridian, with `towgs84` classified into its default shift.
pub fn resolve(params: &ParameterSet) -> Result<Cow<'static, GeodeticDatum>, ResolveError> {
    if let Some(name) = params.get(ParamKey::Datum) {
        if let Ok(gd) = lookup(name) {
            return Ok(Cow::Borrowed(gd));
        }
        tracing::debug!(datum = name, "Datum not in registry, building it from parameters");
    }

    // The ellipsoid is resolved first so its parse failures win over the meridian's.
    let soften = |e: ResolveError| {
        if e.is_undetermined() {
            ResolveError::DatumUndetermined(e.to_string())
        } else {
            e
        }
    };
    let ellipsoid = ellipsoid::resolve(params).map_err(soften)?;
    let prime_meridian = meridian::resolve(params).map_err(soften)?;

    let mut builder = GeodeticDatum::builder(prime_meridian, ellipsoid);
    if let Some(towgs84) = params.get(ParamKey::Towgs84) {
        builder = builder.to_wgs84(ShiftOperation::from_towgs84(towgs84)?);
    }
    if let Some(grids) = params.get(ParamKey::Nadgrids) {
        tracing::warn!(nadgrids = grids, "A grid has been found; grid shifts are not applied");
    }
    Ok(Cow::Owned(builder.build()))
}
