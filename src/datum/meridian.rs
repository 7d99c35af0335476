//! Prime meridians: the 13 named meridians of the proj4 vocabulary plus
//! numeric longitudes.

use crate::error::ResolveError;
use crate::params::{ParamKey, ParameterSet};

/// A prime meridian, as a longitude offset from Greenwich in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimeMeridian {
    /// `None` for meridians built from a bare longitude.
    pub name: Option<&'static str>,
    pub longitude: f64,
}

impl PrimeMeridian {
    const fn named(name: &'static str, longitude: f64) -> Self {
        Self {
            name: Some(name),
            longitude,
        }
    }

    pub fn from_longitude(longitude: f64) -> Self {
        Self {
            name: None,
            longitude,
        }
    }

    pub fn longitude_radians(&self) -> f64 {
        self.longitude.to_radians()
    }

    pub fn is_greenwich(&self) -> bool {
        self.longitude == 0.0
    }
}

pub const GREENWICH: PrimeMeridian = PrimeMeridian::named("Greenwich", 0.0);
pub const PARIS: PrimeMeridian = PrimeMeridian::named("Paris", 2.337_229_166_666_667);
pub const LISBON: PrimeMeridian = PrimeMeridian::named("Lisbon", -9.131_906_111_111_111);
pub const BOGOTA: PrimeMeridian = PrimeMeridian::named("Bogota", -74.080_916_666_666_67);
pub const MADRID: PrimeMeridian = PrimeMeridian::named("Madrid", -3.687_938_888_888_889);
pub const ROME: PrimeMeridian = PrimeMeridian::named("Rome", 12.452_333_333_333_333);
pub const BERN: PrimeMeridian = PrimeMeridian::named("Bern", 7.439_583_333_333_333);
pub const JAKARTA: PrimeMeridian = PrimeMeridian::named("Jakarta", 106.807_719_444_444_4);
pub const FERRO: PrimeMeridian = PrimeMeridian::named("Ferro", -17.666_666_666_666_67);
pub const BRUSSELS: PrimeMeridian = PrimeMeridian::named("Brussels", 4.367_975);
pub const STOCKHOLM: PrimeMeridian = PrimeMeridian::named("Stockholm", 18.058_277_777_777_78);
pub const ATHENS: PrimeMeridian = PrimeMeridian::named("Athens", 23.716_337_5);
pub const OSLO: PrimeMeridian = PrimeMeridian::named("Oslo", 10.722_916_666_666_67);

static NAMED: &[(&str, &PrimeMeridian)] = &[
    ("greenwich", &GREENWICH),
    ("paris", &PARIS),
    ("lisbon", &LISBON),
    ("bogota", &BOGOTA),
    ("madrid", &MADRID),
    ("rome", &ROME),
    ("bern", &BERN),
    ("jakarta", &JAKARTA),
    ("ferro", &FERRO),
    ("brussels", &BRUSSELS),
    ("stockholm", &STOCKHOLM),
    ("athens", &ATHENS),
    ("oslo", &OSLO),
];

/// Registry lookup of a named meridian (lowercase token).
pub fn lookup(name: &str) -> Result<&'static PrimeMeridian, ResolveError> {
    NAMED
        .iter()
        .find(|(token, _)| *token == name)
        .map(|(_, pm)| *pm)
        .ok_or_else(|| ResolveError::NotFound(format!("prime meridian {name}")))
}

/// Resolve the `pm` parameter. Absent means Greenwich.
pub fn resolve(params: &ParameterSet) -> Result<PrimeMeridian, ResolveError> {
    let Some(name) = params.get(ParamKey::Pm) else {
        return Ok(GREENWICH);
    };
    if let Ok(pm) = lookup(name) {
        return Ok(*pm);
    }
    match name.trim().parse::<f64>() {
        Ok(longitude) => Ok(PrimeMeridian::from_longitude(longitude)),
        Err(_) => {
            tracing::error!(pm = name, "Prime meridian is not parsable");
            Err(ResolveError::PrimeMeridianUnparseable(name.to_string()))
        }
    }
}

/// Whether `resolve` would succeed for this `pm` value.
pub fn is_supported(name: Option<&str>) -> bool {
    match name {
        None => true,
        Some(name) => {
            let supported = lookup(name).is_ok() || name.trim().parse::<f64>().is_ok();
            if !supported {
                tracing::error!(pm = name, "Prime meridian is not supported");
            }
            supported
        }
    }
}
