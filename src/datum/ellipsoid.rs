use crate::datum::geodetic;
use crate::error::ResolveError;
use crate::params::{parse_decimal, ParamKey, ParameterSet};

/// The second defining parameter an ellipsoid was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SecondParameter {
    SemiMinorAxis(f64),
    InverseFlattening(f64),
}

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Canonical name for well-known ellipsoids, `None` when derived from axis values.
    pub name: Option<&'static str>,
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// Semi-minor axis: a * (1 - f)
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub ep2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
    /// The pair member this ellipsoid was defined with, alongside `a`.
    pub defining: SecondParameter,
}

impl Ellipsoid {
    const fn with_flattening(a: f64, f: f64, defining: SecondParameter) -> Self {
        let b = a * (1.0 - f);
        let e2 = 2.0 * f - f * f;
        let ep2 = e2 / (1.0 - e2);
        let n = f / (2.0 - f);
        Self {
            name: None,
            a,
            f,
            b,
            e2,
            ep2,
            n,
            defining,
        }
    }

    /// Derived ellipsoid from semi-major axis and inverse flattening.
    /// An infinite `rf` yields a sphere.
    pub const fn from_inverse_flattening(a: f64, rf: f64) -> Self {
        Self::with_flattening(a, 1.0 / rf, SecondParameter::InverseFlattening(rf))
    }

    /// Derived ellipsoid from both semi-axes.
    pub const fn from_semi_minor_axis(a: f64, b: f64) -> Self {
        let mut ell = Self::with_flattening(a, (a - b) / a, SecondParameter::SemiMinorAxis(b));
        ell.b = b;
        ell
    }

    const fn named(self, name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..self
        }
    }

    pub fn is_well_known(&self) -> bool {
        self.name.is_some()
    }

    pub fn inverse_flattening(&self) -> f64 {
        match self.defining {
            SecondParameter::InverseFlattening(rf) => rf,
            SecondParameter::SemiMinorAxis(_) if self.f == 0.0 => f64::INFINITY,
            SecondParameter::SemiMinorAxis(_) => 1.0 / self.f,
        }
    }

    /// Get the first eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_223_563).named("WGS84");
pub const GRS80: Ellipsoid = Ellipsoid::from_inverse_flattening(6_378_137.0, 298.257_222_101).named("GRS80");
pub const INTERNATIONAL1924: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_378_388.0, 297.0).named("International 1924");
pub const CLARKE1866: Ellipsoid =
    Ellipsoid::from_semi_minor_axis(6_378_206.4, 6_356_583.8).named("Clarke 1866");
pub const CLARKE1880ARC: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_378_249.145, 293.466_307_656).named("Clarke 1880 (Arc)");
pub const CLARKE1880IGN: Ellipsoid =
    Ellipsoid::from_semi_minor_axis(6_378_249.2, 6_356_515.0).named("Clarke 1880 (IGN)");
pub const CLARKE1880RGS: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_378_249.145, 293.465).named("Clarke 1880 (RGS)");
pub const SPHERE: Ellipsoid = Ellipsoid::from_semi_minor_axis(6_371_000.0, 6_371_000.0).named("Sphere");
pub const BESSEL1841: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_377_397.155, 299.152_812_8).named("Bessel 1841");
pub const KRASSOWSKI: Ellipsoid =
    Ellipsoid::from_inverse_flattening(6_378_245.0, 298.3).named("Krassowski");

/// Name tokens accepted by `ellps`, matched case-sensitively.
static NAMED: &[(&str, &Ellipsoid)] = &[
    ("GRS80", &GRS80),
    ("WGS_1984", &WGS84),
    ("WGS 84", &WGS84),
    ("International_1924", &INTERNATIONAL1924),
    ("clrk66", &CLARKE1866),
    ("clrk80", &CLARKE1880ARC),
    ("Clarke_1880_IGN", &CLARKE1880IGN),
    ("Clarke 1880 (IGN)", &CLARKE1880IGN),
    ("Clarke_1880", &CLARKE1880IGN),
    ("Clarke_1880_RGS", &CLARKE1880RGS),
    ("Clarke 1880 (RGS)", &CLARKE1880RGS),
    ("sphere", &SPHERE),
    ("bessel", &BESSEL1841),
    ("krass", &KRASSOWSKI),
];

/// Registry lookup of a well-known ellipsoid by name token.
pub fn lookup(name: &str) -> Result<&'static Ellipsoid, ResolveError> {
    NAMED
        .iter()
        .find(|(token, _)| *token == name)
        .map(|(_, ell)| *ell)
        .ok_or_else(|| ResolveError::NotFound(format!("ellipsoid {name}")))
}

/// Resolve the ellipsoid described by `params`.
///
/// Order: `ellps` name (unknown names fall back to WGS84), then `a` with `b`
/// or `rf`, then the ellipsoid of a well-known `datum`.
pub fn resolve(params: &ParameterSet) -> Result<Ellipsoid, ResolveError> {
    if let Some(name) = params.get(ParamKey::Ellps) {
        return Ok(match lookup(name) {
            Ok(ell) => *ell,
            Err(_) => {
                tracing::warn!(ellps = name, "Unknown ellipsoid, using default ellipsoid WGS84");
                WGS84
            }
        });
    }

    if let Some(a) = params.get(ParamKey::A) {
        if params.contains(ParamKey::B) || params.contains(ParamKey::Rf) {
            let a = parse_decimal(ParamKey::A, a)?;
            if let Some(b) = params.parse_f64(ParamKey::B)? {
                return Ok(Ellipsoid::from_semi_minor_axis(a, b));
            }
            if let Some(rf) = params.parse_f64(ParamKey::Rf)? {
                return Ok(Ellipsoid::from_inverse_flattening(a, rf));
            }
        }
    }

    if let Some(datum) = params.get(ParamKey::Datum) {
        return match geodetic::lookup(datum) {
            Ok(gd) => Ok(gd.ellipsoid),
            Err(_) => {
                tracing::warn!(datum, "The unknown datum does not define an ellipsoid");
                Err(ResolveError::EllipsoidUndetermined)
            }
        };
    }

    tracing::warn!("No way found to define an ellipsoid");
    Err(ResolveError::EllipsoidUndetermined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_warnings;
    use approx::assert_relative_eq;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_clarke_1880_ign_registry_values() {
        assert_relative_eq!(CLARKE1880IGN.a, 6_378_249.2);
        assert_relative_eq!(CLARKE1880IGN.b, 6_356_515.0);
        assert_relative_eq!(CLARKE1880IGN.inverse_flattening(), 293.466_021_293_626_7, epsilon = 1e-9);
        assert_eq!(CLARKE1880IGN.defining, SecondParameter::SemiMinorAxis(6_356_515.0));
    }

    #[test]
    fn test_bessel_1841_registry_values() {
        assert_relative_eq!(BESSEL1841.a, 6_377_397.155);
        assert_relative_eq!(BESSEL1841.b, 6_356_078.962_818_189, epsilon = 1e-6);
        assert_eq!(BESSEL1841.defining, SecondParameter::InverseFlattening(299.152_812_8));
        assert_eq!(BESSEL1841.name, Some("Bessel 1841"));
    }

    #[test]
    fn test_empty_name_falls_back_to_wgs84() {
        let (ell, logs) = capture_warnings(|| resolve(&params(&[("ellps", "")])));
        assert_eq!(ell.unwrap(), WGS84);
        assert!(logs.contains("Unknown ellipsoid"), "{logs}");

        let flag: ParameterSet = "+ellps +a=6378388 +rf=297".parse().unwrap();
        assert_eq!(resolve(&flag).unwrap(), WGS84);
    }

    #[test]
    fn test_unknown_name_warns() {
        let (ell, logs) = capture_warnings(|| resolve(&params(&[("ellps", "airy")])));
        assert_eq!(ell.unwrap(), WGS84);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("airy"), "{logs}");

        let (_, quiet) = capture_warnings(|| resolve(&params(&[("ellps", "GRS80")])));
        assert!(quiet.is_empty(), "{quiet}");
    }

    #[test]
    fn test_resolve_grs80_by_name_is_stable() {
        let p = params(&[("ellps", "GRS80")]);
        let first = resolve(&p).unwrap();
        let second = resolve(&p).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.name, Some("GRS80"));
        assert_relative_eq!(first.a, 6_378_137.0);
        assert_relative_eq!(first.inverse_flattening(), 298.257_222_101);
    }

    #[test]
    fn test_name_aliases() {
        for alias in ["Clarke_1880_IGN", "Clarke 1880 (IGN)", "Clarke_1880"] {
            assert_eq!(resolve(&params(&[("ellps", alias)])).unwrap(), CLARKE1880IGN);
        }
        assert_eq!(resolve(&params(&[("ellps", "WGS 84")])).unwrap(), WGS84);
        assert_eq!(resolve(&params(&[("ellps", "krass")])).unwrap(), KRASSOWSKI);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(lookup("grs80").is_err());
        // Unknown names fall back to WGS84 rather than failing.
        assert_eq!(resolve(&params(&[("ellps", "grs80")])).unwrap(), WGS84);
    }

    #[test]
    fn test_derived_from_semi_minor_axis_wins_over_rf() {
        let ell = resolve(&params(&[("a", "6378249.2"), ("b", "6356515"), ("rf", "300")])).unwrap();
        assert!(!ell.is_well_known());
        assert_eq!(ell.defining, SecondParameter::SemiMinorAxis(6_356_515.0));
        assert_relative_eq!(ell.b, 6_356_515.0);
        assert_relative_eq!(ell.f, CLARKE1880IGN.f, epsilon = 1e-15);
    }

    #[test]
    fn test_derived_from_inverse_flattening() {
        let ell = resolve(&params(&[("a", "6378388"), ("rf", "297")])).unwrap();
        assert_eq!(ell.defining, SecondParameter::InverseFlattening(297.0));
        assert_relative_eq!(ell.b, INTERNATIONAL1924.b, epsilon = 1e-6);
    }

    #[test]
    fn test_semi_major_alone_is_not_enough() {
        assert_eq!(
            resolve(&params(&[("a", "6378137")])),
            Err(ResolveError::EllipsoidUndetermined)
        );
    }

    #[test]
    fn test_non_numeric_axis_is_a_parse_failure() {
        let err = resolve(&params(&[("a", "big"), ("rf", "297")])).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { key: ParamKey::A, .. }));
    }

    #[test]
    fn test_ellipsoid_from_well_known_datum() {
        let ell = resolve(&params(&[("datum", "ED50")])).unwrap();
        assert_eq!(ell, INTERNATIONAL1924);
    }

    #[test]
    fn test_unknown_datum_leaves_ellipsoid_undetermined() {
        assert_eq!(
            resolve(&params(&[("datum", "Potsdam")])),
            Err(ResolveError::EllipsoidUndetermined)
        );
        assert_eq!(resolve(&params(&[])), Err(ResolveError::EllipsoidUndetermined));
    }

    #[test]
    fn test_sphere_has_no_flattening() {
        assert_eq!(SPHERE.f, 0.0);
        assert_eq!(SPHERE.inverse_flattening(), f64::INFINITY);
    }
}
