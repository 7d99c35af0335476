//! Shift operations from a datum to the WGS84 reference frame (`towgs84`).

use std::fmt;

use crate::error::ResolveError;

/// Default path from a datum to the common reference frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShiftOperation {
    Identity,
    /// Translation in metres.
    GeocentricTranslation { dx: f64, dy: f64, dz: f64 },
    /// Translation in metres, rotations in arc-seconds, scale in ppm.
    BursaWolf {
        dx: f64,
        dy: f64,
        dz: f64,
        rx: f64,
        ry: f64,
        rz: f64,
        ds: f64,
    },
}

impl ShiftOperation {
    /// Classify a `(dx, dy, dz, rx, ry, rz, scale)` vector. Zero tests are exact.
    pub fn classify(v: [f64; 7]) -> Self {
        let mut identity = true;
        let mut translation = true;
        for (i, &x) in v.iter().enumerate() {
            if x != 0.0 {
                identity = false;
                if i > 2 {
                    translation = false;
                }
            }
        }
        if identity {
            Self::Identity
        } else if translation {
            Self::GeocentricTranslation {
                dx: v[0],
                dy: v[1],
                dz: v[2],
            }
        } else {
            Self::BursaWolf {
                dx: v[0],
                dy: v[1],
                dz: v[2],
                rx: v[3],
                ry: v[4],
                rz: v[5],
                ds: v[6],
            }
        }
    }

    /// Parse and classify a `towgs84` value.
    pub fn from_towgs84(s: &str) -> Result<Self, ResolveError> {
        parse_towgs84(s).map(Self::classify)
    }

    /// The 7-parameter vector equivalent of this operation.
    pub fn parameters(&self) -> [f64; 7] {
        match *self {
            Self::Identity => [0.0; 7],
            Self::GeocentricTranslation { dx, dy, dz } => [dx, dy, dz, 0.0, 0.0, 0.0, 0.0],
            Self::BursaWolf {
                dx,
                dy,
                dz,
                rx,
                ry,
                rz,
                ds,
            } => [dx, dy, dz, rx, ry, rz, ds],
        }
    }
}

impl fmt::Display for ShiftOperation {
    /// Renders the shortest `towgs84` list that reproduces the operation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.parameters();
        let used = match self {
            Self::BursaWolf { .. } => &p[..],
            _ => &p[..3],
        };
        let parts: Vec<String> = used.iter().map(|x| x.to_string()).collect();
        f.write_str(&parts.join(","))
    }
}

/// Split a `towgs84` value into exactly seven numbers.
pub fn parse_towgs84(s: &str) -> Result<[f64; 7], ResolveError> {
    let malformed = || ResolveError::ShiftParametersMalformed(s.to_string());
    let tokens: Vec<&str> = s.split(',').collect();
    if tokens.len() != 7 {
        return Err(malformed());
    }
    let mut v = [0.0; 7];
    for (slot, token) in v.iter_mut().zip(tokens) {
        *slot = token.trim().parse::<f64>().map_err(|_| malformed())?;
    }
    Ok(v)
}
