//! Proj4-style parameter vocabulary and the immutable key/value set resolvers read from.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::error::ResolveError;

/// The fixed key vocabulary understood by the resolvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Proj,
    Units,
    ToMeter,
    Datum,
    Ellps,
    A,
    B,
    Rf,
    Pm,
    Towgs84,
    Nadgrids,
    Lat0,
    Lat1,
    Lat2,
    Lon0,
    K0,
    X0,
    Y0,
    Zone,
    South,
    Title,
}

impl ParamKey {
    pub const ALL: [ParamKey; 21] = [
        Self::Proj,
        Self::Units,
        Self::ToMeter,
        Self::Datum,
        Self::Ellps,
        Self::A,
        Self::B,
        Self::Rf,
        Self::Pm,
        Self::Towgs84,
        Self::Nadgrids,
        Self::Lat0,
        Self::Lat1,
        Self::Lat2,
        Self::Lon0,
        Self::K0,
        Self::X0,
        Self::Y0,
        Self::Zone,
        Self::South,
        Self::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proj => "proj",
            Self::Units => "units",
            Self::ToMeter => "to_meter",
            Self::Datum => "datum",
            Self::Ellps => "ellps",
            Self::A => "a",
            Self::B => "b",
            Self::Rf => "rf",
            Self::Pm => "pm",
            Self::Towgs84 => "towgs84",
            Self::Nadgrids => "nadgrids",
            Self::Lat0 => "lat_0",
            Self::Lat1 => "lat_1",
            Self::Lat2 => "lat_2",
            Self::Lon0 => "lon_0",
            Self::K0 => "k_0",
            Self::X0 => "x_0",
            Self::Y0 => "y_0",
            Self::Zone => "zone",
            Self::South => "south",
            Self::Title => "title",
        }
    }

    /// Look up a key by its token. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable mapping from parameter keys to their raw string values.
///
/// Flag keys such as `south` are stored with an empty value; only their
/// presence matters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSet {
    values: BTreeMap<ParamKey, String>,
}

impl ParameterSet {
    /// Build a set from raw key/value pairs. Keys outside the vocabulary are
    /// skipped; the first occurrence of a key wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut values = BTreeMap::new();
        for (k, v) in pairs {
            match ParamKey::from_token(k.as_ref()) {
                Some(key) => {
                    values.entry(key).or_insert_with(|| v.into());
                }
                None => tracing::debug!(key = k.as_ref(), "Ignoring unsupported parameter"),
            }
        }
        Self { values }
    }

    pub fn get(&self, key: ParamKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: ParamKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Parse a decimal value if the key is present.
    pub fn parse_f64(&self, key: ParamKey) -> Result<Option<f64>, ResolveError> {
        self.get(key).map(|v| parse_decimal(key, v)).transpose()
    }

    /// Parse a decimal value, falling back to `default` when the key is absent.
    pub fn f64_or(&self, key: ParamKey, default: f64) -> Result<f64, ResolveError> {
        Ok(self.parse_f64(key)?.unwrap_or(default))
    }

    /// Parse an integer value if the key is present.
    pub fn parse_i32(&self, key: ParamKey) -> Result<Option<i32>, ResolveError> {
        self.get(key)
            .map(|v| {
                v.trim().parse::<i32>().map_err(|_| ResolveError::Parse {
                    key,
                    value: v.to_string(),
                })
            })
            .transpose()
    }
}

pub(crate) fn parse_decimal(key: ParamKey, value: &str) -> Result<f64, ResolveError> {
    value.trim().parse::<f64>().map_err(|_| ResolveError::Parse {
        key,
        value: value.to_string(),
    })
}

impl FromStr for ParameterSet {
    type Err = Infallible;

    /// Parse a definition such as `+proj=utm +zone=31 +south +datum=WGS84`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pairs = s.split_whitespace().filter_map(|token| {
            let token = token.strip_prefix('+').unwrap_or(token);
            if token.is_empty() {
                return None;
            }
            Some(match token.split_once('=') {
                Some((k, v)) => (k, v),
                None => (token, ""),
            })
        });
        Ok(Self::from_pairs(pairs))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
