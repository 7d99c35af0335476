use thiserror::Error;

use crate::params::ParamKey;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Cannot parse {key} value '{value}'")]
    Parse { key: ParamKey, value: String },

    #[error("Malformed towgs84 parameters '{0}': expected 7 comma-separated numbers")]
    ShiftParametersMalformed(String),

    #[error("Prime meridian '{0}' is not parsable")]
    PrimeMeridianUnparseable(String),

    #[error("No way found to define an ellipsoid")]
    EllipsoidUndetermined,

    #[error("No datum definition: {0}")]
    DatumUndetermined(String),

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Missing required key: {0}")]
    MissingRequiredKey(ParamKey),

    #[error("Not found in registry: {0}")]
    NotFound(String),

    #[error("Projection provider rejected '{definition}': {reason}")]
    Provider { definition: String, reason: String },
}

impl ResolveError {
    /// Soft failures: not enough information, recoverable where a default exists.
    pub fn is_undetermined(&self) -> bool {
        matches!(
            self,
            Self::EllipsoidUndetermined
                | Self::PrimeMeridianUnparseable(_)
                | Self::DatumUndetermined(_)
        )
    }
}
