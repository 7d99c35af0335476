//! Geodetic building blocks: ellipsoids, prime meridians, datum shifts and datums.

pub mod ellipsoid;
pub mod geodetic;
pub mod meridian;
pub mod shift;

pub use ellipsoid::Ellipsoid;
pub use geodetic::GeodeticDatum;
pub use meridian::PrimeMeridian;
pub use shift::ShiftOperation;
