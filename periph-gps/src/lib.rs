#![cfg_attr(not(test), no_std)]

mod convert;
mod geo_math;
mod nmea;
mod reader;
mod types;

pub use convert::{convert_float, convert_speed, GpsFloat, SpeedUnit};
pub use geo_math::{bearing, distance, GpsDistance, EARTH_RADIUS};
pub use nmea::Gps;
pub use reader::GpsReader;
pub use types::*;
