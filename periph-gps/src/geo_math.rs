use core::f64::consts::PI;

use libm::{asin, atan2, cos, fmin, pow, sin, sqrt};
use serde::Serialize;

/// Mean earth radius in metres
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Haversine distance between two points given in radians, in units of `r`
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64, r: f64) -> f64 {
    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let a = pow(sin(dlat / 2.0), 2.0) + cos(lat1) * cos(lat2) * pow(sin(dlon / 2.0), 2.0);

    // rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * asin(sqrt(fmin(a, 1.0)));
    r * c
}

/// Initial bearing from point 1 to point 2, radians in the range 0 to 2 * pi
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dl = lon2 - lon1;
    let x = cos(lat2) * sin(dl);
    let y = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(dl);
    let bearing_rad = atan2(x, y);

    // Normalize bearing to the range 0 to 2 * pi
    (bearing_rad + 2.0 * PI) % (2.0 * PI)
}

/// Two positions in degrees and the great circle between them
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Default)]
pub struct GpsDistance {
    pub latitude1: f64,
    pub longitude1: f64,
    pub latitude2: f64,
    pub longitude2: f64,
    /// Metres
    pub distance: f64,
    /// Degrees clockwise from north, 0 to 360
    pub bearing: f64,
}

impl GpsDistance {
    pub fn between(latitude1: f64, longitude1: f64, latitude2: f64, longitude2: f64) -> Self {
        let mut result = Self {
            latitude1,
            longitude1,
            latitude2,
            longitude2,
            ..Default::default()
        };
        result.calculate();
        result
    }

    /// Refresh `distance` and `bearing` from the two positions
    pub fn calculate(&mut self) {
        let lat1 = self.latitude1.to_radians();
        let lon1 = self.longitude1.to_radians();
        let lat2 = self.latitude2.to_radians();
        let lon2 = self.longitude2.to_radians();

        self.distance = distance(lat1, lon1, lat2, lon2, EARTH_RADIUS);
        self.bearing = if self.distance == 0.0 {
            0.0
        } else {
            bearing(lat1, lon1, lat2, lon2).to_degrees()
        };
    }
}
