use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    // Metric
    KilometerPerSecond,
    MeterPerSecond,
    #[default]
    KilometerPerHour,
    MeterPerMinute,

    // Imperial
    MilePerSecond,
    MilePerHour,
    FootPerSecond,
    FootPerMinute,

    // Pace, for runners and joggers
    MinutePerKilometer,
    SecondPerKilometer,
    SecondPer100Meters,
    MinutePerMile,
    SecondPerMile,
    SecondPer100Yards,

    // Nautical
    SeaMilePerHour,
}

impl SpeedUnit {
    /// Pace units are time per distance, so they scale inversely with speed
    pub fn is_pace(self) -> bool {
        matches!(
            self,
            SpeedUnit::MinutePerKilometer
                | SpeedUnit::SecondPerKilometer
                | SpeedUnit::SecondPer100Meters
                | SpeedUnit::MinutePerMile
                | SpeedUnit::SecondPerMile
                | SpeedUnit::SecondPer100Yards
        )
    }

    fn factor(self) -> f64 {
        match self {
            SpeedUnit::KilometerPerSecond => 0.000514,
            SpeedUnit::MeterPerSecond => 0.5144,
            SpeedUnit::KilometerPerHour => 1.852,
            SpeedUnit::MeterPerMinute => 30.87,

            SpeedUnit::MilePerSecond => 0.0003197,
            SpeedUnit::MilePerHour => 1.151,
            SpeedUnit::FootPerSecond => 1.688,
            SpeedUnit::FootPerMinute => 101.3,

            // value at 1 knot
            SpeedUnit::MinutePerKilometer => 32.4,
            SpeedUnit::SecondPerKilometer => 1944.0,
            SpeedUnit::SecondPer100Meters => 194.4,
            SpeedUnit::MinutePerMile => 52.14,
            SpeedUnit::SecondPerMile => 3128.0,
            SpeedUnit::SecondPer100Yards => 177.7,

            SpeedUnit::SeaMilePerHour => 1.0,
        }
    }
}

/// Convert a speed over ground in knots into `unit`.
///
/// Pace units go to infinity when standing still.
pub fn convert_speed(knots: f64, unit: SpeedUnit) -> f64 {
    if unit.is_pace() {
        if knots <= 0.0 {
            return f64::INFINITY;
        }
        unit.factor() / knots
    } else {
        knots * unit.factor()
    }
}

/// A number split for printing without float formatting support
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub struct GpsFloat {
    pub integer: i32,
    pub decimal: u32,
}

/// Split `num` into integer and `decimals` fractional digits (at most 9).
///
/// The fractional digits are always positive: -1.25 with 2 decimals gives
/// integer -1, decimal 25.
pub fn convert_float(num: f64, decimals: u8) -> GpsFloat {
    let decimals = decimals.min(9);
    let integer = num as i32;
    let fraction = libm::fabs(num - integer as f64);
    let decimal = (fraction * libm::pow(10.0, decimals as f64)) as u32;

    GpsFloat { integer, decimal }
}
