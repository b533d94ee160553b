use core::fmt;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum number of user registered custom terms
pub const MAX_CUSTOM_STATEMENTS: usize = 10;
pub const CUSTOM_STATEMENT_LEN: usize = 8;
pub const CUSTOM_VALUE_LEN: usize = 15;

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum GpsResult {
    /// A complete set of statements was received since the last read
    NewData,
    /// Nothing new since the last complete set
    OldData,
    /// No complete set received since power up
    #[default]
    FirstDataWaiting,
}

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub struct GpsDate {
    pub date: u8,
    pub month: u8,
    /// Last two digits
    pub year: u8,
}

#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub struct GpsTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub hundredths: u8,
}

/// A single term of a sentence the user asked to capture verbatim.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct CustomStatement {
    /// Sentence name including the leading `$`, e.g. `$GPRMC`
    pub statement: String<CUSTOM_STATEMENT_LEN>,
    pub term_number: u8,
    pub value: String<CUSTOM_VALUE_LEN>,
    /// Set when `value` arrived as part of the latest complete set
    pub updated: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct GpsData {
    // GGA
    pub latitude: f64,
    pub longitude: f64,
    pub satellites: u8,
    pub fix: u8,
    pub altitude: f64,
    pub time: GpsTime,

    // RMC
    pub date: GpsDate,
    /// Knots
    pub speed: f64,
    pub validity: bool,
    pub direction: f64,

    // GSA
    pub hdop: f64,
    pub pdop: f64,
    pub vdop: f64,
    pub fix_mode: u8,
    pub satellite_ids: [u8; 12],

    // GSV
    pub satellites_in_view: u8,

    pub custom: Vec<CustomStatement, MAX_CUSTOM_STATEMENTS>,

    pub status: GpsResult,
}

/// Statements which must all arrive before a record counts as new.
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GpsConfig {
    pub gga: bool,
    pub rmc: bool,
    pub gsa: bool,
    pub gsv: bool,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            gga: true,
            rmc: true,
            gsa: true,
            gsv: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpsError {
    /// All custom statement slots are in use
    TooManyCustom,
    /// Statement name or term number can't be matched against a sentence
    InvalidCustom,
    /// The byte source reported an error
    Read,
    /// The byte source has no more data
    EndOfStream,
}

impl fmt::Display for GpsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpsError::TooManyCustom => write!(f, "no free custom statement slot"),
            GpsError::InvalidCustom => write!(f, "invalid custom statement"),
            GpsError::Read => write!(f, "GPS read error"),
            GpsError::EndOfStream => write!(f, "GPS stream ended"),
        }
    }
}
