use core::fmt;

use serde::{Deserialize, Serialize};

/// Calendar snapshot.
///
/// Every field except `subseconds` and `unix` follows the selected
/// [`Format`], so a BCD reading of 23 hours is `0x23`.
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub struct RtcTime {
    pub seconds: u8,
    /// Synchronous prescaler down-counter, counts towards zero within each second
    pub subseconds: u16,
    pub minutes: u8,
    /// 24 hour clock
    pub hours: u8,
    /// Day of week, 1 = Monday to 7 = Sunday
    pub day: u8,
    /// Day of month, 1 to 31
    pub date: u8,
    pub month: u8,
    /// 0 to 99 for 2000 to 2099
    pub year: u8,
    /// Seconds since 1970-01-01 00:00:00
    pub unix: u32,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Bin,
    Bcd,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// LSI, not very accurate
    Internal,
    /// 32768 Hz LSE crystal
    #[default]
    External,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub enum AlarmType {
    /// `day` is the day of week, 1 to 7
    DayInWeek,
    /// `day` is the day of month, 1 to 31
    DayInMonth,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub enum Alarm {
    A,
    B,
}

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
pub struct AlarmTime {
    pub alarm_type: AlarmType,
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day: u8,
}

/// What [`crate::Rtc::init`] found in the backup domain
#[derive(Debug, Serialize, Copy, Clone, PartialEq, Eq)]
pub enum RtcStatus {
    /// Backup domain was empty, the clock has just been configured
    FirstStart,
    /// Configured on an earlier start, time never set
    Initialized,
    /// Configured and the time has been set
    TimeSet,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RtcError<E> {
    InvalidDateTime,
    InvalidAlarm,
    /// Not in `dd.mm.YY.x;HH:ii:ss` form
    InvalidString,
    /// Only 0 to 18 are available
    InvalidBackupLocation,
    Backend(E),
}

impl<E: fmt::Debug> fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::InvalidDateTime => write!(f, "invalid date or time"),
            RtcError::InvalidAlarm => write!(f, "invalid alarm time"),
            RtcError::InvalidString => write!(f, "date time string is not dd.mm.YY.x;HH:ii:ss"),
            RtcError::InvalidBackupLocation => write!(f, "backup location out of range"),
            RtcError::Backend(e) => write!(f, "RTC backend error: {:?}", e),
        }
    }
}
