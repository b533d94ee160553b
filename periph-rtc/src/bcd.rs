//! Binary coded decimal and the calendar register layout.

use crate::calendar::unix_timestamp;
use crate::types::{AlarmTime, RtcTime};

/// Two digit BCD, `value` must be below 100
pub fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// `None` when either nibble is not a decimal digit
pub fn from_bcd(value: u8) -> Option<u8> {
    let (tens, units) = (value >> 4, value & 0x0F);
    if tens > 9 || units > 9 {
        return None;
    }
    Some(tens * 10 + units)
}

impl RtcTime {
    /// Calendar fields as BCD. `subseconds` and `unix` are copied as is.
    pub fn to_bcd(&self) -> Self {
        Self {
            seconds: to_bcd(self.seconds),
            minutes: to_bcd(self.minutes),
            hours: to_bcd(self.hours),
            day: to_bcd(self.day),
            date: to_bcd(self.date),
            month: to_bcd(self.month),
            year: to_bcd(self.year),
            ..*self
        }
    }

    pub fn from_bcd(&self) -> Option<Self> {
        Some(Self {
            seconds: from_bcd(self.seconds)?,
            minutes: from_bcd(self.minutes)?,
            hours: from_bcd(self.hours)?,
            day: from_bcd(self.day)?,
            date: from_bcd(self.date)?,
            month: from_bcd(self.month)?,
            year: from_bcd(self.year)?,
            ..*self
        })
    }
}

impl AlarmTime {
    pub fn to_bcd(&self) -> Self {
        Self {
            seconds: to_bcd(self.seconds),
            minutes: to_bcd(self.minutes),
            hours: to_bcd(self.hours),
            day: to_bcd(self.day),
            ..*self
        }
    }

    pub fn from_bcd(&self) -> Option<Self> {
        Some(Self {
            seconds: from_bcd(self.seconds)?,
            minutes: from_bcd(self.minutes)?,
            hours: from_bcd(self.hours)?,
            day: from_bcd(self.day)?,
            ..*self
        })
    }
}

// time register
const TR_HOURS_SHIFT: u32 = 16;
const TR_MINUTES_SHIFT: u32 = 8;
const TR_HOURS_MASK: u32 = 0x3F;
const TR_MINUTES_MASK: u32 = 0x7F;
const TR_SECONDS_MASK: u32 = 0x7F;

// date register
const DR_YEAR_SHIFT: u32 = 16;
const DR_WEEKDAY_SHIFT: u32 = 13;
const DR_MONTH_SHIFT: u32 = 8;
const DR_WEEKDAY_MASK: u32 = 0x07;
const DR_MONTH_MASK: u32 = 0x1F;
const DR_DATE_MASK: u32 = 0x3F;

/// Shadow copies of the STM32 `RTC_TR`, `RTC_DR` and `RTC_SSR` registers.
///
/// Time and date are stored in BCD, 24 hour format (PM bit clear).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CalendarRegisters {
    pub tr: u32,
    pub dr: u32,
    pub ssr: u32,
}

impl CalendarRegisters {
    /// Pack a binary format time. `subseconds` is taken as the SSR value.
    pub fn from_time(time: &RtcTime) -> Self {
        let tr = (to_bcd(time.hours) as u32) << TR_HOURS_SHIFT
            | (to_bcd(time.minutes) as u32) << TR_MINUTES_SHIFT
            | to_bcd(time.seconds) as u32;
        let dr = (to_bcd(time.year) as u32) << DR_YEAR_SHIFT
            | (time.day as u32 & DR_WEEKDAY_MASK) << DR_WEEKDAY_SHIFT
            | (to_bcd(time.month) as u32) << DR_MONTH_SHIFT
            | to_bcd(time.date) as u32;

        Self {
            tr,
            dr,
            ssr: time.subseconds as u32,
        }
    }

    /// Unpack into a binary format time with `unix` filled in.
    ///
    /// `None` when a field does not hold valid BCD.
    pub fn to_time(&self) -> Option<RtcTime> {
        let mut time = RtcTime {
            seconds: from_bcd((self.tr & TR_SECONDS_MASK) as u8)?,
            subseconds: self.ssr as u16,
            minutes: from_bcd((self.tr >> TR_MINUTES_SHIFT & TR_MINUTES_MASK) as u8)?,
            hours: from_bcd((self.tr >> TR_HOURS_SHIFT & TR_HOURS_MASK) as u8)?,
            day: (self.dr >> DR_WEEKDAY_SHIFT & DR_WEEKDAY_MASK) as u8,
            date: from_bcd((self.dr & DR_DATE_MASK) as u8)?,
            month: from_bcd((self.dr >> DR_MONTH_SHIFT & DR_MONTH_MASK) as u8)?,
            year: from_bcd((self.dr >> DR_YEAR_SHIFT) as u8)?,
            unix: 0,
        };
        time.unix = unix_timestamp(&time);
        Some(time)
    }
}
