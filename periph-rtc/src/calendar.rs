//! Gregorian calendar helpers for the 2000 to 2099 range the RTC covers.

use crate::types::RtcTime;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const UNIX_EPOCH_YEAR: u16 = 1970;
const CENTURY: u16 = 2000;

const SECONDS_PER_MINUTE: u32 = 60;
const SECONDS_PER_HOUR: u32 = 3600;
const SECONDS_PER_DAY: u32 = 86400;

/// 1970-01-01 was a Thursday
const EPOCH_WEEKDAY_OFFSET: u32 = 3;

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in `month` (1 to 12) of 20`year`, 0 for an invalid month
pub fn days_in_month(month: u8, year: u8) -> u8 {
    match month {
        2 if is_leap_year(CENTURY + year as u16) => 29,
        1..=12 => DAYS_IN_MONTH[usize::from(month - 1)],
        _ => 0,
    }
}

pub fn days_in_year(year: u8) -> u16 {
    full_year_days(CENTURY + year as u16)
}

fn full_year_days(year: u16) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Seconds since the unix epoch for a binary format time.
///
/// Only the calendar fields are used, `day` and `unix` are ignored.
pub fn unix_timestamp(time: &RtcTime) -> u32 {
    let year = CENTURY + time.year as u16;

    let mut days: u32 = (UNIX_EPOCH_YEAR..year)
        .map(|y| full_year_days(y) as u32)
        .sum();
    days += (1..time.month.min(13))
        .map(|m| days_in_month(m, time.year) as u32)
        .sum::<u32>();
    days += time.date.saturating_sub(1) as u32;

    days * SECONDS_PER_DAY
        + time.hours as u32 * SECONDS_PER_HOUR
        + time.minutes as u32 * SECONDS_PER_MINUTE
        + time.seconds as u32
}

impl RtcTime {
    /// Binary format time for `unix`, or `None` outside 2000 to 2099.
    pub fn from_unix(unix: u32) -> Option<Self> {
        let mut days = unix / SECONDS_PER_DAY;
        let rem = unix % SECONDS_PER_DAY;

        let day = ((days + EPOCH_WEEKDAY_OFFSET) % 7) as u8 + 1;

        let mut year = UNIX_EPOCH_YEAR;
        while days >= full_year_days(year) as u32 {
            days -= full_year_days(year) as u32;
            year += 1;
        }
        if !(CENTURY..CENTURY + 100).contains(&year) {
            return None;
        }
        let year = (year - CENTURY) as u8;

        let mut month = 1;
        while days >= days_in_month(month, year) as u32 {
            days -= days_in_month(month, year) as u32;
            month += 1;
        }

        Some(Self {
            seconds: (rem % SECONDS_PER_MINUTE) as u8,
            subseconds: 0,
            minutes: ((rem % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
            hours: (rem / SECONDS_PER_HOUR) as u8,
            day,
            date: days as u8 + 1,
            month,
            year,
            unix,
        })
    }

    /// Range check of a binary format time
    pub fn is_valid(&self) -> bool {
        self.seconds < 60
            && self.minutes < 60
            && self.hours < 24
            && (1..=7).contains(&self.day)
            && (1..=12).contains(&self.month)
            && self.year < 100
            && self.date >= 1
            && self.date <= days_in_month(self.month, self.year)
    }
}

fn field(part: Option<&str>) -> Option<u8> {
    let part = part?;
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse `dd.mm.YY.x;HH:ii:ss` (`x` is the day of week) into a binary time.
///
/// Surrounding whitespace is ignored. Ranges are not checked here.
pub fn parse_date_time(s: &str) -> Option<RtcTime> {
    let (date_part, time_part) = s.trim().split_once(';')?;

    let mut date_fields = date_part.split('.');
    let date = field(date_fields.next())?;
    let month = field(date_fields.next())?;
    let year = field(date_fields.next())?;
    let day = field(date_fields.next())?;
    if date_fields.next().is_some() {
        return None;
    }

    let mut time_fields = time_part.split(':');
    let hours = field(time_fields.next())?;
    let minutes = field(time_fields.next())?;
    let seconds = field(time_fields.next())?;
    if time_fields.next().is_some() {
        return None;
    }

    let mut time = RtcTime {
        seconds,
        subseconds: 0,
        minutes,
        hours,
        day,
        date,
        month,
        year,
        unix: 0,
    };
    time.unix = unix_timestamp(&time);
    Some(time)
}
