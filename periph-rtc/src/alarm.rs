use crate::bcd::{from_bcd, to_bcd};
use crate::types::{AlarmTime, AlarmType, RtcTime};

// RTC_ALRMxR layout, mask bits stay clear so every field takes part
const WDSEL: u32 = 1 << 30;
const DAY_SHIFT: u32 = 24;
const HOURS_SHIFT: u32 = 16;
const MINUTES_SHIFT: u32 = 8;
const DAY_MASK: u32 = 0x3F;
const HOURS_MASK: u32 = 0x3F;
const MINUTES_MASK: u32 = 0x7F;
const SECONDS_MASK: u32 = 0x7F;

impl AlarmTime {
    /// Range check of a binary format alarm
    pub fn is_valid(&self) -> bool {
        let day_range = match self.alarm_type {
            AlarmType::DayInWeek => 1..=7,
            AlarmType::DayInMonth => 1..=31,
        };
        self.seconds < 60 && self.minutes < 60 && self.hours < 24 && day_range.contains(&self.day)
    }

    /// Whether the alarm fires at `now`, both in binary format
    pub fn matches(&self, now: &RtcTime) -> bool {
        let day = match self.alarm_type {
            AlarmType::DayInWeek => now.day,
            AlarmType::DayInMonth => now.date,
        };
        self.seconds == now.seconds
            && self.minutes == now.minutes
            && self.hours == now.hours
            && self.day == day
    }
}

/// Pack a valid binary format alarm into an alarm register word
pub fn encode_alarm(alarm: &AlarmTime) -> u32 {
    let wdsel = match alarm.alarm_type {
        AlarmType::DayInWeek => WDSEL,
        AlarmType::DayInMonth => 0,
    };
    wdsel
        | (to_bcd(alarm.day) as u32) << DAY_SHIFT
        | (to_bcd(alarm.hours) as u32) << HOURS_SHIFT
        | (to_bcd(alarm.minutes) as u32) << MINUTES_SHIFT
        | to_bcd(alarm.seconds) as u32
}

/// Unpack an alarm register word, `None` when a field is not BCD
pub fn decode_alarm(word: u32) -> Option<AlarmTime> {
    let alarm_type = if word & WDSEL != 0 {
        AlarmType::DayInWeek
    } else {
        AlarmType::DayInMonth
    };
    Some(AlarmTime {
        alarm_type,
        seconds: from_bcd((word & SECONDS_MASK) as u8)?,
        minutes: from_bcd((word >> MINUTES_SHIFT & MINUTES_MASK) as u8)?,
        hours: from_bcd((word >> HOURS_SHIFT & HOURS_MASK) as u8)?,
        day: from_bcd((word >> DAY_SHIFT & DAY_MASK) as u8)?,
    })
}
