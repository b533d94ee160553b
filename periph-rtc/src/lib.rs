#![cfg_attr(not(test), no_std)]

mod alarm;
mod backend;
pub mod bcd;
pub mod calendar;
mod driver;
mod soft;
mod types;
mod wakeup;

pub use alarm::{decode_alarm, encode_alarm};
pub use backend::{Pending, RtcBackend};
pub use bcd::CalendarRegisters;
pub use calendar::{days_in_month, days_in_year, is_leap_year, parse_date_time, unix_timestamp};
pub use driver::{
    Rtc, RtcConfig, RtcHandler, BACKUP_LOCATIONS, STATUS_INIT_OK, STATUS_REGISTER, STATUS_TIME_OK,
};
pub use soft::SoftRtc;
pub use types::*;
pub use wakeup::WakeupPeriod;

#[cfg(test)]
mod calendar_tests;
#[cfg(test)]
mod driver_tests;
