use core::fmt;

use crate::bcd::CalendarRegisters;
use crate::types::{Alarm, ClockSource};

/// Interrupt flags raised since the last [`RtcBackend::take_pending`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Pending {
    pub wakeup: bool,
    pub alarm_a: bool,
    pub alarm_b: bool,
}

impl Pending {
    pub fn any(&self) -> bool {
        self.wakeup || self.alarm_a || self.alarm_b
    }
}

/// Register level access to an RTC peripheral and its backup domain.
///
/// Implemented by chip HALs on target and by [`crate::SoftRtc`] on the host.
pub trait RtcBackend {
    type Error: fmt::Debug;

    /// Select the clock source and set the 1 Hz prescalers
    fn configure(
        &mut self,
        source: ClockSource,
        async_prediv: u8,
        sync_prediv: u16,
    ) -> Result<(), Self::Error>;

    fn read_calendar(&mut self) -> Result<CalendarRegisters, Self::Error>;

    /// Load new time and date registers, the sub-second counter restarts
    fn write_calendar(&mut self, tr: u32, dr: u32) -> Result<(), Self::Error>;

    /// `None` stops the wake-up timer
    fn set_wakeup(&mut self, counter: Option<u32>) -> Result<(), Self::Error>;

    /// `None` disables the alarm
    fn set_alarm(&mut self, alarm: Alarm, register: Option<u32>) -> Result<(), Self::Error>;

    fn read_backup(&mut self, index: u8) -> Result<u32, Self::Error>;

    fn write_backup(&mut self, index: u8, value: u32) -> Result<(), Self::Error>;

    /// Return and clear the pending interrupt flags
    fn take_pending(&mut self) -> Result<Pending, Self::Error>;
}
