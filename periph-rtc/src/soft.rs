use core::convert::Infallible;

use crate::alarm::decode_alarm;
use crate::backend::{Pending, RtcBackend};
use crate::bcd::CalendarRegisters;
use crate::calendar::days_in_month;
use crate::types::{Alarm, ClockSource, RtcTime};
use crate::wakeup::{counter_to_ms, WAKEUP_CLOCK_HZ};

pub const BACKUP_REGISTERS: usize = 20;

/// RTC peripheral simulated in memory, advanced with [`SoftRtc::tick`].
///
/// The calendar only runs once a clock source has been configured. Backup
/// registers start zeroed like a freshly powered backup domain.
#[derive(Debug, Clone)]
pub struct SoftRtc {
    clock: Option<ClockSource>,
    sync_prediv: u16,

    // binary format, seconds resolution plus `millis`
    now: RtcTime,
    millis: u32,

    backup: [u32; BACKUP_REGISTERS],

    // wake-up clock ticks scaled by 1000, so whole milliseconds add up exactly
    wakeup_period: Option<u64>,
    wakeup_elapsed: u64,
    wakeup_counter: Option<u32>,
    alarms: [Option<u32>; 2],

    pending: Pending,
}

impl Default for SoftRtc {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftRtc {
    pub fn new() -> Self {
        Self {
            clock: None,
            sync_prediv: 0,
            now: RtcTime {
                day: 6,
                date: 1,
                month: 1,
                ..Default::default()
            },
            millis: 0,
            backup: [0; BACKUP_REGISTERS],
            wakeup_period: None,
            wakeup_elapsed: 0,
            wakeup_counter: None,
            alarms: [None; 2],
            pending: Pending::default(),
        }
    }

    /// Clock source selected by the last `configure`, `None` while stopped
    pub fn clock(&self) -> Option<ClockSource> {
        self.clock
    }

    /// Wake-up interval rounded down to whole milliseconds
    pub fn wakeup_ms(&self) -> Option<u32> {
        self.wakeup_counter.map(counter_to_ms)
    }

    pub fn alarm_register(&self, alarm: Alarm) -> Option<u32> {
        self.alarms[alarm_index(alarm)]
    }

    /// Flags raised and not yet taken
    pub fn pending(&self) -> Pending {
        self.pending
    }

    /// System reset. The LSI stops and has to be configured again, the LSE
    /// and the backup domain keep running.
    pub fn reset(&mut self) {
        if self.clock == Some(ClockSource::Internal) {
            self.clock = None;
        }
    }

    /// Let `ms` milliseconds of RTC clock pass.
    pub fn tick(&mut self, ms: u32) {
        if self.clock.is_none() {
            return;
        }

        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(1000 - self.millis);
            remaining -= step;
            self.millis += step;

            if let Some(period) = self.wakeup_period {
                self.wakeup_elapsed += step as u64 * WAKEUP_CLOCK_HZ as u64;
                if self.wakeup_elapsed >= period {
                    self.wakeup_elapsed %= period;
                    self.pending.wakeup = true;
                }
            }

            if self.millis == 1000 {
                self.millis = 0;
                self.next_second();
                self.check_alarms();
            }
        }
    }

    fn next_second(&mut self) {
        let now = &mut self.now;
        now.seconds += 1;
        if now.seconds < 60 {
            return;
        }
        now.seconds = 0;
        now.minutes += 1;
        if now.minutes < 60 {
            return;
        }
        now.minutes = 0;
        now.hours += 1;
        if now.hours < 24 {
            return;
        }
        now.hours = 0;

        now.day = now.day % 7 + 1;
        now.date += 1;
        if now.date > days_in_month(now.month, now.year) {
            now.date = 1;
            now.month += 1;
            if now.month > 12 {
                now.month = 1;
                now.year = (now.year + 1) % 100;
            }
        }
    }

    fn check_alarms(&mut self) {
        for (i, register) in self.alarms.iter().enumerate() {
            let fired = register
                .and_then(decode_alarm)
                .is_some_and(|alarm| alarm.matches(&self.now));
            if fired {
                match i {
                    0 => self.pending.alarm_a = true,
                    _ => self.pending.alarm_b = true,
                }
            }
        }
    }

    fn subseconds(&self) -> u32 {
        let sync = self.sync_prediv as u32;
        sync - self.millis * (sync + 1) / 1000
    }
}

fn alarm_index(alarm: Alarm) -> usize {
    match alarm {
        Alarm::A => 0,
        Alarm::B => 1,
    }
}

impl RtcBackend for SoftRtc {
    type Error = Infallible;

    fn configure(
        &mut self,
        source: ClockSource,
        _async_prediv: u8,
        sync_prediv: u16,
    ) -> Result<(), Self::Error> {
        self.clock = Some(source);
        self.sync_prediv = sync_prediv;
        Ok(())
    }

    fn read_calendar(&mut self) -> Result<CalendarRegisters, Self::Error> {
        let mut registers = CalendarRegisters::from_time(&self.now);
        registers.ssr = self.subseconds();
        Ok(registers)
    }

    fn write_calendar(&mut self, tr: u32, dr: u32) -> Result<(), Self::Error> {
        let registers = CalendarRegisters { tr, dr, ssr: 0 };
        match registers.to_time() {
            Some(time) => {
                self.now = time;
                self.millis = 0;
            }
            None => log::debug!("ignoring calendar write {:#010x} {:#010x}", tr, dr),
        }
        Ok(())
    }

    fn set_wakeup(&mut self, counter: Option<u32>) -> Result<(), Self::Error> {
        self.wakeup_counter = counter;
        self.wakeup_period = counter.map(|c| (c as u64 + 1) * 1000);
        self.wakeup_elapsed = 0;
        self.pending.wakeup = false;
        Ok(())
    }

    fn set_alarm(&mut self, alarm: Alarm, register: Option<u32>) -> Result<(), Self::Error> {
        self.alarms[alarm_index(alarm)] = register;
        match alarm {
            Alarm::A => self.pending.alarm_a = false,
            Alarm::B => self.pending.alarm_b = false,
        }
        Ok(())
    }

    fn read_backup(&mut self, index: u8) -> Result<u32, Self::Error> {
        Ok(self.backup.get(index as usize).copied().unwrap_or(0))
    }

    fn write_backup(&mut self, index: u8, value: u32) -> Result<(), Self::Error> {
        if let Some(slot) = self.backup.get_mut(index as usize) {
            *slot = value;
        }
        Ok(())
    }

    fn take_pending(&mut self) -> Result<Pending, Self::Error> {
        Ok(core::mem::take(&mut self.pending))
    }
}
