use serde::{Deserialize, Serialize};

use crate::alarm::encode_alarm;
use crate::backend::{Pending, RtcBackend};
use crate::bcd::CalendarRegisters;
use crate::calendar::parse_date_time;
use crate::types::{Alarm, AlarmTime, ClockSource, Format, RtcError, RtcStatus, RtcTime};
use crate::wakeup::WakeupPeriod;

/// Backup register holding the driver's own status word
pub const STATUS_REGISTER: u8 = 19;
/// Backup registers free for the application, `0..BACKUP_LOCATIONS`
pub const BACKUP_LOCATIONS: u8 = 19;

pub const STATUS_INIT_OK: u32 = 0x35AC;
pub const STATUS_TIME_OK: u32 = 0xA3C5;

#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RtcConfig {
    pub clock_source: ClockSource,
    pub async_prediv: u8,
    pub sync_prediv: u16,
}

impl Default for RtcConfig {
    fn default() -> Self {
        // 32768 / (0x1F + 1) / (0x3FF + 1) = 1 Hz
        Self {
            clock_source: ClockSource::default(),
            async_prediv: 0x1F,
            sync_prediv: 0x3FF,
        }
    }
}

/// Callbacks for [`Rtc::service_interrupts`]. Unused ones can be left out.
pub trait RtcHandler {
    fn wakeup(&mut self) {}
    fn alarm_a(&mut self) {}
    fn alarm_b(&mut self) {}
}

pub struct Rtc<B: RtcBackend> {
    backend: B,
    config: RtcConfig,
    status: RtcStatus,
}

impl<B: RtcBackend> Rtc<B> {
    /// Bring up the RTC, keeping the running calendar if the backup domain
    /// says it was configured before.
    pub fn init(mut backend: B, config: RtcConfig) -> Result<Self, RtcError<B::Error>> {
        let status = match backend
            .read_backup(STATUS_REGISTER)
            .map_err(RtcError::Backend)?
        {
            STATUS_TIME_OK => RtcStatus::TimeSet,
            STATUS_INIT_OK => RtcStatus::Initialized,
            _ => RtcStatus::FirstStart,
        };

        match status {
            RtcStatus::FirstStart => {
                backend
                    .configure(config.clock_source, config.async_prediv, config.sync_prediv)
                    .map_err(RtcError::Backend)?;
                backend
                    .write_backup(STATUS_REGISTER, STATUS_INIT_OK)
                    .map_err(RtcError::Backend)?;
            }
            _ => {
                // the LSI does not survive a reset, the LSE does
                if config.clock_source == ClockSource::Internal {
                    backend
                        .configure(config.clock_source, config.async_prediv, config.sync_prediv)
                        .map_err(RtcError::Backend)?;
                }
                // drop anything left over from before the reset
                backend.take_pending().map_err(RtcError::Backend)?;
            }
        }

        log::info!("RTC started: {:?}, {:?}", status, config.clock_source);
        Ok(Self {
            backend,
            config,
            status,
        })
    }

    pub fn status(&self) -> RtcStatus {
        self.status
    }

    pub fn config(&self) -> &RtcConfig {
        &self.config
    }

    pub fn set_date_time(
        &mut self,
        time: &RtcTime,
        format: Format,
    ) -> Result<(), RtcError<B::Error>> {
        let time = match format {
            Format::Bin => *time,
            Format::Bcd => time.from_bcd().ok_or(RtcError::InvalidDateTime)?,
        };
        if !time.is_valid() {
            return Err(RtcError::InvalidDateTime);
        }

        let registers = CalendarRegisters::from_time(&time);
        self.backend
            .write_calendar(registers.tr, registers.dr)
            .map_err(RtcError::Backend)?;
        self.backend
            .write_backup(STATUS_REGISTER, STATUS_TIME_OK)
            .map_err(RtcError::Backend)?;
        self.status = RtcStatus::TimeSet;
        Ok(())
    }

    /// Set from `dd.mm.YY.x;HH:ii:ss`, e.g. `28.02.15.6;23:35:30`
    pub fn set_date_time_str(&mut self, s: &str) -> Result<(), RtcError<B::Error>> {
        let time = parse_date_time(s).ok_or(RtcError::InvalidString)?;
        self.set_date_time(&time, Format::Bin)
    }

    /// Current calendar. `unix` is filled in whatever the format.
    pub fn date_time(&mut self, format: Format) -> Result<RtcTime, RtcError<B::Error>> {
        let registers = self.backend.read_calendar().map_err(RtcError::Backend)?;
        let time = registers.to_time().ok_or(RtcError::InvalidDateTime)?;
        Ok(match format {
            Format::Bin => time,
            Format::Bcd => time.to_bcd(),
        })
    }

    pub fn set_wakeup(&mut self, period: WakeupPeriod) -> Result<(), RtcError<B::Error>> {
        log::debug!("RTC wake-up {:?}", period);
        self.backend
            .set_wakeup(period.counter())
            .map_err(RtcError::Backend)
    }

    pub fn set_alarm(
        &mut self,
        alarm: Alarm,
        time: &AlarmTime,
        format: Format,
    ) -> Result<(), RtcError<B::Error>> {
        let time = match format {
            Format::Bin => *time,
            Format::Bcd => time.from_bcd().ok_or(RtcError::InvalidAlarm)?,
        };
        if !time.is_valid() {
            return Err(RtcError::InvalidAlarm);
        }

        log::debug!("RTC alarm {:?} at {:?}", alarm, time);
        self.backend
            .set_alarm(alarm, Some(encode_alarm(&time)))
            .map_err(RtcError::Backend)
    }

    pub fn disable_alarm(&mut self, alarm: Alarm) -> Result<(), RtcError<B::Error>> {
        self.backend
            .set_alarm(alarm, None)
            .map_err(RtcError::Backend)
    }

    pub fn write_backup(&mut self, location: u8, value: u32) -> Result<(), RtcError<B::Error>> {
        if location >= BACKUP_LOCATIONS {
            return Err(RtcError::InvalidBackupLocation);
        }
        self.backend
            .write_backup(location, value)
            .map_err(RtcError::Backend)
    }

    pub fn read_backup(&mut self, location: u8) -> Result<u32, RtcError<B::Error>> {
        if location >= BACKUP_LOCATIONS {
            return Err(RtcError::InvalidBackupLocation);
        }
        self.backend.read_backup(location).map_err(RtcError::Backend)
    }

    /// Dispatch pending wake-up and alarm interrupts to `handler`
    pub fn service_interrupts<H: RtcHandler>(
        &mut self,
        handler: &mut H,
    ) -> Result<Pending, RtcError<B::Error>> {
        let pending = self.backend.take_pending().map_err(RtcError::Backend)?;
        if pending.wakeup {
            handler.wakeup();
        }
        if pending.alarm_a {
            handler.alarm_a();
        }
        if pending.alarm_b {
            handler.alarm_b();
        }
        Ok(pending)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn release(self) -> B {
        self.backend
    }
}
