#[cfg(test)]
mod tests {
    use crate::{
        Alarm, AlarmTime, AlarmType, ClockSource, Format, Rtc, RtcBackend, RtcConfig, RtcError,
        RtcHandler, RtcStatus, RtcTime, SoftRtc, WakeupPeriod, STATUS_INIT_OK, STATUS_REGISTER,
        STATUS_TIME_OK,
    };
    use core::convert::Infallible;
    use periph_traits::Telemetry;
    use serde_json::json;

    #[derive(Default)]
    struct Counter {
        wakeups: u32,
        alarm_a: u32,
        alarm_b: u32,
    }

    impl RtcHandler for Counter {
        fn wakeup(&mut self) {
            self.wakeups += 1;
        }

        fn alarm_a(&mut self) {
            self.alarm_a += 1;
        }

        fn alarm_b(&mut self) {
            self.alarm_b += 1;
        }
    }

    /// Only cares about wake-ups
    struct Ticker(u32);

    impl RtcHandler for Ticker {
        fn wakeup(&mut self) {
            self.0 += 1;
        }
    }

    fn started() -> Rtc<SoftRtc> {
        let mut rtc = Rtc::init(SoftRtc::new(), RtcConfig::default()).unwrap();
        // Monday 20.10.2014 21:11:00
        rtc.set_date_time_str("20.10.14.1;21:11:00").unwrap();
        rtc
    }

    fn tick(rtc: &mut Rtc<SoftRtc>, ms: u32) {
        rtc.backend_mut().tick(ms);
    }

    #[test]
    fn test_config() {
        let config: RtcConfig =
            serde_json::from_value(json!({ "clock_source": "Internal" })).unwrap();
        assert_eq!(config.clock_source, ClockSource::Internal);
        assert_eq!(config.sync_prediv, 0x3FF);
        assert_eq!(config.async_prediv, 0x1F);
    }

    #[test]
    fn test_init_status() {
        let rtc = Rtc::init(SoftRtc::new(), RtcConfig::default()).unwrap();
        assert_eq!(rtc.status(), RtcStatus::FirstStart);
        assert_eq!(rtc.backend().clock(), Some(ClockSource::External));

        let mut backend = rtc.release();
        assert_eq!(backend.read_backup(STATUS_REGISTER), Ok(STATUS_INIT_OK));

        let mut rtc = Rtc::init(backend, RtcConfig::default()).unwrap();
        assert_eq!(rtc.status(), RtcStatus::Initialized);

        rtc.set_date_time_str("28.02.15.6;23:35:30").unwrap();
        assert_eq!(rtc.status(), RtcStatus::TimeSet);
        let mut backend = rtc.release();
        assert_eq!(backend.read_backup(STATUS_REGISTER), Ok(STATUS_TIME_OK));

        // the calendar keeps counting across a restart
        backend.tick(2000);
        let mut rtc = Rtc::init(backend, RtcConfig::default()).unwrap();
        assert_eq!(rtc.status(), RtcStatus::TimeSet);
        assert_eq!(rtc.date_time(Format::Bin).unwrap().seconds, 32);
    }

    #[test]
    fn test_restart_on_internal_clock() {
        let config = RtcConfig {
            clock_source: ClockSource::Internal,
            ..Default::default()
        };
        let mut rtc = Rtc::init(SoftRtc::new(), config).unwrap();
        assert_eq!(rtc.status(), RtcStatus::FirstStart);
        rtc.set_date_time_str("28.02.15.6;23:35:30").unwrap();
        tick(&mut rtc, 3000);

        let mut backend = rtc.release();
        backend.reset();
        assert_eq!(backend.clock(), None);

        let mut rtc = Rtc::init(backend, config).unwrap();
        assert_eq!(rtc.status(), RtcStatus::TimeSet);
        assert_eq!(rtc.backend().clock(), Some(ClockSource::Internal));

        let t = rtc.date_time(Format::Bin).unwrap();
        assert_eq!((t.date, t.month, t.year), (28, 2, 15));
        assert_eq!((t.hours, t.minutes, t.seconds), (23, 35, 33));

        // running again after the restart
        tick(&mut rtc, 1000);
        assert_eq!(rtc.date_time(Format::Bin).unwrap().seconds, 34);
    }

    #[test]
    fn test_restart_on_external_clock_keeps_running() {
        let mut backend = started().release();
        backend.reset();
        assert_eq!(backend.clock(), Some(ClockSource::External));

        backend.tick(1000);
        let mut rtc = Rtc::init(backend, RtcConfig::default()).unwrap();
        assert_eq!(rtc.status(), RtcStatus::TimeSet);
        assert_eq!(rtc.date_time(Format::Bin).unwrap().seconds, 1);
    }

    #[test]
    fn test_init_drops_stale_interrupts() {
        let mut rtc = started();
        rtc.set_wakeup(WakeupPeriod::S1).unwrap();
        tick(&mut rtc, 1000);

        let mut rtc = Rtc::init(rtc.release(), RtcConfig::default()).unwrap();
        let mut counter = Counter::default();
        assert!(!rtc.service_interrupts(&mut counter).unwrap().any());
        assert_eq!(counter.wakeups, 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut rtc = started();
        tick(&mut rtc, 1500);

        let t = rtc.date_time(Format::Bin).unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (21, 11, 1));
        assert_eq!((t.date, t.month, t.year, t.day), (20, 10, 14, 1));
        assert_eq!(t.unix, 1_413_839_461);
        // halfway through the second
        assert_eq!(t.subseconds, 511);

        let t = rtc.date_time(Format::Bcd).unwrap();
        assert_eq!((t.hours, t.minutes, t.seconds), (0x21, 0x11, 0x01));
        assert_eq!((t.date, t.month, t.year), (0x20, 0x10, 0x14));
        assert_eq!(t.unix, 1_413_839_461);
    }

    #[test]
    fn test_set_bcd() {
        let mut rtc = started();
        let t = RtcTime {
            seconds: 0x55,
            minutes: 0x59,
            hours: 0x00,
            day: 0x06,
            date: 0x30,
            month: 0x06,
            year: 0x14,
            ..Default::default()
        };
        rtc.set_date_time(&t, Format::Bcd).unwrap();

        let t = rtc.date_time(Format::Bin).unwrap();
        assert_eq!((t.date, t.month, t.year), (30, 6, 14));
        assert_eq!((t.hours, t.minutes, t.seconds), (0, 59, 55));
    }

    #[test]
    fn test_invalid_date_time() {
        let mut rtc = started();
        let before = rtc.date_time(Format::Bin).unwrap();

        let t = RtcTime {
            date: 31,
            month: 4,
            ..before
        };
        assert_eq!(
            rtc.set_date_time(&t, Format::Bin),
            Err(RtcError::InvalidDateTime)
        );

        let t = RtcTime {
            seconds: 0x5A,
            ..before.to_bcd()
        };
        assert_eq!(
            rtc.set_date_time(&t, Format::Bcd),
            Err(RtcError::InvalidDateTime)
        );

        assert_eq!(
            rtc.set_date_time_str("Error"),
            Err(RtcError::InvalidString)
        );
        assert_eq!(
            rtc.set_date_time_str("31.02.15.6;23:35:30"),
            Err(RtcError::InvalidDateTime)
        );

        // nothing was written
        assert_eq!(rtc.date_time(Format::Bin).unwrap(), before);
    }

    #[test]
    fn test_backup_registers() {
        let mut rtc = Rtc::init(SoftRtc::new(), RtcConfig::default()).unwrap();
        rtc.write_backup(4, 0x1244).unwrap();
        rtc.write_backup(18, 0xDEAD_BEEF).unwrap();

        let mut rtc = Rtc::init(rtc.release(), RtcConfig::default()).unwrap();
        assert_eq!(rtc.status(), RtcStatus::Initialized);
        assert_eq!(rtc.read_backup(4), Ok(0x1244));
        assert_eq!(rtc.read_backup(18), Ok(0xDEAD_BEEF));
        assert_eq!(rtc.read_backup(0), Ok(0));

        assert_eq!(rtc.write_backup(19, 1), Err(RtcError::InvalidBackupLocation));
        assert_eq!(rtc.read_backup(19), Err(RtcError::InvalidBackupLocation));
        assert_eq!(rtc.read_backup(200), Err(RtcError::InvalidBackupLocation));
        assert_eq!(rtc.status(), RtcStatus::Initialized);
    }

    #[test]
    fn test_wakeup() {
        let mut rtc = started();
        rtc.set_wakeup(WakeupPeriod::S1).unwrap();

        let mut ticker = Ticker(0);
        tick(&mut rtc, 999);
        rtc.service_interrupts(&mut ticker).unwrap();
        assert_eq!(ticker.0, 0);

        tick(&mut rtc, 1);
        rtc.service_interrupts(&mut ticker).unwrap();
        assert_eq!(ticker.0, 1);

        for _ in 0..4 {
            tick(&mut rtc, 1000);
            rtc.service_interrupts(&mut ticker).unwrap();
        }
        assert_eq!(ticker.0, 5);

        rtc.set_wakeup(WakeupPeriod::Disable).unwrap();
        tick(&mut rtc, 5000);
        rtc.service_interrupts(&mut ticker).unwrap();
        assert_eq!(ticker.0, 5);
    }

    #[test]
    fn test_alarms() {
        let mut rtc = started();

        let alarm_a = AlarmTime {
            alarm_type: AlarmType::DayInWeek,
            seconds: 5,
            minutes: 11,
            hours: 21,
            day: 1,
        };
        rtc.set_alarm(Alarm::A, &alarm_a, Format::Bin).unwrap();

        let alarm_b = AlarmTime {
            alarm_type: AlarmType::DayInMonth,
            seconds: 0x10,
            minutes: 0x11,
            hours: 0x21,
            day: 0x20,
        };
        rtc.set_alarm(Alarm::B, &alarm_b, Format::Bcd).unwrap();

        let mut counter = Counter::default();

        tick(&mut rtc, 4000);
        let pending = rtc.service_interrupts(&mut counter).unwrap();
        assert!(!pending.any());

        tick(&mut rtc, 1000);
        let pending = rtc.service_interrupts(&mut counter).unwrap();
        assert!(pending.alarm_a);
        assert!(!pending.alarm_b);

        tick(&mut rtc, 5000);
        rtc.service_interrupts(&mut counter).unwrap();
        assert_eq!((counter.alarm_a, counter.alarm_b), (1, 1));

        // a week later only alarm A comes round again
        tick(&mut rtc, 7 * 24 * 3600 * 1000);
        rtc.service_interrupts(&mut counter).unwrap();
        assert_eq!((counter.alarm_a, counter.alarm_b), (2, 1));
        assert_eq!(counter.wakeups, 0);
    }

    #[test]
    fn test_disable_alarm() {
        let mut rtc = started();
        let alarm = AlarmTime {
            alarm_type: AlarmType::DayInMonth,
            seconds: 1,
            minutes: 11,
            hours: 21,
            day: 20,
        };
        rtc.set_alarm(Alarm::A, &alarm, Format::Bin).unwrap();
        rtc.disable_alarm(Alarm::A).unwrap();

        tick(&mut rtc, 2000);
        let mut counter = Counter::default();
        assert!(!rtc.service_interrupts(&mut counter).unwrap().any());
    }

    #[test]
    fn test_invalid_alarm() {
        let mut rtc = started();
        let alarm = AlarmTime {
            alarm_type: AlarmType::DayInWeek,
            seconds: 0,
            minutes: 0,
            hours: 0,
            day: 9,
        };
        assert_eq!(
            rtc.set_alarm(Alarm::B, &alarm, Format::Bin),
            Err(RtcError::InvalidAlarm)
        );
        assert_eq!(
            rtc.set_alarm(Alarm::B, &AlarmTime { day: 0x0F, ..alarm }, Format::Bcd),
            Err(RtcError::InvalidAlarm)
        );
        assert_eq!(rtc.backend().alarm_register(Alarm::B), None);
    }

    #[test]
    fn test_telemetry() {
        let mut rtc = started();
        let json = rtc.date_time(Format::Bin).unwrap().to_vec().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["unix"], 1_413_839_460u32);
        assert_eq!(value["day"], 1);
    }

    #[test]
    fn test_error_display() {
        let err: RtcError<Infallible> = RtcError::InvalidBackupLocation;
        assert_eq!(err.to_string(), "backup location out of range");
    }
}
