#[cfg(test)]
mod tests {
    use crate::bcd::{from_bcd, to_bcd};
    use crate::wakeup::counter_to_ms;
    use crate::{
        days_in_month, days_in_year, decode_alarm, encode_alarm, is_leap_year, parse_date_time,
        unix_timestamp, AlarmTime, AlarmType, CalendarRegisters, RtcTime, WakeupPeriod,
    };
    use serde_json::json;

    fn time(date: u8, month: u8, year: u8, day: u8, hours: u8, minutes: u8, seconds: u8) -> RtcTime {
        RtcTime {
            seconds,
            subseconds: 0,
            minutes,
            hours,
            day,
            date,
            month,
            year,
            unix: 0,
        }
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));

        assert_eq!(days_in_month(2, 16), 29);
        assert_eq!(days_in_month(2, 15), 28);
        assert_eq!(days_in_month(12, 15), 31);
        assert_eq!(days_in_month(0, 15), 0);
        assert_eq!(days_in_month(13, 15), 0);

        assert_eq!(days_in_year(0), 366);
        assert_eq!(days_in_year(1), 365);
    }

    #[test]
    fn test_unix_timestamp() {
        assert_eq!(unix_timestamp(&time(1, 1, 0, 6, 0, 0, 0)), 946_684_800);
        assert_eq!(unix_timestamp(&time(28, 2, 15, 6, 23, 35, 30)), 1_425_166_530);
        assert_eq!(unix_timestamp(&time(29, 2, 16, 1, 12, 0, 0)), 1_456_747_200);
        assert_eq!(unix_timestamp(&time(31, 12, 99, 4, 23, 59, 59)), 4_102_444_799);
    }

    #[test]
    fn test_unix_timestamp_december() {
        // December must count the eleven months before it
        assert_eq!(unix_timestamp(&time(25, 12, 14, 4, 0, 0, 0)), 1_419_465_600);
    }

    #[test]
    fn test_from_unix() {
        let t = RtcTime::from_unix(1_413_839_460).unwrap();
        assert_eq!(t, RtcTime { unix: 1_413_839_460, ..time(20, 10, 14, 1, 21, 11, 0) });

        let t = RtcTime::from_unix(1_419_465_600).unwrap();
        assert_eq!((t.date, t.month, t.year, t.day), (25, 12, 14, 4));

        let t = RtcTime::from_unix(4_102_444_799).unwrap();
        assert_eq!((t.date, t.month, t.year, t.hours), (31, 12, 99, 23));
    }

    #[test]
    fn test_from_unix_out_of_range() {
        assert_eq!(RtcTime::from_unix(0), None);
        assert_eq!(RtcTime::from_unix(946_684_799), None);
        assert_eq!(RtcTime::from_unix(4_102_444_800), None);
    }

    #[test]
    fn test_validate() {
        assert!(time(28, 2, 15, 6, 23, 35, 30).is_valid());
        assert!(time(29, 2, 16, 1, 0, 0, 0).is_valid());
        assert!(!time(29, 2, 15, 7, 0, 0, 0).is_valid());
        assert!(!time(31, 4, 15, 4, 0, 0, 0).is_valid());
        assert!(!time(1, 1, 15, 0, 0, 0, 0).is_valid());
        assert!(!time(1, 1, 15, 8, 0, 0, 0).is_valid());
        assert!(!time(1, 1, 15, 4, 24, 0, 0).is_valid());
        assert!(!time(1, 1, 15, 4, 0, 60, 0).is_valid());
        assert!(!time(1, 13, 15, 4, 0, 0, 0).is_valid());
    }

    #[test]
    fn test_parse_date_time() {
        let t = parse_date_time("28.02.15.6;23:35:30").unwrap();
        assert_eq!(t, RtcTime { unix: 1_425_166_530, ..time(28, 2, 15, 6, 23, 35, 30) });

        // as typed into a terminal
        assert!(parse_date_time("1.3.15.7;9:05:00\r\n").is_some());
    }

    #[test]
    fn test_parse_date_time_malformed() {
        for s in [
            "",
            "28.02.15;23:35:30",
            "28.02.15.6 23:35:30",
            "28.02.15.6;23:35",
            "28.02.15.6;23:35:30:00",
            "28.02.15.6.1;23:35:30",
            "2a.02.15.6;23:35:30",
            "280.2.15.6;23:35:30",
            "-1.02.15.6;23:35:30",
        ] {
            assert_eq!(parse_date_time(s), None, "{:?}", s);
        }
    }

    #[test]
    fn test_bcd() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(to_bcd(7), 0x07);
        assert_eq!(from_bcd(0x23), Some(23));
        assert_eq!(from_bcd(0x5A), None);
        assert_eq!(from_bcd(0xA0), None);

        let bin = time(28, 2, 15, 6, 23, 35, 30);
        let bcd = bin.to_bcd();
        assert_eq!((bcd.hours, bcd.minutes, bcd.seconds), (0x23, 0x35, 0x30));
        assert_eq!((bcd.date, bcd.month, bcd.year, bcd.day), (0x28, 0x02, 0x15, 0x06));
        assert_eq!(bcd.from_bcd(), Some(bin));
    }

    #[test]
    fn test_calendar_registers() {
        let registers = CalendarRegisters::from_time(&time(28, 2, 15, 6, 23, 35, 30));
        assert_eq!(registers.tr, 0x0023_3530);
        assert_eq!(registers.dr, 0x0015_C228);

        let t = registers.to_time().unwrap();
        assert_eq!(t.unix, 1_425_166_530);
        assert_eq!(t.day, 6);

        let broken = CalendarRegisters { tr: 0x0000_003F, ..registers };
        assert_eq!(broken.to_time(), None);
    }

    #[test]
    fn test_alarm_register() {
        let weekly = AlarmTime {
            alarm_type: AlarmType::DayInWeek,
            seconds: 5,
            minutes: 11,
            hours: 21,
            day: 1,
        };
        assert_eq!(encode_alarm(&weekly), 0x4121_1105);
        assert_eq!(decode_alarm(0x4121_1105), Some(weekly));

        let monthly = AlarmTime {
            alarm_type: AlarmType::DayInMonth,
            seconds: 10,
            day: 20,
            ..weekly
        };
        assert_eq!(encode_alarm(&monthly), 0x2021_1110);
        assert_eq!(decode_alarm(0x2021_1110), Some(monthly));
    }

    #[test]
    fn test_alarm_validate() {
        let alarm = AlarmTime {
            alarm_type: AlarmType::DayInWeek,
            seconds: 0,
            minutes: 0,
            hours: 0,
            day: 7,
        };
        assert!(alarm.is_valid());
        assert!(!AlarmTime { day: 8, ..alarm }.is_valid());
        assert!(!AlarmTime { day: 0, ..alarm }.is_valid());
        assert!(AlarmTime { alarm_type: AlarmType::DayInMonth, day: 31, ..alarm }.is_valid());
        assert!(!AlarmTime { alarm_type: AlarmType::DayInMonth, day: 32, ..alarm }.is_valid());
        assert!(!AlarmTime { seconds: 60, ..alarm }.is_valid());
    }

    #[test]
    fn test_alarm_matches() {
        let now = time(20, 10, 14, 1, 21, 11, 5);
        let alarm = AlarmTime {
            alarm_type: AlarmType::DayInWeek,
            seconds: 5,
            minutes: 11,
            hours: 21,
            day: 1,
        };
        assert!(alarm.matches(&now));
        assert!(!alarm.matches(&RtcTime { day: 2, ..now }));
        assert!(AlarmTime { alarm_type: AlarmType::DayInMonth, day: 20, ..alarm }.matches(&now));
    }

    #[test]
    fn test_wakeup_periods() {
        assert_eq!(WakeupPeriod::Disable.counter(), None);
        assert_eq!(WakeupPeriod::S1.counter(), Some(0x0FFF));
        assert_eq!(WakeupPeriod::S60.counter().map(counter_to_ms), Some(60_000));
        assert_eq!(WakeupPeriod::S15.counter().map(counter_to_ms), Some(15_000));
        assert_eq!(WakeupPeriod::Ms125.counter().map(counter_to_ms), Some(125));
    }

    #[test]
    fn test_serialize_time() {
        let t = parse_date_time("28.02.15.6;23:35:30").unwrap();
        assert_eq!(
            serde_json::to_value(t).unwrap(),
            json!({
                "seconds": 30,
                "subseconds": 0,
                "minutes": 35,
                "hours": 23,
                "day": 6,
                "date": 28,
                "month": 2,
                "year": 15,
                "unix": 1_425_166_530u32,
            })
        );
    }
}
