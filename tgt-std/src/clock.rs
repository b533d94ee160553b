use periph_gps::GpsData;
use periph_rtc::{unix_timestamp, RtcTime};

/// UTC time of a GPS fix as a binary RTC time with the weekday filled in.
///
/// `None` until the receiver reports a valid fix with a sane date.
pub fn gps_time(data: &GpsData) -> Option<RtcTime> {
    if !data.validity {
        return None;
    }

    let time = RtcTime {
        seconds: data.time.seconds,
        minutes: data.time.minutes,
        hours: data.time.hours,
        // placeholder, recomputed below
        day: 1,
        date: data.date.date,
        month: data.date.month,
        year: data.date.year,
        ..Default::default()
    };
    if !time.is_valid() {
        return None;
    }

    RtcTime::from_unix(unix_timestamp(&time))
}

/// Whether the RTC has drifted from the GPS by at least `tolerance` seconds
pub fn needs_sync(rtc: &RtcTime, gps: &RtcTime, tolerance: u32) -> bool {
    rtc.unix.abs_diff(gps.unix) >= tolerance
}
