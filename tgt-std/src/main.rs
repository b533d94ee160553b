// Embassy framework imports
use embassy_executor::Executor;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker, Timer};

// Other external crates
use anyhow::anyhow;
use static_cell::StaticCell;

// Local modules
mod clock;
mod config;
mod stdin;


use crate::config::{AppConfig, CustomTerm};
use crate::stdin::{StdinChannel, StdinReader};

use periph_gps::{convert_speed, Gps, GpsDistance, GpsError, GpsReader, SpeedUnit};
use periph_rtc::{Alarm, Format, Rtc, RtcHandler, RtcStatus, SoftRtc};
use periph_traits::Telemetry;

type SharedRtc = Mutex<CriticalSectionRawMutex, Rtc<SoftRtc>>;

// Constants
const READ_BUFFER_SIZE: usize = 128;
const SYNC_TOLERANCE_SECS: u32 = 2;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let config = AppConfig::load()?;

    let mut rtc =
        Rtc::init(SoftRtc::new(), config.rtc).map_err(|e| anyhow!("RTC init: {}", e))?;
    if rtc.status() != RtcStatus::TimeSet {
        if let Some(date_time) = &config.date_time {
            rtc.set_date_time_str(date_time)
                .map_err(|e| anyhow!("date_time {:?}: {}", date_time, e))?;
        }
    }
    rtc.set_wakeup(config.wakeup)
        .map_err(|e| anyhow!("RTC wake-up: {}", e))?;
    if let Some(alarm) = &config.alarm {
        rtc.set_alarm(Alarm::A, alarm, Format::Bin)
            .map_err(|e| anyhow!("RTC alarm: {}", e))?;
    }

    static RTC: StaticCell<SharedRtc> = StaticCell::new();
    let rtc = &*RTC.init(Mutex::new(rtc));

    static STDIN: StdinChannel = StdinChannel::new();
    stdin::spawn_reader(&STDIN);

    let gps = GpsSettings {
        gps: Gps::new(config.gps),
        custom: config.custom,
        speed_unit: config.speed_unit,
    };

    static EXECUTOR: StaticCell<Executor> = StaticCell::new();
    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        let result = spawner.spawn(gps_task(gps, StdinReader::new(&STDIN), rtc));
        if result.is_err() {
            log::warn!("failed to spawn gps task");
        }

        let result = spawner.spawn(rtc_task(rtc));
        if result.is_err() {
            log::warn!("failed to spawn rtc task");
        }
    })
}

pub struct GpsSettings {
    gps: Gps,
    custom: heapless::Vec<CustomTerm, 4>,
    speed_unit: SpeedUnit,
}

#[embassy_executor::task]
pub async fn gps_task(settings: GpsSettings, reader: StdinReader, rtc: &'static SharedRtc) {
    let GpsSettings {
        mut gps,
        custom,
        speed_unit,
    } = settings;

    for term in custom.iter() {
        match gps.add_custom(&term.statement, term.term) {
            Ok(index) => log::info!(
                "custom term {} {} in slot {}",
                term.statement,
                term.term,
                index
            ),
            Err(e) => log::warn!("custom term {} {}: {}", term.statement, term.term, e),
        }
    }

    let mut reader = GpsReader::<_, READ_BUFFER_SIZE>::new(reader);
    let mut origin: Option<(f64, f64)> = None;

    loop {
        let data = match reader.next_update(&mut gps).await {
            Ok(data) => data,
            Err(GpsError::EndOfStream) => {
                log::info!("GPS input closed");
                std::process::exit(0);
            }
            Err(e) => {
                log::warn!("GPS: {}", e);
                Timer::after(Duration::from_millis(100)).await;
                continue;
            }
        };

        match data.to_vec() {
            Ok(json) => log::info!("{}", String::from_utf8_lossy(&json)),
            Err(e) => log::warn!("GPS telemetry: {}", e),
        }

        if data.validity {
            log::info!(
                "speed {:.2} {:?}",
                convert_speed(data.speed, speed_unit),
                speed_unit
            );

            let (lat, lon) = *origin.get_or_insert((data.latitude, data.longitude));
            let travelled = GpsDistance::between(lat, lon, data.latitude, data.longitude);
            log::info!(
                "{:.1} m from first fix, bearing {:.1}",
                travelled.distance,
                travelled.bearing
            );
        }

        if let Some(gps_time) = clock::gps_time(data) {
            let mut rtc = rtc.lock().await;
            let drifted = match rtc.date_time(Format::Bin) {
                Ok(rtc_time) => clock::needs_sync(&rtc_time, &gps_time, SYNC_TOLERANCE_SECS),
                Err(_) => true,
            };
            if drifted {
                match rtc.set_date_time(&gps_time, Format::Bin) {
                    Ok(()) => log::info!("RTC set from GPS, unix {}", gps_time.unix),
                    Err(e) => log::warn!("RTC set from GPS: {}", e),
                }
            }
        }
    }
}

#[derive(Default)]
struct Events {
    wakeup: bool,
    alarm_a: bool,
    alarm_b: bool,
}

impl RtcHandler for Events {
    fn wakeup(&mut self) {
        self.wakeup = true;
    }

    fn alarm_a(&mut self) {
        self.alarm_a = true;
    }

    fn alarm_b(&mut self) {
        self.alarm_b = true;
    }
}

#[embassy_executor::task]
pub async fn rtc_task(rtc: &'static SharedRtc) -> ! {
    let mut ticker = Ticker::every(Duration::from_secs(1));

    loop {
        ticker.next().await;

        let mut rtc = rtc.lock().await;
        rtc.backend_mut().tick(1000);

        let mut events = Events::default();
        if let Err(e) = rtc.service_interrupts(&mut events) {
            log::warn!("RTC interrupts: {}", e);
            continue;
        }

        if events.wakeup {
            match rtc.date_time(Format::Bin) {
                Ok(t) => log::info!(
                    "{:02}.{:02}.{:04} {:02}:{:02}:{:02}  Unix: {}",
                    t.date,
                    t.month,
                    t.year as u16 + 2000,
                    t.hours,
                    t.minutes,
                    t.seconds,
                    t.unix
                ),
                Err(e) => log::warn!("RTC read: {}", e),
            }
        }
        if events.alarm_a {
            log::info!("Alarm A triggered");
        }
        if events.alarm_b {
            log::info!("Alarm B triggered");
        }
    }
}
