use anyhow::{anyhow, Context};
use heapless::{String, Vec};
use serde::Deserialize;

use periph_gps::{GpsConfig, SpeedUnit, CUSTOM_STATEMENT_LEN};
use periph_rtc::{AlarmTime, RtcConfig, WakeupPeriod};

const MAX_CONFIG_SIZE: usize = 4096;

/// Extra NMEA term to capture verbatim
#[derive(Debug, Deserialize, Clone)]
pub struct CustomTerm {
    pub statement: String<CUSTOM_STATEMENT_LEN>,
    pub term: u8,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub gps: GpsConfig,
    pub custom: Vec<CustomTerm, 4>,
    pub speed_unit: SpeedUnit,

    pub rtc: RtcConfig,
    pub wakeup: WakeupPeriod,
    pub alarm: Option<AlarmTime>,
    /// Initial time for a clock that has never been set, `dd.mm.YY.x;HH:ii:ss`
    pub date_time: Option<String<24>>,
}

impl AppConfig {
    pub fn parse(raw: &[u8]) -> anyhow::Result<Self> {
        let (config, _) = serde_json_core::from_slice::<AppConfig>(raw)
            .map_err(|e| anyhow!("invalid config: {}", e))?;
        Ok(config)
    }

    /// Read the file named by `PERIPH_CONFIG`, defaults when unset
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var("PERIPH_CONFIG") {
            Ok(path) => path,
            Err(_) => {
                log::info!("PERIPH_CONFIG not set, using defaults");
                return Ok(Self::default());
            }
        };

        let raw = std::fs::read(&path).with_context(|| format!("reading {}", path))?;
        if raw.len() > MAX_CONFIG_SIZE {
            return Err(anyhow!("{} is larger than {} bytes", path, MAX_CONFIG_SIZE));
        }
        Self::parse(&raw).with_context(|| format!("loading {}", path))
    }
}
