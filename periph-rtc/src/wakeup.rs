use serde::{Deserialize, Serialize};

/// RTCCLK / 8 with a 32768 Hz clock
pub const WAKEUP_CLOCK_HZ: u32 = 4096;

/// Periodic wake-up interrupt interval
#[derive(Debug, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Default)]
pub enum WakeupPeriod {
    #[default]
    Disable,
    S60,
    S30,
    S15,
    S10,
    S5,
    S2,
    S1,
    Ms500,
    Ms250,
    Ms125,
}

impl WakeupPeriod {
    /// Wake-up timer reload value, the timer fires every `counter + 1` ticks
    pub fn counter(self) -> Option<u32> {
        match self {
            WakeupPeriod::Disable => None,
            WakeupPeriod::S60 => Some(0x3BFFF),
            WakeupPeriod::S30 => Some(0x1DFFF),
            WakeupPeriod::S15 => Some(0xEFFF),
            WakeupPeriod::S10 => Some(0x9FFF),
            WakeupPeriod::S5 => Some(0x4FFF),
            WakeupPeriod::S2 => Some(0x1FFF),
            WakeupPeriod::S1 => Some(0x0FFF),
            WakeupPeriod::Ms500 => Some(0x7FF),
            WakeupPeriod::Ms250 => Some(0x3FF),
            WakeupPeriod::Ms125 => Some(0x1FF),
        }
    }
}

/// Interval in milliseconds for a wake-up timer reload value
pub fn counter_to_ms(counter: u32) -> u32 {
    ((counter as u64 + 1) * 1000 / WAKEUP_CLOCK_HZ as u64) as u32
}
