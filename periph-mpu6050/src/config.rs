use serde::{Deserialize, Serialize};

use crate::registers;

/// Which of the two possible sensors on the bus, selected by the AD0 pin.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// AD0 low
    #[default]
    Device0,
    /// AD0 high
    Device1,
}

impl Device {
    pub fn address(self) -> u8 {
        match self {
            Device::Device0 => registers::MPU6050_ADDR,
            Device::Device1 => registers::MPU6050_ADDR | 0x01,
        }
    }
}

/// Accelerometer full scale range
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accelerometer {
    /// ±2 g
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl Accelerometer {
    /// AFS_SEL value
    pub fn select(self) -> u8 {
        match self {
            Accelerometer::G2 => 0,
            Accelerometer::G4 => 1,
            Accelerometer::G8 => 2,
            Accelerometer::G16 => 3,
        }
    }

    /// LSB per g
    pub fn sensitivity(self) -> f32 {
        match self {
            Accelerometer::G2 => registers::ACCEL_SENS_2G,
            Accelerometer::G4 => registers::ACCEL_SENS_4G,
            Accelerometer::G8 => registers::ACCEL_SENS_8G,
            Accelerometer::G16 => registers::ACCEL_SENS_16G,
        }
    }
}

/// Gyroscope full scale range
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gyroscope {
    /// ±250 °/s
    #[default]
    S250,
    /// ±500 °/s
    S500,
    /// ±1000 °/s
    S1000,
    /// ±2000 °/s
    S2000,
}

impl Gyroscope {
    /// FS_SEL value
    pub fn select(self) -> u8 {
        match self {
            Gyroscope::S250 => 0,
            Gyroscope::S500 => 1,
            Gyroscope::S1000 => 2,
            Gyroscope::S2000 => 3,
        }
    }

    /// LSB per °/s
    pub fn sensitivity(self) -> f32 {
        match self {
            Gyroscope::S250 => registers::GYRO_SENS_250,
            Gyroscope::S500 => registers::GYRO_SENS_500,
            Gyroscope::S1000 => registers::GYRO_SENS_1000,
            Gyroscope::S2000 => registers::GYRO_SENS_2000,
        }
    }
}

/// Merge a full scale selection into the current contents of a config register
pub(crate) fn with_full_scale(current: u8, select: u8) -> u8 {
    (current & !registers::FS_SEL_MASK) | (select << registers::FS_SEL_SHIFT)
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Mpu6050Config {
    pub device: Device,
    pub accelerometer: Accelerometer,
    pub gyroscope: Gyroscope,
}
