//! MPU-6050 register addresses used by the driver.

/// 7-bit address with AD0 low, AD0 high adds one
pub const MPU6050_ADDR: u8 = 0x68;

pub const WHO_AM_I: u8 = 0x75;
/// Expected `WHO_AM_I` contents
pub const I_AM: u8 = 0x68;

pub const PWR_MGMT_1: u8 = 0x6B;
pub const GYRO_CONFIG: u8 = 0x1B;
pub const ACCEL_CONFIG: u8 = 0x1C;

pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const TEMP_OUT_H: u8 = 0x41;
pub const GYRO_XOUT_H: u8 = 0x43;

/// FS_SEL / AFS_SEL field in the config registers
pub const FS_SEL_MASK: u8 = 0x18;
pub const FS_SEL_SHIFT: u8 = 3;

pub const ACCEL_SENS_2G: f32 = 16384.0;
pub const ACCEL_SENS_4G: f32 = 8192.0;
pub const ACCEL_SENS_8G: f32 = 4096.0;
pub const ACCEL_SENS_16G: f32 = 2048.0;

pub const GYRO_SENS_250: f32 = 131.0;
pub const GYRO_SENS_500: f32 = 65.5;
pub const GYRO_SENS_1000: f32 = 32.8;
pub const GYRO_SENS_2000: f32 = 16.4;

/// Temperature in degrees C is `raw / TEMP_SENSITIVITY + TEMP_OFFSET`
pub const TEMP_SENSITIVITY: f32 = 340.0;
pub const TEMP_OFFSET: f32 = 36.53;
