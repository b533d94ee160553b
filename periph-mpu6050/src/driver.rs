use core::fmt;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use serde::Serialize;

use crate::config::{with_full_scale, Accelerometer, Device, Gyroscope, Mpu6050Config};
use crate::registers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Nothing acknowledged the device address
    DeviceNotConnected,
    /// Something answered but `WHO_AM_I` held the wrong value
    DeviceInvalid(u8),
    Bus(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeviceNotConnected => write!(f, "MPU-6050 not connected"),
            Error::DeviceInvalid(id) => write!(f, "unexpected MPU-6050 WHO_AM_I {:#04x}", id),
            Error::Bus(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

/// Latest values read from the sensor
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct Mpu6050Reading {
    /// 7-bit bus address
    pub address: u8,
    pub accelerometer_x: i16,
    pub accelerometer_y: i16,
    pub accelerometer_z: i16,
    pub gyroscope_x: i16,
    pub gyroscope_y: i16,
    pub gyroscope_z: i16,
    /// g per LSB
    pub accelerometer_mult: f32,
    /// °/s per LSB
    pub gyroscope_mult: f32,
    /// Degrees C
    pub temperature: f32,
}

/// Blocking MPU-6050 driver.
///
/// Each read refreshes the matching fields of [`Mpu6050Reading`] and leaves
/// the others alone.
pub struct Mpu6050<I2C> {
    i2c: I2C,
    reading: Mpu6050Reading,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Probe the sensor, wake it up and program both full scale ranges.
    pub fn new(
        i2c: I2C,
        device: Device,
        accelerometer: Accelerometer,
        gyroscope: Gyroscope,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut driver = Self {
            i2c,
            reading: Mpu6050Reading {
                address: device.address(),
                accelerometer_mult: 1.0 / accelerometer.sensitivity(),
                gyroscope_mult: 1.0 / gyroscope.sensitivity(),
                ..Default::default()
            },
        };

        driver.init(accelerometer, gyroscope)?;
        Ok(driver)
    }

    pub fn from_config(i2c: I2C, config: &Mpu6050Config) -> Result<Self, Error<I2C::Error>> {
        Self::new(i2c, config.device, config.accelerometer, config.gyroscope)
    }

    fn init(
        &mut self,
        accelerometer: Accelerometer,
        gyroscope: Gyroscope,
    ) -> Result<(), Error<I2C::Error>> {
        let id = match self.read_register(registers::WHO_AM_I) {
            Ok(id) => id,
            Err(Error::Bus(e)) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => {
                log::info!("no MPU-6050 at {:#04x}", self.reading.address);
                return Err(Error::DeviceNotConnected);
            }
            Err(e) => return Err(e),
        };
        if id != registers::I_AM {
            log::info!("MPU-6050 at {:#04x} reports WHO_AM_I {:#04x}", self.reading.address, id);
            return Err(Error::DeviceInvalid(id));
        }

        self.write_register(registers::PWR_MGMT_1, 0x00)?;

        let current = self.read_register(registers::ACCEL_CONFIG)?;
        self.write_register(
            registers::ACCEL_CONFIG,
            with_full_scale(current, accelerometer.select()),
        )?;

        let current = self.read_register(registers::GYRO_CONFIG)?;
        self.write_register(
            registers::GYRO_CONFIG,
            with_full_scale(current, gyroscope.select()),
        )?;

        log::info!(
            "MPU-6050 at {:#04x} ready, {:?} {:?}",
            self.reading.address,
            accelerometer,
            gyroscope
        );
        Ok(())
    }

    pub fn read_accelerometer(&mut self) -> Result<&Mpu6050Reading, Error<I2C::Error>> {
        let mut data = [0u8; 6];
        self.read_registers(registers::ACCEL_XOUT_H, &mut data)?;
        self.set_accelerometer(&data);
        Ok(&self.reading)
    }

    pub fn read_gyroscope(&mut self) -> Result<&Mpu6050Reading, Error<I2C::Error>> {
        let mut data = [0u8; 6];
        self.read_registers(registers::GYRO_XOUT_H, &mut data)?;
        self.set_gyroscope(&data);
        Ok(&self.reading)
    }

    pub fn read_temperature(&mut self) -> Result<&Mpu6050Reading, Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.read_registers(registers::TEMP_OUT_H, &mut data)?;
        self.set_temperature(&data);
        Ok(&self.reading)
    }

    /// Accelerometer, temperature and gyroscope in one 14 byte burst
    pub fn read_all(&mut self) -> Result<&Mpu6050Reading, Error<I2C::Error>> {
        let mut data = [0u8; 14];
        self.read_registers(registers::ACCEL_XOUT_H, &mut data)?;
        self.set_accelerometer(&data[0..6]);
        self.set_temperature(&data[6..8]);
        self.set_gyroscope(&data[8..14]);
        Ok(&self.reading)
    }

    pub fn reading(&self) -> &Mpu6050Reading {
        &self.reading
    }

    /// Last accelerometer sample in g
    pub fn acceleration_g(&self) -> [f32; 3] {
        let r = &self.reading;
        [
            r.accelerometer_x as f32 * r.accelerometer_mult,
            r.accelerometer_y as f32 * r.accelerometer_mult,
            r.accelerometer_z as f32 * r.accelerometer_mult,
        ]
    }

    /// Last gyroscope sample in °/s
    pub fn rotation_dps(&self) -> [f32; 3] {
        let r = &self.reading;
        [
            r.gyroscope_x as f32 * r.gyroscope_mult,
            r.gyroscope_y as f32 * r.gyroscope_mult,
            r.gyroscope_z as f32 * r.gyroscope_mult,
        ]
    }

    pub fn address(&self) -> u8 {
        self.reading.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn set_accelerometer(&mut self, data: &[u8]) {
        self.reading.accelerometer_x = be_i16(data, 0);
        self.reading.accelerometer_y = be_i16(data, 2);
        self.reading.accelerometer_z = be_i16(data, 4);
    }

    fn set_gyroscope(&mut self, data: &[u8]) {
        self.reading.gyroscope_x = be_i16(data, 0);
        self.reading.gyroscope_y = be_i16(data, 2);
        self.reading.gyroscope_z = be_i16(data, 4);
    }

    fn set_temperature(&mut self, data: &[u8]) {
        let raw = be_i16(data, 0);
        self.reading.temperature =
            raw as f32 / registers::TEMP_SENSITIVITY + registers::TEMP_OFFSET;
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut value = [0u8; 1];
        self.read_registers(reg, &mut value)?;
        Ok(value[0])
    }

    fn read_registers(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(self.reading.address, &[reg], buf)
            .map_err(Error::Bus)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.reading.address, &[reg, value])
            .map_err(Error::Bus)
    }
}

fn be_i16(data: &[u8], at: usize) -> i16 {
    i16::from_be_bytes([data[at], data[at + 1]])
}
