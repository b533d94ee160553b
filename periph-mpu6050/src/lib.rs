#![cfg_attr(not(test), no_std)]

mod config;
mod driver;
pub mod registers;

pub use config::{Accelerometer, Device, Gyroscope, Mpu6050Config};
pub use driver::{Error, Mpu6050, Mpu6050Reading};
