use core::fmt;

pub const MAX_MESSAGE_SIZE: usize = 2048;

/// A source of raw bytes, typically a UART receiver.
///
/// Anything implementing `embedded_io_async::Read` is a reader already, so HAL
/// UART drivers plug in without glue.
#[allow(async_fn_in_trait)]
pub trait AsyncReader {
    type Error: fmt::Debug;

    /// Read at least one byte into `buf`, returning how many were read.
    /// `Ok(0)` means the source is exhausted.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: embedded_io_async::Read> AsyncReader for T {
    type Error = T::Error;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        embedded_io_async::Read::read(self, buf).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryError {
    /// Serialized reading does not fit the output buffer
    Overflow,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Overflow => write!(f, "telemetry message too large"),
        }
    }
}

/// JSON rendering of a peripheral reading into bounded storage.
pub trait Telemetry {
    fn to_vec(&self) -> Result<heapless::Vec<u8, MAX_MESSAGE_SIZE>, TelemetryError>;

    /// Write into a caller supplied buffer. Returns the number of bytes used.
    fn write_into(&self, buf: &mut [u8]) -> Result<usize, TelemetryError>;
}

impl<T: serde::Serialize> Telemetry for T {
    fn to_vec(&self) -> Result<heapless::Vec<u8, MAX_MESSAGE_SIZE>, TelemetryError> {
        serde_json_core::to_vec(self).map_err(|e| {
            log::debug!("telemetry serialization failed: {:?}", e);
            TelemetryError::Overflow
        })
    }

    fn write_into(&self, buf: &mut [u8]) -> Result<usize, TelemetryError> {
        serde_json_core::to_slice(self, buf).map_err(|_| TelemetryError::Overflow)
    }
}
