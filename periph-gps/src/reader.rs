use periph_traits::AsyncReader;

use crate::nmea::Gps;
use crate::types::{GpsData, GpsError, GpsResult};

/// Pulls chunks from a byte source and feeds them to a [`Gps`] decoder.
///
/// Bytes following a completed record stay buffered for the next call.
pub struct GpsReader<Reader, const N: usize>
where
    Reader: AsyncReader,
{
    reader: Reader,
    buf: [u8; N],
    read_ptr: usize,
    end: usize,
}

impl<Reader, const N: usize> GpsReader<Reader, N>
where
    Reader: AsyncReader,
{
    pub fn new(reader: Reader) -> Self {
        Self {
            reader,
            buf: [0; N],
            read_ptr: 0,
            end: 0,
        }
    }

    /// Wait for the next complete record
    pub async fn next_update<'g>(&mut self, gps: &'g mut Gps) -> Result<&'g GpsData, GpsError> {
        loop {
            if self.read_ptr == self.end {
                let len = match self.reader.read(&mut self.buf).await {
                    Ok(0) => return Err(GpsError::EndOfStream),
                    Ok(len) => len,
                    Err(e) => {
                        log::info!("GPS RX error: {:?}", e);
                        return Err(GpsError::Read);
                    }
                };
                self.read_ptr = 0;
                self.end = len;
            }

            let mut pending = self.buf[self.read_ptr..self.end].iter().copied();
            let result = gps.update(&mut pending);
            self.read_ptr = self.end - pending.len();

            if result == GpsResult::NewData {
                return Ok(gps.data());
            }
        }
    }

    pub fn into_inner(self) -> Reader {
        self.reader
    }
}
