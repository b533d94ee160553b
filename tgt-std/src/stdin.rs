use core::convert::Infallible;
use std::io::Read;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use heapless::Vec;

pub const CHUNK_SIZE: usize = 64;
pub type Chunk = Vec<u8, CHUNK_SIZE>;

pub type StdinChannel = Channel<CriticalSectionRawMutex, Chunk, 4>;

/// Blocking stdin reads on their own thread, handed to the executor in chunks.
/// An empty chunk marks the end of input.
pub fn spawn_reader(channel: &'static StdinChannel) {
    std::thread::spawn(move || {
        let mut stdin = std::io::stdin().lock();
        let mut buf = [0u8; CHUNK_SIZE];
        loop {
            let n = match stdin.read(&mut buf) {
                Ok(n) => n,
                Err(e) => {
                    log::error!("stdin: {}", e);
                    0
                }
            };
            // n never exceeds the chunk capacity
            let chunk = Chunk::from_slice(&buf[..n]).unwrap_or_default();
            embassy_futures::block_on(channel.send(chunk));
            if n == 0 {
                break;
            }
        }
    });
}

pub struct StdinReader {
    rx: Receiver<'static, CriticalSectionRawMutex, Chunk, 4>,
    chunk: Chunk,
    pos: usize,
    eof: bool,
}

impl StdinReader {
    pub fn new(channel: &'static StdinChannel) -> Self {
        Self {
            rx: channel.receiver(),
            chunk: Chunk::new(),
            pos: 0,
            eof: false,
        }
    }
}

impl embedded_io_async::ErrorType for StdinReader {
    type Error = Infallible;
}

impl embedded_io_async::Read for StdinReader {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.pos == self.chunk.len() {
            if self.eof {
                return Ok(0);
            }
            self.chunk = self.rx.receive().await;
            self.pos = 0;
            if self.chunk.is_empty() {
                self.eof = true;
                return Ok(0);
            }
        }

        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
