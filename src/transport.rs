//! Bus and time-source seams the driver is built on.
use std::time::Instant;

use crate::error::Result;

/// Raw byte access to a chip on an I2C bus.
///
/// Implementations only move bytes; status interpretation and CTS polling
/// happen in the command layer.
pub trait Transport {
    fn write_bytes(&mut self, i2c_addr: u8, buf: &[u8]) -> Result<()>;
    fn read_bytes(&mut self, i2c_addr: u8, buf: &mut [u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_bytes(&mut self, i2c_addr: u8, buf: &[u8]) -> Result<()> {
        (**self).write_bytes(i2c_addr, buf)
    }
    fn read_bytes(&mut self, i2c_addr: u8, buf: &mut [u8]) -> Result<()> {
        (**self).read_bytes(i2c_addr, buf)
    }
}

/// Millisecond time source used for every timeout window.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `Instant`, counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
