//! Driver settings. Defaults match the vendor reference sequences.
use crate::firmware::ExpectedPart;

/// Default 7-bit I2C address of the tuner.
pub const DEFAULT_I2C_ADDR: u8 = 0x60;

/// Default capacity of the scan channel list.
pub const MAX_CHANNELS: usize = 128;

/// Polling windows for the two tune phases, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuneTimeouts {
    /// TUNINT must fire within this window after the tune command.
    pub acquisition_ms: u64,
    /// ATVINT window, restarted once TUNINT fires.
    pub atv_lock_ms: u64,
    /// DTVINT window, restarted once TUNINT fires.
    pub dtv_lock_ms: u64,
}

impl Default for TuneTimeouts {
    fn default() -> Self {
        TuneTimeouts {
            acquisition_ms: 70,
            atv_lock_ms: 150,
            dtv_lock_ms: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub i2c_addr: u8,
    /// Bound on the clear-to-send poll before each command.
    pub cts_timeout_ms: u64,
    /// Bound on waiting for a reply once a command is written.
    pub response_timeout_ms: u64,
    pub tune: TuneTimeouts,
    /// When set, PART_INFO is checked against it during power-up.
    pub expected_part: Option<ExpectedPart>,
    pub max_channels: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            i2c_addr: DEFAULT_I2C_ADDR,
            cts_timeout_ms: 1000,
            response_timeout_ms: 1000,
            tune: TuneTimeouts::default(),
            expected_part: None,
            max_channels: MAX_CHANNELS,
        }
    }
}
