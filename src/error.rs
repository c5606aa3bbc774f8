use std::fmt;
use std::result;
use thiserror::Error;

use crate::firmware::PartMismatch;
use crate::tune::TuneMode;

/// A result of a function that may return a `Si21xxError`.
pub type Result<T> = result::Result<T, Si21xxError>;

#[derive(Debug, Error)]
pub enum Si21xxError {
    /// Error reported by libusb while talking to an RTL2832U bridge.
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Error reported by any other transport.
    #[error("bus error: {0}")]
    Bus(String),

    /// The chip answered with the ERR bit set in its status byte.
    #[error("command {opcode:#04x} rejected by chip, status {status:#04x}")]
    ChipError { opcode: u8, status: u8 },

    #[error("timed out waiting for CTS")]
    CtsTimeout,

    #[error("timed out waiting for response to command {opcode:#04x}")]
    ResponseTimeout { opcode: u8 },

    /// TUNINT never fired after a tune command.
    #[error("tune acquisition timeout (TUNINT)")]
    AcquisitionTimeout,

    /// ATVINT or DTVINT never fired after acquisition.
    #[error("{mode} standard lock timeout")]
    StandardLockTimeout { mode: TuneMode },

    #[error("incompatible part: {}", Mismatches(.mismatches))]
    IncompatiblePart { mismatches: Vec<PartMismatch> },

    #[error("firmware line {line} rejected: {source}")]
    FirmwareLine {
        line: usize,
        #[source]
        source: Box<Si21xxError>,
    },

    #[error("failed to start firmware: {0}")]
    StartFirmware(#[source] Box<Si21xxError>),

    #[error("invalid firmware image: {0}")]
    InvalidFirmware(String),

    #[error("channel list full ({capacity} channels)")]
    ScanCapacityExceeded { capacity: usize },

    #[error("invalid value {value} for {property}.{field}")]
    InvalidFieldValue {
        property: &'static str,
        field: &'static str,
        value: i32,
    },

    #[error("unknown property or field: {0}")]
    UnknownField(String),

    #[error("no supported device found")]
    DeviceNotFound,
}

impl Si21xxError {
    /// True for the two tune timeouts, which a scan treats as "no station here".
    pub fn is_tune_timeout(&self) -> bool {
        matches!(
            self,
            Si21xxError::AcquisitionTimeout | Si21xxError::StandardLockTimeout { .. }
        )
    }
}

struct Mismatches<'a>(&'a [PartMismatch]);

impl fmt::Display for Mismatches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
