//! # si21xx Library
//! Driver for Silicon Labs Si21xx TV tuners.
//!
//! The chip is reached through any [`Transport`]. [`Device`] provides one
//! over the I2C repeater of an RTL2832U USB bridge.

pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod firmware;
pub mod properties;
pub mod scan;
mod si21xx;
pub mod transport;
pub mod tune;

#[cfg(test)]
mod sim;

pub use commands::{PartInfo, Status};
pub use config::{Config, TuneTimeouts};
pub use device::Device;
pub use error::{Result, Si21xxError};
pub use firmware::{BootStage, ExpectedPart, FirmwareImage, LoaderState};
pub use properties::{Field, PropertyId, PropertyStore};
pub use scan::{Channel, ChannelStandard, FixedSound, ScanPlan, ScanThresholds, SoundGroup};
pub use si21xx::Si21xx;
pub use transport::{Clock, SystemClock, Transport};
pub use tune::{DtvMode, TuneMode, VideoMode};
