//! Two-phase tune: wait for TUNINT, then for the standard-specific lock.
use std::fmt;

use crate::commands::Command;
use crate::error::{Result, Si21xxError};
use crate::properties::{Field, PropertyId};
use crate::si21xx::Si21xx;
use crate::transport::{Clock, Transport};
use log::{debug, info};

/// Demodulation domain selected by TUNER_TUNE_FREQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuneMode {
    Dtv = 0,
    Atv = 1,
}

impl fmt::Display for TuneMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TuneMode::Atv => write!(f, "ATV"),
            TuneMode::Dtv => write!(f, "DTV"),
        }
    }
}

/// Analog video standards, as numbered by ATV_VIDEO_MODE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSystem {
    B = 0,
    GH = 1,
    M = 2,
    N = 3,
    I = 4,
    DK = 5,
    L = 6,
    LP = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSystem {
    PalNtsc = 0,
    Secam = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    Terrestrial = 0,
    Cable = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    pub system: VideoSystem,
    pub color: ColorSystem,
    pub transmission: Transmission,
    pub invert_signal: bool,
}

impl VideoMode {
    pub fn terrestrial(system: VideoSystem, color: ColorSystem) -> Self {
        VideoMode {
            system,
            color,
            transmission: Transmission::Terrestrial,
            invert_signal: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    Atsc = 0,
    QamUs = 1,
    Dvbt = 2,
    Dvbc = 3,
    Isdbt = 4,
    Isdbc = 5,
    Dtmb = 6,
    Cw = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bandwidth {
    Bw6Mhz = 6,
    Bw7Mhz = 7,
    Bw8Mhz = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DtvMode {
    pub bandwidth: Bandwidth,
    pub modulation: Modulation,
    pub invert_spectrum: bool,
}

impl<T: Transport, C: Clock> Si21xx<T, C> {
    /// Tunes to `freq_hz` and waits for acquisition, then for the lock
    /// interrupt of `mode`. Each phase has its own window starting at its
    /// own entry.
    pub fn tune(&mut self, mode: TuneMode, freq_hz: u32) -> Result<()> {
        self.send_command(&Command::TunerTuneFreq { mode, freq_hz })?;

        let timeouts = self.config.tune;
        let start = self.clock.now_ms();
        let mut acquired = false;
        while self.clock.now_ms().saturating_sub(start) < timeouts.acquisition_ms {
            if self.check_status()?.tunint() {
                acquired = true;
                break;
            }
        }
        if !acquired {
            debug!("no TUNINT at {} Hz", freq_hz);
            return Err(Si21xxError::AcquisitionTimeout);
        }

        let window = match mode {
            TuneMode::Atv => timeouts.atv_lock_ms,
            TuneMode::Dtv => timeouts.dtv_lock_ms,
        };
        let start = self.clock.now_ms();
        while self.clock.now_ms().saturating_sub(start) < window {
            let status = self.check_status()?;
            let locked = match mode {
                TuneMode::Atv => status.atvint(),
                TuneMode::Dtv => status.dtvint(),
            };
            if locked {
                info!("{} tune successful at {} Hz", mode, freq_hz);
                return Ok(());
            }
        }
        debug!("no {} lock at {} Hz", mode, freq_hz);
        Err(Si21xxError::StandardLockTimeout { mode })
    }

    /// Sets ATV_VIDEO_MODE and tunes in analog mode.
    pub fn atv_tune(&mut self, freq_hz: u32, video: VideoMode) -> Result<()> {
        self.set_video_mode(video)?;
        self.tune(TuneMode::Atv, freq_hz)
    }

    /// Sets DTV_MODE and tunes in digital mode.
    pub fn dtv_tune(&mut self, freq_hz: u32, dtv: DtvMode) -> Result<()> {
        self.props.set(Field::DTV_MODE_BW, dtv.bandwidth as i32)?;
        self.props
            .set(Field::DTV_MODE_MODULATION, dtv.modulation as i32)?;
        self.props
            .set(Field::DTV_MODE_INVERT_SPECTRUM, dtv.invert_spectrum as i32)?;
        self.set_property(PropertyId::DtvMode)?;
        self.tune(TuneMode::Dtv, freq_hz)
    }

    pub(crate) fn set_video_mode(&mut self, video: VideoMode) -> Result<()> {
        self.props.set(Field::ATV_VIDEO_SYS, video.system as i32)?;
        self.props.set(Field::ATV_VIDEO_COLOR, video.color as i32)?;
        self.props
            .set(Field::ATV_VIDEO_TRANS, video.transmission as i32)?;
        self.props
            .set(Field::ATV_VIDEO_INVERT_SIGNAL, video.invert_signal as i32)?;
        self.set_property(PropertyId::AtvVideoMode)
    }
}
