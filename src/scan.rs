//! Analog channel scans over a frequency range.
use std::fmt;

use crate::error::{Result, Si21xxError};
use crate::properties::{Field, PropertyId};
use crate::si21xx::Si21xx;
use crate::transport::{Clock, Transport};
use crate::tune::{ColorSystem, TuneMode, VideoMode, VideoSystem};
use log::{debug, info, warn};

/// AFC range used outside of scans.
pub const AFC_RANGE_NARROW_KHZ: i32 = 100;
/// AFC range used while scanning, so a probe catches carriers between steps.
pub const AFC_RANGE_SCAN_KHZ: i32 = 1500;

const PAL_STEP_HZ: u32 = 1_000_000;
/// B and GH are split at this frequency.
const BAND_III_END_HZ: u32 = 300_000_000;
const SYSTEM_B_OFFSET_HZ: i64 = 500_000;
const SYSTEM_B_SPACING_HZ: u32 = 7_000_000;
const PAL_SPACING_HZ: u32 = 8_000_000;

/// Standard a PAL/SECAM channel was identified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStandard {
    B,
    GH,
    I,
    DK,
    L,
}

impl ChannelStandard {
    pub fn label(&self) -> &'static str {
        match self {
            ChannelStandard::B => "B",
            ChannelStandard::GH => "GH",
            ChannelStandard::I => "I",
            ChannelStandard::DK => "DK",
            ChannelStandard::L => "L",
        }
    }
}

impl fmt::Display for ChannelStandard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// Carrier frequency after AFC correction.
    pub frequency_hz: u32,
    /// Not set by System M scans.
    pub standard: Option<ChannelStandard>,
}

/// Scan results with a fixed upper bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelList {
    channels: Vec<Channel>,
    capacity: usize,
}

impl ChannelList {
    pub fn with_capacity(capacity: usize) -> Self {
        ChannelList {
            channels: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, channel: Channel) -> Result<()> {
        if self.channels.len() >= self.capacity {
            return Err(Si21xxError::ScanCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.channels.push(channel);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.channels.clear();
    }

    pub fn as_slice(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Signal quality limits programmed before a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanThresholds {
    /// dBm
    pub rssi_lo: i32,
    pub rssi_hi: i32,
    /// Video SNR, in half dB steps.
    pub snr_lo: i32,
    pub snr_hi: i32,
}

impl Default for ScanThresholds {
    fn default() -> Self {
        ScanThresholds {
            rssi_lo: -70,
            rssi_hi: 0,
            snr_lo: 25,
            snr_hi: 45,
        }
    }
}

/// Step between probes with no station, and the spacing skipped after a
/// station is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    pub step_hz: u32,
    pub bandwidth_hz: u32,
}

impl ScanPlan {
    pub fn system_m() -> Self {
        ScanPlan {
            step_hz: 1_000_000,
            bandwidth_hz: 6_000_000,
        }
    }
}

impl Default for ScanPlan {
    fn default() -> Self {
        ScanPlan::system_m()
    }
}

/// Sound carrier families that tell PAL/SECAM standards apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundGroup {
    BgH,
    I,
    DkL,
    Unknown,
}

/// Decides which sound group is broadcast at a frequency.
pub trait SoundClassifier {
    fn classify(&mut self, freq_hz: u32) -> SoundGroup;
}

/// Always answers the same group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSound(pub SoundGroup);

impl Default for FixedSound {
    fn default() -> Self {
        FixedSound(SoundGroup::BgH)
    }
}

impl SoundClassifier for FixedSound {
    fn classify(&mut self, _freq_hz: u32) -> SoundGroup {
        self.0
    }
}

impl<F: FnMut(u32) -> SoundGroup> SoundClassifier for F {
    fn classify(&mut self, freq_hz: u32) -> SoundGroup {
        self(freq_hz)
    }
}

/// Maps a locked PAL/SECAM probe to a standard, or `None` to skip it.
fn pal_standard(group: SoundGroup, positive: bool, freq_hz: u32) -> Option<ChannelStandard> {
    match (group, positive) {
        (SoundGroup::BgH, false) if freq_hz < BAND_III_END_HZ => Some(ChannelStandard::B),
        (SoundGroup::BgH, false) => Some(ChannelStandard::GH),
        (SoundGroup::I, false) => Some(ChannelStandard::I),
        (SoundGroup::DkL, false) => Some(ChannelStandard::DK),
        (SoundGroup::DkL, true) => Some(ChannelStandard::L),
        _ => None,
    }
}

fn offset(freq_hz: u32, delta_hz: i64) -> u32 {
    (freq_hz as i64 + delta_hz).clamp(0, u32::MAX as i64) as u32
}

impl<T: Transport, C: Clock> Si21xx<T, C> {
    /// Channels found by the last scan.
    pub fn channels(&self) -> &[Channel] {
        self.channels.as_slice()
    }

    /// Scans `[min_hz, max_hz)` for System M carriers.
    ///
    /// `progress` is called as `(freq, 0)` before every probe; returning
    /// `true` stops the scan. The narrow AFC range is restored last in every
    /// case.
    pub fn scan_system_m<F>(
        &mut self,
        min_hz: u32,
        max_hz: u32,
        thresholds: &ScanThresholds,
        plan: &ScanPlan,
        mut progress: F,
    ) -> Result<&[Channel]>
    where
        F: FnMut(u32, usize) -> bool,
    {
        self.channels.clear();
        let result = self.run_system_m(min_hz, max_hz, thresholds, plan, &mut progress);
        self.finish_scan(result)
    }

    /// Scans `[min_hz, max_hz)` trying negative (DK) then positive (L)
    /// modulation at every step; `classifier` then picks the standard.
    pub fn scan_pal<S, F>(
        &mut self,
        min_hz: u32,
        max_hz: u32,
        thresholds: &ScanThresholds,
        classifier: &mut S,
        mut progress: F,
    ) -> Result<&[Channel]>
    where
        S: SoundClassifier + ?Sized,
        F: FnMut(u32, usize) -> bool,
    {
        self.channels.clear();
        let result = self.run_pal(min_hz, max_hz, thresholds, classifier, &mut progress);
        self.finish_scan(result)
    }

    fn prepare_scan(&mut self, thresholds: &ScanThresholds) -> Result<()> {
        self.props.set(Field::ATV_RSSI_LO, thresholds.rssi_lo)?;
        self.props.set(Field::ATV_RSSI_HI, thresholds.rssi_hi)?;
        self.set_property(PropertyId::AtvRsqRssiThreshold)?;
        self.props.set(Field::ATV_SNR_LO, thresholds.snr_lo)?;
        self.props.set(Field::ATV_SNR_HI, thresholds.snr_hi)?;
        self.set_property(PropertyId::AtvRsqSnrThreshold)?;

        self.props.set(Field::TUNER_IEN_TCIEN, 1)?;
        self.props.set(Field::TUNER_IEN_RSSILIEN, 0)?;
        self.props.set(Field::TUNER_IEN_RSSIHIEN, 0)?;
        self.set_property(PropertyId::TunerIen)?;

        self.props.set(Field::ATV_IEN_CHLIEN, 1)?;
        for field in [
            Field::ATV_IEN_PCLIEN,
            Field::ATV_IEN_DLIEN,
            Field::ATV_IEN_SNRLIEN,
            Field::ATV_IEN_SNRHIEN,
        ] {
            self.props.set(field, 0)?;
        }
        self.set_property(PropertyId::AtvIen)?;

        // default audio system, SIF demodulation
        self.props.set(Field::ATV_AUDIO_MODE_AUDIO_SYS, 0)?;
        self.props.set(Field::ATV_AUDIO_MODE_DEMOD_MODE, 0)?;
        self.props.set(Field::ATV_AUDIO_MODE_CHAN_BW, 0)?;
        self.set_property(PropertyId::AtvAudioMode)?;

        self.set_field(Field::ATV_AFC_RANGE_KHZ, AFC_RANGE_SCAN_KHZ)
    }

    fn finish_scan(&mut self, result: Result<()>) -> Result<&[Channel]> {
        let restore = self.set_field(Field::ATV_AFC_RANGE_KHZ, AFC_RANGE_NARROW_KHZ);
        result?;
        restore?;
        info!("Scan complete, {} channels", self.channels.len());
        Ok(self.channels.as_slice())
    }

    fn run_system_m<F>(
        &mut self,
        min_hz: u32,
        max_hz: u32,
        thresholds: &ScanThresholds,
        plan: &ScanPlan,
        progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(u32, usize) -> bool,
    {
        self.prepare_scan(thresholds)?;
        self.set_video_mode(VideoMode::terrestrial(
            VideoSystem::M,
            ColorSystem::PalNtsc,
        ))?;

        let step = plan.step_hz.max(1);
        let mut freq = min_hz;
        while freq < max_hz {
            if progress(freq, 0) {
                info!("Scan aborted at {} Hz", freq);
                return Ok(());
            }
            let next = if self.probe(freq)? {
                let status = self.atv_status(true)?;
                let found = offset(freq, status.afc_hz());
                self.channels.push(Channel {
                    frequency_hz: found,
                    standard: None,
                })?;
                info!("Found channel at {} Hz", found);
                found.saturating_add(plan.bandwidth_hz)
            } else {
                freq
            };
            freq = next.max(freq.saturating_add(step));
        }
        Ok(())
    }

    fn run_pal<S, F>(
        &mut self,
        min_hz: u32,
        max_hz: u32,
        thresholds: &ScanThresholds,
        classifier: &mut S,
        progress: &mut F,
    ) -> Result<()>
    where
        S: SoundClassifier + ?Sized,
        F: FnMut(u32, usize) -> bool,
    {
        self.prepare_scan(thresholds)?;

        let hypotheses = [
            (VideoSystem::DK, ColorSystem::PalNtsc, false),
            (VideoSystem::L, ColorSystem::Secam, true),
        ];
        let mut freq = min_hz;
        while freq < max_hz {
            if progress(freq, 0) {
                info!("Scan aborted at {} Hz", freq);
                return Ok(());
            }

            let mut positive = None;
            for (system, color, is_positive) in hypotheses {
                self.set_video_mode(VideoMode::terrestrial(system, color))?;
                if self.probe(freq)? {
                    positive = Some(is_positive);
                    break;
                }
            }

            let mut next = freq;
            if let Some(positive) = positive {
                let group = classifier.classify(freq);
                match pal_standard(group, positive, freq) {
                    Some(standard) => {
                        let status = self.atv_status(true)?;
                        let (delta, spacing) = if standard == ChannelStandard::B {
                            (status.afc_hz() - SYSTEM_B_OFFSET_HZ, SYSTEM_B_SPACING_HZ)
                        } else {
                            (status.afc_hz(), PAL_SPACING_HZ)
                        };
                        let found = offset(freq, delta);
                        self.channels.push(Channel {
                            frequency_hz: found,
                            standard: Some(standard),
                        })?;
                        info!("Found {} channel at {} Hz", standard, found);
                        next = found.saturating_add(spacing);
                    }
                    None => debug!(
                        "skipping {:?} carrier at {} Hz (positive {})",
                        group, freq, positive
                    ),
                }
            }
            freq = next.max(freq.saturating_add(PAL_STEP_HZ));
        }
        Ok(())
    }

    /// One analog tune attempt. Any tune failure means no station here.
    fn probe(&mut self, freq_hz: u32) -> Result<bool> {
        match self.tune(TuneMode::Atv, freq_hz) {
            Ok(()) => Ok(true),
            Err(e) if e.is_tune_timeout() => Ok(false),
            Err(e) => {
                warn!("tune at {} Hz failed: {}", freq_hz, e);
                Ok(false)
            }
        }
    }
}
