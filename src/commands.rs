//! Command encoding and response decoding for the Si21xx command set.
//!
//! Every command is an opcode byte followed by a fixed argument layout, and
//! every reply starts with the status byte. Multi-byte fields are little endian.
use byteorder::{ByteOrder, LittleEndian};

use crate::tune::TuneMode;

pub const STATUS_TUNINT: u8 = 0x01;
pub const STATUS_ATVINT: u8 = 0x02;
pub const STATUS_DTVINT: u8 = 0x04;
pub const STATUS_ERR: u8 = 0x40;
pub const STATUS_CTS: u8 = 0x80;

pub const CMD_EXIT_BOOTLOADER: u8 = 0x01;
pub const CMD_PART_INFO: u8 = 0x02;
pub const CMD_GET_REV: u8 = 0x11;
pub const CMD_CONFIG_PINS: u8 = 0x12;
pub const CMD_POWER_DOWN: u8 = 0x13;
pub const CMD_SET_PROPERTY: u8 = 0x14;
pub const CMD_GET_PROPERTY: u8 = 0x15;
pub const CMD_STANDBY: u8 = 0x16;
pub const CMD_TUNER_TUNE_FREQ: u8 = 0x41;
pub const CMD_TUNER_STATUS: u8 = 0x42;
pub const CMD_AGC_OVERRIDE: u8 = 0x44;
pub const CMD_FINE_TUNE: u8 = 0x45;
pub const CMD_ATV_RESTART: u8 = 0x51;
pub const CMD_ATV_CW_TEST: u8 = 0x53;
pub const CMD_ATV_STATUS: u8 = 0x61;
pub const CMD_DTV_RESTART: u8 = 0x71;
pub const CMD_DTV_STATUS: u8 = 0x72;
pub const CMD_POWER_UP: u8 = 0xc0;

/// Firmware and video filter tables are sent as lines of this many bytes.
pub const PATCH_LINE_LEN: usize = 8;

/// Status byte returned first in every reply.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    pub fn cts(&self) -> bool {
        self.0 & STATUS_CTS != 0
    }
    pub fn err(&self) -> bool {
        self.0 & STATUS_ERR != 0
    }
    pub fn tunint(&self) -> bool {
        self.0 & STATUS_TUNINT != 0
    }
    pub fn atvint(&self) -> bool {
        self.0 & STATUS_ATVINT != 0
    }
    pub fn dtvint(&self) -> bool {
        self.0 & STATUS_DTVINT != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitFunction {
    Bootloader = 0,
    Tuner = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandbyKind {
    Normal = 0,
    LnaOn = 1,
}

/// POWER_UP arguments. `Default` is the sequence that boots into the
/// bootloader from a 24 MHz crystal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub subcode: u8,
    pub clock_mode: u8,
    pub clock_freq: u8,
    pub addr_mode: u8,
    pub func: u8,
    pub cts_interrupt: bool,
    pub wake_up: bool,
}

impl PowerUp {
    pub const SUBCODE_CODE: u8 = 0x05;
    pub const CLOCK_MODE_EXTCLK: u8 = 0;
    pub const CLOCK_MODE_XTAL: u8 = 3;
    pub const CLOCK_FREQ_16MHZ: u8 = 0;
    pub const CLOCK_FREQ_24MHZ: u8 = 2;
    pub const CLOCK_FREQ_27MHZ: u8 = 3;
    pub const ADDR_MODE_CURRENT: u8 = 0;
    pub const ADDR_MODE_CAPTURE: u8 = 1;
    pub const FUNC_BOOTLOADER: u8 = 0;
    pub const FUNC_NORMAL: u8 = 1;
}

impl Default for PowerUp {
    fn default() -> Self {
        PowerUp {
            subcode: PowerUp::SUBCODE_CODE,
            clock_mode: PowerUp::CLOCK_MODE_XTAL,
            clock_freq: PowerUp::CLOCK_FREQ_24MHZ,
            addr_mode: PowerUp::ADDR_MODE_CURRENT,
            func: PowerUp::FUNC_BOOTLOADER,
            cts_interrupt: false,
            wake_up: true,
        }
    }
}

pub const PIN_NO_CHANGE: u8 = 0;
pub const PIN_DISABLE: u8 = 1;
pub const PIN_DRIVE_0: u8 = 2;
pub const PIN_DRIVE_1: u8 = 3;
pub const PIN_XOUT: u8 = 10;

/// CONFIG_PINS arguments: a mode per pin, plus a flag asking for the pin's
/// level in the reply. `Default` leaves every pin alone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub gpio: [u8; 3],
    pub bclk1: u8,
    pub xout: u8,
    pub gpio_read: [bool; 3],
    pub bclk1_read: bool,
    pub xout_read: bool,
}

impl PinConfig {
    fn args(&self) -> [u8; 5] {
        let arg = |mode: u8, read: bool| (mode & 0x7f) | ((read as u8) << 7);
        [
            arg(self.gpio[0], self.gpio_read[0]),
            arg(self.gpio[1], self.gpio_read[1]),
            arg(self.gpio[2], self.gpio_read[2]),
            arg(self.bclk1, self.bclk1_read),
            arg(self.xout, self.xout_read),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ExitBootloader { func: ExitFunction, cts_interrupt: bool },
    PartInfo,
    GetRev,
    ConfigPins(PinConfig),
    PowerDown,
    SetProperty { property: u16, data: u16 },
    GetProperty { property: u16 },
    Standby(StandbyKind),
    TunerTuneFreq { mode: TuneMode, freq_hz: u32 },
    TunerStatus { intack: bool },
    AgcOverride { force_max_gain: bool, force_top_gain: bool },
    FineTune { persistent: bool, offset_500hz: i16 },
    AtvRestart,
    AtvCwTest { pc_lock: bool },
    AtvStatus { intack: bool },
    DtvRestart,
    DtvStatus { intack: bool },
    PowerUp(PowerUp),
}

impl Command {
    pub fn opcode(&self) -> u8 {
        match self {
            Command::ExitBootloader { .. } => CMD_EXIT_BOOTLOADER,
            Command::PartInfo => CMD_PART_INFO,
            Command::GetRev => CMD_GET_REV,
            Command::ConfigPins(_) => CMD_CONFIG_PINS,
            Command::PowerDown => CMD_POWER_DOWN,
            Command::SetProperty { .. } => CMD_SET_PROPERTY,
            Command::GetProperty { .. } => CMD_GET_PROPERTY,
            Command::Standby(_) => CMD_STANDBY,
            Command::TunerTuneFreq { .. } => CMD_TUNER_TUNE_FREQ,
            Command::TunerStatus { .. } => CMD_TUNER_STATUS,
            Command::AgcOverride { .. } => CMD_AGC_OVERRIDE,
            Command::FineTune { .. } => CMD_FINE_TUNE,
            Command::AtvRestart => CMD_ATV_RESTART,
            Command::AtvCwTest { .. } => CMD_ATV_CW_TEST,
            Command::AtvStatus { .. } => CMD_ATV_STATUS,
            Command::DtvRestart => CMD_DTV_RESTART,
            Command::DtvStatus { .. } => CMD_DTV_STATUS,
            Command::PowerUp(_) => CMD_POWER_UP,
        }
    }

    /// Length of the reply, status byte included.
    pub fn response_len(&self) -> usize {
        match self {
            Command::PartInfo => 13,
            Command::GetRev => 10,
            Command::ConfigPins(_) => 6,
            Command::SetProperty { .. } | Command::GetProperty { .. } => 4,
            Command::TunerStatus { .. } => 12,
            Command::AtvStatus { .. } => 9,
            Command::DtvStatus { .. } => 4,
            _ => 1,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![self.opcode()];
        match *self {
            Command::ExitBootloader {
                func,
                cts_interrupt,
            } => buf.push(func as u8 | (cts_interrupt as u8) << 7),
            Command::PartInfo
            | Command::GetRev
            | Command::PowerDown
            | Command::AtvRestart
            | Command::DtvRestart => {}
            Command::ConfigPins(pins) => buf.extend_from_slice(&pins.args()),
            Command::SetProperty { property, data } => {
                let mut args = [0u8; 5];
                LittleEndian::write_u16(&mut args[1..3], property);
                LittleEndian::write_u16(&mut args[3..5], data);
                buf.extend_from_slice(&args);
            }
            Command::GetProperty { property } => {
                let mut args = [0u8; 3];
                LittleEndian::write_u16(&mut args[1..3], property);
                buf.extend_from_slice(&args);
            }
            Command::Standby(kind) => buf.push(kind as u8),
            Command::TunerTuneFreq { mode, freq_hz } => {
                let mut args = [0u8; 7];
                args[0] = mode as u8;
                LittleEndian::write_u32(&mut args[3..7], freq_hz);
                buf.extend_from_slice(&args);
            }
            Command::TunerStatus { intack }
            | Command::AtvStatus { intack }
            | Command::DtvStatus { intack } => buf.push(intack as u8),
            Command::AgcOverride {
                force_max_gain,
                force_top_gain,
            } => buf.push(force_max_gain as u8 | (force_top_gain as u8) << 1),
            Command::FineTune {
                persistent,
                offset_500hz,
            } => {
                let mut args = [0u8; 3];
                args[0] = persistent as u8;
                LittleEndian::write_i16(&mut args[1..3], offset_500hz);
                buf.extend_from_slice(&args);
            }
            Command::AtvCwTest { pc_lock } => buf.push(pc_lock as u8),
            Command::PowerUp(p) => {
                buf.extend_from_slice(&[
                    p.subcode,
                    1,
                    0,
                    0,
                    p.clock_mode | p.clock_freq << 2,
                    p.addr_mode << 4,
                    p.func | (p.cts_interrupt as u8) << 7,
                    p.wake_up as u8,
                ]);
            }
        }
        buf
    }
}

/// Identity reported by PART_INFO. Only valid while in the bootloader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PartInfo {
    pub chiprev: u8,
    pub part: u8,
    pub pmajor: u8,
    pub pminor: u8,
    pub pbuild: u8,
    pub serial: u32,
    pub romid: u8,
}

impl PartInfo {
    pub fn from_bytes(buf: &[u8]) -> Self {
        PartInfo {
            chiprev: buf[1] & 0x0f,
            part: buf[2],
            pmajor: buf[3],
            pminor: buf[4],
            pbuild: buf[5],
            serial: LittleEndian::read_u32(&buf[8..12]),
            romid: buf[12],
        }
    }
}

/// Firmware revision reported by GET_REV.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Revision {
    pub pn: u8,
    pub fwmajor: u8,
    pub fwminor: u8,
    pub patch: u16,
    pub cmpmajor: u8,
    pub cmpminor: u8,
    pub cmpbuild: u8,
    pub chiprev: u8,
}

impl Revision {
    pub fn from_bytes(buf: &[u8]) -> Self {
        Revision {
            pn: buf[1],
            fwmajor: buf[2],
            fwminor: buf[3],
            patch: LittleEndian::read_u16(&buf[4..6]),
            cmpmajor: buf[6],
            cmpminor: buf[7],
            cmpbuild: buf[8],
            chiprev: buf[9] & 0x0f,
        }
    }
}

/// Pin levels reported back by CONFIG_PINS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PinState {
    pub gpio: [bool; 3],
    pub bclk1: bool,
    pub xout: bool,
}

impl PinState {
    pub fn from_bytes(buf: &[u8]) -> Self {
        let level = |b: u8| b & 0x80 != 0;
        PinState {
            gpio: [level(buf[1]), level(buf[2]), level(buf[3])],
            bclk1: level(buf[4]),
            xout: level(buf[5]),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TunerStatus {
    pub tcint: bool,
    pub rssilint: bool,
    pub rssihint: bool,
    pub tc: bool,
    pub rssil: bool,
    pub rssih: bool,
    /// dBm
    pub rssi: i8,
    pub freq_hz: u32,
    pub mode: u8,
    pub vco_code: i16,
}

impl TunerStatus {
    pub fn from_bytes(buf: &[u8]) -> Self {
        TunerStatus {
            tcint: buf[1] & 0x01 != 0,
            rssilint: buf[1] & 0x02 != 0,
            rssihint: buf[1] & 0x04 != 0,
            tc: buf[2] & 0x01 != 0,
            rssil: buf[2] & 0x02 != 0,
            rssih: buf[2] & 0x04 != 0,
            rssi: buf[3] as i8,
            freq_hz: LittleEndian::read_u32(&buf[4..8]),
            mode: buf[8] & 0x01,
            vco_code: LittleEndian::read_i16(&buf[9..11]),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AtvStatus {
    pub chlint: bool,
    pub pclint: bool,
    pub dlint: bool,
    pub snrlint: bool,
    pub snrhint: bool,
    pub chl: bool,
    pub pcl: bool,
    pub dl: bool,
    pub snrl: bool,
    pub snrh: bool,
    pub video_snr: u8,
    /// Carrier offset from the tuned frequency, kHz.
    pub afc_freq: i16,
    pub video_sc_spacing: i16,
    pub video_sys: u8,
    pub color: u8,
}

impl AtvStatus {
    pub fn from_bytes(buf: &[u8]) -> Self {
        let bit = |b: u8, n: u8| b & (1 << n) != 0;
        AtvStatus {
            chlint: bit(buf[1], 0),
            pclint: bit(buf[1], 1),
            dlint: bit(buf[1], 2),
            snrlint: bit(buf[1], 3),
            snrhint: bit(buf[1], 4),
            chl: bit(buf[2], 0),
            pcl: bit(buf[2], 1),
            dl: bit(buf[2], 2),
            snrl: bit(buf[2], 3),
            snrh: bit(buf[2], 4),
            video_snr: buf[3],
            afc_freq: LittleEndian::read_i16(&buf[4..6]),
            video_sc_spacing: LittleEndian::read_i16(&buf[6..8]),
            video_sys: buf[8] & 0x07,
            color: (buf[8] >> 4) & 0x01,
        }
    }

    /// AFC offset in Hz.
    pub fn afc_hz(&self) -> i64 {
        self.afc_freq as i64 * 1000
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DtvStatus {
    pub chlint: bool,
    pub chl: bool,
    pub bw: u8,
    pub modulation: u8,
}

impl DtvStatus {
    pub fn from_bytes(buf: &[u8]) -> Self {
        DtvStatus {
            chlint: buf[1] & 0x01 != 0,
            chl: buf[2] & 0x01 != 0,
            bw: buf[3] & 0x0f,
            modulation: buf[3] >> 4,
        }
    }
}

/// Data word returned by SET_PROPERTY (previous value) and GET_PROPERTY.
pub fn property_data(buf: &[u8]) -> u16 {
    LittleEndian::read_u16(&buf[2..4])
}
