//! Simulated chip used by the protocol tests.
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use byteorder::{ByteOrder, LittleEndian};

use crate::commands::*;
use crate::config::Config;
use crate::error::{Result, Si21xxError};
use crate::properties::PropertyId;
use crate::si21xx::Si21xx;
use crate::transport::{Clock, Transport};
use crate::tune::TuneMode;

/// Clock that only moves when the simulated bus is read.
#[derive(Debug, Clone)]
pub struct SimClock(pub Rc<Cell<u64>>);

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

/// Analog carrier the simulated tuner can lock to.
#[derive(Debug, Clone, Copy)]
pub struct Station {
    pub freq: u32,
    /// Lock range either side of `freq`.
    pub window: u32,
    /// System L style positive video modulation.
    pub positive: bool,
}

impl Station {
    pub fn exact(freq: u32) -> Station {
        Station {
            freq,
            window: 0,
            positive: false,
        }
    }
}

#[derive(Debug)]
pub struct SimChip {
    pub clock: Rc<Cell<u64>>,
    /// Time each read takes.
    pub read_cost_ms: u64,
    /// Never reports CTS.
    pub busy: bool,
    pub reject_opcode: Option<u8>,
    pub reject_property: Option<u16>,
    /// 1-based patch line the chip rejects.
    pub reject_patch_line: Option<usize>,
    pub part_info: [u8; 13],
    pub revision: [u8; 10],
    pub properties: HashMap<u16, u16>,
    pub writes: Vec<Vec<u8>>,
    pub patch_lines: Vec<Vec<u8>>,
    pub tuned_freq: u32,
    pub tune_mode: Option<TuneMode>,
    tuned_at: Option<u64>,
    pub acquire_ms: u64,
    pub lock_ms: u64,
    pub never_tunint: bool,
    pub dtv_lock: bool,
    pub stations: Vec<Station>,
    err: bool,
    payload: Vec<u8>,
}

impl SimChip {
    pub fn new() -> Self {
        SimChip {
            clock: Rc::new(Cell::new(0)),
            read_cost_ms: 5,
            busy: false,
            reject_opcode: None,
            reject_property: None,
            reject_patch_line: None,
            // Si2176 rev B, "30" patch, ROM 0x13
            part_info: [
                0x80, 0x02, 76, b'3', b'0', 0x02, 0, 0, 0x78, 0x56, 0x34, 0x12, 0x13,
            ],
            revision: [0x80, 76, b'3', b'0', 0x34, 0x12, b'2', b'1', 7, 0x02],
            properties: HashMap::new(),
            writes: Vec::new(),
            patch_lines: Vec::new(),
            tuned_freq: 0,
            tune_mode: None,
            tuned_at: None,
            acquire_ms: 0,
            lock_ms: 0,
            never_tunint: false,
            dtv_lock: false,
            stations: Vec::new(),
            err: false,
            payload: Vec::new(),
        }
    }

    pub fn with_stations(stations: &[Station]) -> Self {
        let mut chip = SimChip::new();
        chip.stations = stations.to_vec();
        chip
    }

    pub fn tuned_at(&self) -> Option<u64> {
        self.tuned_at
    }

    pub fn property(&self, code: u16) -> Option<u16> {
        self.properties.get(&code).copied()
    }

    /// Every SET_PROPERTY written, in order.
    pub fn property_writes(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.writes
            .iter()
            .filter(|w| w[0] == CMD_SET_PROPERTY && w.len() == 6)
            .map(|w| (LittleEndian::read_u16(&w[2..4]), LittleEndian::read_u16(&w[4..6])))
    }

    pub fn tuned(&self) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|w| w[0] == CMD_TUNER_TUNE_FREQ && w.len() == 8)
            .map(|w| LittleEndian::read_u32(&w[4..8]))
            .collect()
    }

    fn video_sys(&self) -> u16 {
        self.property(PropertyId::AtvVideoMode.code()).unwrap_or(0) & 0x07
    }

    fn locked_station(&self) -> Option<Station> {
        // L and LP carry positive modulation
        let positive = matches!(self.video_sys(), 6 | 7);
        self.stations.iter().copied().find(|s| {
            s.positive == positive && (self.tuned_freq as i64 - s.freq as i64).abs() <= s.window as i64
        })
    }

    fn status(&self, now: u64) -> u8 {
        let mut status = 0;
        if !self.busy {
            status |= STATUS_CTS;
        }
        if self.err {
            status |= STATUS_ERR;
        }
        if let Some(at) = self.tuned_at {
            if !self.never_tunint && now >= at + self.acquire_ms {
                status |= STATUS_TUNINT;
                if now >= at + self.acquire_ms + self.lock_ms {
                    match self.tune_mode {
                        Some(TuneMode::Atv) if self.locked_station().is_some() => {
                            status |= STATUS_ATVINT
                        }
                        Some(TuneMode::Dtv) if self.dtv_lock => status |= STATUS_DTVINT,
                        _ => {}
                    }
                }
            }
        }
        status
    }

    fn handle(&mut self, bytes: &[u8]) {
        self.err = self.reject_opcode == Some(bytes[0]);
        self.payload.clear();

        if bytes.len() == 8 && bytes[0] != CMD_TUNER_TUNE_FREQ {
            self.patch_lines.push(bytes.to_vec());
            self.err = self.reject_patch_line == Some(self.patch_lines.len());
            return;
        }
        if self.err {
            return;
        }
        match bytes[0] {
            CMD_PART_INFO => self.payload.extend_from_slice(&self.part_info[1..]),
            CMD_GET_REV => self.payload.extend_from_slice(&self.revision[1..]),
            CMD_SET_PROPERTY => {
                let code = LittleEndian::read_u16(&bytes[2..4]);
                if self.reject_property == Some(code) {
                    self.err = true;
                    return;
                }
                let old = self
                    .properties
                    .insert(code, LittleEndian::read_u16(&bytes[4..6]))
                    .unwrap_or(0);
                self.payload = vec![0, old as u8, (old >> 8) as u8];
            }
            CMD_GET_PROPERTY => {
                let data = self.property(LittleEndian::read_u16(&bytes[2..4])).unwrap_or(0);
                self.payload = vec![0, data as u8, (data >> 8) as u8];
            }
            CMD_TUNER_TUNE_FREQ => {
                self.tuned_freq = LittleEndian::read_u32(&bytes[4..8]);
                self.tune_mode = Some(if bytes[1] & 1 == 1 {
                    TuneMode::Atv
                } else {
                    TuneMode::Dtv
                });
                self.tuned_at = Some(self.clock.get());
            }
            CMD_TUNER_STATUS => {
                let mut p = [0u8; 11];
                LittleEndian::write_u32(&mut p[3..7], self.tuned_freq);
                self.payload = p.to_vec();
            }
            CMD_DTV_STATUS => {
                let locked = (self.dtv_lock && self.tune_mode == Some(TuneMode::Dtv)) as u8;
                // bandwidth and modulation share the low byte of DTV_MODE
                let mode = self.property(PropertyId::DtvMode.code()).unwrap_or(0x0028);
                self.payload = vec![locked, locked, mode as u8];
            }
            CMD_ATV_STATUS => {
                let mut p = [0u8; 8];
                if let Some(station) = self.locked_station() {
                    p[1] = 0x01;
                    let afc_khz = (station.freq as i64 - self.tuned_freq as i64) / 1000;
                    LittleEndian::write_i16(&mut p[3..5], afc_khz as i16);
                    p[7] = self.video_sys() as u8;
                }
                self.payload = p.to_vec();
            }
            _ => {}
        }
    }
}

impl Transport for SimChip {
    fn write_bytes(&mut self, _i2c_addr: u8, buf: &[u8]) -> Result<()> {
        if buf.is_empty() {
            return Err(Si21xxError::Bus("empty write".to_string()));
        }
        self.writes.push(buf.to_vec());
        self.handle(buf);
        Ok(())
    }

    fn read_bytes(&mut self, _i2c_addr: u8, buf: &mut [u8]) -> Result<()> {
        let now = self.clock.get();
        buf.fill(0);
        buf[0] = self.status(now);
        for (dst, src) in buf[1..].iter_mut().zip(&self.payload) {
            *dst = *src;
        }
        self.clock.set(now + self.read_cost_ms);
        Ok(())
    }
}

pub fn sim_tuner(chip: SimChip) -> Si21xx<SimChip, SimClock> {
    let clock = SimClock(chip.clock.clone());
    Si21xx::with_clock(chip, clock, Config::default())
}
