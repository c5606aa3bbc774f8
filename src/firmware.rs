//! Boot sequence: power up into the bootloader, identify the part, patch the
//! ROM firmware line by line, then start it.
use std::fmt;

use crate::commands::{Command, ExitFunction, PartInfo, PowerUp, PATCH_LINE_LEN};
use crate::error::{Result, Si21xxError};
use crate::si21xx::Si21xx;
use crate::transport::{Clock, Transport};
use log::{debug, error, info, warn};

/// Where the boot sequence stands. A failure anywhere ends in `Failed`;
/// the sequence can be run again from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    AwaitCts,
    PoweredUpBootloader,
    IntegrityChecked,
    /// Line being sent, counted from 1.
    Patching { line: usize },
    Running,
    Failed { during: BootStage },
}

/// Step of the boot sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootStage {
    AwaitCts,
    PowerUp,
    PartInfo,
    IntegrityCheck,
    Patching { line: usize },
    StartFirmware,
}

/// PART_INFO fields a board expects to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedPart {
    pub chiprev: u8,
    pub part: u8,
    pub pmajor: u8,
    pub pminor: u8,
    pub romid: u8,
}

impl ExpectedPart {
    /// Expects exactly what `info` reports.
    pub fn from_part_info(info: &PartInfo) -> Self {
        ExpectedPart {
            chiprev: info.chiprev,
            part: info.part,
            pmajor: info.pmajor,
            pminor: info.pminor,
            romid: info.romid,
        }
    }

    /// Compares every field and returns all that differ.
    pub fn check(&self, info: &PartInfo) -> Vec<PartMismatch> {
        [
            (PartField::ChipRev, self.chiprev, info.chiprev),
            (PartField::Part, self.part, info.part),
            (PartField::PMajor, self.pmajor, info.pmajor),
            (PartField::PMinor, self.pminor, info.pminor),
            (PartField::RomId, self.romid, info.romid),
        ]
        .into_iter()
        .filter(|(_, expected, actual)| expected != actual)
        .map(|(field, expected, actual)| PartMismatch {
            field,
            expected,
            actual,
        })
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartField {
    ChipRev,
    Part,
    PMajor,
    PMinor,
    RomId,
}

impl fmt::Display for PartField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PartField::ChipRev => "chiprev",
            PartField::Part => "part",
            PartField::PMajor => "pmajor",
            PartField::PMinor => "pminor",
            PartField::RomId => "romid",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartMismatch {
    pub field: PartField,
    pub expected: u8,
    pub actual: u8,
}

impl fmt::Display for PartMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} expected {:#04x} got {:#04x}",
            self.field, self.expected, self.actual
        )
    }
}

/// Firmware patch or video filter table: a run of 8-byte command lines.
#[derive(Debug, Clone, Copy)]
pub struct FirmwareImage<'a> {
    rom_id: u8,
    data: &'a [u8],
}

impl<'a> FirmwareImage<'a> {
    /// `rom_id` is the ROM the patch was built against.
    pub fn new(rom_id: u8, data: &'a [u8]) -> Result<Self> {
        if data.len() % PATCH_LINE_LEN != 0 {
            return Err(Si21xxError::InvalidFirmware(format!(
                "{} bytes is not a whole number of {}-byte lines",
                data.len(),
                PATCH_LINE_LEN
            )));
        }
        Ok(FirmwareImage { rom_id, data })
    }

    pub fn rom_id(&self) -> u8 {
        self.rom_id
    }

    pub fn line_count(&self) -> usize {
        self.data.len() / PATCH_LINE_LEN
    }

    pub fn lines(&self) -> impl Iterator<Item = &'a [u8]> {
        self.data.chunks_exact(PATCH_LINE_LEN)
    }
}

impl<T: Transport, C: Clock> Si21xx<T, C> {
    pub fn loader_state(&self) -> LoaderState {
        self.loader_state
    }

    /// Runs the boot sequence from the start. The patch is applied only if
    /// its ROM id matches the part; otherwise the ROM firmware is started
    /// as is.
    pub fn power_up_with_patch(&mut self, firmware: Option<&FirmwareImage>) -> Result<PartInfo> {
        self.loader_state = LoaderState::Idle;
        self.part_info = None;
        let mut stage = BootStage::AwaitCts;
        let result = self.boot(firmware, &mut stage);
        if result.is_err() {
            if let (BootStage::Patching { .. }, LoaderState::Patching { line }) =
                (stage, self.loader_state)
            {
                stage = BootStage::Patching { line };
            }
            debug!("boot failed during {:?}", stage);
            self.loader_state = LoaderState::Failed { during: stage };
        }
        result
    }

    fn boot(
        &mut self,
        firmware: Option<&FirmwareImage>,
        stage: &mut BootStage,
    ) -> Result<PartInfo> {
        self.loader_state = LoaderState::AwaitCts;
        self.poll_for_cts()?;

        *stage = BootStage::PowerUp;
        self.send_command(&Command::PowerUp(PowerUp::default()))?;
        self.loader_state = LoaderState::PoweredUpBootloader;

        *stage = BootStage::PartInfo;
        let info = self.get_part_info()?;
        info!(
            "Found Si21{:02} rev {} patch {}{}, ROM {:#04x}",
            info.part,
            (b'A' + info.chiprev.saturating_sub(1)) as char,
            revision_char(info.pmajor),
            revision_char(info.pminor),
            info.romid
        );

        *stage = BootStage::IntegrityCheck;
        if let Some(expected) = &self.config.expected_part {
            let mismatches = expected.check(&info);
            if !mismatches.is_empty() {
                for m in &mismatches {
                    error!("part mismatch: {}", m);
                }
                return Err(Si21xxError::IncompatiblePart { mismatches });
            }
            self.loader_state = LoaderState::IntegrityChecked;
        }

        match firmware {
            Some(image) if image.rom_id() == info.romid => {
                *stage = BootStage::Patching { line: 0 };
                self.load_firmware(image)?
            }
            Some(image) => warn!(
                "patch is for ROM {:#04x}, part has {:#04x}; running ROM firmware",
                image.rom_id(),
                info.romid
            ),
            None => info!("No patch, running ROM firmware"),
        }

        *stage = BootStage::StartFirmware;
        self.start_firmware()?;
        Ok(info)
    }

    /// Reads PART_INFO. Only answered while in the bootloader.
    pub fn get_part_info(&mut self) -> Result<PartInfo> {
        let rsp = self.send_command(&Command::PartInfo)?;
        let info = PartInfo::from_bytes(&rsp);
        self.part_info = Some(info);
        Ok(info)
    }

    /// Sends every line of `image`, stopping at the first one the chip
    /// rejects.
    pub fn load_firmware(&mut self, image: &FirmwareImage) -> Result<()> {
        info!("Loading {} firmware lines", image.line_count());
        for (i, line) in image.lines().enumerate() {
            let n = i + 1;
            self.loader_state = LoaderState::Patching { line: n };
            if let Err(e) = self.transact(line[0], line, 1) {
                if n == 1 {
                    error!("firmware incompatible with part");
                }
                error!("firmware line {} rejected: {}", n, e);
                return Err(Si21xxError::FirmwareLine {
                    line: n,
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    /// Leaves the bootloader and runs the tuner firmware.
    pub fn start_firmware(&mut self) -> Result<()> {
        self.send_command(&Command::ExitBootloader {
            func: ExitFunction::Tuner,
            cts_interrupt: false,
        })
        .map_err(|e| {
            error!("failed to start firmware: {}", e);
            Si21xxError::StartFirmware(Box::new(e))
        })?;
        self.loader_state = LoaderState::Running;
        Ok(())
    }

    /// Loads a DLIF video filter table into the running firmware.
    pub fn load_video_filter(&mut self, table: &FirmwareImage) -> Result<()> {
        for (i, line) in table.lines().enumerate() {
            self.transact(line[0], line, 1)
                .map_err(|e| Si21xxError::FirmwareLine {
                    line: i + 1,
                    source: Box::new(e),
                })?;
        }
        info!("Video filter loaded, {} lines", table.line_count());
        Ok(())
    }

    /// Boots the chip and downloads every property.
    pub fn init(&mut self, firmware: Option<&FirmwareImage>) -> Result<PartInfo> {
        let info = self.power_up_with_patch(firmware)?;
        self.configure()?;
        Ok(info)
    }
}

/// Patch revisions are ASCII digits on most parts.
fn revision_char(b: u8) -> char {
    if b >= 0x30 {
        b as char
    } else {
        (b'0' + b % 10) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CMD_EXIT_BOOTLOADER, CMD_PART_INFO, CMD_POWER_UP};
    use crate::properties::{Field, PropertyId};
    use crate::scan::{ScanPlan, ScanThresholds};
    use crate::sim::{sim_tuner, SimChip};

    fn image_data(lines: usize) -> Vec<u8> {
        (0..lines)
            .flat_map(|i| [0x04, i as u8, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60])
            .collect()
    }

    fn expected() -> ExpectedPart {
        ExpectedPart {
            chiprev: 2,
            part: 76,
            pmajor: b'3',
            pminor: b'0',
            romid: 0x13,
        }
    }

    #[test]
    fn boot_sequence_with_patch() {
        let data = image_data(3);
        let image = FirmwareImage::new(0x13, &data).unwrap();
        let mut tuner = sim_tuner(SimChip::new());

        let info = tuner.power_up_with_patch(Some(&image)).unwrap();
        assert_eq!(info.part, 76);
        assert_eq!(tuner.loader_state(), LoaderState::Running);
        assert_eq!(tuner.part_info(), Some(&info));

        let writes = &tuner.transport.writes;
        assert_eq!(writes.len(), 6);
        assert_eq!(writes[0], vec![0xc0, 0x05, 0x01, 0x00, 0x00, 0x0b, 0x00, 0x00, 0x01]);
        assert_eq!(writes[1], vec![CMD_PART_INFO]);
        assert_eq!(writes[2], data[0..8].to_vec());
        assert_eq!(writes[5], vec![CMD_EXIT_BOOTLOADER, 0x01]);
    }

    #[test]
    fn rejected_line_stops_the_patch() {
        let data = image_data(10);
        let image = FirmwareImage::new(0x13, &data).unwrap();
        let mut chip = SimChip::new();
        chip.reject_patch_line = Some(5);
        let mut tuner = sim_tuner(chip);

        let err = tuner.power_up_with_patch(Some(&image)).unwrap_err();
        assert!(matches!(err, Si21xxError::FirmwareLine { line: 5, .. }));
        assert_eq!(tuner.transport.patch_lines.len(), 5);
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::Patching { line: 5 }
            }
        );
        assert!(!tuner
            .transport
            .writes
            .iter()
            .any(|w| w[0] == CMD_EXIT_BOOTLOADER));
    }

    #[test]
    fn every_mismatch_is_reported() {
        let mut chip = SimChip::new();
        chip.part_info[2] = 57;
        chip.part_info[12] = 0x12;
        let mut tuner = sim_tuner(chip);
        tuner.config.expected_part = Some(expected());
        let data = image_data(2);
        let image = FirmwareImage::new(0x13, &data).unwrap();

        match tuner.power_up_with_patch(Some(&image)).unwrap_err() {
            Si21xxError::IncompatiblePart { mismatches } => {
                assert_eq!(
                    mismatches,
                    vec![
                        PartMismatch {
                            field: PartField::Part,
                            expected: 76,
                            actual: 57
                        },
                        PartMismatch {
                            field: PartField::RomId,
                            expected: 0x13,
                            actual: 0x12
                        },
                    ]
                );
            }
            e => panic!("unexpected error {:?}", e),
        }
        assert!(tuner.transport.patch_lines.is_empty());
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::IntegrityCheck
            }
        );
    }

    #[test]
    fn matching_part_passes_integrity_check() {
        let mut tuner = sim_tuner(SimChip::new());
        tuner.config.expected_part = Some(expected());
        tuner.power_up_with_patch(None).unwrap();
        assert_eq!(tuner.loader_state(), LoaderState::Running);
    }

    #[test]
    fn patch_for_other_rom_is_skipped() {
        let data = image_data(4);
        let image = FirmwareImage::new(0x50, &data).unwrap();
        let mut tuner = sim_tuner(SimChip::new());
        tuner.power_up_with_patch(Some(&image)).unwrap();
        assert!(tuner.transport.patch_lines.is_empty());
        assert_eq!(tuner.loader_state(), LoaderState::Running);
    }

    #[test]
    fn failed_boot_can_be_rerun() {
        let data = image_data(4);
        let image = FirmwareImage::new(0x13, &data).unwrap();
        let mut chip = SimChip::new();
        chip.reject_patch_line = Some(2);
        let mut tuner = sim_tuner(chip);
        assert!(tuner.power_up_with_patch(Some(&image)).is_err());

        tuner.transport.reject_patch_line = None;
        tuner.power_up_with_patch(Some(&image)).unwrap();
        assert_eq!(tuner.loader_state(), LoaderState::Running);
        // 2 lines the first time, all 4 the second
        assert_eq!(tuner.transport.patch_lines.len(), 6);
        let power_ups = tuner
            .transport
            .writes
            .iter()
            .filter(|w| w[0] == CMD_POWER_UP)
            .count();
        assert_eq!(power_ups, 2);
    }

    #[test]
    fn exit_bootloader_failure() {
        let mut chip = SimChip::new();
        chip.reject_opcode = Some(CMD_EXIT_BOOTLOADER);
        let mut tuner = sim_tuner(chip);
        let err = tuner.power_up_with_patch(None).unwrap_err();
        assert!(matches!(err, Si21xxError::StartFirmware(_)));
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::StartFirmware
            }
        );
    }

    #[test]
    fn busy_chip_never_powers_up() {
        let mut chip = SimChip::new();
        chip.busy = true;
        let mut tuner = sim_tuner(chip);
        let err = tuner.power_up_with_patch(None).unwrap_err();
        assert!(matches!(err, Si21xxError::CtsTimeout));
        assert!(tuner.transport.writes.is_empty());
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::AwaitCts
            }
        );
    }

    #[test]
    fn failed_stage_is_recorded() {
        let mut chip = SimChip::new();
        chip.reject_opcode = Some(CMD_POWER_UP);
        let mut tuner = sim_tuner(chip);
        assert!(tuner.power_up_with_patch(None).is_err());
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::PowerUp
            }
        );

        tuner.transport.reject_opcode = Some(CMD_PART_INFO);
        assert!(tuner.power_up_with_patch(None).is_err());
        assert_eq!(
            tuner.loader_state(),
            LoaderState::Failed {
                during: BootStage::PartInfo
            }
        );
        assert_eq!(tuner.part_info(), None);
    }

    #[test]
    fn image_must_be_whole_lines() {
        assert!(matches!(
            FirmwareImage::new(0x13, &[0u8; 12]),
            Err(Si21xxError::InvalidFirmware(_))
        ));
        assert_eq!(FirmwareImage::new(0x13, &[0u8; 16]).unwrap().line_count(), 2);
    }

    #[test]
    fn init_downloads_properties() {
        let mut tuner = sim_tuner(SimChip::new());
        tuner.init(None).unwrap();
        assert_eq!(
            tuner.transport.property_writes().count(),
            crate::properties::PROPERTIES.len()
        );
    }

    #[test]
    fn reinit_after_scan_restores_default_properties() {
        let mut tuner = sim_tuner(SimChip::new());
        tuner.init(None).unwrap();
        let thresholds = ScanThresholds {
            rssi_lo: -40,
            rssi_hi: 10,
            snr_lo: 30,
            snr_hi: 50,
        };
        tuner
            .scan_system_m(0, 1, &thresholds, &ScanPlan::system_m(), |_, _| false)
            .unwrap();
        assert_eq!(
            tuner.transport.property(PropertyId::AtvRsqRssiThreshold.code()),
            Some(0x0ad8)
        );

        tuner.init(None).unwrap();
        let chip = &tuner.transport;
        assert_eq!(chip.property(PropertyId::AtvRsqRssiThreshold.code()), Some(0x00ba));
        assert_eq!(chip.property(PropertyId::AtvRsqSnrThreshold.code()), Some(0x2d19));
        assert_eq!(chip.property(PropertyId::AtvVideoMode.code()), Some(0x0000));
        assert_eq!(tuner.properties().get(Field::ATV_RSSI_LO), -70);
    }

    #[test]
    fn video_filter_lines_are_sent_in_order() {
        let data = image_data(3);
        let table = FirmwareImage::new(0, &data).unwrap();
        let mut tuner = sim_tuner(SimChip::new());
        tuner.load_video_filter(&table).unwrap();
        assert_eq!(tuner.transport.patch_lines.len(), 3);
        assert_eq!(tuner.transport.patch_lines[2][1], 2);
    }
}
