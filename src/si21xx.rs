use crate::commands::{
    property_data, AtvStatus, Command, DtvStatus, PartInfo, PinConfig, PinState, Revision,
    StandbyKind, Status, TunerStatus, PIN_DISABLE, PIN_NO_CHANGE, PIN_XOUT,
};
use crate::config::Config;
use crate::device::Device;
use crate::error::{Result, Si21xxError};
use crate::firmware::LoaderState;
use crate::properties::{Feature, Field, PropertyId, PropertyStore};
use crate::scan::ChannelList;
use crate::transport::{Clock, SystemClock, Transport};
use log::{debug, error, info, trace};

/// One Si21xx chip on one bus.
///
/// All transactions block until the chip answers or a timeout expires.
/// Access to a chip must be serialised by the caller; `&mut self` on every
/// transaction enforces that within one thread.
#[derive(Debug)]
pub struct Si21xx<T: Transport, C: Clock = SystemClock> {
    pub(crate) transport: T,
    pub(crate) clock: C,
    pub(crate) config: Config,
    pub(crate) props: PropertyStore,
    pub(crate) status: Status,
    pub(crate) part_info: Option<PartInfo>,
    pub(crate) tuner_status: TunerStatus,
    pub(crate) atv_status: AtvStatus,
    pub(crate) dtv_status: DtvStatus,
    pub(crate) loader_state: LoaderState,
    pub(crate) channels: ChannelList,
}

impl<T: Transport> Si21xx<T, SystemClock> {
    pub fn new(transport: T, config: Config) -> Self {
        Si21xx::with_clock(transport, SystemClock::new(), config)
    }
}

impl Si21xx<Device> {
    /// Opens the `index`-th supported USB bridge. The chip is not touched
    /// until `init` or `power_up_with_patch`.
    pub fn open(index: usize, config: Config) -> Result<Self> {
        Ok(Si21xx::new(Device::open(index)?, config))
    }

    pub fn close(&mut self) -> Result<()> {
        self.transport.close()
    }
}

impl<T: Transport, C: Clock> Si21xx<T, C> {
    pub fn with_clock(transport: T, clock: C, config: Config) -> Self {
        let channels = ChannelList::with_capacity(config.max_channels);
        Si21xx {
            transport,
            clock,
            config,
            props: PropertyStore::new(),
            status: Status::default(),
            part_info: None,
            tuner_status: TunerStatus::default(),
            atv_status: AtvStatus::default(),
            dtv_status: DtvStatus::default(),
            loader_state: LoaderState::Idle,
            channels,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn properties(&self) -> &PropertyStore {
        &self.props
    }

    /// Local copy of the properties. Changes reach the chip through
    /// `set_property` or `download_all_properties`.
    pub fn properties_mut(&mut self) -> &mut PropertyStore {
        &mut self.props
    }

    /// Status byte from the most recent read.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn part_info(&self) -> Option<&PartInfo> {
        self.part_info.as_ref()
    }

    pub fn last_tuner_status(&self) -> &TunerStatus {
        &self.tuner_status
    }

    pub fn last_atv_status(&self) -> &AtvStatus {
        &self.atv_status
    }

    pub fn last_dtv_status(&self) -> &DtvStatus {
        &self.dtv_status
    }

    fn elapsed_since(&self, start: u64) -> u64 {
        self.clock.now_ms().saturating_sub(start)
    }

    /// Reads the status byte without issuing a command.
    pub fn check_status(&mut self) -> Result<Status> {
        let mut buf = [0u8; 1];
        self.transport.read_bytes(self.config.i2c_addr, &mut buf)?;
        self.status = Status(buf[0]);
        Ok(self.status)
    }

    /// Waits until the chip is clear to accept a command.
    pub fn poll_for_cts(&mut self) -> Result<()> {
        let start = self.clock.now_ms();
        while self.elapsed_since(start) < self.config.cts_timeout_ms {
            if self.check_status()?.cts() {
                return Ok(());
            }
        }
        error!("CTS timeout after {} ms", self.config.cts_timeout_ms);
        Err(Si21xxError::CtsTimeout)
    }

    /// Sends one command and returns its reply, status byte first.
    pub fn send_command(&mut self, command: &Command) -> Result<Vec<u8>> {
        let bytes = command.encode();
        self.transact(command.opcode(), &bytes, command.response_len())
    }

    /// CTS poll, write, then poll the reply until CTS shows it is complete.
    pub(crate) fn transact(
        &mut self,
        opcode: u8,
        bytes: &[u8],
        response_len: usize,
    ) -> Result<Vec<u8>> {
        self.poll_for_cts()?;
        trace!("cmd {:#04x} > {:02x?}", opcode, bytes);
        self.transport.write_bytes(self.config.i2c_addr, bytes)?;

        let mut rsp = vec![0u8; response_len];
        let start = self.clock.now_ms();
        let mut ready = false;
        while self.elapsed_since(start) < self.config.response_timeout_ms {
            self.transport.read_bytes(self.config.i2c_addr, &mut rsp)?;
            self.status = Status(rsp[0]);
            if self.status.cts() {
                ready = true;
                break;
            }
        }
        if !ready {
            error!("no response to command {:#04x}", opcode);
            return Err(Si21xxError::ResponseTimeout { opcode });
        }
        trace!("cmd {:#04x} < {:02x?}", opcode, rsp);
        if self.status.err() {
            return Err(Si21xxError::ChipError {
                opcode,
                status: self.status.0,
            });
        }
        Ok(rsp)
    }

    /// Packs `property` from the local store and writes it to the chip.
    pub fn set_property(&mut self, property: PropertyId) -> Result<()> {
        let data = self.props.pack(property)?;
        debug!("{} = {:#06x}", property.name(), data);
        self.send_command(&Command::SetProperty {
            property: property.code(),
            data,
        })?;
        Ok(())
    }

    /// Reads `property` from the chip into the local store.
    pub fn get_property(&mut self, property: PropertyId) -> Result<u16> {
        let rsp = self.send_command(&Command::GetProperty {
            property: property.code(),
        })?;
        let data = property_data(&rsp);
        self.props.unpack(property, data);
        Ok(data)
    }

    /// Updates one field locally, then writes its property.
    pub fn set_field(&mut self, field: Field, value: i32) -> Result<()> {
        self.props.set(field, value)?;
        self.set_property(field.property)
    }

    pub fn download_properties(&mut self, feature: Feature) -> Result<()> {
        for property in PropertyId::all().filter(|p| p.feature() == feature) {
            self.set_property(property)?;
        }
        Ok(())
    }

    pub fn download_all_properties(&mut self) -> Result<()> {
        for feature in Feature::ALL {
            self.download_properties(feature)?;
        }
        Ok(())
    }

    /// Returns the local store to its defaults and sends every property to
    /// a running chip. Settings left behind by a scan or tune are discarded.
    pub fn configure(&mut self) -> Result<()> {
        self.props.reset_defaults();
        info!("Downloading default properties");
        self.download_all_properties()
    }

    pub fn get_rev(&mut self) -> Result<Revision> {
        let rsp = self.send_command(&Command::GetRev)?;
        Ok(Revision::from_bytes(&rsp))
    }

    pub fn config_pins(&mut self, pins: PinConfig) -> Result<PinState> {
        let rsp = self.send_command(&Command::ConfigPins(pins))?;
        Ok(PinState::from_bytes(&rsp))
    }

    /// Drives the crystal clock out on BCLK1.
    pub fn clock_on(&mut self) -> Result<()> {
        self.config_pins(PinConfig {
            bclk1: PIN_XOUT,
            xout: PIN_NO_CHANGE,
            ..PinConfig::default()
        })
        .map(|_| ())
    }

    pub fn clock_off(&mut self) -> Result<()> {
        self.config_pins(PinConfig {
            bclk1: PIN_DISABLE,
            xout: PIN_NO_CHANGE,
            ..PinConfig::default()
        })
        .map(|_| ())
    }

    pub fn xout_on(&mut self) -> Result<()> {
        self.config_pins(PinConfig {
            bclk1: PIN_NO_CHANGE,
            xout: PIN_XOUT,
            ..PinConfig::default()
        })
        .map(|_| ())
    }

    pub fn xout_off(&mut self) -> Result<()> {
        self.config_pins(PinConfig {
            bclk1: PIN_NO_CHANGE,
            xout: PIN_DISABLE,
            ..PinConfig::default()
        })
        .map(|_| ())
    }

    pub fn standby(&mut self) -> Result<()> {
        self.send_command(&Command::Standby(StandbyKind::Normal))?;
        Ok(())
    }

    /// Powers the chip down. Firmware must be reloaded afterwards.
    pub fn power_down(&mut self) -> Result<()> {
        self.send_command(&Command::PowerDown)?;
        self.loader_state = LoaderState::Idle;
        Ok(())
    }

    pub fn agc_override(&mut self, force_max_gain: bool, force_top_gain: bool) -> Result<()> {
        self.send_command(&Command::AgcOverride {
            force_max_gain,
            force_top_gain,
        })?;
        Ok(())
    }

    /// Shifts the LO by `offset_500hz` steps of 500 Hz without retuning.
    pub fn fine_tune(&mut self, persistent: bool, offset_500hz: i16) -> Result<()> {
        self.send_command(&Command::FineTune {
            persistent,
            offset_500hz,
        })?;
        Ok(())
    }

    pub fn atv_restart(&mut self) -> Result<()> {
        self.send_command(&Command::AtvRestart)?;
        Ok(())
    }

    pub fn dtv_restart(&mut self) -> Result<()> {
        self.send_command(&Command::DtvRestart)?;
        Ok(())
    }

    pub fn atv_cw_test(&mut self, pc_lock: bool) -> Result<()> {
        self.send_command(&Command::AtvCwTest { pc_lock })?;
        Ok(())
    }

    pub fn tuner_status(&mut self, intack: bool) -> Result<TunerStatus> {
        let rsp = self.send_command(&Command::TunerStatus { intack })?;
        self.tuner_status = TunerStatus::from_bytes(&rsp);
        Ok(self.tuner_status)
    }

    pub fn atv_status(&mut self, intack: bool) -> Result<AtvStatus> {
        let rsp = self.send_command(&Command::AtvStatus { intack })?;
        self.atv_status = AtvStatus::from_bytes(&rsp);
        Ok(self.atv_status)
    }

    pub fn dtv_status(&mut self, intack: bool) -> Result<DtvStatus> {
        let rsp = self.send_command(&Command::DtvStatus { intack })?;
        self.dtv_status = DtvStatus::from_bytes(&rsp);
        Ok(self.dtv_status)
    }

    /// Frequency the tuner is currently set to, in Hz.
    pub fn get_rf(&mut self) -> Result<u32> {
        Ok(self.tuner_status(true)?.freq_hz)
    }
}
