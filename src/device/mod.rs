//! RTL2832U USB bridge used as an I2C master for the tuner.
pub mod constants;
pub use constants::*;
pub mod device_handle;
#[cfg(test)]
mod mock_device_handle;

#[cfg(not(test))]
use device_handle::DeviceHandle;
#[cfg(test)]
use mock_device_handle::MockDeviceHandle as DeviceHandle;

use crate::error::{Result, Si21xxError};
use crate::transport::Transport;
use log::{error, info, trace};

#[cfg(test)]
mod device_test;

#[derive(Debug)]
pub struct Device {
    handle: DeviceHandle,
}

impl Device {
    pub fn new(index: usize) -> Result<Device> {
        Ok(Device {
            handle: DeviceHandle::open(index)?,
        })
    }

    /// Opens a bridge and leaves its I2C repeater enabled so tuner
    /// transactions pass straight through.
    pub fn open(index: usize) -> Result<Device> {
        let mut dev = Device::new(index)?;
        dev.claim_interface(INTERFACE_ID)?;
        dev.test_write()?;
        dev.set_i2c_repeater(true)?;
        Ok(dev)
    }

    /// Disables the repeater, detaching the tuner from the bridge bus.
    pub fn close(&self) -> Result<()> {
        self.set_i2c_repeater(false)
    }

    pub fn claim_interface(&mut self, iface: u8) -> Result<()> {
        Ok(self.handle.claim_interface(iface)?)
    }

    pub fn test_write(&mut self) -> Result<()> {
        // try a dummy write and reset device if it fails
        let len: usize = self.write_reg(BLOCK_USB, USB_SYSCTL, 0x09, 1)?;
        if len == 0 {
            info!("Resetting device...");
            self.handle.reset()?;
        }
        Ok(())
    }

    pub fn write_reg(&self, block: u16, addr: u16, val: u16, len: usize) -> Result<usize> {
        assert!(len == 1 || len == 2);
        // Registers are written big endian
        let data: [u8; 2] = val.to_be_bytes();
        let data_slice = if len == 1 { &data[1..2] } else { &data };
        let index = (block << 8) | 0x10;
        Ok(self
            .handle
            .write_control(CTRL_OUT, 0, addr, index, data_slice, CTRL_TIMEOUT)?)
    }

    /// Only supports u8 reads
    pub fn demod_read_reg(&self, page: u16, addr: u16) -> Result<u16> {
        let mut data = [0_u8];
        if let Err(e) =
            self.handle
                .read_control(CTRL_IN, 0, (addr << 8) | 0x20, page, &mut data, CTRL_TIMEOUT)
        {
            error!(
                "demod_read_reg failed: {} page: {:#02x} addr: {:#02x}",
                e, page, addr
            );
            return Err(e);
        }
        Ok(data[0] as u16)
    }

    pub fn demod_write_reg(&self, page: u16, addr: u16, val: u16) -> Result<usize> {
        let index = 0x10 | page;
        let value = (addr << 8) | 0x20;
        let data = [val as u8];

        let bytes = match self
            .handle
            .write_control(CTRL_OUT, 0, value, index, &data, CTRL_TIMEOUT)
        {
            Ok(n) => n,
            Err(e) => {
                error!(
                    "demod_write_reg failed: {} page: {:#02x} addr: {:#02x} val: {:#02x}",
                    e, page, addr, val
                );
                return Err(e);
            }
        };

        // dummy read flushes the write through the demod
        self.demod_read_reg(0x0a, 0x1)?;

        Ok(bytes)
    }

    pub fn set_i2c_repeater(&self, enable: bool) -> Result<()> {
        let val = match enable {
            true => REPEATER_ON,
            false => REPEATER_OFF,
        };
        self.demod_write_reg(DEMOD_REPEATER_PAGE, DEMOD_REPEATER_ADDR, val)
            .map(|_| ())
    }

    /// `i2c_addr` is the 7-bit address; the bridge takes it shifted.
    pub fn i2c_write(&self, i2c_addr: u8, buffer: &[u8]) -> Result<usize> {
        self.write_array(BLOCK_IIC, (i2c_addr as u16) << 1, buffer)
    }

    pub fn i2c_read(&self, i2c_addr: u8, buffer: &mut [u8]) -> Result<usize> {
        self.read_array(BLOCK_IIC, (i2c_addr as u16) << 1, buffer)
    }

    pub fn read_array(&self, block: u16, addr: u16, arr: &mut [u8]) -> Result<usize> {
        let index: u16 = block << 8;
        self.handle
            .read_control(CTRL_IN, 0, addr, index, arr, CTRL_TIMEOUT)
    }

    pub fn write_array(&self, block: u16, addr: u16, arr: &[u8]) -> Result<usize> {
        let index: u16 = (block << 8) | 0x10;
        self.handle
            .write_control(CTRL_OUT, 0, addr, index, arr, CTRL_TIMEOUT)
    }
}

impl Transport for Device {
    fn write_bytes(&mut self, i2c_addr: u8, buf: &[u8]) -> Result<()> {
        trace!("i2c write {:#04x}: {:02x?}", i2c_addr, buf);
        let n = self.i2c_write(i2c_addr, buf)?;
        if n != buf.len() {
            return Err(Si21xxError::Bus(format!(
                "short i2c write: {} of {} bytes",
                n,
                buf.len()
            )));
        }
        Ok(())
    }

    fn read_bytes(&mut self, i2c_addr: u8, buf: &mut [u8]) -> Result<()> {
        let n = self.i2c_read(i2c_addr, buf)?;
        if n != buf.len() {
            return Err(Si21xxError::Bus(format!(
                "short i2c read: {} of {} bytes",
                n,
                buf.len()
            )));
        }
        trace!("i2c read {:#04x}: {:02x?}", i2c_addr, buf);
        Ok(())
    }
}
