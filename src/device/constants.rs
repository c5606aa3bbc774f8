use std::time::Duration;

pub struct UsbDeviceSignature {
    pub vid: u16,
    pub pid: u16,
    pub description: &'static str,
}

/// RTL2832U/P bridges whose I2C repeater can reach an Si21xx tuner.
pub const KNOWN_BRIDGES: &'static [UsbDeviceSignature; 3] = &[
    UsbDeviceSignature {
        vid: 0x0bda,
        pid: 0x2832,
        description: "Generic RTL2832U",
    },
    UsbDeviceSignature {
        vid: 0x0bda,
        pid: 0x2838,
        description: "Generic RTL2832U OEM",
    },
    UsbDeviceSignature {
        vid: 0x15f4,
        pid: 0x0131,
        description: "Astrometa DVB-T/DVB-T2",
    },
];

pub const INTERFACE_ID: u8 = 0;

// Blocks
pub const BLOCK_USB: u16 = 1;
pub const BLOCK_IIC: u16 = 6;

// USB Registers
pub const USB_SYSCTL: u16 = 0x2000;

// Demod page 1 register 0x01 gates the I2C repeater
pub const DEMOD_REPEATER_PAGE: u16 = 1;
pub const DEMOD_REPEATER_ADDR: u16 = 0x01;
pub const REPEATER_ON: u16 = 0x18;
pub const REPEATER_OFF: u16 = 0x10;

pub const CTRL_IN: u8 =
    rusb::constants::LIBUSB_ENDPOINT_IN | rusb::constants::LIBUSB_REQUEST_TYPE_VENDOR;
pub const CTRL_OUT: u8 =
    rusb::constants::LIBUSB_ENDPOINT_OUT | rusb::constants::LIBUSB_REQUEST_TYPE_VENDOR;
pub const CTRL_TIMEOUT: Duration = Duration::from_millis(300);
