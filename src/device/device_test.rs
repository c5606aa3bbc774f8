// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use mockall::predicate::{self, eq};
use mockall::Sequence;

use crate::device::mock_device_handle::MockDeviceHandle;
use crate::device::Device;
use crate::error::Si21xxError;
use crate::transport::Transport;

use super::{BLOCK_IIC, BLOCK_USB, CTRL_IN, CTRL_OUT, CTRL_TIMEOUT, USB_SYSCTL};

const TUNER_ADDR: u8 = 0x60;

#[test]
fn test_write_reg_u8() {
    let index_expected = (BLOCK_USB << 8) | 0x10;
    let data_expected = 0x09_u16;

    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .with(
            eq(CTRL_OUT),
            eq(0),
            eq(USB_SYSCTL),
            eq(index_expected),
            predicate::always(),
            eq(CTRL_TIMEOUT),
        )
        .returning(move |_, _, _, _, data, _| {
            assert!(data.len() == 1);
            assert_eq!(data[0], data_expected as u8);
            Ok(1)
        });
    let device = Device {
        handle: mock_handle,
    };
    let result = device
        .write_reg(BLOCK_USB, USB_SYSCTL, data_expected, 1)
        .unwrap();
    assert_eq!(1, result);
}

#[test]
fn test_write_reg_u16_is_big_endian() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .returning(|_, _, _, _, data, _| {
            assert_eq!(data, &[0x12, 0x34]);
            Ok(2)
        });
    let device = Device {
        handle: mock_handle,
    };
    assert_eq!(2, device.write_reg(BLOCK_USB, USB_SYSCTL, 0x1234, 2).unwrap());
}

#[test]
fn test_test_write_resets_when_nothing_written() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .returning(|_, _, _, _, _, _| Ok(0));
    mock_handle.expect_reset().times(1).returning(|| Ok(()));
    let mut device = Device {
        handle: mock_handle,
    };
    device.test_write().unwrap();
}

#[test]
fn test_i2c_write_shifts_address() {
    let payload = [0x14, 0x00, 0x10, 0x06, 0xdc, 0x05];

    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .with(
            eq(CTRL_OUT),
            eq(0),
            eq((TUNER_ADDR as u16) << 1),
            eq((BLOCK_IIC << 8) | 0x10),
            predicate::always(),
            eq(CTRL_TIMEOUT),
        )
        .returning(move |_, _, _, _, data, _| {
            assert_eq!(data, &payload);
            Ok(data.len())
        });
    let mut device = Device {
        handle: mock_handle,
    };
    device.write_bytes(TUNER_ADDR, &payload).unwrap();
}

#[test]
fn test_i2c_read_fills_buffer() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_read_control()
        .times(1)
        .with(
            eq(CTRL_IN),
            eq(0),
            eq(0xc0),
            eq(BLOCK_IIC << 8),
            predicate::always(),
            eq(CTRL_TIMEOUT),
        )
        .returning(|_, _, _, _, data, _| {
            data.copy_from_slice(&[0x80, 0x01, 0x02, 0x03]);
            Ok(4)
        });
    let mut device = Device {
        handle: mock_handle,
    };
    let mut buf = [0u8; 4];
    device.read_bytes(TUNER_ADDR, &mut buf).unwrap();
    assert_eq!(buf, [0x80, 0x01, 0x02, 0x03]);
}

#[test]
fn test_short_read_is_bus_error() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_read_control()
        .returning(|_, _, _, _, _, _| Ok(1));
    let mut device = Device {
        handle: mock_handle,
    };
    let mut buf = [0u8; 4];
    let err = device.read_bytes(TUNER_ADDR, &mut buf).unwrap_err();
    assert!(matches!(err, Si21xxError::Bus(_)));
}

#[test]
fn test_usb_error_passes_through() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .returning(|_, _, _, _, _, _| Err(Si21xxError::Usb(rusb::Error::Pipe)));
    let mut device = Device {
        handle: mock_handle,
    };
    let err = device.write_bytes(TUNER_ADDR, &[0x02]).unwrap_err();
    assert!(matches!(err, Si21xxError::Usb(rusb::Error::Pipe)));
}

#[test]
fn test_set_i2c_repeater() {
    let mut seq = Sequence::new();
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .in_sequence(&mut seq)
        .with(
            eq(CTRL_OUT),
            eq(0),
            eq((0x01 << 8) | 0x20),
            eq(0x10 | 1),
            predicate::always(),
            eq(CTRL_TIMEOUT),
        )
        .returning(|_, _, _, _, data, _| {
            assert_eq!(data, &[0x18]);
            Ok(1)
        });
    // write is flushed by a read of page 0x0a
    mock_handle
        .expect_read_control()
        .times(1)
        .in_sequence(&mut seq)
        .with(
            eq(CTRL_IN),
            eq(0),
            eq((0x01 << 8) | 0x20),
            eq(0x0a),
            predicate::always(),
            eq(CTRL_TIMEOUT),
        )
        .returning(|_, _, _, _, _, _| Ok(1));
    let device = Device {
        handle: mock_handle,
    };
    device.set_i2c_repeater(true).unwrap();
}

#[test]
fn test_failed_demod_write_skips_flush() {
    let mut mock_handle = MockDeviceHandle::new();
    mock_handle
        .expect_write_control()
        .times(1)
        .returning(|_, _, _, _, _, _| Err(Si21xxError::Usb(rusb::Error::Timeout)));
    mock_handle.expect_read_control().times(0);
    let device = Device {
        handle: mock_handle,
    };
    let err = device.set_i2c_repeater(false).unwrap_err();
    assert!(matches!(err, Si21xxError::Usb(rusb::Error::Timeout)));
}
