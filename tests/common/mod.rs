#![allow(dead_code)]

pub use lis3dh_stream::{Lis3dh, FrameSink, PollPolicy};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::ErrorKind;
pub use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use lis3dh_stream::config::Config;
use lis3dh_stream::interface::i2c::I2cInterface;

pub const DEV_ADDR: u8 = 0x18;

pub type Driver = Lis3dh<I2cInterface<I2cMock>>;

pub fn new_driver(expectations: &[I2cTrans]) -> (Driver, I2cMock) {
    let i2c = I2cMock::new(expectations);
    (Lis3dh::new_i2c(i2c.clone(), DEV_ADDR, Config::default()), i2c)
}

pub fn trans_read(register: u8, value: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![register], vec![value])
}

pub fn trans_read_err(register: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![register], vec![0]).with_error(ErrorKind::Other)
}

pub fn trans_write(register: u8, value: u8) -> I2cTrans {
    I2cTrans::write(DEV_ADDR, vec![register, value])
}

pub fn trans_write_err(register: u8, value: u8) -> I2cTrans {
    I2cTrans::write(DEV_ADDR, vec![register, value]).with_error(ErrorKind::Other)
}

pub fn trans_status(value: u8) -> I2cTrans {
    trans_read(0x27, value)
}

/// Two-byte burst read with the auto-increment bit set.
pub fn trans_axis(register: u8, low: u8, high: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![register | 0x80], vec![low, high])
}

pub fn trans_axis_err(register: u8) -> I2cTrans {
    I2cTrans::write_read(DEV_ADDR, vec![register | 0x80], vec![0, 0]).with_error(ErrorKind::Other)
}

/// Left-justifies a 12-bit count into its (low, high) output pair.
pub fn axis_bytes(count: i16) -> (u8, u8) {
    let [low, high] = (count << 4).to_le_bytes();
    (low, high)
}

#[derive(Default)]
pub struct VecSink {
    pub bytes: Vec<u8>,
    pub writes: usize,
}

impl FrameSink for VecSink {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        self.writes += 1;
    }
}

#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
