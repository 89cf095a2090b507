//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::Lis3dhInterface;
use crate::registers::DEFAULT_ADDRESS;

// Sub-address MSB requesting register auto-increment.
const AUTO_INCREMENT: u8 = 0x80;
// Largest burst write the interface stages on the stack.
const MAX_WRITE_BURST: usize = 8;

/// I2C-based interface implementation for the LIS3DH driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface for the device at the given 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address: address & 0x7F,
        }
    }

    /// Creates a new interface for the device at [`DEFAULT_ADDRESS`].
    pub const fn new_default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    /// Returns the 7-bit device address in use.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn sub_address(register: u8, len: usize) -> u8 {
        if len > 1 {
            register | AUTO_INCREMENT
        } else {
            register
        }
    }
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Returns `true` when a device acknowledges `address`.
    pub fn probe(&mut self, address: u8) -> bool {
        self.i2c.write(address & 0x7F, &[]).is_ok()
    }

    /// Sweeps every 7-bit address and records responders into `found`.
    ///
    /// Returns the number of responders, which may exceed `found.len()`.
    pub fn scan(&mut self, found: &mut [u8]) -> usize {
        let mut count = 0;
        for address in 0..0x80u8 {
            if self.probe(address) {
                debug!("device {:#x} is connected", address);
                if let Some(slot) = found.get_mut(count) {
                    *slot = address;
                }
                count += 1;
            }
        }
        count
    }
}

impl<I2C> Lis3dhInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let command = [Self::sub_address(register, buf.len())];
        self.i2c.write_read(self.address, &command, buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        // The sub-address is a single byte and wraps past 0xFF.
        let mut start = register;
        for chunk in data.chunks(MAX_WRITE_BURST) {
            let mut staged = [0u8; MAX_WRITE_BURST + 1];
            staged[0] = Self::sub_address(start, chunk.len());
            staged[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &staged[..=chunk.len()])?;
            start = start.wrapping_add(MAX_WRITE_BURST as u8);
        }
        Ok(())
    }
}
