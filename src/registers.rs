//! Register map definitions for the LIS3DH accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{BlockDataUpdate, Endianness, FullScale, OutputDataRate, SelfTestMode};

/// Default 7-bit I2C address (`SA0` tied low).
pub const DEFAULT_ADDRESS: u8 = 0x18;
/// Alternate 7-bit I2C address (`SA0` tied high).
pub const ALTERNATE_ADDRESS: u8 = 0x19;

/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0F;
/// Register address of `CTRL_REG1`.
pub const REG_CTRL1: u8 = 0x20;
/// Register address of `CTRL_REG4`.
pub const REG_CTRL4: u8 = 0x23;
/// Register address of `STATUS_REG`.
pub const REG_STATUS: u8 = 0x27;
/// Register address of `OUT_X_L`.
pub const REG_OUT_X_L: u8 = 0x28;
/// Register address of `OUT_Y_L`.
pub const REG_OUT_Y_L: u8 = 0x2A;
/// Register address of `OUT_Z_L`.
pub const REG_OUT_Z_L: u8 = 0x2C;

/// Low-byte output registers in acquisition order (X, Y, Z).
pub const AXIS_OUTPUT_REGISTERS: [u8; 3] = [REG_OUT_X_L, REG_OUT_Y_L, REG_OUT_Z_L];

/// Value reported by `WHO_AM_I` on a genuine LIS3DH.
pub const EXPECTED_WHO_AM_I: u8 = 0x33;
/// `CTRL_REG1`: normal mode, 100 Hz, all axes enabled.
pub const CTRL1_NORMAL_MODE_100HZ: u8 = 0x57;
/// `CTRL_REG4`: block data update, ±4 g, high resolution.
pub const CTRL4_BDU_ACTIVE: u8 = 0x98;

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Reset/default value defined by the datasheet.
    const RESET_VALUE: Option<u8>;
}

/// Bitfield representation of `STATUS_REG` (address `0x27`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // New X data available (bit 0).
    pub xda: bool,
    // New Y data available (bit 1).
    pub yda: bool,
    // New Z data available (bit 2).
    pub zda: bool,
    // New data available on all axes (bit 3).
    pub zyxda: bool,
    // X data overrun (bit 4).
    pub xor: bool,
    // Y data overrun (bit 5).
    pub yor: bool,
    // Z data overrun (bit 6).
    pub zor: bool,
    // Overrun on any axis (bit 7).
    pub zyxor: bool,
}

impl Status {
    /// Returns `true` once a fresh sample is available on every axis.
    pub fn data_ready(self) -> bool {
        self.zyxda()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Status {{ ZYXOR: {}, ZOR: {}, YOR: {}, XOR: {}, ZYXDA: {}, ZDA: {}, YDA: {}, XDA: {} }}",
            self.zyxor(),
            self.zor(),
            self.yor(),
            self.xor(),
            self.zyxda(),
            self.zda(),
            self.yda(),
            self.xda()
        );
    }
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `CTRL_REG1` (address `0x20`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl1 {
    // X axis enable (bit 0).
    pub x_enable: bool,
    // Y axis enable (bit 1).
    pub y_enable: bool,
    // Z axis enable (bit 2).
    pub z_enable: bool,
    // Low-power mode enable (bit 3).
    pub low_power: bool,
    // Output data rate selection (bits 7:4).
    pub odr: OutputDataRate,
}

impl From<u8> for Ctrl1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl1> for u8 {
    fn from(value: Ctrl1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of `CTRL_REG4` (address `0x23`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl4 {
    // SPI serial interface mode, 3-wire when set (bit 0).
    pub spi_3wire: bool,
    // Self-test selection (bits 2:1).
    pub self_test: SelfTestMode,
    // High-resolution output enable (bit 3).
    pub high_resolution: bool,
    // Full-scale selection (bits 5:4).
    pub full_scale: FullScale,
    // Big/little endian data selection (bit 6).
    pub endianness: Endianness,
    // Block data update (bit 7).
    pub block_data_update: BlockDataUpdate,
}

impl From<u8> for Ctrl4 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl4> for u8 {
    fn from(value: Ctrl4) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Status {
    const ADDRESS: u8 = REG_STATUS;
    const RESET_VALUE: Option<u8> = None;
}

impl Register for Ctrl1 {
    const ADDRESS: u8 = REG_CTRL1;
    const RESET_VALUE: Option<u8> = Some(0x07);
}

impl Register for Ctrl4 {
    const ADDRESS: u8 = REG_CTRL4;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

/// Returns `true` when the `ZYXDA` bit of a raw status byte is set.
#[inline]
pub fn is_data_ready(status: u8) -> bool {
    Status::from(status).data_ready()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_ready_tracks_bit_three_only() {
        assert!(!is_data_ready(0x00));
        assert!(is_data_ready(0x08));
        assert!(is_data_ready(0xFF));
        assert!(!is_data_ready(0xF7));
        // Per-axis flags alone are not enough.
        assert!(!is_data_ready(0x07));
    }

    #[test]
    fn status_layout_matches_datasheet() {
        let status = Status::from(0b1000_1001);
        assert!(status.xda());
        assert!(!status.yda());
        assert!(!status.zda());
        assert!(status.zyxda());
        assert!(!status.xor());
        assert!(status.zyxor());
    }

    #[test]
    fn ctrl1_normal_mode_100hz_decodes() {
        let ctrl1 = Ctrl1::from(CTRL1_NORMAL_MODE_100HZ);
        assert_eq!(ctrl1.odr(), OutputDataRate::Hz100);
        assert!(!ctrl1.low_power());
        assert!(ctrl1.x_enable() && ctrl1.y_enable() && ctrl1.z_enable());
    }

    #[test]
    fn ctrl4_bdu_active_decodes() {
        let ctrl4 = Ctrl4::from(CTRL4_BDU_ACTIVE);
        assert_eq!(ctrl4.block_data_update(), BlockDataUpdate::Active);
        assert_eq!(ctrl4.endianness(), Endianness::Little);
        assert_eq!(ctrl4.full_scale(), FullScale::G4);
        assert!(ctrl4.high_resolution());
        assert_eq!(ctrl4.self_test(), SelfTestMode::Disabled);
        assert!(!ctrl4.spi_3wire());
    }

    #[test]
    fn ctrl4_encodes_fields() {
        let ctrl4 = Ctrl4::new()
            .with_high_resolution(true)
            .with_full_scale(FullScale::G4)
            .with_block_data_update(BlockDataUpdate::Active);
        assert_eq!(u8::from(ctrl4), CTRL4_BDU_ACTIVE);
    }

    #[test]
    fn power_on_defaults_decode() {
        let ctrl1 = Ctrl1::from(Ctrl1::RESET_VALUE.unwrap());
        assert_eq!(ctrl1.odr(), OutputDataRate::PowerDown);
        assert!(ctrl1.x_enable() && ctrl1.y_enable() && ctrl1.z_enable());

        let ctrl4 = Ctrl4::from(Ctrl4::RESET_VALUE.unwrap());
        assert_eq!(ctrl4.block_data_update(), BlockDataUpdate::Continuous);
        assert!(!ctrl4.high_resolution());

        assert_eq!(Status::RESET_VALUE, None);
    }

    #[test]
    fn register_addresses_match_constants() {
        assert_eq!(Status::ADDRESS, REG_STATUS);
        assert_eq!(Ctrl1::ADDRESS, REG_CTRL1);
        assert_eq!(Ctrl4::ADDRESS, REG_CTRL4);
    }

    #[test]
    fn reserved_odr_codes_are_reported() {
        let ctrl1 = Ctrl1::from(0xF7);
        assert!(ctrl1.odr_or_err().is_err());
    }
}
