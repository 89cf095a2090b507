//! Strongly typed parameter enumerations for the LIS3DH driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the register bitfields. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use lis3dh_stream::params::{FullScale, OperatingMode, OutputDataRate};
//!
//! let odr = OutputDataRate::Hz100;
//! let fs = FullScale::G4;
//! let mode = OperatingMode::HighResolution;
//! assert_eq!(mode.scale(fs).sensitivity_mg(), 2);
//! let _ = odr;
//! ```

use modular_bitfield::prelude::Specifier;

use crate::conversion::Scale;

/// Output data rate selections encoded in `CTRL_REG1.ODR[3:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// Power-down mode.
    PowerDown = 0b0000,
    /// 1 Hz.
    Hz1 = 0b0001,
    /// 10 Hz.
    Hz10 = 0b0010,
    /// 25 Hz.
    Hz25 = 0b0011,
    /// 50 Hz.
    Hz50 = 0b0100,
    /// 100 Hz.
    Hz100 = 0b0101,
    /// 200 Hz.
    Hz200 = 0b0110,
    /// 400 Hz.
    Hz400 = 0b0111,
    /// 1.6 kHz, low-power mode only.
    LowPower1600Hz = 0b1000,
    /// 1.344 kHz in normal/high-resolution, 5.376 kHz in low-power mode.
    Hz1344LowPower5376Hz = 0b1001,
}

impl OutputDataRate {
    /// Returns the ODR in hertz for the supplied operating mode.
    pub const fn hz(self, mode: OperatingMode) -> u32 {
        match self {
            Self::PowerDown => 0,
            Self::Hz1 => 1,
            Self::Hz10 => 10,
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz200 => 200,
            Self::Hz400 => 400,
            Self::LowPower1600Hz => 1_600,
            Self::Hz1344LowPower5376Hz => match mode {
                OperatingMode::LowPower => 5_376,
                _ => 1_344,
            },
        }
    }
}

/// Full-scale selections encoded in `CTRL_REG4.FS[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FullScale {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

/// Self-test selections encoded in `CTRL_REG4.ST[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum SelfTestMode {
    /// Normal operation.
    Disabled = 0b00,
    /// Self-test 0.
    Test0 = 0b01,
    /// Self-test 1.
    Test1 = 0b10,
}

/// Block data update bit (`CTRL_REG4.BDU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum BlockDataUpdate {
    /// Output registers update continuously.
    Continuous = 0,
    /// Output registers are not updated until both MSB and LSB are read.
    Active = 1,
}

/// Output byte order bit (`CTRL_REG4.BLE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Endianness {
    /// Data LSB at the lower address.
    Little = 0,
    /// Data MSB at the lower address.
    Big = 1,
}

/// Operating mode, selected by `CTRL_REG1.LPen` together with `CTRL_REG4.HR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// 8-bit output.
    LowPower,
    /// 10-bit output.
    Normal,
    /// 12-bit output.
    HighResolution,
}

impl OperatingMode {
    /// Number of significant bits in each output sample.
    pub const fn resolution_bits(self) -> u8 {
        match self {
            Self::LowPower => 8,
            Self::Normal => 10,
            Self::HighResolution => 12,
        }
    }

    /// `CTRL_REG1.LPen` value for this mode.
    pub const fn low_power_bit(self) -> bool {
        matches!(self, Self::LowPower)
    }

    /// `CTRL_REG4.HR` value for this mode.
    pub const fn high_resolution_bit(self) -> bool {
        matches!(self, Self::HighResolution)
    }

    /// Recovers the mode from the `LPen`/`HR` pair. Both set is not allowed.
    pub const fn from_bits(low_power: bool, high_resolution: bool) -> Option<Self> {
        match (low_power, high_resolution) {
            (true, false) => Some(Self::LowPower),
            (false, false) => Some(Self::Normal),
            (false, true) => Some(Self::HighResolution),
            (true, true) => None,
        }
    }

    /// Returns the count-to-milli-g scale for this mode at the supplied full scale.
    pub const fn scale(self, full_scale: FullScale) -> Scale {
        let sensitivity_mg = match (self, full_scale) {
            (Self::HighResolution, FullScale::G2) => 1,
            (Self::HighResolution, FullScale::G4) => 2,
            (Self::HighResolution, FullScale::G8) => 4,
            (Self::HighResolution, FullScale::G16) => 12,
            (Self::Normal, FullScale::G2) => 4,
            (Self::Normal, FullScale::G4) => 8,
            (Self::Normal, FullScale::G8) => 16,
            (Self::Normal, FullScale::G16) => 48,
            (Self::LowPower, FullScale::G2) => 16,
            (Self::LowPower, FullScale::G4) => 32,
            (Self::LowPower, FullScale::G8) => 64,
            (Self::LowPower, FullScale::G16) => 192,
        };

        Scale::new(16 - self.resolution_bits(), sensitivity_mg)
    }
}
