//! Configuration primitives for the LIS3DH driver.

use crate::conversion::Scale;
use crate::params::{BlockDataUpdate, Endianness, FullScale, OperatingMode, OutputDataRate, SelfTestMode};
use crate::registers::{Ctrl1, Ctrl4};

/// User-facing configuration for the LIS3DH sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate selection.
    pub odr: OutputDataRate,
    /// Low-power, normal or high-resolution output.
    pub mode: OperatingMode,
    /// Full-scale range.
    pub full_scale: FullScale,
    /// Block data update behaviour.
    pub block_data_update: BlockDataUpdate,
    /// Output byte order.
    pub endianness: Endianness,
    /// Per-axis enables (X, Y, Z).
    pub axes: (bool, bool, bool),
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.odr == OutputDataRate::LowPower1600Hz && self.mode != OperatingMode::LowPower {
            return Err(ConfigError::OdrRequiresLowPower);
        }

        // BLE is only honoured in high-resolution mode.
        if self.endianness == Endianness::Big && self.mode != OperatingMode::HighResolution {
            return Err(ConfigError::BigEndianRequiresHighResolution);
        }

        Ok(())
    }

    /// Encodes the `CTRL_REG1` value selected by this configuration.
    pub fn ctrl1(&self) -> u8 {
        let (x, y, z) = self.axes;
        u8::from(
            Ctrl1::new()
                .with_x_enable(x)
                .with_y_enable(y)
                .with_z_enable(z)
                .with_low_power(self.mode.low_power_bit())
                .with_odr(self.odr),
        )
    }

    /// Encodes the `CTRL_REG4` value selected by this configuration.
    pub fn ctrl4(&self) -> u8 {
        u8::from(
            Ctrl4::new()
                .with_spi_3wire(false)
                .with_self_test(SelfTestMode::Disabled)
                .with_high_resolution(self.mode.high_resolution_bit())
                .with_full_scale(self.full_scale)
                .with_endianness(self.endianness)
                .with_block_data_update(self.block_data_update),
        )
    }

    /// Count-to-milli-g scale implied by the mode and full scale.
    pub fn scale(&self) -> Scale {
        self.mode.scale(self.full_scale)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Overrides the operating mode.
    pub fn mode(mut self, mode: OperatingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Overrides the full-scale range.
    pub fn full_scale(mut self, full_scale: FullScale) -> Self {
        self.config.full_scale = full_scale;
        self
    }

    /// Sets the block data update behaviour.
    pub fn block_data_update(mut self, bdu: BlockDataUpdate) -> Self {
        self.config.block_data_update = bdu;
        self
    }

    /// Sets the output byte order.
    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.config.endianness = endianness;
        self
    }

    /// Enables or disables individual axes.
    pub fn axes(mut self, x: bool, y: bool, z: bool) -> Self {
        self.config.axes = (x, y, z);
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odr: OutputDataRate::Hz100,
            mode: OperatingMode::HighResolution,
            full_scale: FullScale::G4,
            block_data_update: BlockDataUpdate::Active,
            endianness: Endianness::Little,
            axes: (true, true, true),
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The 1.6 kHz rate exists only in low-power mode.
    OdrRequiresLowPower,
    /// Big-endian output is only selectable in high-resolution mode.
    BigEndianRequiresHighResolution,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{CTRL1_NORMAL_MODE_100HZ, CTRL4_BDU_ACTIVE};

    #[test]
    fn default_config_encodes_startup_values() {
        let config = Config::default();
        assert_eq!(config.ctrl1(), CTRL1_NORMAL_MODE_100HZ);
        assert_eq!(config.ctrl4(), CTRL4_BDU_ACTIVE);
        assert_eq!(config.scale(), Scale::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = Config::new()
            .odr(OutputDataRate::Hz400)
            .mode(OperatingMode::LowPower)
            .full_scale(FullScale::G16)
            .axes(true, false, true)
            .build();

        assert_eq!(config.ctrl1(), 0b0111_1101);
        assert_eq!(config.ctrl4() & 0x30, 0x30);
        assert_eq!(config.ctrl4() & 0x08, 0x00);
    }

    #[test]
    fn rejects_low_power_only_rate_in_high_resolution() {
        let config = Config::new().odr(OutputDataRate::LowPower1600Hz).build();
        assert_eq!(config.validate(), Err(ConfigError::OdrRequiresLowPower));
    }

    #[test]
    fn rejects_big_endian_outside_high_resolution() {
        let config = Config::new()
            .mode(OperatingMode::Normal)
            .endianness(Endianness::Big)
            .build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::BigEndianRequiresHighResolution)
        );
    }
}
