//! High-level LIS3DH device driver implementation.

use crate::config::Config;
use crate::conversion::STANDARD_GRAVITY;
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::Lis3dhInterface;
use crate::params::Endianness;
use crate::registers::{
    Ctrl1,
    Ctrl4,
    Register,
    Status,
    AXIS_OUTPUT_REGISTERS,
    EXPECTED_WHO_AM_I,
    REG_WHO_AM_I,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// LIS3DH datasheet boot procedure duration after power-up (milliseconds).
const BOOT_DELAY_MS: u32 = 5;

/// High-level synchronous driver for the LIS3DH accelerometer.
pub struct Lis3dh<IFACE> {
    interface: IFACE,
    config: Config,
}

/// How long [`Lis3dh::wait_data_ready`] keeps polling `STATUS_REG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollPolicy {
    /// Busy-poll until the sensor reports fresh data, however long it takes.
    Unbounded,
    /// Give up after this many status reads.
    Bounded(u32),
}

/// Identification register contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// Raw `WHO_AM_I` value.
    pub who_am_i: u8,
    /// Whether `who_am_i` matches a LIS3DH.
    pub expected: bool,
}

impl Identity {
    /// Builds the identity reported by a `WHO_AM_I` read.
    pub fn from_who_am_i(who_am_i: u8) -> Self {
        Self {
            who_am_i,
            expected: who_am_i == EXPECTED_WHO_AM_I,
        }
    }

    /// Returns `true` when `WHO_AM_I` matches a LIS3DH.
    pub fn is_expected(&self) -> bool {
        self.expected
    }
}

/// Outcome of a best-effort configuration pass.
///
/// Each field is `None` when the corresponding transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigReport<E> {
    /// Value written to `CTRL_REG1` when it differed.
    pub ctrl1_target: u8,
    /// `CTRL_REG1` before configuration.
    pub ctrl1_before: Option<u8>,
    /// Whether `CTRL_REG1` was written successfully.
    pub ctrl1_written: bool,
    /// `CTRL_REG1` read back after configuration.
    pub ctrl1_after: Option<u8>,
    /// Value unconditionally written to `CTRL_REG4`.
    pub ctrl4_target: u8,
    /// `CTRL_REG4` before configuration.
    pub ctrl4_before: Option<u8>,
    /// Whether `CTRL_REG4` was written successfully.
    pub ctrl4_written: bool,
    /// `CTRL_REG4` read back after configuration.
    pub ctrl4_after: Option<u8>,
    /// First transport error encountered, if any.
    pub error: Option<E>,
}

impl<E> ConfigReport<E> {
    fn new(ctrl1_target: u8, ctrl4_target: u8) -> Self {
        Self {
            ctrl1_target,
            ctrl1_before: None,
            ctrl1_written: false,
            ctrl1_after: None,
            ctrl4_target,
            ctrl4_before: None,
            ctrl4_written: false,
            ctrl4_after: None,
            error: None,
        }
    }

    /// Returns `true` when both read-backs match their targets.
    pub fn verified(&self) -> bool {
        self.ctrl1_after == Some(self.ctrl1_target) && self.ctrl4_after == Some(self.ctrl4_target)
    }

    /// Collapses the report into the first transport error, if any.
    pub fn into_result(self) -> Result<(), E> {
        match self.error {
            Some(err) => Err(Error::Interface(err)),
            None => Ok(()),
        }
    }

    fn record<T>(&mut self, result: core::result::Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                if self.error.is_none() {
                    self.error = Some(err);
                }
                None
            }
        }
    }
}

impl<IFACE> Lis3dh<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<I2C> Lis3dh<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == Bus Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, address: u8, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, address), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<SPI> Lis3dh<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> Lis3dh<IFACE>
where
    IFACE: Lis3dhInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Global Configuration ==========================
    // ==================================================================
    /// Brings the sensor up using the current configuration.
    ///
    /// Waits out the boot procedure, reports the identification and status
    /// registers, then runs [`configure`](Self::configure). Identification
    /// and status failures are logged and do not stop the sequence.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        delay.delay_ms(BOOT_DELAY_MS);

        if self.identify().is_err() {
            error!("WHO_AM_I read failed");
        }

        match self.read_status() {
            Ok(status) => info!("STATUS_REG: {:#x}", u8::from(status)),
            Err(_) => error!("STATUS_REG read failed"),
        }

        self.configure()
    }

    /// Validates and stores a new configuration, then applies it.
    pub fn set_config(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidConfig)?;
        self.config = config;
        self.configure()
    }

    /// Applies the active configuration to `CTRL_REG1` and `CTRL_REG4`.
    ///
    /// Every step runs even when an earlier one fails; the first transport
    /// error is returned once the sequence completes.
    pub fn configure(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;
        self.configure_with_report().into_result()
    }

    /// Runs the best-effort configuration sequence and reports each step.
    pub fn configure_with_report(&mut self) -> ConfigReport<CommE> {
        let mut report = ConfigReport::new(self.config.ctrl1(), self.config.ctrl4());

        let ctrl1 = self.interface.read_register(Ctrl1::ADDRESS);
        report.ctrl1_before = report.record(ctrl1);
        match report.ctrl1_before {
            Some(value) => info!("CTRL_REG1: {:#x}", value),
            None => error!("CTRL_REG1 read failed"),
        }

        if report.ctrl1_before != Some(report.ctrl1_target) {
            let written = self.interface.write_register(Ctrl1::ADDRESS, report.ctrl1_target);
            report.ctrl1_written = report.record(written).is_some();
            if report.ctrl1_written {
                info!("CTRL_REG1 written as {:#x}", report.ctrl1_target);
            } else {
                error!("CTRL_REG1 write failed");
            }
        }

        let ctrl1 = self.interface.read_register(Ctrl1::ADDRESS);
        report.ctrl1_after = report.record(ctrl1);
        match report.ctrl1_after {
            Some(value) if value != report.ctrl1_target => {
                warn!("CTRL_REG1 reads back {:#x}, expected {:#x}", value, report.ctrl1_target)
            }
            Some(value) => info!("CTRL_REG1 after overwrite: {:#x}", value),
            None => error!("CTRL_REG1 read-back failed"),
        }

        let ctrl4 = self.interface.read_register(Ctrl4::ADDRESS);
        report.ctrl4_before = report.record(ctrl4);
        match report.ctrl4_before {
            Some(value) => info!("CTRL_REG4: {:#x}", value),
            None => error!("CTRL_REG4 read failed"),
        }

        let written = self.interface.write_register(Ctrl4::ADDRESS, report.ctrl4_target);
        report.ctrl4_written = report.record(written).is_some();
        if !report.ctrl4_written {
            error!("CTRL_REG4 write failed");
        }

        let ctrl4 = self.interface.read_register(Ctrl4::ADDRESS);
        report.ctrl4_after = report.record(ctrl4);
        match report.ctrl4_after {
            Some(value) if value != report.ctrl4_target => {
                warn!("CTRL_REG4 reads back {:#x}, expected {:#x}", value, report.ctrl4_target)
            }
            Some(value) => info!("CTRL_REG4 after update: {:#x}", value),
            None => error!("CTRL_REG4 read-back failed"),
        }

        report
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads `WHO_AM_I`. An unexpected value is logged, not rejected.
    pub fn identify(&mut self) -> Result<Identity, CommE> {
        let who_am_i = self
            .interface
            .read_register(REG_WHO_AM_I)
            .map_err(Error::from)?;

        let identity = Identity::from_who_am_i(who_am_i);
        if identity.is_expected() {
            info!("WHO_AM_I: {:#x}", who_am_i);
        } else {
            warn!("WHO_AM_I: {:#x} [expected: {:#x}]", who_am_i, EXPECTED_WHO_AM_I);
        }

        Ok(identity)
    }

    /// Returns a snapshot of `STATUS_REG`.
    pub fn read_status(&mut self) -> Result<Status, CommE> {
        self
            .interface
            .read_register(Status::ADDRESS)
            .map(Status::from)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Busy-polls `STATUS_REG` until `ZYXDA` is set.
    ///
    /// A failed status read counts as a poll that saw no data and is logged.
    /// When a bounded poll expires and its final read failed, that transport
    /// error is returned instead of [`Error::DataReadyTimeout`]. With
    /// [`PollPolicy::Unbounded`] a silent sensor keeps this call spinning.
    pub fn wait_data_ready(&mut self, policy: PollPolicy) -> Result<Status, CommE> {
        let mut polls: u32 = 0;
        let mut last_error = None;
        loop {
            if let PollPolicy::Bounded(max_polls) = policy {
                if polls >= max_polls {
                    warn!("no data after {} status reads", polls);
                    return Err(match last_error {
                        Some(err) => Error::Interface(err),
                        None => Error::DataReadyTimeout,
                    });
                }
            }
            polls = polls.saturating_add(1);

            match self.interface.read_register(Status::ADDRESS) {
                Ok(raw) => {
                    last_error = None;
                    let status = Status::from(raw);
                    if status.data_ready() {
                        if status.zyxor() {
                            debug!("sample overrun, status {:#x}", raw);
                        }
                        return Ok(status);
                    }
                }
                Err(err) => {
                    error!("STATUS_REG read failed on poll {}", polls);
                    last_error = Some(err);
                }
            }
        }
    }

    /// Reads the (low, high) output pair of each axis in X, Y, Z order.
    ///
    /// One two-byte burst per axis. A failed burst does not skip the
    /// remaining axes; the last failure is returned.
    pub fn read_axes_raw(&mut self) -> Result<[[u8; 2]; 3], CommE> {
        let mut raw = [[0u8; 2]; 3];
        let mut last_error = None;

        for (pair, register) in raw.iter_mut().zip(AXIS_OUTPUT_REGISTERS) {
            if let Err(err) = self.interface.read_many(register, pair) {
                error!("axis read at {:#x} failed", register);
                last_error = Some(err);
            }
        }

        if let Some(err) = last_error {
            return Err(Error::Interface(err));
        }

        if self.config.endianness == Endianness::Big {
            for pair in raw.iter_mut() {
                pair.swap(0, 1);
            }
        }

        Ok(raw)
    }

    /// Waits for fresh data, then reads the raw output pairs.
    pub fn acquire_raw(&mut self, policy: PollPolicy) -> Result<[[u8; 2]; 3], CommE> {
        self.wait_data_ready(policy)?;
        self.read_axes_raw()
    }

    /// Acquires one sample and converts it to milli-m/s² per axis.
    pub fn read_acceleration(&mut self, policy: PollPolicy) -> Result<[i32; 3], CommE> {
        let raw = self.acquire_raw(policy)?;
        Ok(self.config.scale().convert_axes(&raw, STANDARD_GRAVITY))
    }
}
