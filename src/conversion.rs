//! Raw-count to physical-unit conversion.
//!
//! The sensor stores each axis as a left-justified two's complement word split
//! across a low and a high register. Conversion runs in three stages: the raw
//! count (sign-preserving shift), milli-g (count times sensitivity), then
//! milli-m/s² (an `f64` multiply by gravity truncated back to `i32`).

/// Sensitivity in high-resolution ±4 g mode (mg per count).
pub const SENSITIVITY_MG_PER_COUNT: i32 = 2;
/// Standard gravity in m/s² used to scale milli-g readings.
pub const STANDARD_GRAVITY: f64 = 9.81;
/// Unused low bits of a 12-bit high-resolution sample.
pub const HIGH_RESOLUTION_SHIFT: u8 = 4;

/// Count-to-milli-g scale of one operating mode/full-scale combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scale {
    shift: u8,
    sensitivity_mg: i32,
}

impl Scale {
    /// Creates a scale from the number of unused low bits and the mg/count sensitivity.
    pub const fn new(shift: u8, sensitivity_mg: i32) -> Self {
        Self {
            shift,
            sensitivity_mg,
        }
    }

    /// Number of unused low bits discarded from each output word.
    pub const fn shift(self) -> u8 {
        self.shift
    }

    /// Sensitivity in mg per count.
    pub const fn sensitivity_mg(self) -> i32 {
        self.sensitivity_mg
    }

    /// Converts a (low, high) byte pair to milli-m/s².
    pub fn convert(self, low: u8, high: u8, gravity: f64) -> i32 {
        let count = raw_count(low, high, self.shift);
        to_milli_ms2(to_milli_g(count, self.sensitivity_mg), gravity)
    }

    /// Converts the three axis byte pairs of one sample.
    pub fn convert_axes(self, raw: &[[u8; 2]; 3], gravity: f64) -> [i32; 3] {
        raw.map(|[low, high]| self.convert(low, high, gravity))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(HIGH_RESOLUTION_SHIFT, SENSITIVITY_MG_PER_COUNT)
    }
}

/// Combines a (low, high) pair little-endian and discards `shift` low bits,
/// preserving the sign.
#[inline]
pub fn raw_count(low: u8, high: u8, shift: u8) -> i16 {
    i16::from_le_bytes([low, high]) >> shift
}

/// Converts a raw count to milli-g.
#[inline]
pub fn to_milli_g(count: i16, sensitivity_mg: i32) -> i32 {
    i32::from(count) * sensitivity_mg
}

/// Converts milli-g to milli-m/s², truncating toward zero.
#[inline]
pub fn to_milli_ms2(milli_g: i32, gravity: f64) -> i32 {
    let ms2 = f64::from(milli_g) * gravity / 1000.0;
    (ms2 * 1000.0) as i32
}

/// Converts one axis in high-resolution mode to milli-m/s².
pub fn convert(low: u8, high: u8, sensitivity_mg_per_count: i32, gravity: f64) -> i32 {
    let count = raw_count(low, high, HIGH_RESOLUTION_SHIFT);
    to_milli_ms2(to_milli_g(count, sensitivity_mg_per_count), gravity)
}
