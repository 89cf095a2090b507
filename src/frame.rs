//! Output frame layout.
//!
//! ```text
//! offset  0      1..5     5..9     9..13    13
//!         0xA0   X i32le  Y i32le  Z i32le  0xC0
//! ```

/// Frame start marker.
pub const FRAME_HEADER: u8 = 0xA0;
/// Frame end marker.
pub const FRAME_FOOTER: u8 = 0xC0;
/// Total frame length in bytes.
pub const FRAME_LEN: usize = 14;

const X_OFFSET: usize = 1;
const Y_OFFSET: usize = 5;
const Z_OFFSET: usize = 9;
const FOOTER_OFFSET: usize = FRAME_LEN - 1;

/// Writes the markers and the three axis values into `buffer`.
pub fn pack(x_mms2: i32, y_mms2: i32, z_mms2: i32, buffer: &mut [u8; FRAME_LEN]) {
    buffer[0] = FRAME_HEADER;
    buffer[X_OFFSET..Y_OFFSET].copy_from_slice(&x_mms2.to_le_bytes());
    buffer[Y_OFFSET..Z_OFFSET].copy_from_slice(&y_mms2.to_le_bytes());
    buffer[Z_OFFSET..FOOTER_OFFSET].copy_from_slice(&z_mms2.to_le_bytes());
    buffer[FOOTER_OFFSET] = FRAME_FOOTER;
}

/// Decodes a frame back into its X, Y, Z values.
///
/// Returns `None` when the length or either marker is wrong.
pub fn decode(bytes: &[u8]) -> Option<[i32; 3]> {
    let frame: &[u8; FRAME_LEN] = bytes.try_into().ok()?;
    if frame[0] != FRAME_HEADER || frame[FOOTER_OFFSET] != FRAME_FOOTER {
        return None;
    }

    let field = |offset: usize| {
        i32::from_le_bytes([
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ])
    };

    Some([field(X_OFFSET), field(Y_OFFSET), field(Z_OFFSET)])
}

/// Reusable output buffer, overwritten in place each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    buffer: [u8; FRAME_LEN],
}

impl Frame {
    /// Creates a frame with the markers set and a zero payload.
    pub const fn new() -> Self {
        let mut buffer = [0u8; FRAME_LEN];
        buffer[0] = FRAME_HEADER;
        buffer[FOOTER_OFFSET] = FRAME_FOOTER;
        Self { buffer }
    }

    /// Overwrites the payload with a new X, Y, Z sample.
    pub fn pack(&mut self, [x, y, z]: [i32; 3]) {
        pack(x, y, z, &mut self.buffer);
    }

    /// Returns the encoded frame.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.buffer
    }

    /// Returns the payload currently held by the frame.
    pub fn values(&self) -> [i32; 3] {
        decode(&self.buffer).unwrap_or_default()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
