//! Acquisition loop feeding framed samples to a byte sink.

use crate::device::{Lis3dh, PollPolicy};
use crate::error::Result;
use crate::frame::Frame;
use crate::interface::Lis3dhInterface;
use embedded_hal::delay::DelayNs;

/// Destination for finished frames, typically a UART console.
///
/// Writes are fire-and-forget; the streamer never observes backpressure.
pub trait FrameSink {
    /// Pushes `bytes` to the output stream.
    fn write_bytes(&mut self, bytes: &[u8]);
}

impl<T> FrameSink for &mut T
where
    T: FrameSink + ?Sized,
{
    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes)
    }
}

/// Couples a [`Lis3dh`] with a [`FrameSink`] through a reusable [`Frame`].
pub struct Streamer<IFACE, SINK> {
    device: Lis3dh<IFACE>,
    sink: SINK,
    frame: Frame,
}

impl<IFACE, SINK> Streamer<IFACE, SINK> {
    /// Creates a streamer around an already configured device.
    pub fn new(device: Lis3dh<IFACE>, sink: SINK) -> Self {
        Self {
            device,
            sink,
            frame: Frame::new(),
        }
    }

    /// Last frame packed, including after a skipped cycle.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Provides mutable access to the driver.
    pub fn device_mut(&mut self) -> &mut Lis3dh<IFACE> {
        &mut self.device
    }

    /// Consumes the streamer and returns the driver and sink.
    pub fn release(self) -> (Lis3dh<IFACE>, SINK) {
        (self.device, self.sink)
    }
}

impl<IFACE, SINK, CommE> Streamer<IFACE, SINK>
where
    IFACE: Lis3dhInterface<Error = CommE>,
    SINK: FrameSink,
{
    /// Initializes the device and wraps it in a streamer.
    ///
    /// An initialization failure is logged; streaming still starts.
    pub fn start(mut device: Lis3dh<IFACE>, sink: SINK, delay: &mut impl DelayNs) -> Self {
        if device.init(delay).is_err() {
            error!("sensor configuration incomplete, streaming anyway");
        }
        Self::new(device, sink)
    }

    /// Runs one acquire, convert, pack, transmit cycle.
    ///
    /// On any acquisition error nothing is converted or sent and the frame
    /// keeps the previous payload.
    pub fn step(&mut self, policy: PollPolicy) -> Result<(), CommE> {
        let sample = self.device.read_acceleration(policy)?;
        self.frame.pack(sample);
        self.sink.write_bytes(self.frame.as_bytes());
        Ok(())
    }

    /// Streams forever.
    pub fn run(&mut self) -> ! {
        loop {
            if self.step(PollPolicy::Unbounded).is_err() {
                warn!("acquisition failed, frame skipped");
            }
        }
    }
}
