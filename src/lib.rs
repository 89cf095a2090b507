#![no_std]

#[macro_use]
mod log;
mod error;

pub mod config;
pub mod conversion;
pub mod device;
pub mod frame;
pub mod interface;
pub mod params;
pub mod registers;
pub mod stream;

pub use crate::device::{Lis3dh, PollPolicy};
pub use crate::error::{Error, Result};
pub use crate::frame::Frame;
pub use crate::stream::{FrameSink, Streamer};
