//! Frame and action exchange with the emulator.
//!
//! The emulator streams raw frames of exactly `width * height * depth` bytes
//! without any header. A frame on the wire is the image with its bytes in
//! reverse order and its rows mirrored, so decoding reverses the whole buffer
//! and flips the column axis back.
//!
//! The emulator reads RGB pixels bottom-up, so the reversal turns each pixel
//! around as well: decoded frames are top-down with channels in BGR order.
//!
//! The client answers each frame with a 4-byte native-endian action bitmask,
//! see [`ActionSymbol`].
mod config;
use crate::{error::EmulatorEnvError, ActionSymbol};
use anyhow::{Context, Result};
pub use config::{ChannelConfig, FrameDims};
use foxnet_core::Frame;
use log::{debug, info, trace};
use ndarray::{s, Array3};
use std::{
    io::{ErrorKind, Read, Write},
    net::TcpStream,
    thread::sleep,
    time::Duration,
};

/// Decodes a frame received from the emulator.
pub fn decode_frame(buf: &[u8], dims: FrameDims) -> Result<Frame> {
    if buf.len() != dims.len() {
        Err(EmulatorEnvError::FrameSize {
            expected: dims.len(),
            given: buf.len(),
        })?;
    }
    let reversed = buf.iter().rev().copied().collect::<Vec<_>>();
    let frame = Array3::from_shape_vec((dims.height, dims.width, dims.depth), reversed)?;
    Ok(frame
        .slice(s![.., ..;-1, ..])
        .as_standard_layout()
        .into_owned())
}

/// Encodes a frame as the emulator sends it. Inverse of [`decode_frame`].
pub fn encode_frame(frame: &Frame) -> Vec<u8> {
    let mut buf = frame
        .slice(s![.., ..;-1, ..])
        .iter()
        .copied()
        .collect::<Vec<_>>();
    buf.reverse();
    buf
}

/// Connection to the emulator.
pub struct FrameChannel<S> {
    stream: S,
    dims: FrameDims,
    buf: Vec<u8>,
}

impl FrameChannel<TcpStream> {
    /// Connects to the emulator, retrying while the emulator is starting up.
    pub fn connect(config: &ChannelConfig) -> Result<Self> {
        let addr = config.addr();
        let backoff = Duration::from_millis(config.connect_backoff_ms);

        for attempt in 1..=config.connect_attempts {
            match TcpStream::connect(&addr) {
                Ok(stream) => {
                    info!("Connected to the emulator at {} (attempt {})", addr, attempt);
                    stream.set_nodelay(true)?;
                    return Ok(Self::from_stream(stream, config.dims));
                }
                Err(e) => {
                    debug!("Connection attempt {} to {} failed: {}", attempt, addr, e);
                    if attempt < config.connect_attempts {
                        sleep(backoff);
                    }
                }
            }
        }

        Err(EmulatorEnvError::ConnectionFailed {
            addr,
            attempts: config.connect_attempts,
        }
        .into())
    }
}

impl<S: Read + Write> FrameChannel<S> {
    /// Wraps a connected stream.
    pub fn from_stream(stream: S, dims: FrameDims) -> Self {
        Self {
            stream,
            dims,
            buf: vec![0; dims.len()],
        }
    }

    /// Returns the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Blocks until a whole frame is received and decodes it.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let expected = self.buf.len();
        let mut received = 0;

        while received < expected {
            match self.stream.read(&mut self.buf[received..]) {
                Ok(0) => Err(EmulatorEnvError::PeerClosed { received, expected })?,
                Ok(n) => received += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e).context("Failed to read a frame"),
            }
        }
        trace!("Received a frame of {} bytes", received);

        decode_frame(&self.buf, self.dims)
    }

    /// Sends the bitmask of an action.
    pub fn send_action(&mut self, act: ActionSymbol) -> Result<()> {
        self.stream
            .write_all(&act.bitmask().to_ne_bytes())
            .context("Failed to send an action")?;
        self.stream.flush()?;
        Ok(())
    }
}
