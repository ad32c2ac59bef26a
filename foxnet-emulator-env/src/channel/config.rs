//! Configuration of [`FrameChannel`](super::FrameChannel).
use serde::{Deserialize, Serialize};

/// Size of the frames sent by the emulator.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct FrameDims {
    /// Width in pixels.
    pub width: usize,

    /// Height in pixels.
    pub height: usize,

    /// Bytes per pixel.
    pub depth: usize,
}

impl Default for FrameDims {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            depth: 3,
        }
    }
}

impl FrameDims {
    /// Constructs the dimensions.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the number of bytes of a frame on the wire.
    pub fn len(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Returns `true` if a frame has no pixel.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration of [`FrameChannel`](super::FrameChannel).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ChannelConfig {
    /// Host of the emulator.
    pub host: String,

    /// Port of the emulator.
    pub port: u16,

    /// Maximum number of connection attempts.
    pub connect_attempts: usize,

    /// Sleep between connection attempts in milliseconds.
    pub connect_backoff_ms: u64,

    /// Size of the frames.
    pub dims: FrameDims,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11111,
            connect_attempts: 100,
            connect_backoff_ms: 200,
            dims: FrameDims::default(),
        }
    }
}

impl ChannelConfig {
    /// Sets the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the maximum number of connection attempts.
    pub fn connect_attempts(mut self, v: usize) -> Self {
        self.connect_attempts = v;
        self
    }

    /// Sets the sleep between connection attempts.
    pub fn connect_backoff_ms(mut self, v: u64) -> Self {
        self.connect_backoff_ms = v;
        self
    }

    /// Sets the size of the frames.
    pub fn dims(mut self, dims: FrameDims) -> Self {
        self.dims = dims;
        self
    }

    /// Returns `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
