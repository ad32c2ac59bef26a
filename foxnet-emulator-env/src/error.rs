//! Errors in the library.
use thiserror::Error;

/// Errors raised by the emulator environment.
#[derive(Error, Debug, PartialEq)]
pub enum EmulatorEnvError {
    /// The emulator did not accept a connection.
    #[error("Failed to connect to {addr} after {attempts} attempts")]
    ConnectionFailed {
        /// Address of the emulator.
        addr: String,
        /// Number of attempts.
        attempts: usize,
    },

    /// The emulator closed the connection in the middle of a frame.
    #[error("Connection closed after {received} of {expected} frame bytes")]
    PeerClosed {
        /// Bytes of the frame received.
        received: usize,
        /// Bytes of a whole frame.
        expected: usize,
    },

    /// The character does not denote an action.
    #[error("Unknown action symbol {0:?}")]
    UnknownAction(char),

    /// A frame buffer of wrong length.
    #[error("Frame buffer has {given} bytes, expected {expected}")]
    FrameSize {
        /// Bytes of a whole frame.
        expected: usize,
        /// Bytes given.
        given: usize,
    },

    /// An image of unexpected size.
    #[error("Image {name} is {given:?} (height, width), expected {expected:?}")]
    ImageShape {
        /// Name of the image.
        name: String,
        /// Expected height and width.
        expected: [usize; 2],
        /// Height and width of the image.
        given: [usize; 2],
    },

    /// No digit templates were found.
    #[error("No digit templates in {0}")]
    NoTemplates(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
