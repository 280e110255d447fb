//! Error types for LIN master operations.
//!
//! This module defines the [`Error`] enum which represents every way a call into
//! the encoder, the frame builder or the master driver can be rejected, plus
//! [`TransmitError`] for failures reported by the transmission collaborator.
//!
//! Encoder errors are always caused by invalid caller input; the encoder never
//! produces [`Error::Transmit`]. That variant only carries failures surfaced by a
//! [`LinTransmit`](crate::LinTransmit) implementation or a header wait timeout.
//!
//! # Example
//!
//! ```
//! use lin_master::{Error, lin::build_header, lin::HeaderVariant};
//!
//! match build_header(0x40, HeaderVariant::BreakSyncId) {
//!     Err(Error::InvalidIdentifier { id }) => assert_eq!(id, 0x40),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use core::fmt;

#[cfg(feature = "serde_json")]
use alloc::string::String;

use crate::lin::FrameState;

/// Failures reported by the transmission or timing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// The hardware did not signal completion within the allowed number of core cycles.
    Timeout {
        /// Timeout that elapsed, in core clock cycles
        cycles: u32,
    },
    /// The line reported a bus error (framing, bit error, stuck line).
    Bus,
    /// The transmitter was still busy with a previous transfer.
    Busy,
}

impl fmt::Display for TransmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransmitError::Timeout { cycles } => {
                write!(f, "header transfer not completed after {cycles} cycles")
            }
            TransmitError::Bus => write!(f, "bus error on LIN line"),
            TransmitError::Busy => write!(f, "transmitter busy"),
        }
    }
}

/// Errors that can occur while building or transmitting LIN frames.
#[derive(Debug)]
pub enum Error {
    /// Frame identifier does not fit in 6 bits.
    InvalidIdentifier {
        /// The rejected identifier
        id: u8,
    },

    /// A received identifier+parity byte carries parity bits that do not match
    /// its identifier.
    InvalidParity {
        /// The rejected byte
        byte: u8,
    },

    /// A captured frame does not start with the 0x55 sync byte.
    InvalidSyncByte(u8),

    /// A received checksum does not match the one computed over the frame.
    ChecksumMismatch {
        /// Checksum computed over the received bytes
        expected: u8,
        /// Checksum byte found in the frame
        received: u8,
    },

    /// Response payload length is outside 1..=8 bytes.
    InvalidPayloadLength {
        /// Length that was supplied
        len: usize,
    },

    /// Raw value does not name a checksum type.
    UnknownChecksumType(u8),

    /// Raw value does not name a header variant.
    UnknownHeaderVariant(u8),

    /// A frame builder step was called in the wrong state.
    OutOfSequence {
        /// State the builder was in
        state: FrameState,
        /// State the call requires
        expected: FrameState,
    },

    /// A configuration value is out of range.
    InvalidConfig(&'static str),

    /// A configuration document could not be parsed or serialized.
    #[cfg(feature = "serde_json")]
    ConfigSerializationError(String),

    /// An I/O error occurred while reading or writing a configuration file.
    ///
    /// Only available with the `std` feature.
    #[cfg(feature = "std")]
    IOError(std::io::Error),

    /// The transmission collaborator failed.
    Transmit(TransmitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIdentifier { id } => {
                write!(f, "Invalid LIN identifier {id:#04x}: must be in 0..=63")
            }
            Error::InvalidParity { byte } => {
                write!(f, "Parity bits of identifier byte {byte:#04x} do not match")
            }
            Error::InvalidPayloadLength { len } => {
                write!(f, "Invalid response length {len}: must be 1..=8 bytes")
            }
            Error::InvalidSyncByte(b) => write!(f, "Invalid sync byte {b:#04x}: expected 0x55"),
            Error::ChecksumMismatch { expected, received } => {
                write!(
                    f,
                    "Checksum mismatch: computed {expected:#04x}, received {received:#04x}"
                )
            }
            Error::UnknownChecksumType(v) => write!(f, "Unknown checksum type {v}"),
            Error::UnknownHeaderVariant(v) => write!(f, "Unknown header variant {v}"),
            Error::OutOfSequence { state, expected } => {
                write!(f, "Frame builder is {state:?}, operation requires {expected:?}")
            }
            Error::InvalidConfig(s) => write!(f, "Invalid configuration: {s}"),
            #[cfg(feature = "serde_json")]
            Error::ConfigSerializationError(s) => {
                write!(f, "Configuration serialization error: {s}")
            }
            #[cfg(feature = "std")]
            Error::IOError(e) => write!(f, "I/O error: {e}"),
            Error::Transmit(e) => write!(f, "Transmission failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IOError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IOError(err)
    }
}

impl From<TransmitError> for Error {
    fn from(err: TransmitError) -> Self {
        Error::Transmit(err)
    }
}

impl Error {
    /// Returns true for errors raised by the transmission collaborator rather
    /// than by rejected input.
    pub fn is_transmit(&self) -> bool {
        matches!(self, Error::Transmit(_))
    }
}

/// A specialized Result type for LIN master operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
