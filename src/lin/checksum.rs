//! LIN checksum computation.
//!
//! The LIN checksum is the inverted sum of the covered bytes using end-around
//! carry: whenever the running sum reaches 256 it is reduced by 255, which adds
//! the carry back into the least significant bit.

use crate::{Error, Result};

use super::pid::ProtectedId;

/// LIN checksum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ChecksumType {
    /// Classic checksum (LIN 1.x) - sum of data bytes only.
    #[default]
    Classic = 0,
    /// Enhanced checksum (LIN 2.x) - sum of protected ID and data bytes.
    Enhanced = 1,
}

impl ChecksumType {
    /// Whether the identifier+parity byte is part of the checksum.
    pub const fn includes_identifier(self) -> bool {
        matches!(self, ChecksumType::Enhanced)
    }
}

impl TryFrom<u8> for ChecksumType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Classic),
            1 => Ok(Self::Enhanced),
            other => Err(Error::UnknownChecksumType(other)),
        }
    }
}

#[inline]
const fn carry_add(sum: u16, byte: u8) -> u16 {
    let sum = sum + byte as u16;
    if sum >= 256 { sum - 255 } else { sum }
}

/// Checksum over an arbitrary byte sequence.
///
/// An empty sequence yields 0xFF.
pub fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u16, |sum, &b| carry_add(sum, b));
    (255 - sum) as u8
}

/// Checksum of a response payload.
///
/// With [`ChecksumType::Enhanced`] the protected identifier is summed first,
/// with [`ChecksumType::Classic`] it is ignored.
pub fn compute_checksum(pid: ProtectedId, payload: &[u8], checksum_type: ChecksumType) -> u8 {
    let start = if checksum_type.includes_identifier() {
        carry_add(0, pid.to_byte())
    } else {
        0
    };
    let sum = payload.iter().fold(start, |sum, &b| carry_add(sum, b));
    (255 - sum) as u8
}

/// Check a received response (`payload` followed by the checksum byte).
///
/// Returns `false` for an empty slice.
pub fn verify_response(pid: ProtectedId, bytes: &[u8], checksum_type: ChecksumType) -> bool {
    match bytes.split_last() {
        Some((&received, payload)) => compute_checksum(pid, payload, checksum_type) == received,
        None => false,
    }
}
