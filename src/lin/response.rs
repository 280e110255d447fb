//! LIN response construction.

use crate::{Error, Result};

use super::checksum::{ChecksumType, compute_checksum, verify_response};
use super::pid::ProtectedId;

/// Maximum LIN frame data size (8 bytes).
pub const MAX_LIN_DATA_LEN: usize = 8;

/// Largest response on the wire: 8 data bytes and the checksum.
pub const MAX_RESPONSE_LEN: usize = MAX_LIN_DATA_LEN + 1;

/// An encoded LIN response: payload followed by its checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    bytes: [u8; MAX_RESPONSE_LEN],
    len: u8,
    checksum_type: ChecksumType,
}

impl Response {
    /// Payload followed by the checksum, ready for transmission.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The data bytes without checksum.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len as usize - 1]
    }

    /// The checksum byte.
    pub fn checksum(&self) -> u8 {
        self.bytes[self.len as usize - 1]
    }

    /// Checksum type used for this response.
    pub fn checksum_type(&self) -> ChecksumType {
        self.checksum_type
    }

    /// Number of bytes on the wire (payload + 1).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: a response carries at least one data byte and the checksum.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Recompute the checksum and compare it to the stored byte.
    pub fn verify(&self, pid: ProtectedId) -> bool {
        verify_response(pid, self.as_bytes(), self.checksum_type)
    }
}

/// Build a response for `payload` (1 to 8 bytes).
///
/// The protected identifier only takes part in the checksum for
/// [`ChecksumType::Enhanced`].
///
/// ```
/// use lin_master::lin::{build_response, ChecksumType, ProtectedId};
///
/// let pid = ProtectedId::new(0x35)?;
/// let response = build_response(&[1, 2, 3, 4, 5, 6, 7, 8], ChecksumType::Classic, pid)?;
/// assert_eq!(response.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8, 0xDB]);
/// # Ok::<(), lin_master::Error>(())
/// ```
pub fn build_response(
    payload: &[u8],
    checksum_type: ChecksumType,
    pid: ProtectedId,
) -> Result<Response> {
    if payload.is_empty() || payload.len() > MAX_LIN_DATA_LEN {
        return Err(Error::InvalidPayloadLength { len: payload.len() });
    }

    let mut bytes = [0u8; MAX_RESPONSE_LEN];
    bytes[..payload.len()].copy_from_slice(payload);
    bytes[payload.len()] = compute_checksum(pid, payload, checksum_type);

    Ok(Response {
        bytes,
        len: payload.len() as u8 + 1,
        checksum_type,
    })
}
