//! Protected identifier (identifier + parity) handling.

use core::fmt;

use crate::{Error, Result};

/// LIN frame ID range (0-63, 6 bits).
pub const MAX_LIN_ID: u8 = 63;

/// Mask selecting the identifier bits of a protected identifier.
pub const ID_MASK: u8 = 0x3F;

/// Compute the identifier+parity byte for a frame identifier.
///
/// Only the low 6 bits of `id` are used; this never fails. Parity bits are
/// `P0 = ID0 ^ ID1 ^ ID2 ^ ID4` in bit 6 and `P1 = !(ID1 ^ ID3 ^ ID4 ^ ID5)` in bit 7.
///
/// ```
/// assert_eq!(lin_master::lin::protected_id(0x30), 0xF0);
/// assert_eq!(lin_master::lin::protected_id(0x3C), 0x3C);
/// ```
pub const fn protected_id(id: u8) -> u8 {
    let id = id & ID_MASK;
    let p0 = (id ^ (id >> 1) ^ (id >> 2) ^ (id >> 4)) & 0x01;
    let p1 = !((id >> 1) ^ (id >> 3) ^ (id >> 4) ^ (id >> 5)) & 0x01;
    id | (p0 << 6) | (p1 << 7)
}

/// A frame identifier together with its parity bits.
///
/// The parity bits are always derived from the identifier: a `ProtectedId` can only
/// be created from a 6-bit identifier or from a received byte whose parity checks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtectedId(u8);

impl ProtectedId {
    /// Protected identifier for `id`, rejecting values above [`MAX_LIN_ID`].
    pub fn new(id: u8) -> Result<Self> {
        if id > MAX_LIN_ID {
            return Err(Error::InvalidIdentifier { id });
        }
        Ok(Self(protected_id(id)))
    }

    /// Protected identifier for the low 6 bits of `id`.
    pub const fn from_id(id: u8) -> Self {
        Self(protected_id(id))
    }

    /// Validate a protected identifier received from the bus.
    pub fn from_byte(byte: u8) -> Result<Self> {
        let pid = Self::from_id(byte);
        if pid.0 != byte {
            return Err(Error::InvalidParity { byte });
        }
        Ok(pid)
    }

    /// The 6-bit frame identifier.
    pub const fn id(self) -> u8 {
        self.0 & ID_MASK
    }

    /// The identifier+parity byte as placed on the wire.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Parity bit P0 (bit 6).
    pub const fn p0(self) -> bool {
        self.0 & 0x40 != 0
    }

    /// Parity bit P1 (bit 7).
    pub const fn p1(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Identifiers 0x3C and 0x3D carry diagnostic frames, which always use the
    /// classic checksum.
    pub const fn is_diagnostic(self) -> bool {
        matches!(self.id(), 0x3C | 0x3D)
    }
}

impl From<ProtectedId> for u8 {
    fn from(pid: ProtectedId) -> Self {
        pid.0
    }
}

impl TryFrom<u8> for ProtectedId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte)
    }
}

impl fmt::Display for ProtectedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x} (id {:#04x})", self.0, self.id())
    }
}
