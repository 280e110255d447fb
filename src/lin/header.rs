//! LIN header construction.
//!
//! A LIN header is a break field, the sync byte 0x55 and the protected identifier.
//! UART peripherals with LIN support can generate a prefix of the header on their
//! own; [`HeaderVariant`] selects which prefix the hardware issues, and the
//! [`Header`] carries the bytes left for software to send afterwards.

use crate::{Error, Result};

use super::pid::ProtectedId;

/// Value of the sync field.
pub const SYNC_BYTE: u8 = 0x55;

/// Which part of the header the line hardware issues itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum HeaderVariant {
    /// Hardware sends the break; sync and protected ID follow as data bytes.
    BreakOnly = 0,
    /// Hardware sends break and sync; the protected ID follows as a data byte.
    BreakSync = 1,
    /// Hardware sends break, sync and protected ID.
    #[default]
    BreakSyncId = 2,
}

impl TryFrom<u8> for HeaderVariant {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::BreakOnly),
            1 => Ok(Self::BreakSync),
            2 => Ok(Self::BreakSyncId),
            other => Err(Error::UnknownHeaderVariant(other)),
        }
    }
}

/// Break field and break/sync delimiter lengths in bit times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreakTiming {
    /// Length of the dominant break field.
    pub break_bits: u8,
    /// Length of the recessive break/sync delimiter.
    pub delimiter_bits: u8,
}

impl BreakTiming {
    /// 12-bit break followed by a 1-bit delimiter.
    pub const LIN_2X: Self = Self {
        break_bits: 12,
        delimiter_bits: 1,
    };
}

impl Default for BreakTiming {
    fn default() -> Self {
        Self::LIN_2X
    }
}

/// What the transmission collaborator must put on the line before any data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreakDirective {
    /// Header fields generated by hardware.
    pub variant: HeaderVariant,
    /// Break and delimiter lengths.
    pub timing: BreakTiming,
    /// Protected identifier, sent by hardware only for [`HeaderVariant::BreakSyncId`].
    pub pid: ProtectedId,
}

/// An encoded LIN header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    directive: BreakDirective,
    pending: [u8; 2],
    pending_len: u8,
}

impl Header {
    /// The break directive to issue first.
    pub fn directive(&self) -> &BreakDirective {
        &self.directive
    }

    /// Header variant this header was built for.
    pub fn variant(&self) -> HeaderVariant {
        self.directive.variant
    }

    /// The protected identifier carried by this header.
    pub fn pid(&self) -> ProtectedId {
        self.directive.pid
    }

    /// Bytes software must transmit after the break directive.
    pub fn pending_bytes(&self) -> &[u8] {
        &self.pending[..self.pending_len as usize]
    }

    /// Sync and protected ID bytes as they appear on the wire, regardless of who sends them.
    pub fn wire_bytes(&self) -> [u8; 2] {
        [SYNC_BYTE, self.directive.pid.to_byte()]
    }

    /// Rewrite a hardware header for a UART that can only generate the break.
    ///
    /// [`HeaderVariant::BreakSync`] and [`HeaderVariant::BreakSyncId`] headers become
    /// [`HeaderVariant::BreakOnly`] with the full sync+ID sequence pending.
    pub fn into_break_only(self) -> Self {
        build(self.directive.pid, HeaderVariant::BreakOnly, self.directive.timing)
    }
}

fn build(pid: ProtectedId, variant: HeaderVariant, timing: BreakTiming) -> Header {
    let (pending, pending_len) = match variant {
        HeaderVariant::BreakOnly => ([SYNC_BYTE, pid.to_byte()], 2),
        HeaderVariant::BreakSync => ([pid.to_byte(), 0], 1),
        HeaderVariant::BreakSyncId => ([0, 0], 0),
    };
    Header {
        directive: BreakDirective {
            variant,
            timing,
            pid,
        },
        pending,
        pending_len,
    }
}

/// Build a header with the LIN 2.x break timing.
pub fn build_header(id: u8, variant: HeaderVariant) -> Result<Header> {
    build_header_with(id, variant, BreakTiming::LIN_2X)
}

/// Build a header with explicit break timing.
pub fn build_header_with(id: u8, variant: HeaderVariant, timing: BreakTiming) -> Result<Header> {
    let pid = ProtectedId::new(id)?;
    Ok(build(pid, variant, timing))
}
