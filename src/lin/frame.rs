//! Complete LIN frames.
//!
//! A [`LinFrame`] pairs an encoded [`Header`] with the [`Response`] sent after it.
//! It is built fresh for every transmission and handed to the transmitter by value.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{Error, Result};

use super::checksum::{ChecksumType, compute_checksum};
use super::header::{BreakTiming, Header, HeaderVariant, SYNC_BYTE, build_header_with};
use super::pid::ProtectedId;
use super::response::{MAX_LIN_DATA_LEN, MAX_RESPONSE_LEN, Response, build_response};

/// Bytes of a complete frame after the break: sync, protected ID, 8 data bytes, checksum.
pub const MAX_FRAME_LEN: usize = 2 + MAX_RESPONSE_LEN;

/// A LIN frame: header followed by response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinFrame {
    header: Header,
    response: Response,
}

impl LinFrame {
    /// Encode header and response for `id` in one step.
    ///
    /// # Arguments
    /// * `id` - Frame ID (0-63)
    /// * `data` - Frame data (1-8 bytes)
    /// * `checksum_type` - Classic or enhanced checksum
    /// * `variant` - Header fields issued by hardware
    pub fn encode(
        id: u8,
        data: &[u8],
        checksum_type: ChecksumType,
        variant: HeaderVariant,
    ) -> Result<Self> {
        let header = build_header_with(id, variant, BreakTiming::LIN_2X)?;
        let response = build_response(data, checksum_type, header.pid())?;
        Ok(Self { header, response })
    }

    /// Create a LIN frame with classic checksum.
    pub fn with_classic_checksum(id: u8, data: &[u8]) -> Result<Self> {
        Self::encode(id, data, ChecksumType::Classic, HeaderVariant::default())
    }

    /// Create a LIN frame with enhanced checksum.
    pub fn with_enhanced_checksum(id: u8, data: &[u8]) -> Result<Self> {
        Self::encode(id, data, ChecksumType::Enhanced, HeaderVariant::default())
    }

    pub(crate) fn from_parts(header: Header, response: Response) -> Self {
        Self { header, response }
    }

    /// The encoded header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The encoded response.
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Frame identifier (0-63).
    pub fn id(&self) -> u8 {
        self.header.pid().id()
    }

    /// Protected identifier.
    pub fn pid(&self) -> ProtectedId {
        self.header.pid()
    }

    /// Data bytes.
    pub fn data(&self) -> &[u8] {
        self.response.payload()
    }

    /// Checksum byte.
    pub fn checksum(&self) -> u8 {
        self.response.checksum()
    }

    /// Checksum type.
    pub fn checksum_type(&self) -> ChecksumType {
        self.response.checksum_type()
    }

    /// Recompute the checksum over the covered bytes and compare.
    pub fn verify(&self) -> bool {
        self.response.verify(self.header.pid())
    }

    /// Write sync, protected ID, data and checksum into `buf`.
    ///
    /// Returns the number of bytes written.
    pub fn write_wire_bytes(&self, buf: &mut [u8; MAX_FRAME_LEN]) -> usize {
        buf[..2].copy_from_slice(&self.header.wire_bytes());
        let response = self.response.as_bytes();
        buf[2..2 + response.len()].copy_from_slice(response);
        2 + response.len()
    }

    /// Serialize the frame as it appears on the wire after the break.
    #[cfg(feature = "alloc")]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = self.write_wire_bytes(&mut buf);
        Vec::from(&buf[..len])
    }

    /// Parse a frame captured after the break: sync, protected ID, data, checksum.
    ///
    /// Rejects a wrong sync byte, bad ID parity, a data length outside 1-8 and a
    /// checksum that does not match.
    ///
    /// The capture carries no record of which header fields the hardware issued, so
    /// the parsed frame always has a [`HeaderVariant::BreakOnly`] header with
    /// [`BreakTiming::LIN_2X`]. A frame encoded with another variant or timing parses
    /// back with equal data and checksum but does not compare equal as a whole.
    pub fn from_wire_bytes(bytes: &[u8], checksum_type: ChecksumType) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(Error::InvalidPayloadLength {
                len: bytes.len().saturating_sub(3),
            });
        }
        if bytes[0] != SYNC_BYTE {
            return Err(Error::InvalidSyncByte(bytes[0]));
        }
        let pid = ProtectedId::from_byte(bytes[1])?;

        let (&received, data) = bytes[2..]
            .split_last()
            .ok_or(Error::InvalidPayloadLength { len: 0 })?;
        if data.len() > MAX_LIN_DATA_LEN {
            return Err(Error::InvalidPayloadLength { len: data.len() });
        }
        let expected = compute_checksum(pid, data, checksum_type);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        let header = build_header_with(pid.id(), HeaderVariant::BreakOnly, BreakTiming::LIN_2X)?;
        let response = build_response(data, checksum_type, pid)?;
        Ok(Self { header, response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lin::{checksum, protected_id};

    const PATTERN: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn test_lin_frame_basic() {
        let frame = LinFrame::with_classic_checksum(0x20, &[0x01, 0x02, 0x03, 0x04]).unwrap();
        assert_eq!(frame.id(), 0x20);
        assert_eq!(frame.data(), &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(frame.checksum(), 0xF5);
        assert!(frame.verify());
    }

    #[test]
    fn test_lin_frame_id_rejected() {
        assert!(matches!(
            LinFrame::with_classic_checksum(0xFF, &[0x01]),
            Err(Error::InvalidIdentifier { id: 0xFF })
        ));
    }

    #[test]
    fn test_lin_frame_data_too_long() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        assert!(matches!(
            LinFrame::with_enhanced_checksum(0x10, &data),
            Err(Error::InvalidPayloadLength { len: 10 })
        ));
    }

    #[test]
    fn test_wire_bytes() {
        let frame = LinFrame::with_enhanced_checksum(0x12, &PATTERN).unwrap();
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = frame.write_wire_bytes(&mut buf);
        assert_eq!(len, MAX_FRAME_LEN);
        assert_eq!(
            buf,
            [0x55, 0x92, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x49]
        );
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_frame_roundtrip() {
        let original = LinFrame::with_enhanced_checksum(0x20, &[0x01, 0x02, 0x03, 0x04]).unwrap();
        let bytes = original.to_bytes();
        let parsed = LinFrame::from_wire_bytes(&bytes, ChecksumType::Enhanced).unwrap();

        assert_eq!(parsed.id(), original.id());
        assert_eq!(parsed.data(), original.data());
        assert_eq!(parsed.checksum(), original.checksum());
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn test_from_wire_rejects_corruption() {
        let frame = LinFrame::with_classic_checksum(0x35, &PATTERN).unwrap();
        let mut bytes = frame.to_bytes();

        assert!(matches!(
            LinFrame::from_wire_bytes(&bytes, ChecksumType::Enhanced),
            Err(Error::ChecksumMismatch { .. })
        ));

        bytes[0] = 0x00;
        assert!(matches!(
            LinFrame::from_wire_bytes(&bytes, ChecksumType::Classic),
            Err(Error::InvalidSyncByte(0x00))
        ));

        bytes[0] = SYNC_BYTE;
        bytes[1] ^= 0x40;
        assert!(matches!(
            LinFrame::from_wire_bytes(&bytes, ChecksumType::Classic),
            Err(Error::InvalidParity { .. })
        ));

        assert!(LinFrame::from_wire_bytes(&[0x55, 0xF0, 0xFF], ChecksumType::Classic).is_err());
    }

    #[test]
    fn test_from_wire_rejects_long_capture() {
        let mut capture = [0u8; 13];
        capture[0] = SYNC_BYTE;
        capture[1] = protected_id(0x10);
        for (i, b) in capture[2..12].iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        capture[12] = checksum(&capture[2..12]);

        assert!(matches!(
            LinFrame::from_wire_bytes(&capture, ChecksumType::Classic),
            Err(Error::InvalidPayloadLength { len: 10 })
        ));
    }

    #[test]
    fn test_from_wire_normalizes_header() {
        let sent = LinFrame::encode(
            0x12,
            &PATTERN,
            ChecksumType::Enhanced,
            HeaderVariant::BreakSyncId,
        )
        .unwrap();
        let mut buf = [0u8; MAX_FRAME_LEN];
        let len = sent.write_wire_bytes(&mut buf);

        let parsed = LinFrame::from_wire_bytes(&buf[..len], ChecksumType::Enhanced).unwrap();
        assert_eq!(parsed.header().variant(), HeaderVariant::BreakOnly);
        assert_eq!(parsed.data(), sent.data());
        assert_eq!(parsed.checksum(), 0x49);
        assert_ne!(parsed, sent);
    }
}
