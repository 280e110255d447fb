//! Sequenced frame construction.
//!
//! [`FrameBuilder`] is a caller-owned value that walks through
//! `AwaitingHeader -> AwaitingResponse -> Complete`. Each step hands back the bytes
//! for that phase, and a response can only be built once a header exists.

use crate::{Error, Result};

use super::checksum::ChecksumType;
use super::frame::LinFrame;
use super::header::{BreakTiming, Header, HeaderVariant, build_header_with};
use super::response::{Response, build_response};

/// Phase of a frame under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameState {
    /// No header built yet.
    AwaitingHeader,
    /// Header built, response pending.
    AwaitingResponse,
    /// Header and response built.
    Complete,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Empty,
    Header(Header),
    Complete(LinFrame),
}

/// Builds one LIN frame in header/response order.
///
/// ```
/// use lin_master::lin::{ChecksumType, FrameBuilder, HeaderVariant};
///
/// let mut builder = FrameBuilder::new();
/// let header = builder.header(0x12, HeaderVariant::BreakSync)?;
/// assert_eq!(header.pending_bytes(), &[0x92]);
///
/// let response = builder.response(&[1, 2, 3, 4, 5, 6, 7, 8], ChecksumType::Enhanced)?;
/// assert_eq!(response.checksum(), 0x49);
///
/// let frame = builder.finish()?;
/// assert!(frame.verify());
/// # Ok::<(), lin_master::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FrameBuilder {
    timing: BreakTiming,
    stage: Stage,
}

impl FrameBuilder {
    /// Builder using the LIN 2.x break timing.
    pub fn new() -> Self {
        Self::with_timing(BreakTiming::LIN_2X)
    }

    /// Builder using explicit break timing.
    pub fn with_timing(timing: BreakTiming) -> Self {
        Self {
            timing,
            stage: Stage::Empty,
        }
    }

    /// Current phase.
    pub fn state(&self) -> FrameState {
        match self.stage {
            Stage::Empty => FrameState::AwaitingHeader,
            Stage::Header(_) => FrameState::AwaitingResponse,
            Stage::Complete(_) => FrameState::Complete,
        }
    }

    fn ensure_state(&self, expected: FrameState) -> Result<()> {
        let state = self.state();
        if state != expected {
            return Err(Error::OutOfSequence { state, expected });
        }
        Ok(())
    }

    /// Build the header. Only valid before any header was built.
    pub fn header(&mut self, id: u8, variant: HeaderVariant) -> Result<Header> {
        self.ensure_state(FrameState::AwaitingHeader)?;
        let header = build_header_with(id, variant, self.timing)?;
        self.stage = Stage::Header(header);
        Ok(header)
    }

    /// Build the response for the header built before.
    ///
    /// A rejected payload leaves the builder waiting for a response.
    pub fn response(&mut self, payload: &[u8], checksum_type: ChecksumType) -> Result<Response> {
        let header = match self.stage {
            Stage::Header(header) => header,
            _ => {
                return Err(Error::OutOfSequence {
                    state: self.state(),
                    expected: FrameState::AwaitingResponse,
                });
            }
        };
        let response = build_response(payload, checksum_type, header.pid())?;
        self.stage = Stage::Complete(LinFrame::from_parts(header, response));
        Ok(response)
    }

    /// Take the completed frame and reset the builder for the next one.
    pub fn finish(&mut self) -> Result<LinFrame> {
        match self.stage {
            Stage::Complete(frame) => {
                self.stage = Stage::Empty;
                Ok(frame)
            }
            _ => Err(Error::OutOfSequence {
                state: self.state(),
                expected: FrameState::Complete,
            }),
        }
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.stage = Stage::Empty;
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn test_full_sequence() {
        let mut builder = FrameBuilder::new();
        assert_eq!(builder.state(), FrameState::AwaitingHeader);

        builder.header(0x35, HeaderVariant::BreakSyncId).unwrap();
        assert_eq!(builder.state(), FrameState::AwaitingResponse);

        let response = builder.response(&PATTERN, ChecksumType::Classic).unwrap();
        assert_eq!(response.checksum(), 0xDB);
        assert_eq!(builder.state(), FrameState::Complete);

        let frame = builder.finish().unwrap();
        assert_eq!(frame.id(), 0x35);
        assert_eq!(builder.state(), FrameState::AwaitingHeader);
    }

    #[test]
    fn test_response_before_header() {
        let mut builder = FrameBuilder::new();
        assert!(matches!(
            builder.response(&PATTERN, ChecksumType::Classic),
            Err(Error::OutOfSequence {
                state: FrameState::AwaitingHeader,
                expected: FrameState::AwaitingResponse,
            })
        ));
    }

    #[test]
    fn test_second_header_rejected() {
        let mut builder = FrameBuilder::new();
        builder.header(0x01, HeaderVariant::BreakOnly).unwrap();
        assert!(matches!(
            builder.header(0x02, HeaderVariant::BreakOnly),
            Err(Error::OutOfSequence { .. })
        ));
    }

    #[test]
    fn test_finish_requires_response() {
        let mut builder = FrameBuilder::new();
        builder.header(0x01, HeaderVariant::BreakOnly).unwrap();
        assert!(builder.finish().is_err());
        builder.reset();
        assert_eq!(builder.state(), FrameState::AwaitingHeader);
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let mut builder = FrameBuilder::new();
        assert!(builder.header(0x40, HeaderVariant::BreakOnly).is_err());
        assert_eq!(builder.state(), FrameState::AwaitingHeader);

        builder.header(0x10, HeaderVariant::BreakOnly).unwrap();
        assert!(builder.response(&[], ChecksumType::Classic).is_err());
        assert_eq!(builder.state(), FrameState::AwaitingResponse);
    }

    #[test]
    fn test_enhanced_checksum_uses_header_pid() {
        for variant in [
            HeaderVariant::BreakOnly,
            HeaderVariant::BreakSync,
            HeaderVariant::BreakSyncId,
        ] {
            let mut builder = FrameBuilder::new();
            builder.header(0x12, variant).unwrap();
            let response = builder.response(&PATTERN, ChecksumType::Enhanced).unwrap();
            assert_eq!(response.checksum(), 0x49, "{variant:?}");
        }
    }
}
